//! Display locale and its resolution from several prioritized sources.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ja,
    #[default]
    En,
}

impl Locale {
    /// Parse a language code or BCP-47 tag (`ja`, `ja-JP`, `en_US`).
    ///
    /// Only the primary subtag is considered, case-insensitively.
    pub fn parse(tag: &str) -> Option<Self> {
        let primary = tag.trim().split(|c: char| c == '-' || c == '_').next()?;
        match primary.to_ascii_lowercase().as_str() {
            "ja" => Some(Locale::Ja),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Ja => "ja",
            Locale::En => "en",
        }
    }

    /// The boolean locale flag used when picking display strings.
    pub fn is_japanese(self) -> bool {
        self == Locale::Ja
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::parse(s).ok_or_else(|| {
            CoreError::Validation(format!("Unsupported locale '{s}'. Valid locales: ja, en"))
        })
    }
}

/// Pick the first source that names a supported locale.
///
/// `sources` is ordered from highest to lowest precedence; absent and
/// unparseable entries are skipped. Evaluated once per request.
///
/// # Examples
///
/// ```
/// use grokmind_core::locale::{resolve_locale, Locale};
///
/// let locale = resolve_locale(&[None, Some("fr"), Some("ja-JP")], Locale::En);
/// assert_eq!(locale, Locale::Ja);
/// ```
pub fn resolve_locale(sources: &[Option<&str>], fallback: Locale) -> Locale {
    sources
        .iter()
        .flatten()
        .find_map(|tag| Locale::parse(tag))
        .unwrap_or(fallback)
}

/// The first language tag of an `Accept-Language` header value, without its
/// quality weight.
pub fn primary_accept_language(header: &str) -> Option<&str> {
    header
        .split(',')
        .next()
        .and_then(|entry| entry.split(';').next())
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
}
