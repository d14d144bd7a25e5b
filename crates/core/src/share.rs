//! Share-link construction.
//!
//! Result links look like `https://{host}/result/{result_id}?c={params}`,
//! where `params` is the JSON object `{a, l, qu, ru, d}` (answer, language,
//! poster id, requester id, direct flag) encoded as unpadded URL-safe
//! base64. All wire values are strings, as produced by the browser app.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::assigner::parse_persona_id;
use crate::error::CoreError;
use crate::locale::Locale;
use crate::types::EntityId;

/// Query parameter carrying the compressed share parameters.
pub const COMPRESSED_PARAM: &str = "c";

/// Optional context travelling with a result link.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareParams {
    pub answer: Option<String>,
    pub lang: Option<Locale>,
    pub quiz_user_id: Option<EntityId>,
    pub reply_user_id: Option<EntityId>,
    /// Set when the visitor arrived from inside the app rather than a shared link.
    pub direct: bool,
}

impl ShareParams {
    pub fn is_empty(&self) -> bool {
        self == &ShareParams::default()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct WireParams {
    a: String,
    l: String,
    qu: String,
    ru: String,
    d: String,
}

impl From<&ShareParams> for WireParams {
    fn from(params: &ShareParams) -> Self {
        let id = |v: Option<EntityId>| v.map(|id| id.to_string()).unwrap_or_default();
        Self {
            a: params.answer.clone().unwrap_or_default(),
            l: params.lang.map(|l| l.as_str().to_string()).unwrap_or_default(),
            qu: id(params.quiz_user_id),
            ru: id(params.reply_user_id),
            d: if params.direct { "1".to_string() } else { String::new() },
        }
    }
}

impl From<WireParams> for ShareParams {
    fn from(wire: WireParams) -> Self {
        Self {
            answer: Some(wire.a).filter(|a| !a.is_empty()),
            lang: Locale::parse(&wire.l),
            quiz_user_id: parse_persona_id(&wire.qu),
            reply_user_id: parse_persona_id(&wire.ru),
            direct: wire.d == "1",
        }
    }
}

/// Encode share parameters into the compact `c` value.
pub fn compress_params(params: &ShareParams) -> Result<String, CoreError> {
    let json = serde_json::to_vec(&WireParams::from(params))
        .map_err(|e| CoreError::Internal(format!("Failed to serialize share params: {e}")))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a `c` value. Trailing `=` padding is tolerated.
pub fn expand_params(encoded: &str) -> Result<ShareParams, CoreError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded.trim().trim_end_matches('='))
        .map_err(|e| CoreError::Validation(format!("Share params are not valid base64: {e}")))?;
    let wire: WireParams = serde_json::from_slice(&bytes)
        .map_err(|e| CoreError::Validation(format!("Share params are not valid JSON: {e}")))?;
    Ok(wire.into())
}

/// Build the shareable URL of a result.
///
/// Hosts containing `localhost` get `http`, everything else `https`.
/// Without any parameters the bare result URL is returned.
pub fn result_url(host: &str, result_id: &str, params: &ShareParams) -> Result<String, CoreError> {
    let scheme = if host.contains("localhost") {
        "http"
    } else {
        "https"
    };
    let base = format!("{scheme}://{host}/result/{result_id}");

    if params.is_empty() {
        return Ok(base);
    }
    Ok(format!(
        "{base}?{COMPRESSED_PARAM}={}",
        compress_params(params)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn sample() -> ShareParams {
        ShareParams {
            answer: Some("出島は厳しく管理されていたわ".to_string()),
            lang: Some(Locale::Ja),
            quiz_user_id: Some(3),
            reply_user_id: Some(4),
            direct: false,
        }
    }

    #[test]
    fn compressed_params_expand_to_the_same_values() {
        let encoded = compress_params(&sample()).unwrap();
        assert_eq!(expand_params(&encoded).unwrap(), sample());
    }

    #[test]
    fn compressed_value_is_query_safe() {
        let encoded = compress_params(&sample()).unwrap();
        assert!(encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn expands_padded_browser_output() {
        // base64url of {"a":"","l":"en","qu":"2","ru":"5","d":"1"} with padding kept.
        let json = br#"{"a":"","l":"en","qu":"2","ru":"5","d":"1"}"#;
        let padded = base64::engine::general_purpose::URL_SAFE.encode(json);
        let params = expand_params(&padded).unwrap();

        assert_eq!(params.answer, None);
        assert_eq!(params.lang, Some(Locale::En));
        assert_eq!(params.quiz_user_id, Some(2));
        assert_eq!(params.reply_user_id, Some(5));
        assert!(params.direct);
    }

    #[test]
    fn missing_and_garbage_fields_are_absent() {
        let encoded = URL_SAFE_NO_PAD.encode(br#"{"qu":"abc","l":"fr"}"#);
        let params = expand_params(&encoded).unwrap();
        assert_eq!(params.quiz_user_id, None);
        assert_eq!(params.lang, None);
        assert!(params.is_empty());
    }

    #[test]
    fn rejects_invalid_base64() {
        assert_matches!(expand_params("!!!"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_non_json_payload() {
        let encoded = URL_SAFE_NO_PAD.encode(b"not json");
        assert_matches!(expand_params(&encoded), Err(CoreError::Validation(_)));
    }

    #[test]
    fn bare_url_without_params() {
        let url = result_url("localhost:3000", "7-2-85-loyw3v28", &ShareParams::default()).unwrap();
        assert_eq!(url, "http://localhost:3000/result/7-2-85-loyw3v28");
    }

    #[test]
    fn public_hosts_use_https_and_compressed_params() {
        let url = result_url("grokmind.example", "7-2-85-loyw3v28", &sample()).unwrap();
        let prefix = "https://grokmind.example/result/7-2-85-loyw3v28?c=";
        assert!(url.starts_with(prefix), "unexpected url: {url}");
        assert_eq!(expand_params(&url[prefix.len()..]).unwrap(), sample());
    }
}
