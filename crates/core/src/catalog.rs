//! Static trivia prompts, answer styles, and the persona roster.
//!
//! The catalog is read-only after load. A default catalog is bundled with
//! the crate; deployments may replace it with their own JSON file of the
//! same shape.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::locale::Locale;
use crate::persona::Roster;
use crate::types::EntityId;

/// The catalog bundled with this crate.
pub const BUNDLED_CATALOG: &str = include_str!("../data/catalog.json");

/// A trivia claim the player is asked to fact-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizItem {
    pub id: EntityId,
    pub content_ja: String,
    pub content_en: String,
}

impl QuizItem {
    pub fn content(&self, locale: Locale) -> &str {
        if locale.is_japanese() {
            &self.content_ja
        } else {
            &self.content_en
        }
    }
}

/// A persona/tone the answer must be written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleVariation {
    pub id: EntityId,
    pub name_ja: String,
    pub name_en: String,
    pub description_ja: String,
    pub description_en: String,
}

impl StyleVariation {
    pub fn name(&self, locale: Locale) -> &str {
        if locale.is_japanese() {
            &self.name_ja
        } else {
            &self.name_en
        }
    }

    pub fn description(&self, locale: Locale) -> &str {
        if locale.is_japanese() {
            &self.description_ja
        } else {
            &self.description_en
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    #[serde(rename = "personas")]
    roster: Roster,
    quizzes: Vec<QuizItem>,
    styles: Vec<StyleVariation>,
}

impl Catalog {
    /// Parse a catalog from JSON (`{ "personas": [...], "quizzes": [...], "styles": [...] }`).
    ///
    /// The persona list must form a valid [`Roster`].
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json)
            .map_err(|e| CoreError::Validation(format!("Invalid catalog: {e}")))
    }

    /// The catalog shipped with the crate.
    pub fn bundled() -> Result<Self, CoreError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn quizzes(&self) -> &[QuizItem] {
        &self.quizzes
    }

    pub fn styles(&self) -> &[StyleVariation] {
        &self.styles
    }

    pub fn find_quiz(&self, id: EntityId) -> Result<&QuizItem, CoreError> {
        self.quizzes
            .iter()
            .find(|q| q.id == id)
            .ok_or(CoreError::NotFound { entity: "Quiz", id })
    }

    pub fn find_style(&self, id: EntityId) -> Result<&StyleVariation, CoreError> {
        self.styles
            .iter()
            .find(|s| s.id == id)
            .ok_or(CoreError::NotFound { entity: "Style", id })
    }
}
