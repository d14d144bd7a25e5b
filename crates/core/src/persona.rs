//! Virtual personas and the fixed roster they are drawn from.
//!
//! The roster is loaded once and never mutated; every assignment is derived
//! from it by pure lookup.

use serde::{Deserialize, Serialize};

use crate::assigner::PairTable;
use crate::error::AssignmentError;
use crate::locale::Locale;
use crate::types::EntityId;

/// Id of the responder persona. Never part of the roster.
pub const GROK_PERSONA_ID: EntityId = 0;

/// A predefined display identity used to stage the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualPersona {
    pub id: EntityId,
    pub name_ja: String,
    pub name_en: String,
    pub handle: String,
    pub avatar_color: String,
}

impl VirtualPersona {
    pub fn display_name(&self, locale: Locale) -> &str {
        if locale.is_japanese() {
            &self.name_ja
        } else {
            &self.name_en
        }
    }

    /// Flatten this persona into its single-locale view.
    pub fn localize(&self, locale: Locale) -> LocalizedPersona {
        LocalizedPersona {
            id: self.id,
            name: self.display_name(locale).to_string(),
            handle: self.handle.clone(),
            avatar_color: self.avatar_color.clone(),
        }
    }
}

/// A persona with its display name already chosen for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedPersona {
    pub id: EntityId,
    pub name: String,
    pub handle: String,
    pub avatar_color: String,
}

/// The responder that answers every fact-check request.
pub fn grok_persona() -> VirtualPersona {
    VirtualPersona {
        id: GROK_PERSONA_ID,
        name_ja: "Grok".to_string(),
        name_en: "Grok".to_string(),
        handle: "grok".to_string(),
        avatar_color: "#1d9bf0".to_string(),
    }
}

/// The validated, immutable persona roster.
///
/// Ids always run `1..=N` with `N >= 2`, so every pair in
/// [`Roster::pair_table`] names two existing, distinct personas.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<VirtualPersona>")]
pub struct Roster {
    personas: Vec<VirtualPersona>,
    pairs: PairTable,
}

impl Roster {
    /// Build a roster, ordering personas by id.
    pub fn new(mut personas: Vec<VirtualPersona>) -> Result<Self, AssignmentError> {
        personas.sort_by_key(|p| p.id);

        for (expected, persona) in (1..).zip(&personas) {
            if persona.id != expected {
                return Err(AssignmentError::NonContiguousIds {
                    expected_max: personas.len(),
                    found: persona.id,
                });
            }
        }

        let pairs = PairTable::cyclic(personas.len())?;
        Ok(Self { personas, pairs })
    }

    /// Look up a persona by id.
    pub fn get(&self, id: EntityId) -> Result<&VirtualPersona, AssignmentError> {
        id.checked_sub(1)
            .and_then(|index| usize::try_from(index).ok())
            .and_then(|index| self.personas.get(index))
            .ok_or(AssignmentError::UnknownPersonaId(id))
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    /// Always `false`; a roster holds at least two personas.
    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    pub fn personas(&self) -> &[VirtualPersona] {
        &self.personas
    }

    /// The cyclic candidate pairs for this roster's size.
    pub fn pair_table(&self) -> &PairTable {
        &self.pairs
    }
}

impl TryFrom<Vec<VirtualPersona>> for Roster {
    type Error = AssignmentError;

    fn try_from(personas: Vec<VirtualPersona>) -> Result<Self, Self::Error> {
        Roster::new(personas)
    }
}
