use crate::types::EntityId;

/// A result identifier that cannot be unpacked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("Malformed result id '{id}': {reason}")]
    Malformed { id: String, reason: String },
}

/// Persona roster and assignment failures.
///
/// These indicate configuration or data-integrity problems, not bad user
/// input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentError {
    #[error("Unknown persona id: {0}")]
    UnknownPersonaId(EntityId),

    #[error("Roster needs at least 2 personas, got {0}")]
    RosterTooSmall(usize),

    #[error("Roster of {0} personas exceeds the id range")]
    RosterTooLarge(usize),

    #[error("Roster ids must run 1..={expected_max} without gaps, found {found}")]
    NonContiguousIds {
        expected_max: usize,
        found: EntityId,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: EntityId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    #[error("Internal error: {0}")]
    Internal(String),
}
