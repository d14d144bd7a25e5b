/// Quiz, style and persona identifiers.
pub type EntityId = i64;

/// Unix epoch milliseconds.
pub type TimestampMillis = u64;
