//! Result identifier codec.
//!
//! A result id packs `{quiz_id, style_id, score, timestamp}` into a single
//! URL-path-safe token: three decimal fields and a lowercase base-36
//! timestamp joined by `-`, e.g. `7-2-85-loyw3v28`. The id is the only
//! record of a scored attempt; decoding it must reproduce exactly what was
//! encoded.
//!
//! Behaviour at the edges:
//!
//! - Fields after the fourth are ignored on decode.
//! - Each field is read as its leading digits, so `"12abc"` is `12` and a
//!   link pasted as `7-2-85-loyw3v28)` still opens. A field with no leading
//!   digits is malformed.
//! - Negative values are not supported. Their leading `-` collides with the
//!   delimiter, so such ids decode as [`DecodeError::Malformed`].
//! - The codec does not check that quiz or style ids exist, nor that the
//!   score lies in [`SCORE_MIN`]`..=`[`SCORE_MAX`].

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::numeric::parse_leading;
use crate::types::{EntityId, TimestampMillis};

/// Field separator. Never produced by decimal or base-36 rendering of
/// non-negative numbers.
pub const DELIMITER: char = '-';

/// Lowest score the scoring collaborator produces.
pub const SCORE_MIN: i64 = 0;

/// Highest score the scoring collaborator produces.
pub const SCORE_MAX: i64 = 100;

const TIMESTAMP_RADIX: u32 = 36;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Minimum number of delimiter-separated fields in a valid id.
const FIELD_COUNT: usize = 4;

/// A scored trivia attempt as carried by its result id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredResult {
    pub quiz_id: EntityId,
    pub style_id: EntityId,
    pub score: i64,
    pub timestamp: TimestampMillis,
}

impl ScoredResult {
    pub fn new(
        quiz_id: EntityId,
        style_id: EntityId,
        score: i64,
        timestamp: TimestampMillis,
    ) -> Self {
        Self {
            quiz_id,
            style_id,
            score,
            timestamp,
        }
    }

    /// The result id for this attempt.
    pub fn result_id(&self) -> String {
        encode_at(self.quiz_id, self.style_id, self.score, self.timestamp)
    }
}

/// Current wall-clock time in Unix milliseconds.
///
/// Clocks set before 1970 report `0`.
pub fn now_millis() -> TimestampMillis {
    TimestampMillis::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Encode a result id stamped with the current time.
pub fn encode(quiz_id: EntityId, style_id: EntityId, score: i64) -> String {
    encode_at(quiz_id, style_id, score, now_millis())
}

/// Encode a result id with an explicit timestamp.
///
/// # Examples
///
/// ```
/// use grokmind_core::result_id::encode_at;
///
/// assert_eq!(encode_at(7, 2, 85, 1_700_000_000_000), "7-2-85-loyw3v28");
/// ```
pub fn encode_at(
    quiz_id: EntityId,
    style_id: EntityId,
    score: i64,
    timestamp: TimestampMillis,
) -> String {
    format!(
        "{quiz_id}{DELIMITER}{style_id}{DELIMITER}{score}{DELIMITER}{}",
        to_base36(timestamp)
    )
}

/// Decode a result id back into its fields.
pub fn decode(id: &str) -> Result<ScoredResult, DecodeError> {
    let fields: Vec<&str> = id.split(DELIMITER).collect();
    if fields.len() < FIELD_COUNT {
        return Err(malformed(
            id,
            format!(
                "expected at least {FIELD_COUNT} fields, found {}",
                fields.len()
            ),
        ));
    }

    let quiz_id: EntityId = parse_field(id, "quiz_id", fields[0], 10)?;
    let style_id: EntityId = parse_field(id, "style_id", fields[1], 10)?;
    let score: i64 = parse_field(id, "score", fields[2], 10)?;
    let timestamp: TimestampMillis = parse_field(id, "timestamp", fields[3], TIMESTAMP_RADIX)?;

    Ok(ScoredResult {
        quiz_id,
        style_id,
        score,
        timestamp,
    })
}

fn parse_field<T>(id: &str, field: &str, raw: &str, radix: u32) -> Result<T, DecodeError>
where
    T: TryFrom<i128>,
{
    parse_leading(raw, radix).map_err(|e| malformed(id, format!("{field} '{raw}': {e}")))
}

fn malformed(id: &str, reason: String) -> DecodeError {
    DecodeError::Malformed {
        id: id.to_string(),
        reason,
    }
}

fn to_base36(mut value: TimestampMillis) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let radix = TimestampMillis::from(TIMESTAMP_RADIX);
    let mut digits = Vec::new();
    while value > 0 {
        // `value % radix < 36`, always a valid index.
        digits.push(BASE36_DIGITS[(value % radix) as usize]);
        value /= radix;
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    // -- encode --

    #[test]
    fn encodes_known_scenario() {
        assert_eq!(encode_at(7, 2, 85, 1_700_000_000_000), "7-2-85-loyw3v28");
    }

    #[test]
    fn zero_timestamp_renders_single_digit() {
        assert_eq!(encode_at(1, 1, 0, 0), "1-1-0-0");
    }

    #[test]
    fn encoded_id_is_url_path_safe() {
        let id = encode_at(30, 9, 100, u64::MAX);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase() || c == DELIMITER));
    }

    #[test]
    fn encode_uses_current_clock() {
        let before = now_millis();
        let decoded = decode(&encode(3, 4, 50)).unwrap();
        let after = now_millis();

        assert!(decoded.timestamp >= before && decoded.timestamp <= after);
        assert_eq!((decoded.quiz_id, decoded.style_id, decoded.score), (3, 4, 50));
    }

    // -- decode --

    #[test]
    fn decodes_known_scenario() {
        let result = decode(&encode_at(7, 2, 85, 1_700_000_000_000)).unwrap();
        assert_eq!(result, ScoredResult::new(7, 2, 85, 1_700_000_000_000));
    }

    #[test]
    fn round_trips_extremes() {
        for result in [
            ScoredResult::new(0, 0, 0, 0),
            ScoredResult::new(1, 1, 100, 35),
            ScoredResult::new(i64::MAX, i64::MAX, 250, u64::MAX),
        ] {
            assert_eq!(decode(&result.result_id()).unwrap(), result);
        }
    }

    #[test]
    fn empty_string_is_malformed() {
        assert_matches!(decode(""), Err(DecodeError::Malformed { .. }));
    }

    #[test]
    fn single_field_is_malformed() {
        assert_matches!(decode("abc"), Err(DecodeError::Malformed { .. }));
    }

    #[test]
    fn too_few_fields_is_malformed() {
        let err = decode("1-2").unwrap_err();
        assert_matches!(&err, DecodeError::Malformed { reason, .. } if reason.contains("found 2"));
    }

    #[test]
    fn non_numeric_field_is_malformed() {
        assert_matches!(decode("x-2-85-loyw3v28"), Err(DecodeError::Malformed { .. }));
        assert_matches!(decode("7-2-eighty-loyw3v28"), Err(DecodeError::Malformed { .. }));
    }

    #[test]
    fn decimal_field_reads_leading_digits() {
        let result = decode("12abc-2-85-loyw3v28").unwrap();
        assert_eq!(result, ScoredResult::new(12, 2, 85, 1_700_000_000_000));
    }

    #[test]
    fn leading_whitespace_in_field_is_skipped() {
        assert_eq!(decode("7-2- 85-loyw3v28").unwrap().score, 85);
    }

    #[test]
    fn trailing_punctuation_after_timestamp_is_ignored() {
        let result = decode("7-2-85-loyw3v28)").unwrap();
        assert_eq!(result, ScoredResult::new(7, 2, 85, 1_700_000_000_000));
    }

    #[test]
    fn field_without_leading_digits_is_malformed() {
        assert_matches!(decode("7-2-85-!loyw3v28"), Err(DecodeError::Malformed { .. }));
        assert_matches!(decode("7-2-85-"), Err(DecodeError::Malformed { .. }));
    }

    #[test]
    fn timestamp_beyond_u64_is_malformed() {
        assert_matches!(
            decode("7-2-85-3w5e11264sgsg"),
            Err(DecodeError::Malformed { reason, .. }) if reason.contains("out of range")
        );
    }

    #[test]
    fn extra_fields_are_ignored() {
        let result = decode("7-2-85-loyw3v28-ja-whatever").unwrap();
        assert_eq!(result, ScoredResult::new(7, 2, 85, 1_700_000_000_000));
    }

    #[test]
    fn negative_score_does_not_round_trip() {
        let id = encode_at(7, 2, -5, 1_700_000_000_000);
        assert_eq!(id, "7-2--5-loyw3v28");
        assert_matches!(decode(&id), Err(DecodeError::Malformed { .. }));
    }

    #[test]
    fn out_of_range_score_is_transported_unchanged() {
        let result = ScoredResult::new(7, 2, 140, 1);
        assert_eq!(decode(&result.result_id()).unwrap().score, 140);
    }
}
