//! Integer parsing with browser `parseInt` semantics.
//!
//! Result ids and persona ids travel through links that people paste into
//! posts and chats, so trailing punctuation is common. A field is read as
//! its longest leading run of digits; it only fails when that run is empty.

/// Why a field yielded no integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LeadingIntError {
    #[error("no leading digits")]
    NoDigits,

    #[error("value out of range")]
    OutOfRange,
}

/// Parse the leading integer of `raw` in `radix` (2..=36).
///
/// Leading whitespace and a single `+`/`-` sign are accepted. Everything
/// after the digit run is ignored.
///
/// # Examples
///
/// ```
/// use grokmind_core::numeric::parse_leading;
///
/// assert_eq!(parse_leading::<i64>("12abc", 10), Ok(12));
/// assert_eq!(parse_leading::<u64>("loyw3v28)", 36), Ok(1_700_000_000_000));
/// ```
pub fn parse_leading<T>(raw: &str, radix: u32) -> Result<T, LeadingIntError>
where
    T: TryFrom<i128>,
{
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let end = unsigned
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];
    if digits.is_empty() {
        return Err(LeadingIntError::NoDigits);
    }

    let magnitude =
        i128::from_str_radix(digits, radix).map_err(|_| LeadingIntError::OutOfRange)?;
    let value = if negative { -magnitude } else { magnitude };
    T::try_from(value).map_err(|_| LeadingIntError::OutOfRange)
}
