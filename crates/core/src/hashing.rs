//! Deterministic string hashing for seed-based selection.
//!
//! The hash must agree with the browser front end bit for bit, so it walks
//! UTF-16 code units (what `charCodeAt` yields) and accumulates in a wrapping
//! 32-bit signed integer. It is not a cryptographic hash.

/// Compute the rolling `hash * 31 + unit` hash of `seed`.
///
/// Returns the absolute value of the final signed 32-bit accumulator;
/// `i32::MIN` maps to `2^31`, which is why the result is a `u32`.
///
/// # Examples
///
/// ```
/// use grokmind_core::hashing::hash_seed;
///
/// assert_eq!(hash_seed(""), 0);
/// assert_eq!(hash_seed("abc"), 96_354);
/// ```
pub fn hash_seed(seed: &str) -> u32 {
    seed.encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}
