//! Deterministic hashing for sticky variant assignment.
//!
//! This module intentionally does **not** provide cryptographic guarantees; it is meant for
//! repeatable bucketing of identifiers so the same user lands on the same arm across sessions.

/// Deterministic (non-crypto) 32-bit stable hash of an identifier.
///
/// Implementation:
/// - djb2-style accumulation (`h = (h << 5) - h + unit`, i.e. multiply by 31 and add)
///   over the **UTF-16 code units** of the input
/// - arithmetic on a wrapping 32-bit signed accumulator; the overflow behavior is
///   part of the contract, since the output distribution depends on it
/// - returns the absolute value, promoted to `u32` so `i32::MIN` stays representable
///
/// The empty string hashes to 0.
///
/// # Example
///
/// ```rust
/// use kumi::hash32;
///
/// assert_eq!(hash32(""), 0);
/// assert_eq!(hash32("a"), 97);
/// assert_eq!(hash32("user123"), 147_178_873);
/// ```
#[must_use]
pub fn hash32(s: &str) -> u32 {
    let mut h: i32 = 0;
    for unit in s.encode_utf16() {
        h = (h << 5).wrapping_sub(h).wrapping_add(i32::from(unit));
    }
    h.unsigned_abs()
}
