//! Power-of-two arithmetic for pyramid level indexing.
//!
//! Pyramid level 0 is 8px and each subsequent level doubles, so the raw index
//! of a requested dimension is `log2(next_power_of_2(n)) - 3`. The raw value
//! is signed and may be negative for dimensions below 8; callers always go
//! through [`clamped_level_index`], which clamps into the pyramid bounds
//! before any unsigned arithmetic happens.

/// Smallest power-of-two size a pyramid ever contains.
pub const MIN_LEVEL_SIZE: u32 = 8;

const MIN_LEVEL_LOG2: i64 = 3; // log2(MIN_LEVEL_SIZE)

/// Smallest power of two `>= n`.
///
/// `n = 0` maps to 1 so the result is never 0 and never a bad log2 input.
/// Values above `2^31` saturate to `2^31` (no larger power fits in `u32`).
pub fn next_power_of_2(n: u32) -> u32 {
    n.max(1).checked_next_power_of_two().unwrap_or(1 << 31)
}

/// Raw pyramid index for a requested pixel dimension, unclamped.
///
/// Negative for `n < 8`; never used directly for indexing.
pub fn level_index(n: u32) -> i64 {
    i64::from(next_power_of_2(n).trailing_zeros()) - MIN_LEVEL_LOG2
}

/// Pyramid index for a requested dimension, clamped into `[0, len - 1]`.
///
/// `len` must be non-zero.
pub fn clamped_level_index(n: u32, len: usize) -> usize {
    debug_assert!(len > 0, "clamped_level_index called with empty pyramid");
    let max = len.saturating_sub(1) as i64;
    level_index(n).clamp(0, max) as usize
}
