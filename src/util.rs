//! Small bit-twiddling helpers shared by the mapper and config layers.
//!
//! Ported from `RoundPowerOfTwo`/`IsPowerOfTwo` in the original
//! `spscqueue` (Go) this crate's protocol was distilled from.

use crate::layout::MIN_QUEUE_BYTES;

/// Returns true if `n` is a power of two (zero is not a power of two).
#[inline]
#[must_use]
pub const fn is_power_of_two(n: u64) -> bool {
    n > 0 && (n & (n - 1)) == 0
}

/// Rounds `n` up to the nearest power of two that is also at least
/// [`MIN_QUEUE_BYTES`].
///
/// This mirrors the original's `RoundPowerOfTwo`: values already a power of
/// two (and above the floor) pass through unchanged.
#[inline]
#[must_use]
pub const fn round_up_pow2(n: u64) -> u64 {
    if n < MIN_QUEUE_BYTES {
        return MIN_QUEUE_BYTES;
    }
    if is_power_of_two(n) {
        return n;
    }
    // n.leading_zeros() is const-stable; 1 << (64 - lz) is the next power of two.
    let lz = n.leading_zeros();
    1u64 << (64 - lz)
}
