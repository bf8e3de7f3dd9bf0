//! Debug-assertion macros for the ring protocol's invariants.
//!
//! Only active in debug builds (`#[cfg(debug_assertions)]`), so there is
//! zero overhead in release builds: cursors stay within the data area,
//! padding never exceeds 3 bytes, and a reservation never makes the ring
//! appear both full and non-full.

// =============================================================================
// INV-RING-01: Offsets stay within the data area
// =============================================================================

/// Assert that a cursor (`head` or `tail`) is within `[0, data_bytes)`.
///
/// Used in: `reserve`, `peek`, after computing a new offset.
macro_rules! debug_assert_offset_in_range {
    ($name:literal, $offset:expr, $data_bytes:expr) => {
        debug_assert!(
            $offset < $data_bytes,
            "INV-RING-01 violated: {} offset {} outside data area of {} bytes",
            $name,
            $offset,
            $data_bytes
        )
    };
}

// =============================================================================
// INV-RING-02: Full state is never exceeded
// =============================================================================

/// Assert that one slot is always kept free: `(tail + 1) & mask != head`
/// unless the ring is exactly full (the one state where equality is the
/// defined "full" predicate, not a violation).
///
/// Used in: `reserve`, right after computing `new_tail`, to catch a
/// reservation that would make the ring appear both full and non-full.
macro_rules! debug_assert_not_overfull {
    ($new_tail:expr, $head:expr, $mask:expr) => {
        debug_assert!(
            ($new_tail & $mask) != $head || $new_tail == $head,
            "INV-RING-02 violated: reservation would overrun head at {}",
            $head
        )
    };
}

// =============================================================================
// INV-RING-03: Padding is always 0..=3
// =============================================================================

/// Assert that computed alignment padding never exceeds 3 bytes.
///
/// Used in: `reserve`, `peek`, right after `offset & ITEM_LEN_MASK`.
macro_rules! debug_assert_padding_bounded {
    ($padding:expr) => {
        debug_assert!(
            $padding <= 3,
            "INV-RING-03 violated: padding {} exceeds 3 bytes",
            $padding
        )
    };
}

// =============================================================================
// INV-RING-04: Pointer validity
// =============================================================================

/// Assert that a raw base pointer into the backing region is not null.
macro_rules! debug_assert_valid_base_ptr {
    ($ptr:expr) => {
        debug_assert!(!$ptr.is_null(), "INV-RING-04 violated: null region base pointer")
    };
}

pub(crate) use debug_assert_not_overfull;
pub(crate) use debug_assert_offset_in_range;
pub(crate) use debug_assert_padding_bounded;
pub(crate) use debug_assert_valid_base_ptr;
