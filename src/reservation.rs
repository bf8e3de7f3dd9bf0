//! The write guard returned by [`crate::Ring::reserve`] and the read guard
//! returned by [`crate::Ring::peek`].
//!
//! Each guard is a borrowed slice plus a back-reference to the ring,
//! consumed by its `commit`/`release` method. `PeekGuard` mirrors
//! `Reservation` for the read side, since this byte-oriented protocol needs
//! to unwind framing on release just as the write side needs to publish it
//! on commit.

use crate::error::RingError;
use crate::ring::Ring;

/// A writable slice reserved within the ring's data area, along with the
/// bookkeeping needed to publish it.
///
/// Fill the slice (via [`Reservation::as_mut_slice`]) and call
/// [`Reservation::commit`] to make the record visible to the consumer. If
/// the reservation is dropped without committing, the produced record is
/// simply never published — the tail is not advanced, so the next
/// `reserve` call reuses the same offset.
pub struct Reservation<'a> {
    ring: &'a Ring,
    slice: &'a mut [u8],
    cur_tail: u64,
    new_tail: u64,
}

impl<'a> Reservation<'a> {
    pub(crate) fn new(ring: &'a Ring, slice: &'a mut [u8], cur_tail: u64, new_tail: u64) -> Self {
        Self {
            ring,
            slice,
            cur_tail,
            new_tail,
        }
    }

    /// The reserved byte slice, ready to be written into in place.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        self.slice
    }

    /// The number of bytes reserved (equal to the `need` passed to
    /// `reserve`).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slice.len()
    }

    /// Returns true if this reservation is zero bytes, which cannot happen
    /// through the public API (`reserve(0)` is rejected) but is provided
    /// for API symmetry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slice.is_empty()
    }

    /// Publishes this reservation: compare-and-swaps `tail` from the value
    /// observed at reserve time to the new tail past this record.
    ///
    /// Fails with [`RingError::CommitProduceFail`] only if the CAS loses,
    /// which under the single-producer contract indicates a second
    /// concurrent producer rather than ordinary contention.
    pub fn commit(self) -> Result<(), RingError> {
        self.ring.commit_produce(self.cur_tail, self.new_tail)
    }
}

/// A read-only view of the next record, along with the bookkeeping needed
/// to advance past it.
///
/// Read the payload (via [`PeekGuard::as_slice`]) and call
/// [`PeekGuard::release`] once done to make the space available for reuse.
/// Dropping without releasing leaves `head` unchanged, so the same record is
/// returned again by the next `peek`.
pub struct PeekGuard<'a> {
    ring: &'a Ring,
    slice: &'a [u8],
    cur_head: u64,
    new_head: u64,
}

impl<'a> PeekGuard<'a> {
    pub(crate) fn new(ring: &'a Ring, slice: &'a [u8], cur_head: u64, new_head: u64) -> Self {
        Self {
            ring,
            slice,
            cur_head,
            new_head,
        }
    }

    /// The next record's payload bytes.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        self.slice
    }

    /// The payload length in bytes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slice.len()
    }

    /// Returns true if the payload is zero bytes, which cannot happen
    /// through the public API (length-prefix `0` is the sentinel, never a
    /// real record) but is provided for API symmetry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slice.is_empty()
    }

    /// Releases this record: compare-and-swaps `head` from the value
    /// observed at peek time to the new head past this record.
    ///
    /// Fails with [`RingError::CommitConsumeFail`] only if the CAS loses,
    /// which under the single-consumer contract indicates a second
    /// concurrent consumer rather than ordinary contention.
    pub fn release(self) -> Result<(), RingError> {
        self.ring.commit_consume(self.cur_head, self.new_head)
    }
}
