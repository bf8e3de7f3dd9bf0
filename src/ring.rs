//! The core SPSC ring protocol: reserve/commit on the producer side,
//! peek/release on the consumer side, plus the one-shot `produce`/`consume`
//! convenience wrappers.
//!
//! `Ring` hosts both producer-side and consumer-side methods on a single
//! type rather than splitting into `Producer`/`Consumer` handles: the SPSC
//! discipline is a documented calling convention here, not a type-system
//! invariant, so there is no handle type standing in for it.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::RingError;
use crate::invariants::{
    debug_assert_not_overfull, debug_assert_offset_in_range, debug_assert_padding_bounded,
    debug_assert_valid_base_ptr,
};
use crate::layout::{RingHeader, ITEM_HEADER_LEN, ITEM_LEN_MASK, MIN_LEFT_LEN};
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::reservation::{PeekGuard, Reservation};

/// The storage backing a [`Ring`]: either a shared mapping or a private
/// heap allocation. Dropping this releases the resource; shared mappings
/// are unmapped, heap allocations are freed by `Box`'s own `Drop`.
pub(crate) enum Region {
    Mmap { ptr: *mut u8, len: usize },
    Heap { storage: Box<[u8]>, adjust: usize },
}

impl Drop for Region {
    fn drop(&mut self) {
        match self {
            Region::Mmap { ptr, len } => {
                #[cfg(unix)]
                // SAFETY: `ptr`/`len` were returned together by `mmap` in
                // `mapper::attach` and are dropped exactly once.
                unsafe {
                    libc::munmap((*ptr).cast(), *len);
                }
                #[cfg(not(unix))]
                let _ = (ptr, len);
            }
            Region::Heap { .. } => {}
        }
    }
}

/// A non-owning view over a region's header and data area implementing the
/// SPSC ring protocol.
///
/// Exactly one logical producer and one logical consumer may call methods
/// on a given `Ring` concurrently (one of each, not more) — see the crate
/// documentation for the full contract. Nothing in the type system enforces
/// this; violating it turns `Reservation::commit`/`PeekGuard::release`'s
/// internal CAS into an observable `CommitProduceFail`/`CommitConsumeFail`
/// rather than silent corruption.
pub struct Ring {
    pub(crate) region: Region,
    pub(crate) header: *mut RingHeader,
    pub(crate) data_len: u64,
    pub(crate) metrics: Metrics,
}

// SAFETY: the only mutable shared state is the header's atomics and the
// data-area bytes, both accessed per the documented SPSC discipline; `Ring`
// itself holds no thread-confined state.
unsafe impl Send for Ring {}
unsafe impl Sync for Ring {}

impl Ring {
    #[inline]
    fn header(&self) -> &RingHeader {
        // SAFETY: `self.header` points at HEADER_SIZE initialized bytes for
        // the lifetime of this `Ring`, established by `mapper::attach`/
        // `attach_local`.
        unsafe { &*self.header }
    }

    #[inline]
    fn data_ptr(&self) -> *mut u8 {
        let ptr = match &self.region {
            Region::Mmap { ptr, .. } => {
                // SAFETY: the header occupies the first HEADER_SIZE bytes of
                // the mapping; the data area immediately follows.
                unsafe { ptr.add(crate::layout::HEADER_SIZE) }
            }
            Region::Heap { storage, adjust } => {
                // SAFETY: `adjust` was computed in `attach_local` so that
                // `adjust + HEADER_SIZE` is within `storage` with at least
                // `data_len` bytes remaining.
                unsafe {
                    storage
                        .as_ptr()
                        .cast_mut()
                        .add(*adjust)
                        .add(crate::layout::HEADER_SIZE)
                }
            }
        };
        debug_assert_valid_base_ptr!(ptr);
        ptr
    }

    #[inline]
    fn mask(&self) -> u64 {
        self.header().mask.load(Ordering::Relaxed)
    }

    /// The size of the data area in bytes (`N` in the layout description).
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> u64 {
        self.data_len
    }

    /// Advisory emptiness check: `head == tail`, both read with `Acquire`.
    /// May race with concurrent progress; not part of the correctness
    /// protocol itself.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let h = self.header();
        h.head.load(Ordering::Acquire) == h.tail.load(Ordering::Acquire)
    }

    /// Advisory fullness check: `(tail + 1) & mask == head`.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        let h = self.header();
        let mask = self.mask();
        (h.tail.load(Ordering::Acquire).wrapping_add(1) & mask) == h.head.load(Ordering::Acquire)
    }

    /// Point-in-time snapshot of this ring's instrumentation counters.
    #[must_use]
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    #[inline]
    unsafe fn read_u32(&self, offset: u64) -> u32 {
        // SAFETY: caller guarantees `offset + 4 <= data_len`.
        let ptr = self.data_ptr().add(offset as usize).cast::<AtomicU32>();
        (*ptr).load(Ordering::Acquire)
    }

    #[inline]
    unsafe fn write_u32_release(&self, offset: u64, value: u32) {
        // SAFETY: caller guarantees `offset + 4 <= data_len`.
        let ptr = self.data_ptr().add(offset as usize).cast::<AtomicU32>();
        (*ptr).store(value, Ordering::Release);
    }

    /// Reserves `need` bytes of writable space for the next record,
    /// returning a [`Reservation`] the caller fills in place and then
    /// commits.
    ///
    /// `need` must be in `1..=capacity()/2`; `0` is rejected with
    /// [`RingError::BadParam`], anything larger than half the data area with
    /// [`RingError::BytesTooLarge`] so a single record can never force the
    /// ring into an ambiguous full/empty state.
    pub fn reserve(&self, need: u32) -> Result<Reservation<'_>, RingError> {
        if need == 0 {
            return Err(RingError::BadParam);
        }
        let mask = self.mask();
        if u64::from(need) > mask / 2 {
            return Err(RingError::BytesTooLarge);
        }
        let n = self.data_len;
        let h = self.header();

        loop {
            let cur_tail = h.tail.load(Ordering::Relaxed);
            let cur_head = h.head.load(Ordering::Acquire);

            if (cur_tail.wrapping_add(1) & mask) == cur_head {
                return Err(RingError::NotEnoughSpace);
            }

            let padding = cur_tail & ITEM_LEN_MASK;
            debug_assert_padding_bounded!(padding);

            if cur_tail >= cur_head {
                if cur_tail + MIN_LEFT_LEN + u64::from(need) >= n {
                    if cur_head == 0 {
                        return Err(RingError::NotEnoughSpace);
                    }
                    if cur_tail + padding + ITEM_HEADER_LEN <= mask {
                        // SAFETY: offset + 4 <= mask < data_len.
                        unsafe {
                            self.write_u32_release(cur_tail + padding, 0);
                        }
                    }
                    let _ = h.tail.compare_exchange(
                        cur_tail,
                        0,
                        Ordering::Release,
                        Ordering::Relaxed,
                    );
                    self.metrics.record_producer_teleport();
                    continue;
                }
            } else if cur_tail + MIN_LEFT_LEN + u64::from(need) + 1 > cur_head {
                return Err(RingError::NotEnoughSpace);
            }

            let new_tail = cur_tail + padding + ITEM_HEADER_LEN + u64::from(need);
            debug_assert_offset_in_range!("new_tail", new_tail, n);
            debug_assert_not_overfull!(new_tail & mask, cur_head, mask);

            // SAFETY: offset + 4 fits before the physical end of the data
            // area by the branch above; the payload region that follows
            // fits by the same bound.
            unsafe {
                self.write_u32_release(cur_tail + padding, need);
            }

            let start = (cur_tail + padding + ITEM_HEADER_LEN) as usize;
            // SAFETY: `start + need as usize <= data_len as usize`, and this
            // is the sole reservation in flight under the single-producer
            // contract, so the byte range is exclusively ours until commit.
            let slice = unsafe {
                std::slice::from_raw_parts_mut(self.data_ptr().add(start), need as usize)
            };

            return Ok(Reservation::new(self, slice, cur_tail, new_tail));
        }
    }

    pub(crate) fn commit_produce(&self, cur_tail: u64, new_tail: u64) -> Result<(), RingError> {
        self.header()
            .tail
            .compare_exchange(cur_tail, new_tail, Ordering::Release, Ordering::Relaxed)
            .map(|_| self.metrics.record_produce())
            .map_err(|_| RingError::CommitProduceFail)
    }

    /// Returns a read-only view of the next record, if any, plus the head
    /// offset to publish once the caller is done reading.
    ///
    /// Fails with [`RingError::QueueIsEmpty`] when there is nothing to
    /// read. Two states the original author calls "impossible under correct
    /// SPSC use" are checked and, if ever observed, treated as a fatal
    /// programming error rather than returned garbage — see the crate
    /// documentation for why these are unrecoverable.
    pub fn peek(&self) -> Result<PeekGuard<'_>, RingError> {
        let n = self.data_len;
        let mask = self.mask();
        let h = self.header();

        loop {
            let cur_head = h.head.load(Ordering::Relaxed);
            let cur_tail = h.tail.load(Ordering::Acquire);

            if cur_head == cur_tail {
                return Err(RingError::QueueIsEmpty);
            }

            if cur_head + MIN_LEFT_LEN >= n {
                if cur_tail > cur_head {
                    self.metrics.record_defensive_recovery();
                    let _ = h.head.compare_exchange(
                        cur_head,
                        cur_tail,
                        Ordering::Release,
                        Ordering::Relaxed,
                    );
                } else {
                    let _ =
                        h.head
                            .compare_exchange(cur_head, 0, Ordering::Release, Ordering::Relaxed);
                    self.metrics.record_consumer_teleport();
                }
                continue;
            }

            let padding = cur_head & ITEM_LEN_MASK;
            debug_assert_padding_bounded!(padding);

            // SAFETY: `cur_head + padding + 4 <= n` by the branch above.
            let item_len = unsafe { self.read_u32(cur_head + padding) };

            if item_len == 0 {
                if cur_tail > cur_head {
                    self.metrics.record_defensive_recovery();
                    let _ = h.head.compare_exchange(
                        cur_head,
                        cur_tail,
                        Ordering::Release,
                        Ordering::Relaxed,
                    );
                } else {
                    let _ =
                        h.head
                            .compare_exchange(cur_head, 0, Ordering::Release, Ordering::Relaxed);
                    self.metrics.record_consumer_teleport();
                }
                continue;
            }

            let new_head = cur_head + padding + ITEM_HEADER_LEN + u64::from(item_len);

            if cur_tail < cur_head && cur_head + MIN_LEFT_LEN + u64::from(item_len) > n {
                panic!(
                    "ring corruption: record at offset {cur_head} of length {item_len} \
                     runs past the data area's physical end ({n} bytes) while the \
                     producer has wrapped (tail={cur_tail}); this is impossible under \
                     correct single-producer/single-consumer use"
                );
            }
            if cur_tail >= cur_head && new_head > cur_tail {
                panic!(
                    "ring corruption: record at offset {cur_head} of length {item_len} \
                     runs past the producer's tail ({cur_tail}); this is impossible \
                     under correct single-producer/single-consumer use"
                );
            }

            debug_assert_offset_in_range!("new_head", new_head, n);

            let start = (cur_head + padding + ITEM_HEADER_LEN) as usize;
            // SAFETY: bounds were just checked above; this is the sole peek
            // in flight under the single-consumer contract.
            let slice = unsafe {
                std::slice::from_raw_parts(self.data_ptr().add(start), item_len as usize)
            };

            return Ok(PeekGuard::new(self, slice, cur_head, new_head));
        }
    }

    pub(crate) fn commit_consume(&self, cur_head: u64, new_head: u64) -> Result<(), RingError> {
        self.header()
            .head
            .compare_exchange(cur_head, new_head, Ordering::Release, Ordering::Relaxed)
            .map(|_| self.metrics.record_consume())
            .map_err(|_| RingError::CommitConsumeFail)
    }

    /// One-shot produce: reserves `src.len()` bytes, copies `src` in, and
    /// commits immediately.
    pub fn produce(&self, src: &[u8]) -> Result<(), RingError> {
        let need = u32::try_from(src.len()).map_err(|_| RingError::BytesTooLarge)?;
        let mut reservation = self.reserve(need)?;
        reservation.as_mut_slice().copy_from_slice(src);
        reservation.commit()
    }

    /// One-shot consume: peeks the next record, appends its payload to
    /// `dst`, and commits immediately.
    pub fn consume(&self, dst: &mut Vec<u8>) -> Result<(), RingError> {
        let guard = self.peek()?;
        dst.extend_from_slice(guard.as_slice());
        guard.release()
    }

    /// Consumes this `Ring`, releasing the underlying region.
    ///
    /// Shared-memory backed rings are unmapped but the named object itself
    /// is left in the OS namespace (unlinking it is the caller's
    /// responsibility). Heap-backed rings simply drop their allocation.
    pub fn detach(self) {
        drop(self);
    }
}
