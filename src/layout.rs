//! The fixed header layout shared between the producer and consumer.
//!
//! Expressed as an explicit offset table (three 64-byte-aligned cache lines
//! followed by reserved padding) rather than left to the compiler's
//! `repr(C)` packing judgment, per the design note that false sharing
//! between the producer's `tail` writes and the consumer's `head` writes
//! would otherwise double the cost of every publish.
//!
//! ```text
//! offset 0x0000  u64  head     (atomic, consumer-owned)
//! offset 0x0040  u64  tail     (atomic, producer-owned)
//! offset 0x0080  u64  mask     (write-once at creation)
//! offset 0x0088..0x1000  reserved, zero-initialized
//! offset 0x1000..0x1000+N  data area
//! ```
//!
//! The reserved region exists for the same reason the original Go
//! implementation (`original_source/spsc_queue.go`) leaves its `Reserved3`
//! padding unused today: a future eventfd handle or a file-lock word can be
//! added here without shifting the data area.

use std::sync::atomic::AtomicU64;

/// Header size in bytes: exactly one page, so the data area that follows
/// begins page-aligned.
pub const HEADER_SIZE: usize = 4096;

/// Minimum data-area size: below this, the teleport/padding math around
/// `MIN_LEFT_LEN` no longer leaves room for a single record.
pub const MIN_QUEUE_BYTES: u64 = 1024;

/// Size of a length prefix, in bytes.
pub const ITEM_HEADER_LEN: u64 = 4;

/// Mask used to compute the 0-3 bytes of alignment padding before a length
/// prefix (`offset & ITEM_LEN_MASK`).
pub const ITEM_LEN_MASK: u64 = 3;

/// Minimum tail-gap for a record to be reservable without a teleport:
/// 4 bytes for the length prefix, up to 3 bytes of padding, 0 bytes payload.
pub const MIN_LEFT_LEN: u64 = 7;

/// A single 64-byte cache line holding one field, to prevent false sharing
/// between producer-owned and consumer-owned fields.
///
/// 64 bytes matches the common cache line size on the platforms this crate
/// targets.
#[repr(C, align(64))]
pub(crate) struct CacheLine<T> {
    pub value: T,
}

impl<T> CacheLine<T> {
    pub const fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T> std::ops::Deref for CacheLine<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.value
    }
}

/// The header overlaid on the first [`HEADER_SIZE`] bytes of the backing
/// region. Every attacher of the same region observes the same header
/// layout regardless of the virtual address it is mapped at — no pointers
/// into the region are ever absolute.
#[repr(C)]
pub(crate) struct RingHeader {
    /// Consumer's next-read offset within the data area.
    pub head: CacheLine<AtomicU64>,
    /// Producer's next-write offset within the data area.
    pub tail: CacheLine<AtomicU64>,
    /// `data_bytes - 1`. Written once at creation, read-only thereafter.
    pub mask: CacheLine<AtomicU64>,
    _reserved: [u8; HEADER_SIZE - 3 * std::mem::size_of::<CacheLine<AtomicU64>>()],
}

const _: () = assert!(std::mem::size_of::<RingHeader>() == HEADER_SIZE);

impl RingHeader {
    /// Initializes a freshly-created region's header: `head = tail = 0`,
    /// `mask = data_bytes - 1`.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least [`HEADER_SIZE`] writable bytes that no
    /// other party is concurrently reading or writing (true only for the
    /// first attacher of a newly-created region).
    pub unsafe fn init_in_place(ptr: *mut RingHeader, data_bytes: u64) {
        use std::sync::atomic::Ordering;
        (*ptr).head.value.store(0, Ordering::Relaxed);
        (*ptr).tail.value.store(0, Ordering::Relaxed);
        (*ptr).mask.value.store(data_bytes - 1, Ordering::Relaxed);
    }
}
