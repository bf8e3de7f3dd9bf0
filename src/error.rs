use std::io;
use thiserror::Error;

/// Errors surfaced by this crate.
///
/// Grouped into three bands per the error-handling design:
///
/// 1. **Setup errors** — returned by [`crate::Ring::attach`]/
///    [`crate::Ring::attach_local`]; the ring is not usable afterward.
/// 2. **Transient flow-control errors** — expected during normal operation;
///    the caller retries, typically after backing off.
/// 3. **Programmer errors** — API misuse (zero-length record, oversize
///    record, or a commit racing against itself under the SPSC contract).
#[derive(Debug, Error)]
pub enum RingError {
    /// `size` passed to `attach`/`attach_local` is not a power of two, or is
    /// smaller than the 1024-byte minimum.
    #[error("bad queue size: must be a power of two >= 1024")]
    BadQueueSize,

    /// The named shared-memory object does not exist and `create` was false.
    #[error("shared memory object does not exist")]
    ShmNotExist,

    /// `shm_open` failed for a reason other than "does not exist".
    #[error("failed to open shared memory object")]
    OpenShmFail(#[source] io::Error),

    /// `shm_open` with `O_CREAT` failed.
    #[error("failed to create shared memory object")]
    CreateShmFail(#[source] io::Error),

    /// `ftruncate` on the newly created shared memory object failed.
    #[error("failed to size shared memory object")]
    TruncateShm(#[source] io::Error),

    /// `mmap` of the shared memory object failed.
    #[error("failed to map shared memory object")]
    MmapError(#[source] io::Error),

    /// An existing region was attached but its stored `mask + 1` does not
    /// match the caller's expected size.
    #[error("attached region's mask does not match requested size")]
    BadMask,

    /// `reserve` was called with `need == 0`.
    #[error("zero-length records are not allowed")]
    BadParam,

    /// `reserve` was called with `need` greater than half the ring's data
    /// area.
    #[error("record is larger than half the ring's data area")]
    BytesTooLarge,

    /// The ring does not currently have room for the requested reservation.
    #[error("not enough space in the ring")]
    NotEnoughSpace,

    /// [`crate::Reservation::commit`] lost its compare-and-swap on `tail`.
    /// Under correct single-producer use this cannot happen; it indicates a
    /// second concurrent producer.
    #[error("commit_produce lost its CAS on tail (concurrent producer?)")]
    CommitProduceFail,

    /// The ring has no records available to read.
    #[error("queue is empty")]
    QueueIsEmpty,

    /// [`crate::PeekGuard::release`] lost its compare-and-swap on `head`.
    /// Under correct single-consumer use this cannot happen; it indicates a
    /// second concurrent consumer.
    #[error("commit_consume lost its CAS on head (concurrent consumer?)")]
    CommitConsumeFail,
}
