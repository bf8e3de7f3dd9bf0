//! Region creation, attachment, and teardown.
//!
//! `shm_open`/`ftruncate`/`mmap`/`munmap` calls are made directly through
//! `libc`, with failures converted into `RingError` variants rather than
//! surfaced as raw `io::Error`.

use std::ffi::CString;
use std::io;
use std::ptr;

use crate::error::RingError;
use crate::layout::{RingHeader, HEADER_SIZE, MIN_QUEUE_BYTES};
use crate::ring::{Region, Ring};
use crate::util::is_power_of_two;

fn validate_size(size: u64) -> Result<(), RingError> {
    if size < MIN_QUEUE_BYTES || !is_power_of_two(size) {
        return Err(RingError::BadQueueSize);
    }
    Ok(())
}

/// Attaches to (creating if needed and requested) a POSIX shared-memory
/// object named `name` sized to hold a [`HEADER_SIZE`]-byte header plus a
/// `size`-byte data area.
///
/// `name` follows POSIX shared-memory naming (a leading `/` on Linux).
/// `size` must already be a power of two `>= 1024`; use
/// [`crate::round_up_pow2`] beforehand if it isn't.
///
/// If the object does not exist and `create` is `false`, fails with
/// [`RingError::ShmNotExist`]. If it does not exist and `create` is `true`,
/// it is created with mode `0o666`, truncated to the full region size, and
/// its header initialized. If it already exists, the existing header's
/// `mask` is validated against `size`.
#[cfg(unix)]
pub fn attach(name: &str, size: u64, create: bool) -> Result<Ring, RingError> {
    validate_size(size)?;
    let total_len = HEADER_SIZE as u64 + size;

    let c_name = CString::new(name).map_err(|_| RingError::BadQueueSize)?;

    // First, try to open an existing object.
    // SAFETY: c_name is a valid, NUL-terminated C string for the duration of the call.
    let mut fd = unsafe { libc::shm_open(c_name.as_ptr(), libc::O_RDWR, 0o666) };
    let mut first_time = false;

    if fd < 0 {
        let open_err = io::Error::last_os_error();
        if open_err.kind() != io::ErrorKind::NotFound {
            return Err(RingError::OpenShmFail(open_err));
        }
        if !create {
            return Err(RingError::ShmNotExist);
        }
        // SAFETY: c_name is a valid, NUL-terminated C string for the duration of the call.
        fd = unsafe {
            libc::shm_open(
                c_name.as_ptr(),
                libc::O_RDWR | libc::O_CREAT | libc::O_EXCL,
                0o666,
            )
        };
        if fd < 0 {
            return Err(RingError::CreateShmFail(io::Error::last_os_error()));
        }
        first_time = true;
    }

    // SAFETY: fd is a valid, open file descriptor owned by this call.
    let truncate_result = unsafe { libc::ftruncate(fd, total_len as libc::off_t) };
    if first_time && truncate_result != 0 {
        let err = io::Error::last_os_error();
        // SAFETY: fd was opened above and is still valid.
        unsafe {
            libc::close(fd);
        }
        return Err(RingError::TruncateShm(err));
    }

    // SAFETY: fd is valid and sized to at least total_len bytes.
    let mapped = unsafe {
        libc::mmap(
            ptr::null_mut(),
            total_len as libc::size_t,
            libc::PROT_READ | libc::PROT_WRITE,
            libc::MAP_SHARED,
            fd,
            0,
        )
    };

    // SAFETY: fd is valid; the mapping (if it succeeded) does not depend on
    // the descriptor staying open.
    unsafe {
        libc::close(fd);
    }

    if mapped == libc::MAP_FAILED {
        return Err(RingError::MmapError(io::Error::last_os_error()));
    }

    let base = mapped.cast::<u8>();
    let header = base.cast::<RingHeader>();

    if first_time {
        // SAFETY: this process just created and mapped the object; no other
        // attacher can be observing it yet.
        unsafe {
            RingHeader::init_in_place(header, size);
        }
    } else {
        // SAFETY: header points to HEADER_SIZE initialized, mapped bytes.
        let existing_mask = unsafe { (*header).mask.load(std::sync::atomic::Ordering::Acquire) };
        if existing_mask + 1 != size {
            // SAFETY: mapped came from mmap above and spans total_len bytes.
            unsafe {
                libc::munmap(mapped, total_len as libc::size_t);
            }
            return Err(RingError::BadMask);
        }
    }

    Ok(Ring {
        region: Region::Mmap {
            ptr: base,
            len: total_len as usize,
        },
        header,
        data_len: size,
        metrics: crate::metrics::Metrics::new(),
    })
}

/// Allocates a heap-backed ring with no cross-process sharing.
///
/// Over-allocates a few extra bytes so the header start can be nudged
/// forward onto an aligned boundary: [`RingHeader`]'s fields each sit on
/// their own 64-byte cache line, so the struct's required alignment is 64
/// bytes, not 8. The allocation is therefore `HEADER_SIZE + size` bytes plus
/// up to one full [`RingHeader`] alignment's worth of slack.
pub fn attach_local(size: u64) -> Result<Ring, RingError> {
    validate_size(size)?;
    let header_align = std::mem::align_of::<RingHeader>() as u64;
    let total_len = HEADER_SIZE as u64 + size + header_align;
    let mut storage = vec![0u8; total_len as usize].into_boxed_slice();

    let raw = storage.as_mut_ptr();
    let misalignment = (raw as usize) % std::mem::align_of::<RingHeader>();
    let adjust = if misalignment == 0 {
        0
    } else {
        std::mem::align_of::<RingHeader>() - misalignment
    };
    debug_assert!(adjust as u64 <= header_align);

    // SAFETY: `storage` holds total_len bytes and `adjust` leaves at least
    // HEADER_SIZE + size bytes after it, by construction above.
    let header = unsafe { raw.add(adjust).cast::<RingHeader>() };

    // SAFETY: this allocation was just created; nothing else observes it yet.
    unsafe {
        RingHeader::init_in_place(header, size);
    }

    Ok(Ring {
        region: Region::Heap { storage, adjust },
        header,
        data_len: size,
        metrics: crate::metrics::Metrics::new(),
    })
}

#[cfg(not(unix))]
pub fn attach(_name: &str, _size: u64, _create: bool) -> Result<Ring, RingError> {
    Err(RingError::OpenShmFail(io::Error::new(
        io::ErrorKind::Unsupported,
        "POSIX shared memory is only available on unix targets",
    )))
}
