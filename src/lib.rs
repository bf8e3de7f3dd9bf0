//! ringspsc-rs - Lock-free SPSC shared-memory message ring buffer
//!
//! A single-producer single-consumer ring buffer that exchanges
//! variable-size, length-prefixed byte records between exactly one producer
//! and one consumer, optionally across a process boundary via POSIX shared
//! memory.
//!
//! # Key properties
//!
//! - Wait-free reserve/commit and peek/release on the fast path: no locks,
//!   no allocation, no syscalls once attached.
//! - Absolute-offset head/tail cursors with an explicit tail-teleport rule
//!   for wraparound, rather than modulo arithmetic on an ever-increasing
//!   counter.
//! - 64-byte cache-line separation between `head`, `tail`, and `mask` to
//!   keep producer and consumer writes from sharing a cache line.
//! - Cross-process safe: every offset stored in the region is relative to
//!   the data area's start, so the mapping can live at a different virtual
//!   address in each attacher.
//!
//! # Example
//!
//! ```
//! use ringspsc_rs::attach_local;
//!
//! let ring = attach_local(4096).unwrap();
//! ring.produce(b"it's a test").unwrap();
//!
//! let mut out = Vec::new();
//! ring.consume(&mut out).unwrap();
//! assert_eq!(out, b"it's a test");
//! assert!(ring.is_empty());
//! ```
//!
//! # SPSC contract
//!
//! Exactly one thread/process may call producer-side methods
//! (`reserve`/`produce`) at a time, and exactly one may call consumer-side
//! methods (`peek`/`consume`) at a time. The type system does not enforce
//! this — there is no separate `Producer`/`Consumer` handle — violating it
//! surfaces as [`RingError::CommitProduceFail`]/[`RingError::CommitConsumeFail`]
//! rather than silent corruption, since both commit paths use a
//! compare-and-swap rather than a plain store.

mod backoff;
mod config;
mod error;
mod invariants;
mod layout;
mod mapper;
mod metrics;
mod reservation;
mod ring;
mod util;

pub use backoff::Backoff;
pub use config::RingConfig;
pub use error::RingError;
pub use mapper::{attach, attach_local};
pub use metrics::{Metrics, MetricsSnapshot};
pub use reservation::{PeekGuard, Reservation};
pub use ring::Ring;
pub use util::{is_power_of_two, round_up_pow2};
