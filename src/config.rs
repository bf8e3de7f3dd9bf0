//! Pre-attach sizing configuration.
//!
//! Named presets (`SMALL`/`DEFAULT`/`LARGE`) alongside `new`/`exact`
//! constructors for callers with a specific data-area size in mind.

use crate::error::RingError;
use crate::util::{is_power_of_two, round_up_pow2};

/// Sizing configuration for a ring's data area.
///
/// `data_bytes` is always a power of two `>= 1024`; [`RingConfig::new`]
/// enforces this by rounding up, while [`RingConfig::exact`] rejects a
/// non-power-of-two value instead, matching the strictness `attach`/
/// `attach_local` apply to a raw `size` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingConfig {
    data_bytes: u64,
}

impl RingConfig {
    /// 4 KiB data area — fits a handful of small records, useful for tests.
    pub const SMALL: Self = Self { data_bytes: 4096 };

    /// 1 MiB data area — reasonable default for most workloads.
    pub const DEFAULT: Self = Self {
        data_bytes: 1 << 20,
    };

    /// 16 MiB data area — for high-throughput or large-record workloads.
    pub const LARGE: Self = Self {
        data_bytes: 1 << 24,
    };

    /// Builds a configuration, rounding `data_bytes` up to the next power of
    /// two (and up to the 1024-byte floor) if it isn't one already.
    #[must_use]
    pub const fn new(data_bytes: u64) -> Self {
        Self {
            data_bytes: round_up_pow2(data_bytes),
        }
    }

    /// Builds a configuration from a size that must already be an exact
    /// power of two `>= 1024`, matching the validation `attach` performs.
    pub fn exact(data_bytes: u64) -> Result<Self, RingError> {
        if data_bytes < crate::layout::MIN_QUEUE_BYTES || !is_power_of_two(data_bytes) {
            return Err(RingError::BadQueueSize);
        }
        Ok(Self { data_bytes })
    }

    /// The configured data-area size in bytes.
    #[inline]
    #[must_use]
    pub const fn data_bytes(&self) -> u64 {
        self.data_bytes
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rounds_up() {
        assert_eq!(RingConfig::new(1500).data_bytes(), 2048);
        assert_eq!(RingConfig::new(10).data_bytes(), 1024);
    }

    #[test]
    fn exact_rejects_non_power_of_two() {
        assert!(matches!(
            RingConfig::exact(1500),
            Err(RingError::BadQueueSize)
        ));
        assert!(matches!(
            RingConfig::exact(512),
            Err(RingError::BadQueueSize)
        ));
        assert_eq!(RingConfig::exact(4096).unwrap().data_bytes(), 4096);
    }
}
