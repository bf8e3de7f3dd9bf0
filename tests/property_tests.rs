//! Property-based checks of the universally quantified invariants.

use proptest::prelude::*;
use ringspsc_rs::{attach_local, round_up_pow2, RingError};

proptest! {
    /// For all `N` power of two >= 1024, a freshly attached ring starts
    /// empty, not full, with the expected capacity.
    #[test]
    fn fresh_ring_starts_empty(n in (10u32..=20).prop_map(|exp| 1u64 << exp)) {
        let ring = attach_local(n).unwrap();
        prop_assert!(ring.is_empty());
        prop_assert!(!ring.is_full());
        prop_assert_eq!(ring.capacity(), n);
    }

    /// For all `need <= N/2`, the slice returned by `reserve(need)` has
    /// length exactly `need`.
    #[test]
    fn reserve_returns_exact_length(need in 1u32..=2048u32) {
        let ring = attach_local(1 << 16).unwrap();
        let mut reservation = ring.reserve(need).unwrap();
        prop_assert_eq!(reservation.as_mut_slice().len(), need as usize);
        reservation.commit().unwrap();
    }

    /// Round-trip: produce(s) followed by consume(empty) yields a buffer
    /// equal to s, and afterward the ring is empty again.
    #[test]
    fn produce_consume_round_trips(payload in proptest::collection::vec(any::<u8>(), 1..=2048)) {
        let ring = attach_local(1 << 16).unwrap();
        ring.produce(&payload).unwrap();

        let mut out = Vec::new();
        ring.consume(&mut out).unwrap();
        prop_assert_eq!(out, payload);
        prop_assert!(ring.is_empty());
    }

    /// For sequences of records that collectively fit, consecutive
    /// `consume` calls return them in the order they were produced.
    #[test]
    fn sequence_of_records_preserves_order(
        payloads in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 1..=64), 1..=64)
    ) {
        let ring = attach_local(1 << 16).unwrap();
        let mut produced = Vec::new();
        for p in &payloads {
            match ring.produce(p) {
                Ok(()) => produced.push(p.clone()),
                Err(RingError::NotEnoughSpace) => break,
                Err(e) => prop_assert!(false, "unexpected error: {e:?}"),
            }
        }

        for expected in &produced {
            let mut out = Vec::new();
            ring.consume(&mut out).unwrap();
            prop_assert_eq!(&out, expected);
        }
        prop_assert!(ring.is_empty());
    }

    /// `round_up_pow2` never returns a value smaller than its input (once
    /// floored to the minimum) and always returns a power of two.
    #[test]
    fn round_up_pow2_is_idempotent_and_a_power_of_two(n in 0u64..(1u64 << 40)) {
        let rounded = round_up_pow2(n);
        prop_assert!(rounded.is_power_of_two());
        prop_assert!(rounded >= n);
        prop_assert_eq!(round_up_pow2(rounded), rounded);
    }
}

#[test]
fn non_power_of_two_size_is_rejected_by_exact_config() {
    use ringspsc_rs::RingConfig;
    for bad in [1500u64, 5000, 1023, 3 * 1024] {
        assert!(matches!(
            RingConfig::exact(bad),
            Err(RingError::BadQueueSize)
        ));
    }
}
