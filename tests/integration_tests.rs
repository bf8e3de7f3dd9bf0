//! Black-box boundary scenarios driven entirely through the public API.
//!
//! The literal-offset scenarios (sentinel/teleport at exact cursor values)
//! live as white-box unit tests inside `src/ring.rs`, where the header's
//! cursors can be poked directly; this file sticks to what an external
//! caller can observe through `attach_local`/`produce`/`consume`/`reserve`/
//! `peek`.

use ringspsc_rs::{attach_local, RingError};
use std::thread;

#[test]
fn happy_path() {
    let ring = attach_local(4096).unwrap();
    ring.produce(b"it's a test").unwrap();

    let mut out = Vec::new();
    ring.consume(&mut out).unwrap();
    assert_eq!(out, b"it's a test");
    assert!(ring.is_empty());
    assert!(!ring.is_full());
}

#[test]
fn oversize_rejected_undersize_accepted() {
    let ring = attach_local(4096).unwrap();

    let oversize = vec![0u8; 2048];
    assert!(matches!(
        ring.produce(&oversize),
        Err(RingError::BytesTooLarge)
    ));

    let fits = vec![0u8; 2047];
    assert!(ring.produce(&fits).is_ok());
}

#[test]
fn zero_length_reserve_rejected() {
    let ring = attach_local(4096).unwrap();
    assert!(matches!(ring.reserve(0), Err(RingError::BadParam)));
}

#[test]
fn fifo_order_preserved_across_many_records() {
    let ring = attach_local(1 << 16).unwrap();
    let records: Vec<Vec<u8>> = (0..500u32).map(|i| i.to_le_bytes().to_vec()).collect();

    for r in &records {
        ring.produce(r).unwrap();
    }
    for expected in &records {
        let mut out = Vec::new();
        ring.consume(&mut out).unwrap();
        assert_eq!(&out, expected);
    }
    assert!(ring.is_empty());
}

#[test]
fn fill_drain_fill_cycles_survive_wraparound() {
    // Repeated fill/drain cycles on a small ring force many tail/head
    // teleports; if the protocol mishandled a wrap, FIFO order or data
    // integrity would break somewhere in here.
    let ring = attach_local(4096).unwrap();
    let mut expected_next = 0u64;
    let mut next_to_send = 0u64;

    for _ in 0..2000 {
        // Produce until the ring reports pressure.
        loop {
            let bytes = next_to_send.to_le_bytes();
            match ring.produce(&bytes) {
                Ok(()) => next_to_send += 1,
                Err(RingError::NotEnoughSpace) => break,
                Err(e) => panic!("unexpected error: {e:?}"),
            }
        }
        // Drain everything available.
        loop {
            let mut buf = Vec::new();
            match ring.consume(&mut buf) {
                Ok(()) => {
                    let got = u64::from_le_bytes(buf.try_into().unwrap());
                    assert_eq!(got, expected_next);
                    expected_next += 1;
                }
                Err(RingError::QueueIsEmpty) => break,
                Err(e) => panic!("unexpected error: {e:?}"),
            }
        }
    }
    assert_eq!(expected_next, next_to_send);
    assert!(ring.is_empty());
}

#[test]
fn full_ring_reports_not_enough_space() {
    let ring = attach_local(1024).unwrap();
    loop {
        match ring.produce(&[0xAB; 8]) {
            Ok(()) => {}
            Err(RingError::NotEnoughSpace) => break,
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }
    assert!(matches!(
        ring.produce(&[0xAB; 8]),
        Err(RingError::NotEnoughSpace)
    ));
}

/// Scenario 7: two threads, monotonically increasing 8-byte records,
/// consumer verifies the exact sequence with no gaps and no duplicates.
/// Runs a modest count by default; the full 10,000,000-record stress run
/// is gated behind `#[ignore]` since it takes noticeably longer.
fn run_concurrent_stress(count: u64) {
    let ring = attach_local(1 << 20).unwrap();

    thread::scope(|scope| {
        let producer_ring = &ring;
        scope.spawn(move || {
            let mut sent = 0u64;
            while sent < count {
                match producer_ring.produce(&sent.to_le_bytes()) {
                    Ok(()) => sent += 1,
                    Err(RingError::NotEnoughSpace) => thread::yield_now(),
                    Err(e) => panic!("unexpected producer error: {e:?}"),
                }
            }
        });

        let mut received = 0u64;
        let mut buf = Vec::with_capacity(8);
        while received < count {
            buf.clear();
            match ring.consume(&mut buf) {
                Ok(()) => {
                    let got = u64::from_le_bytes(buf.as_slice().try_into().unwrap());
                    assert_eq!(got, received, "gap or duplicate in the record sequence");
                    received += 1;
                }
                Err(RingError::QueueIsEmpty) => thread::yield_now(),
                Err(e) => panic!("unexpected consumer error: {e:?}"),
            }
        }
    });

    assert!(ring.is_empty());
}

#[test]
fn concurrent_stress_small() {
    run_concurrent_stress(200_000);
}

#[test]
#[ignore = "10M records takes noticeably longer than the default test budget"]
fn concurrent_stress_full() {
    run_concurrent_stress(10_000_000);
}
