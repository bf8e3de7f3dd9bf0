use ringspsc_rs::{attach_local, RingError};
use std::thread;
use std::time::Instant;

fn main() {
    println!("ringspsc-rs: heap-backed single-process queue");
    println!("==============================================\n");

    let ring = attach_local(1 << 20).unwrap();

    const RECORDS: u64 = 5_000_000;

    println!("Configuration:");
    println!("  Data area: {} bytes", ring.capacity());
    println!("  Records:   {RECORDS}\n");

    let start = Instant::now();

    thread::scope(|scope| {
        let producer_ring = &ring;
        scope.spawn(move || {
            let mut sent = 0u64;
            while sent < RECORDS {
                match producer_ring.produce(&sent.to_le_bytes()) {
                    Ok(()) => sent += 1,
                    Err(RingError::NotEnoughSpace) => thread::yield_now(),
                    Err(e) => panic!("producer error: {e:?}"),
                }
            }
        });

        let mut received = 0u64;
        let mut buf = Vec::with_capacity(8);
        while received < RECORDS {
            buf.clear();
            match ring.consume(&mut buf) {
                Ok(()) => {
                    let value = u64::from_le_bytes(buf.as_slice().try_into().unwrap());
                    assert_eq!(value, received, "gap or duplicate in the record sequence");
                    received += 1;
                }
                Err(RingError::QueueIsEmpty) => thread::yield_now(),
                Err(e) => panic!("consumer error: {e:?}"),
            }
        }
    });

    let duration = start.elapsed();
    let snapshot = ring.metrics();

    println!("Results:");
    println!("  Duration:          {duration:.2?}");
    println!(
        "  Throughput:        {:.2} million records/sec",
        RECORDS as f64 / duration.as_secs_f64() / 1_000_000.0
    );
    println!("  Producer teleports: {}", snapshot.teleports_producer);
    println!("  Consumer teleports: {}", snapshot.teleports_consumer);
    assert!(ring.is_empty());
}
