use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ringspsc_rs::attach_local;
use std::thread;

const MSGS: u64 = 1_000_000;

fn bench_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("spsc_round_trip");
    group.throughput(Throughput::Elements(MSGS));

    for payload_len in [8usize, 64, 512] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("payload_{payload_len}")),
            &payload_len,
            |b, &len| {
                b.iter(|| {
                    let ring = attach_local(1 << 20).unwrap();
                    let payload = vec![0xABu8; len];

                    let producer_ring = &ring;
                    let producer_payload = payload.clone();
                    thread::scope(|scope| {
                        scope.spawn(|| {
                            let mut sent = 0u64;
                            while sent < MSGS {
                                match producer_ring.produce(&producer_payload) {
                                    Ok(()) => sent += 1,
                                    Err(ringspsc_rs::RingError::NotEnoughSpace) => {
                                        std::hint::spin_loop();
                                    }
                                    Err(e) => panic!("unexpected error: {e:?}"),
                                }
                            }
                        });

                        let mut received = 0u64;
                        let mut buf = Vec::with_capacity(len);
                        while received < MSGS {
                            buf.clear();
                            match ring.consume(&mut buf) {
                                Ok(()) => {
                                    black_box(&buf);
                                    received += 1;
                                }
                                Err(ringspsc_rs::RingError::QueueIsEmpty) => {
                                    std::hint::spin_loop();
                                }
                                Err(e) => panic!("unexpected error: {e:?}"),
                            }
                        }
                    });
                });
            },
        );
    }

    group.finish();
}

fn bench_reserve_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("spsc_reserve_commit");
    let msgs = 500_000u64;
    group.throughput(Throughput::Elements(msgs));

    group.bench_function("zero_copy_16_bytes", |b| {
        b.iter(|| {
            let ring = attach_local(1 << 20).unwrap();

            thread::scope(|scope| {
                scope.spawn(|| {
                    let mut sent = 0u64;
                    while sent < msgs {
                        match ring.reserve(16) {
                            Ok(mut reservation) => {
                                reservation.as_mut_slice().fill(sent as u8);
                                reservation.commit().unwrap();
                                sent += 1;
                            }
                            Err(ringspsc_rs::RingError::NotEnoughSpace) => {
                                std::hint::spin_loop();
                            }
                            Err(e) => panic!("unexpected error: {e:?}"),
                        }
                    }
                });

                let mut received = 0u64;
                while received < msgs {
                    match ring.peek() {
                        Ok(guard) => {
                            black_box(guard.as_slice());
                            guard.release().unwrap();
                            received += 1;
                        }
                        Err(ringspsc_rs::RingError::QueueIsEmpty) => {
                            std::hint::spin_loop();
                        }
                        Err(e) => panic!("unexpected error: {e:?}"),
                    }
                }
            });
        });
    });

    group.finish();
}

criterion_group!(benches, bench_round_trip, bench_reserve_commit);
criterion_main!(benches);
