//! Demonstrates a single process acting as both ends of a POSIX
//! shared-memory ring, the same way two independent processes would if
//! they attached the same name with `create=false`.
//!
//! Run a true cross-process demo by launching this binary twice: once to
//! create+produce, once (after editing `create` to `false` below, or
//! passing a second named region) to attach+consume. As shipped this
//! binary is self-contained so `cargo run --example shared_memory` works
//! without coordination.

use ringspsc_rs::{attach, RingError};

fn main() {
    let name = format!("/ringspsc-rs-demo-{}", std::process::id());

    let ring = attach(&name, 1 << 16, true).expect("attach shared-memory region");
    println!("attached shared-memory region {name} ({} byte data area)", ring.capacity());

    for i in 0u32..10 {
        let message = format!("message #{i}");
        ring.produce(message.as_bytes()).unwrap();
    }

    let mut out = Vec::new();
    loop {
        out.clear();
        match ring.consume(&mut out) {
            Ok(()) => println!("received: {}", String::from_utf8_lossy(&out)),
            Err(RingError::QueueIsEmpty) => break,
            Err(e) => panic!("consume error: {e:?}"),
        }
    }

    ring.detach();
    println!("detached; the shared-memory object {name} remains until unlinked");
}
