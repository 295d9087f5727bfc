//! Key queue benchmark: Measure push/pop and relay overhead.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glyphcast::{key_channel, Bridge, BridgeConfig, KeyEvent, KeyId, KeyQueue};

fn key(id: u8) -> KeyId {
    KeyId::new(id).unwrap()
}

fn queue_push_pop(c: &mut Criterion) {
    let mut queue = KeyQueue::new();
    let event = KeyEvent::press(key(0xac));

    c.bench_function("queue_push_pop", |b| {
        b.iter(|| {
            queue.push(black_box(event));
            black_box(queue.pop())
        });
    });
}

fn queue_overflow(c: &mut Criterion) {
    let mut queue = KeyQueue::new();
    for _ in 0..queue.capacity() {
        queue.push(KeyEvent::press(key(1)));
    }

    // Queue stays full: every push evicts.
    c.bench_function("queue_push_full", |b| {
        b.iter(|| queue.push(black_box(KeyEvent::release(key(2)))));
    });
}

fn channel_relay(c: &mut Criterion) {
    let mut bridge = Bridge::new(BridgeConfig::default()).unwrap();
    let (tx, rx) = key_channel(256);
    bridge.attach_input(rx);

    c.bench_function("channel_relay_16", |b| {
        b.iter(|| {
            for id in 1..=16 {
                tx.send(KeyEvent::press(key(id)));
            }
            while let Some(event) = bridge.next_key() {
                black_box(event);
            }
        });
    });
}

criterion_group!(benches, queue_push_pop, queue_overflow, channel_relay);
criterion_main!(benches);
