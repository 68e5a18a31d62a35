use std::sync::Arc;
use std::thread;

use cachequeue::builder::QueueBuilder;
use cachequeue::queue::FastRemovalQueue;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn bench_add_poll(c: &mut Criterion) {
    c.bench_function("queue_add_poll", |b| {
        b.iter(|| {
            let queue = FastRemovalQueue::with_capacity(1024);
            for i in 0..1024_u64 {
                queue.add(i);
            }
            while queue.poll().is_some() {}
        })
    });
}

fn bench_lru_touch(c: &mut Criterion) {
    let queue = FastRemovalQueue::with_capacity(4096);
    for i in 0..4096_u64 {
        queue.add(i);
    }
    c.bench_function("queue_move_to_tail", |b| {
        let mut i = 0_u64;
        b.iter(|| {
            i = (i + 7919) % 4096;
            queue.move_to_tail(&i)
        })
    });
}

fn bench_remove_readd(c: &mut Criterion) {
    let queue = FastRemovalQueue::with_capacity(4096);
    for i in 0..4096_u64 {
        queue.add(i);
    }
    c.bench_function("queue_remove_readd", |b| {
        let mut i = 0_u64;
        b.iter(|| {
            i = (i + 104_729) % 4096;
            queue.remove(&i);
            queue.add(i)
        })
    });
}

fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_contended");
    for threads in [2_usize, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            b.iter(|| {
                let queue: Arc<FastRemovalQueue<u64>> =
                    Arc::new(QueueBuilder::new().capacity(8192).shards(16).build());
                let handles: Vec<_> = (0..threads)
                    .map(|tid| {
                        let queue = queue.clone();
                        thread::spawn(move || {
                            let base = tid as u64 * 1024;
                            for i in base..base + 1024 {
                                queue.add(i);
                                if i % 3 == 0 {
                                    queue.move_to_tail(&(i / 2));
                                }
                                if i % 4 == 0 {
                                    queue.poll();
                                }
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    let _ = handle.join();
                }
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_add_poll,
    bench_lru_touch,
    bench_remove_readd,
    bench_contended
);
criterion_main!(benches);
