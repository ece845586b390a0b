use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::thread;
use std::time::Instant;
use trapz_coll::{broadcast_job, reduce_estimate};
use trapz_events::Message;
use trapz_perf::make_test_job;
use trapz_transport::{ChannelEndpoint, Transport};

/// Cost of one full binomial broadcast across a 4-rank in-process group,
/// timed from the root's side. The helper ranks run the same number of
/// iterations so every timed broadcast has live partners.
fn bench_broadcast_4(c: &mut Criterion) {
    let mut group = c.benchmark_group("collectives");
    group.throughput(Throughput::Elements(1));

    group.bench_function("broadcast (N=4)", |b| {
        b.iter_custom(|iters| {
            let mut endpoints = ChannelEndpoint::<Message>::connect_group(4);
            let helpers: Vec<_> = endpoints
                .split_off(1)
                .into_iter()
                .map(|ep| {
                    thread::spawn(move || {
                        for _ in 0..iters {
                            broadcast_job(&ep, 0, None).expect("helper broadcast failed");
                        }
                    })
                })
                .collect();

            let root = endpoints.pop().expect("missing root endpoint");
            let job = make_test_job();

            let start = Instant::now();
            for _ in 0..iters {
                black_box(broadcast_job(&root, 0, Some(job)).expect("root broadcast failed"));
            }
            let elapsed = start.elapsed();

            for h in helpers {
                h.join().expect("helper rank panicked");
            }
            elapsed
        });
    });

    group.finish();
}

/// Cost of one linear gather across a 4-rank group, timed at the root.
fn bench_reduce_4(c: &mut Criterion) {
    let mut group = c.benchmark_group("collectives");
    group.throughput(Throughput::Elements(1));

    group.bench_function("reduce (N=4)", |b| {
        b.iter_custom(|iters| {
            let mut endpoints = ChannelEndpoint::<Message>::connect_group(4);
            let helpers: Vec<_> = endpoints
                .split_off(1)
                .into_iter()
                .map(|ep| {
                    thread::spawn(move || {
                        let local = ep.rank() as f64;
                        for _ in 0..iters {
                            reduce_estimate(&ep, 0, local).expect("helper reduce failed");
                        }
                    })
                })
                .collect();

            let root = endpoints.pop().expect("missing root endpoint");

            let start = Instant::now();
            for _ in 0..iters {
                black_box(reduce_estimate(&root, 0, 1.0).expect("root reduce failed"));
            }
            let elapsed = start.elapsed();

            for h in helpers {
                h.join().expect("helper rank panicked");
            }
            elapsed
        });
    });

    group.finish();
}

criterion_group!(benches, bench_broadcast_4, bench_reduce_4);
criterion_main!(benches);
