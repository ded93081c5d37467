use core::hint::black_box;
use core::time::Duration;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::{thread::scope, time::Instant};
use uuidv7::{
    Epoch, OsRandom, RandSource, Result, SystemClock, ThreadRandom, TimeSource, UuidV7,
    UuidV7Generator, encode_timestamp, fraction_from_nanos,
};

struct FixedMockTime {
    now: Duration,
}

impl TimeSource for FixedMockTime {
    fn now(&self) -> Result<Duration> {
        Ok(self.now)
    }
}

struct ZeroRand;

impl RandSource for ZeroRand {
    fn fill(&self, dest: &mut [u8]) -> Result<()> {
        dest.fill(0);
        Ok(())
    }
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

/// Benchmarks `generate` for a given pair of sources.
fn bench_generate<T, R>(c: &mut Criterion, group_name: &str, generator: UuidV7Generator<T, R>)
where
    T: TimeSource,
    R: RandSource,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.generate().unwrap());
            }
        })
    });
    group.finish();
}

/// Benchmarks `generate` with the system sources shared across threads.
fn bench_generate_threaded(c: &mut Criterion, group_name: &str, threads: usize) {
    let generator = UuidV7Generator::new(SystemClock, ThreadRandom);
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements((TOTAL_IDS * threads) as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}/threads/{threads}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                scope(|s| {
                    for _ in 0..threads {
                        s.spawn(|| {
                            for _ in 0..TOTAL_IDS {
                                black_box(generator.generate().unwrap());
                            }
                        });
                    }
                });
            }
            start.elapsed()
        })
    });
    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function("encode_timestamp/zero", |b| {
        b.iter(|| {
            for ts in 0..TOTAL_IDS as i64 {
                let id = encode_timestamp(black_box(ts * 1_000), [0; 10], Epoch::POSTGRES);
                black_box(id.unwrap());
            }
        })
    });

    let id = UuidV7::from_fields(1_700_000_000_000, 0, [0; 8]);
    group.bench_function("decode_timestamp", |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(uuidv7::decode_timestamp(black_box(&id), Epoch::POSTGRES));
            }
        })
    });

    group.bench_function("fraction_from_nanos", |b| {
        b.iter(|| {
            for n in 0..TOTAL_IDS as u32 {
                black_box(fraction_from_nanos(black_box(n * 244_140)));
            }
        })
    });
    group.finish();
}

fn benchmarks(c: &mut Criterion) {
    bench_generate(
        c,
        "mock/generate",
        UuidV7Generator::new(
            FixedMockTime {
                now: Duration::new(1_700_000_000, 0),
            },
            ZeroRand,
        ),
    );
    bench_generate(
        c,
        "system/os_random/generate",
        UuidV7Generator::new(SystemClock, OsRandom),
    );
    bench_generate(
        c,
        "system/thread_random/generate",
        UuidV7Generator::new(SystemClock, ThreadRandom),
    );
    for threads in [2, 4, 8] {
        bench_generate_threaded(c, "system/thread_random/generate_threaded", threads);
    }
    bench_codec(c);
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
