use core::hash::BuildHasher;
use core::hint::black_box;

use criterion::AxisScale;
use criterion::BatchSize;
use criterion::Criterion;
use criterion::PlotConfiguration;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use hashbrown::HashMap as HashbrownMap;
use rand::Rng;
use rand::SeedableRng;
use rand::TryRngCore;
use rand::rngs::OsRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand_distr::Distribution;
use rand_distr::Zipf;
use siphasher::sip::SipHasher;
use tomb_hash::Bounds;
use tomb_hash::ChainedTable;
use tomb_hash::HashBuilder;
use tomb_hash::HashTable;

#[derive(Clone, Copy)]
struct SipState {
    k0: u64,
    k1: u64,
}

impl SipState {
    fn random() -> Self {
        let mut rng = OsRng;
        Self {
            k0: rng.try_next_u64().unwrap(),
            k1: rng.try_next_u64().unwrap(),
        }
    }
}

impl BuildHasher for SipState {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SipHasher::new_with_keys(self.k0, self.k1)
    }
}

const SIZES: &[usize] = &[
    (1 << 6),
    (1 << 8),
    (1 << 10),
    (1 << 12),
    (1 << 14),
    (1 << 16),
];

const MAX_CAPACITY: usize = 1 << 20;

fn pairs(n: usize) -> Vec<(String, String)> {
    let mut rng = OsRng;
    (0..n)
        .map(|_| {
            let key = rng.try_next_u64().unwrap();
            (format!("key_{key:016X}"), format!("value_{key}"))
        })
        .collect()
}

fn open_table(state: SipState) -> HashTable<HashBuilder<SipState>> {
    HashTable::with_bounds(4, Bounds::new(4, MAX_CAPACITY), HashBuilder(state)).unwrap()
}

fn chained_table(state: SipState) -> ChainedTable<HashBuilder<SipState>> {
    ChainedTable::with_bounds(4, Bounds::new(4, MAX_CAPACITY), HashBuilder(state)).unwrap()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_random");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));
    let state = SipState::random();

    for &size in SIZES {
        let items = pairs(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("tomb_hash/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut items = items.clone();
                    items.shuffle(&mut SmallRng::from_os_rng());
                    items
                },
                |items| {
                    let mut table = open_table(state);
                    for (key, value) in items {
                        black_box(table.insert(key, value));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("chained/{size}"), |b| {
            b.iter_batched(
                || items.clone(),
                |items| {
                    let mut table = chained_table(state);
                    for (key, value) in items {
                        black_box(table.insert(key, value));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || items.clone(),
                |items| {
                    let mut table = HashbrownMap::with_hasher(state);
                    for (key, value) in items {
                        black_box(table.entry(key).or_insert(value));
                    }
                    black_box(table)
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_find_hit_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_hit_miss");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));
    let state = SipState::random();

    for &size in SIZES {
        let present = pairs(size);
        let absent = pairs(size);

        let mut open = open_table(state);
        let mut chained = chained_table(state);
        let mut brown = HashbrownMap::with_hasher(state);
        for (key, value) in &present {
            open.insert(key.as_str(), value.as_str());
            chained.insert(key.as_str(), value.as_str());
            brown.insert(key.clone(), value.clone());
        }

        let mut probes: Vec<&str> = present
            .iter()
            .chain(absent.iter())
            .map(|(key, _)| key.as_str())
            .collect();
        probes.shuffle(&mut SmallRng::from_os_rng());

        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_function(format!("tomb_hash/{size}"), |b| {
            b.iter(|| {
                for key in &probes {
                    black_box(open.find(key));
                }
            })
        });
        group.bench_function(format!("chained/{size}"), |b| {
            b.iter(|| {
                for key in &probes {
                    black_box(chained.find(key));
                }
            })
        });
        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter(|| {
                for key in &probes {
                    black_box(brown.get(*key));
                }
            })
        });
    }

    group.finish();
}

/// Lookups skewed toward a few hot keys, interleaved with removals and
/// re-inserts so tombstones accumulate along hot probe chains.
fn bench_churn_zipf(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn_zipf");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));
    let state = SipState::random();

    for &size in SIZES {
        let items = pairs(size);
        let zipf = Zipf::new(size as f64, 1.1).unwrap();
        let mut rng = SmallRng::from_os_rng();
        let ops: Vec<(usize, bool)> = (0..size * 4)
            .map(|_| {
                let index = zipf.sample(&mut rng) as usize - 1;
                (index, rng.random_bool(0.2))
            })
            .collect();

        group.throughput(Throughput::Elements(ops.len() as u64));
        group.bench_function(format!("tomb_hash/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut table = open_table(state);
                    table.insert_all(items.iter().cloned());
                    table
                },
                |mut table| {
                    for &(index, churn) in &ops {
                        let (key, value) = &items[index];
                        if churn {
                            table.remove(key);
                            table.insert(key.as_str(), value.as_str());
                        } else {
                            black_box(table.find(key));
                        }
                    }
                    black_box(table)
                },
                BatchSize::LargeInput,
            )
        });

        group.bench_function(format!("hashbrown/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut table = HashbrownMap::with_hasher(state);
                    table.extend(items.iter().cloned());
                    table
                },
                |mut table| {
                    for &(index, churn) in &ops {
                        let (key, value) = &items[index];
                        if churn {
                            table.remove(key);
                            table.insert(key.clone(), value.clone());
                        } else {
                            black_box(table.get(key));
                        }
                    }
                    black_box(table)
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_all");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));
    let state = SipState::random();

    for &size in SIZES {
        let items = pairs(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("tomb_hash/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut table = open_table(state);
                    table.insert_all(items.iter().cloned());
                    table
                },
                |mut table| {
                    black_box(table.remove_all(items.iter().map(|(key, _)| key)));
                    black_box(table)
                },
                BatchSize::LargeInput,
            )
        });

        group.bench_function(format!("chained/{size}"), |b| {
            b.iter_batched(
                || {
                    let mut table = chained_table(state);
                    table.insert_all(items.iter().cloned());
                    table
                },
                |mut table| {
                    black_box(table.remove_all(items.iter().map(|(key, _)| key)));
                    black_box(table)
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_find_hit_miss,
    bench_churn_zipf,
    bench_remove,
);

criterion_main!(benches);
