use bidi_map::BidiHashMap;
use criterion::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

const SIZES: [usize; 4] = [100, 1_000, 10_000, 100_000];

fn construct_map(length: usize) -> BidiHashMap<u64, u64> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut map = BidiHashMap::with_capacity(length);
    while map.len() < length {
        map.put(rng.gen(), rng.gen());
    }
    map
}

fn bench_lookup(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);

    let mut group = c.benchmark_group("lookup");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));

    for length in SIZES {
        let map = construct_map(length);
        let keys: Vec<u64> = map.keys().copied().collect();
        let values: Vec<u64> = map.values().copied().collect();

        group.bench_with_input(BenchmarkId::new("get", length), &length, |b, _| {
            b.iter_batched(
                || keys[rng.gen_range(0..keys.len())],
                |key| black_box(map.get(&key)).is_some(),
                BatchSize::SmallInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("get_by_value", length), &length, |b, _| {
            b.iter_batched(
                || values[rng.gen_range(0..values.len())],
                |value| black_box(map.get_by_value(&value)).is_some(),
                BatchSize::SmallInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("miss", length), &length, |b, _| {
            b.iter_batched(
                || rng.gen::<u64>(),
                |key| black_box(map.get(&key)).is_some(),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("put");

    for length in SIZES {
        group.throughput(Throughput::Elements(length as u64));
        group.bench_with_input(BenchmarkId::new("fresh", length), &length, |b, &length| {
            b.iter(|| black_box(construct_map(length)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lookup, bench_put);
criterion_main!(benches);
