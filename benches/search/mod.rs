use std::hint::black_box;

use criterion::{
    measurement::Measurement, BatchSize, BenchmarkGroup, BenchmarkId, Criterion, Throughput,
};
use recavl::IntervalTree;

use crate::Lfsr;

#[derive(Debug, Clone, Copy)]
struct BenchName {
    bench: &'static str,
    n_values: usize,
    n_lookups: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(
            format!("{}_values_{}_n_lookups", v.n_values, v.bench),
            v.n_lookups,
        )
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("search");

    // Tree size
    for n_values in [1_000, 10_000] {
        // Number of overlap queries
        for n_lookups in [100, 1_000] {
            bench_param(&mut g, n_values, n_lookups)
        }
    }
}

/// For a tree containing `n_values`, perform two benchmarks that each perform
/// `n_lookups` overlap queries, one with point queries, one with the random
/// (typically wide) intervals generated by the LFSR.
fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize, n_lookups: usize)
where
    M: Measurement,
{
    // Generate the tree.
    let mut rand = Lfsr::default();
    let mut t = IntervalTree::new();

    for i in 0..n_values {
        let (low, high) = rand.next_bounds();
        t.insert(low, high, i).unwrap();
    }

    let bench_name = BenchName {
        bench: "point",
        n_values,
        n_lookups,
    };

    g.throughput(Throughput::Elements(n_lookups as _)); // Queries per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || rand.clone(),
            |mut rand| {
                for _ in 0..n_lookups {
                    let v = rand.next();
                    black_box(t.search(&v, &v));
                }
            },
            BatchSize::SmallInput,
        )
    });

    let bench_name = BenchName {
        bench: "range",
        n_values,
        n_lookups,
    };

    g.throughput(Throughput::Elements(n_lookups as _)); // Queries per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || rand.clone(),
            |mut rand| {
                for _ in 0..n_lookups {
                    let (low, high) = rand.next_bounds();
                    black_box(t.search(&low, &high));
                }
            },
            BatchSize::SmallInput,
        )
    });
}
