use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ordtree::SegmentTree;

const NUM_SLOTS: usize = 65_536;

pub fn combine_range_benchmark(c: &mut Criterion) {
    let values: Vec<i64> = (0..NUM_SLOTS).map(|_| fastrand::i64(-1_000..1_000)).collect();

    {
        let tree = SegmentTree::new(&values);
        let mut group = c.benchmark_group("segtree-query");
        for range in [16usize, 256, 4_096, NUM_SLOTS] {
            group.bench_with_input(BenchmarkId::from_parameter(range), &range, |b, &range| {
                b.iter(|| {
                    let start = fastrand::usize(0..=NUM_SLOTS - range);
                    tree.query(start, start + range - 1).unwrap()
                })
            });
        }
        group.finish();
    }

    let mut tree = SegmentTree::new(&values);
    let mut group = c.benchmark_group("segtree-update-range");
    for range in [16usize, 256, 4_096, NUM_SLOTS] {
        group.bench_with_input(BenchmarkId::from_parameter(range), &range, |b, &range| {
            b.iter(|| {
                let start = fastrand::usize(0..=NUM_SLOTS - range);
                tree.update_range(start, start + range - 1, fastrand::i64(-1_000..1_000))
                    .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, combine_range_benchmark);
criterion_main!(benches);
