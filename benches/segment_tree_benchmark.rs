use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rangetree::{LazySegmentTree, Sum};

fn bench_segment_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("Lazy Segment Tree");

    let n = 10_000;

    group.bench_function("build", |b| {
        b.iter_batched(
            || (0..n as i64).collect::<Vec<_>>(),
            |data| {
                black_box(LazySegmentTree::new(data));
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("range_add", |b| {
        let mut st = LazySegmentTree::new((0..n as i64).collect());
        b.iter(|| {
            st.add(black_box(n / 4), black_box(3 * n / 4), black_box(1))
                .unwrap();
        });
    });

    group.bench_function("query_min", |b| {
        let mut st = LazySegmentTree::new((0..n as i64).collect());
        st.add(0, n / 2, 7).unwrap();
        b.iter(|| {
            black_box(st.query(black_box(n / 4), black_box(3 * n / 4)).unwrap());
        });
    });

    group.bench_function("query_sum", |b| {
        let mut st = LazySegmentTree::with_op((0..n as i64).collect(), Sum);
        st.add(0, n / 2, 7).unwrap();
        b.iter(|| {
            black_box(st.query(black_box(n / 4), black_box(3 * n / 4)).unwrap());
        });
    });

    // Comparison with naive Vec (range add + min query)
    group.bench_function("naive_vec_add_query", |b| {
        let mut data: Vec<i64> = (0..n as i64).collect();
        b.iter(|| {
            let start = black_box(n / 4);
            let end = black_box(3 * n / 4);
            for cell in &mut data[start..end] {
                *cell += 1;
            }
            black_box(data[start..end].iter().min().copied())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_segment_tree);
criterion_main!(benches);
