use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use maxheap::MaxHeap;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::BinaryHeap;

const SIZES: &[usize] = &[1_000, 100_000];

fn random_data(len: usize) -> Vec<i32> {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    (0..len).map(|_| rng.gen_range(0..100_000)).collect()
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    for &size in SIZES {
        let data = random_data(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("repeated_insert", size), &data, |b, data| {
            b.iter(|| {
                let mut heap = MaxHeap::with_capacity(data.len());
                for &x in data {
                    heap.insert(black_box(x));
                }
                heap
            });
        });

        group.bench_with_input(BenchmarkId::new("build_heap", size), &data, |b, data| {
            b.iter(|| {
                let mut heap = MaxHeap::with_capacity(data.len());
                heap.build_heap(black_box(data).iter().copied());
                heap
            });
        });

        group.bench_with_input(BenchmarkId::new("std_binary_heap_from", size), &data, |b, data| {
            b.iter(|| BinaryHeap::from(black_box(data).clone()));
        });
    }

    group.finish();
}

fn bench_mutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation");
    let size = 100_000;
    let heap: MaxHeap<i32> = random_data(size).into();

    group.bench_function("extract_max", |b| {
        b.iter_batched_ref(
            || heap.clone(),
            |heap| black_box(heap.extract_max()),
            BatchSize::LargeInput,
        );
    });

    group.bench_function("update_mid_to_max", |b| {
        b.iter_batched_ref(
            || heap.clone(),
            |heap| black_box(heap.update(size / 2, i32::MAX)),
            BatchSize::LargeInput,
        );
    });

    group.bench_function("remove_mid", |b| {
        b.iter_batched_ref(
            || heap.clone(),
            |heap| black_box(heap.remove(size / 2)),
            BatchSize::LargeInput,
        );
    });

    group.bench_function("is_heap_valid", |b| {
        b.iter(|| black_box(heap.is_heap_valid()));
    });

    group.finish();
}

criterion_group!(benches, bench_construction, bench_mutation);
criterion_main!(benches);
