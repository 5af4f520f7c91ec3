use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use cv_knn::{distance, Euclidean, KdTree};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

const DIMENSIONS: usize = 64;

fn random_points(rng: &mut Pcg64, n: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|_| (0..DIMENSIONS).map(|_| rng.gen_range(0.0..1.0)).collect())
        .collect()
}

fn linear_nearest(points: &[Vec<f64>], query: &[f64]) -> usize {
    points
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| float_ord::FloatOrd(distance::euclidean(p, query)))
        .map(|(ix, _)| ix)
        .unwrap()
}

fn nearest(c: &mut Criterion) {
    let mut rng = Pcg64::seed_from_u64(0);
    let mut group = c.benchmark_group("nearest");
    for n in [256, 1024, 4096] {
        let points = random_points(&mut rng, n);
        let query = random_points(&mut rng, 1).remove(0);
        let tree = KdTree::from_points(points.clone(), Euclidean).unwrap();
        group.bench_with_input(BenchmarkId::new("kd_tree", n), &query, |b, q| {
            b.iter(|| tree.nearest(q).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("kd_tree_approximate", n), &query, |b, q| {
            b.iter(|| tree.approximate_nearest(q, 32).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("linear", n), &query, |b, q| {
            b.iter(|| linear_nearest(&points, q))
        });
    }
    group.finish();
}

fn build(c: &mut Criterion) {
    let mut rng = Pcg64::seed_from_u64(1);
    let points = random_points(&mut rng, 4096);
    c.bench_function("build_4096", |b| {
        b.iter(|| KdTree::from_points(points.clone(), Euclidean).unwrap())
    });
}

criterion_group!(
    name = kd_tree;
    config = Criterion::default().sample_size(10);
    targets = nearest, build
);

criterion_main!(kd_tree);
