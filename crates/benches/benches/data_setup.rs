use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use denseqp_core::math::Scalar;
use denseqp_core::model::Model;
use denseqp_core::random::dense_strongly_convex_qp;
use denseqp_core::Data;
use rand::{rngs::SmallRng, SeedableRng};

fn build_model(n: usize, rng: &mut SmallRng) -> Model<Scalar> {
    dense_strongly_convex_qp(rng, n, n / 2, n, 0.5, 0.5)
}

fn construction_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("data_construction");
    let mut rng = SmallRng::seed_from_u64(42);
    for n in [10, 50, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || build_model(n, &mut rng),
                Data::new,
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn row_zeroing_benchmark(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(7);
    let data = Data::new(build_model(200, &mut rng));
    let m = data.m();
    c.bench_function("set_g_row_zero/n=200", |b| {
        b.iter_batched(
            || data.clone(),
            |mut data| {
                for row in (0..m).step_by(7) {
                    data.set_g_row_zero(row);
                }
                data
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, construction_benchmark, row_zeroing_benchmark);
criterion_main!(benches);
