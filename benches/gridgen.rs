use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vorosphere::{gauss_grid, GridParameters};

fn benchmark_gauss_grid(c: &mut Criterion) {
    let params = GridParameters {
        sigma: 20.0,
        beta: 3.0,
        phi_ini: 2.0,
        phi_max: 10.0,
        lat_0: 46.2,
        lon_0: 6.1,
        rings: 200,
        dense_antipole: true,
    };

    c.bench_function("gauss_grid_dense_antipole", |b| {
        b.iter(|| gauss_grid(black_box(&params)).unwrap())
    });

    let single_pole = GridParameters {
        dense_antipole: false,
        ..params
    };
    c.bench_function("gauss_grid_single_pole", |b| {
        b.iter(|| gauss_grid(black_box(&single_pole)).unwrap())
    });
}

criterion_group!(benches, benchmark_gauss_grid);
criterion_main!(benches);
