use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array3;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

fn write_ascii(n: usize) -> usize {
    let x: Array3<f64> = Array3::random((n, n, n), Uniform::new(0., 10.));
    let rho: Array3<f64> = Array3::random((n, n, n), Uniform::new(0., 1.));

    let buffers = vts::GridBuffers::from_arrays(x.view(), x.view(), Some(x.view()))
        .unwrap()
        .with_field("rho", rho.view())
        .unwrap();
    let grid = buffers.grid().unwrap();

    let mut writer: Vec<u8> = Vec::new();
    vts::write_vts(&mut writer, &grid, &vts::ExportOptions::default()).unwrap();
    writer.len()
}

fn write_ascii_bench(c: &mut Criterion) {
    c.bench_function("write ascii 32", |b| b.iter(|| write_ascii(black_box(32))));

    c.bench_function("write ascii 64", |b| b.iter(|| write_ascii(black_box(64))));
}

fn points_iter(n: usize) -> f64 {
    let x: Array3<f64> = Array3::random((n, n, n), Uniform::new(0., 10.));
    let flat = vts::flatten(&x.view());
    let extent = vts::Extent::new(n - 1, n - 1, n - 1);

    vts::Coordinates::new(&flat, &flat, Some(&flat[..]))
        .points(&extent)
        .unwrap()
        .map(|p| p[0] + p[1] + p[2])
        .sum()
}

fn points_iter_bench(c: &mut Criterion) {
    c.bench_function("points iter 100", |b| b.iter(|| points_iter(black_box(100))));
}

criterion_group!(benches, write_ascii_bench, points_iter_bench);
criterion_main!(benches);
