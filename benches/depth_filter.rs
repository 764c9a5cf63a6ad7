use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use rgbd_bokeh_rs::image_pipeline::{
    BokehConfig, ColorImage, DepthAwareConvolver, DepthImage, EdgePolicy, FocusKernelTable,
};

fn generate_mock_frame(rows: usize, cols: usize) -> (ColorImage, DepthImage) {
    let mut color = Vec::with_capacity(rows * cols);
    let mut depth = Vec::with_capacity(rows * cols);
    for x in 0..rows {
        for y in 0..cols {
            let value = ((x + y) % 256) as f32 / 255.0;
            color.push([value, 1.0 - value, 0.5]);
            depth.push(((x * 255) / rows.max(1)) as u8);
        }
    }
    (
        ColorImage::from_vec(rows, cols, color).unwrap(),
        DepthImage::from_vec(rows, cols, depth).unwrap(),
    )
}

fn benchmark_kernel_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("kernel_table");

    for focus in [0u8, 64, 255] {
        group.bench_with_input(BenchmarkId::from_parameter(focus), &focus, |b, &focus| {
            b.iter(|| FocusKernelTable::build(black_box(focus)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_filter_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_by_size");
    group.sample_size(10);

    let sizes = vec![
        (64, 64, "64x64"),
        (128, 128, "128x128"),
        (256, 256, "256x256"),
    ];

    for (rows, cols, label) in sizes {
        let frame = generate_mock_frame(rows, cols);
        let convolver = DepthAwareConvolver::default();

        group.bench_with_input(BenchmarkId::from_parameter(label), &frame, |b, (color, depth)| {
            b.iter(|| convolver.filter(black_box(color), black_box(depth), 128).unwrap());
        });
    }

    group.finish();
}

fn benchmark_filter_focus(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_by_focus");
    group.sample_size(10);
    let (color, depth) = generate_mock_frame(128, 128);
    let convolver = DepthAwareConvolver::default();

    for focus in [0u8, 32, 128, 255] {
        group.bench_with_input(BenchmarkId::from_parameter(focus), &focus, |b, &focus| {
            b.iter(|| convolver.filter(&color, &depth, black_box(focus)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_edge_policy(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_policy");
    group.sample_size(10);
    let (color, depth) = generate_mock_frame(128, 128);

    for (policy, label) in [(EdgePolicy::Legacy, "legacy"), (EdgePolicy::Inclusive, "inclusive")] {
        let convolver = DepthAwareConvolver::new(&BokehConfig::builder().edge_policy(policy).build());
        group.bench_function(label, |b| {
            b.iter(|| convolver.filter(&color, &depth, 200).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_kernel_table,
    benchmark_filter_sizes,
    benchmark_filter_focus,
    benchmark_edge_policy
);
criterion_main!(benches);
