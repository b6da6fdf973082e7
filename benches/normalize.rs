use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use digit_infer_rs::digit_pipeline::{
    AreaAverageResizer, FilterResizer, ImageNormalizer, Resizer, SmoothFilter,
};
use image::{DynamicImage, Rgb, RgbImage};

fn generate_mock_image(width: u32, height: u32) -> DynamicImage {
    let image = RgbImage::from_fn(width, height, |x, y| {
        let value = ((x + y) % 256) as u8;
        Rgb([value, value / 2, 255 - value])
    });
    DynamicImage::ImageRgb8(image)
}

fn bench_with<R: Resizer>(c: &mut Criterion, group_name: &str, normalizer: ImageNormalizer<R>) {
    let mut group = c.benchmark_group(group_name);

    let sizes = vec![
        (28, 28, "28x28"),
        (280, 280, "280x280"),
        (1000, 1000, "1000x1000"),
    ];

    for (width, height, label) in sizes {
        let image = generate_mock_image(width, height);

        group.bench_with_input(BenchmarkId::from_parameter(label), &image, |b, image| {
            b.iter(|| {
                let _ = normalizer.normalize(black_box(image));
            });
        });
    }

    group.finish();
}

fn benchmark_area_average(c: &mut Criterion) {
    bench_with(c, "normalize_area_average", ImageNormalizer::with_resizer(AreaAverageResizer));
}

fn benchmark_filters(c: &mut Criterion) {
    let filters = vec![
        (SmoothFilter::Triangle, "normalize_triangle"),
        (SmoothFilter::Lanczos3, "normalize_lanczos3"),
    ];

    for (filter, name) in filters {
        bench_with(c, name, ImageNormalizer::with_resizer(FilterResizer::new(filter)));
    }
}

criterion_group!(benches, benchmark_area_average, benchmark_filters);
criterion_main!(benches);
