use criterion::{criterion_group, criterion_main, Criterion};
use iconseek::{aggregate, match_template, ImageView, ScaleConfig, ScanParams, Template, TemplateLibrary};
use std::hint::black_box;

fn make_image(width: usize, height: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as u8);
        }
    }
    data
}

fn extract_patch(
    image: &[u8],
    img_width: usize,
    x0: usize,
    y0: usize,
    width: usize,
    height: usize,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        let row = (y0 + y) * img_width;
        for x in 0..width {
            out.push(image[row + x0 + x]);
        }
    }
    out
}

fn bench_locator(c: &mut Criterion) {
    let img_width = 320;
    let img_height = 240;
    let frame_data = make_image(img_width, img_height);
    let frame = ImageView::from_slice(&frame_data, img_width, img_height).unwrap();

    let tpl_data = extract_patch(&frame_data, img_width, 120, 90, 24, 24);
    let template = Template::new(tpl_data.clone(), 24, 24, "bench").unwrap();

    let cfg = ScaleConfig::default();
    let params = ScanParams::default();

    c.bench_function("scale_search_320x240_24px", |b| {
        b.iter(|| black_box(match_template(frame, &template, 0, &cfg, params).unwrap()));
    });

    let library = TemplateLibrary::from_templates(vec![
        Template::new(tpl_data.clone(), 24, 24, "dark").unwrap(),
        Template::new(
            tpl_data.iter().map(|&v| 255 - v).collect(),
            24,
            24,
            "light",
        )
        .unwrap(),
    ])
    .unwrap();

    c.bench_function("aggregate_two_variants_320x240", |b| {
        b.iter(|| black_box(aggregate(frame, &library, &cfg, params)));
    });

    #[cfg(feature = "rayon")]
    c.bench_function("aggregate_two_variants_320x240_parallel", |b| {
        b.iter(|| black_box(iconseek::aggregate_par(frame, &library, &cfg, params)));
    });
}

criterion_group!(benches, bench_locator);
criterion_main!(benches);
