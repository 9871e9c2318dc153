//! Parallel aggregation must be bit-identical to the serial path,
//! including tie-break order.

#![cfg(feature = "rayon")]

use iconseek::kernel::rayon::zncc_scan_full_par;
use iconseek::kernel::scalar::ZnccScalar;
use iconseek::{
    aggregate, aggregate_par, ImageView, Kernel, ScaleConfig, ScanParams, Template,
    TemplateLibrary, TemplatePlan,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_frame(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..width * height).map(|_| rng.random::<u8>()).collect()
}

fn patch_of(frame: &[u8], frame_width: usize, x0: usize, y0: usize, w: usize, h: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(w * h);
    for y in 0..h {
        for x in 0..w {
            out.push(frame[(y0 + y) * frame_width + (x0 + x)]);
        }
    }
    out
}

#[test]
fn row_parallel_scan_matches_scalar_scan() {
    let frame_data = random_frame(80, 60, 3);
    let frame = ImageView::from_slice(&frame_data, 80, 60).unwrap();

    for (x0, y0, w, h) in [(25, 18, 13, 11), (0, 0, 8, 8), (60, 40, 20, 20)] {
        let patch = patch_of(&frame_data, 80, x0, y0, w, h);
        let tpl_view = ImageView::from_slice(&patch, w, h).unwrap();
        let plan = TemplatePlan::from_view(tpl_view).unwrap();

        let serial = ZnccScalar::scan_full(frame, &plan, ScanParams::default()).unwrap();
        let parallel = zncc_scan_full_par(frame, &plan, ScanParams::default()).unwrap();
        assert_eq!(serial, parallel, "patch at ({x0}, {y0})");
        let peak = serial.expect("embedded patch must peak");
        assert_eq!((peak.x, peak.y), (x0, y0));
    }
}

#[test]
fn parallel_aggregate_matches_serial_exactly() {
    let frame_data = random_frame(96, 72, 7);
    let frame = ImageView::from_slice(&frame_data, 96, 72).unwrap();

    let library = TemplateLibrary::from_templates(vec![
        Template::new(patch_of(&frame_data, 96, 30, 20, 14, 14), 14, 14, "a").unwrap(),
        Template::new(patch_of(&frame_data, 96, 61, 45, 12, 10), 12, 10, "b").unwrap(),
    ])
    .unwrap();

    for samples in [1, 4, 10] {
        let cfg = ScaleConfig {
            min_scale: 0.8,
            max_scale: 1.2,
            samples,
        };
        let serial = aggregate(frame, &library, &cfg, ScanParams::default());
        let parallel = aggregate_par(frame, &library, &cfg, ScanParams::default());
        assert_eq!(serial, parallel, "samples = {samples}");
    }
}

#[test]
fn parallel_tie_break_follows_enumeration_order() {
    let frame_data = random_frame(64, 64, 11);
    let frame = ImageView::from_slice(&frame_data, 64, 64).unwrap();
    let patch = patch_of(&frame_data, 64, 10, 10, 12, 12);

    // Identical templates force exact score ties on every pair.
    let library = TemplateLibrary::from_templates(vec![
        Template::new(patch.clone(), 12, 12, "a").unwrap(),
        Template::new(patch.clone(), 12, 12, "b").unwrap(),
        Template::new(patch, 12, 12, "c").unwrap(),
    ])
    .unwrap();

    let cfg = ScaleConfig::default();
    let best = aggregate_par(frame, &library, &cfg, ScanParams::default()).unwrap();
    assert_eq!(best.template_idx, 0);
    assert_eq!(
        Some(best),
        aggregate(frame, &library, &cfg, ScanParams::default())
    );
}
