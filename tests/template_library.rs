//! Template library loading: soft-fault skips and the empty-set precondition.

#![cfg(feature = "image-io")]

use iconseek::{IconSeekError, TemplateLibrary};
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("iconseek-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_icon(dir: &PathBuf, name: &str) -> PathBuf {
    let mut img = image::GrayImage::new(12, 12);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        pixel.0 = [(x * 17 + y * 11) as u8];
    }
    let path = dir.join(name);
    img.save(&path).unwrap();
    path
}

#[test]
fn all_invalid_paths_fail_the_precondition() {
    let dir = scratch_dir("all-invalid");
    let missing = dir.join("missing.png");
    let garbage = dir.join("garbage.png");
    fs::write(&garbage, b"not a png").unwrap();

    let err = TemplateLibrary::load(&[&missing, &garbage]).err().unwrap();
    assert_eq!(err, IconSeekError::NoTemplates { checked: 2 });

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn mixed_paths_keep_the_valid_subset() {
    let dir = scratch_dir("mixed");
    let good = write_icon(&dir, "icon_dark.png");
    let missing = dir.join("icon_light.png");

    let library = TemplateLibrary::load(&[good.clone(), missing.clone()]).unwrap();
    assert_eq!(library.len(), 1);
    assert_eq!(library.templates()[0].variant(), "icon_dark");
    assert_eq!(library.skipped().len(), 1);
    assert_eq!(library.skipped()[0].path, missing);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn load_preserves_path_order_and_variants() {
    let dir = scratch_dir("ordered");
    let dark = write_icon(&dir, "notepad_dark.png");
    let light = write_icon(&dir, "notepad_light.png");

    let library = TemplateLibrary::load(&[dark, light]).unwrap();
    assert_eq!(library.len(), 2);
    assert!(library.skipped().is_empty());
    assert_eq!(library.templates()[0].variant(), "notepad_dark");
    assert_eq!(library.templates()[1].variant(), "notepad_light");
    assert_eq!(library.templates()[0].width(), 12);
    assert_eq!(library.templates()[0].height(), 12);

    fs::remove_dir_all(&dir).ok();
}
