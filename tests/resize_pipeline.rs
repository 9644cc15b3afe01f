//! End-to-end resize tests over real image files.
//!
//! These run the whole batch pipeline with the production backend: collect,
//! identify, resolve, crop, resample, encode. Sources are generated into a
//! temp directory, so the tests are self-contained.
//!
//! Run with: cargo test --test resize_pipeline

use std::path::Path;

use tempfile::TempDir;

use reframe::geometry::{AspectRatio, CropRect, Dimensions, ResizeRequest};
use reframe::process::{self, ProcessOptions};
use reframe::render::OutputFormat;

// =============================================================================
// Helpers
// =============================================================================

/// PNG with a gradient so lossy re-encodes have real content to work on.
fn write_gradient_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    img.save(path).unwrap();
}

/// 8x4 PNG, left half black, right half white.
fn write_split_png(path: &Path) {
    let img = image::RgbImage::from_fn(8, 4, |x, _| {
        if x < 4 {
            image::Rgb([0, 0, 0])
        } else {
            image::Rgb([255, 255, 255])
        }
    });
    img.save(path).unwrap();
}

fn percent_options(percentage: f64) -> ProcessOptions {
    ProcessOptions::new(ResizeRequest {
        percentage: Some(percentage),
        ..ResizeRequest::default()
    })
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn halves_a_png() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("photo.png");
    write_gradient_png(&source, 200, 100);

    let report = process::process(&[source.clone()], &percent_options(50.0)).unwrap();
    assert!(report.all_ok());
    assert_eq!(report.outcomes.len(), 1);

    let outcome = &report.outcomes[0];
    assert_eq!(outcome.source_dims, Dimensions::new(200, 100));
    assert_eq!(outcome.output, tmp.path().join("photo-100x50.png"));
    assert_eq!(image::image_dimensions(&outcome.output).unwrap(), (100, 50));
}

#[test]
fn square_crop_keeps_the_middle() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("split.png");
    write_split_png(&source);

    let options = ProcessOptions::new(ResizeRequest {
        aspect_ratio: AspectRatio::Square,
        ..ResizeRequest::default()
    });
    let report = process::process(&[source], &options).unwrap();
    assert!(report.all_ok());

    // 8x4 squared: 4x4 canvas from the middle columns 2..6, so the output
    // keeps the black/white boundary down its center.
    let outcome = &report.outcomes[0];
    assert_eq!(outcome.geometry.target, Dimensions::new(4, 4));
    assert_eq!(
        outcome.geometry.crop,
        CropRect {
            x: 2,
            y: 0,
            width: 4,
            height: 4
        }
    );

    let out = image::open(&outcome.output).unwrap().to_rgb8();
    assert_eq!(out.dimensions(), (4, 4));
    for y in 0..4 {
        assert!(out.get_pixel(0, y)[0] < 100, "left side should stay dark");
        assert!(out.get_pixel(3, y)[0] > 155, "right side should stay light");
    }
}

#[test]
fn explicit_dimensions_change_the_canvas() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("square.png");
    write_gradient_png(&source, 100, 100);

    let options = ProcessOptions::new(ResizeRequest {
        width: Some(64),
        height: Some(48),
        ..ResizeRequest::default()
    });
    let report = process::process(&[source], &options).unwrap();
    assert!(report.all_ok());

    let outcome = &report.outcomes[0];
    // A 1:1 source forced to 4:3 trims 25 rows, 13 of them off the top.
    assert_eq!(outcome.geometry.crop.y, 13);
    assert_eq!(outcome.geometry.crop.height, 75);
    assert_eq!(image::image_dimensions(&outcome.output).unwrap(), (64, 48));
}

#[test]
fn directory_batch_skips_non_images() {
    let tmp = TempDir::new().unwrap();
    write_gradient_png(&tmp.path().join("a.png"), 20, 10);
    write_gradient_png(&tmp.path().join("b.png"), 10, 10);
    std::fs::write(tmp.path().join("notes.txt"), "not an image").unwrap();

    let report =
        process::process(&[tmp.path().to_path_buf()], &percent_options(50.0)).unwrap();
    assert!(report.all_ok());
    assert_eq!(report.outcomes.len(), 2);
    assert!(tmp.path().join("a-10x5.png").is_file());
    assert!(tmp.path().join("b-5x5.png").is_file());
}

#[test]
fn corrupt_file_fails_alone() {
    let tmp = TempDir::new().unwrap();
    let good = tmp.path().join("good.png");
    let bad = tmp.path().join("bad.jpg");
    write_gradient_png(&good, 40, 40);
    std::fs::write(&bad, b"this is not a jpeg").unwrap();

    let report = process::process(&[good, bad.clone()], &percent_options(50.0)).unwrap();
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].source, bad);
    assert!(tmp.path().join("good-20x20.png").is_file());
}

#[test]
fn converts_png_to_jpeg() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("photo.png");
    write_gradient_png(&source, 50, 40);

    let mut options = ProcessOptions::new(ResizeRequest::default());
    options.format = Some(OutputFormat::Jpeg);
    let report = process::process(&[source], &options).unwrap();
    assert!(report.all_ok());

    let out = &report.outcomes[0].output;
    assert_eq!(out.extension().and_then(|e| e.to_str()), Some("jpg"));
    let decoded = image::open(out).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (50, 40));
}

#[test]
fn explicit_output_extension_decides_the_encoding() {
    let tmp = TempDir::new().unwrap();
    let source = tmp.path().join("photo.jpg");
    let img = image::RgbImage::from_fn(40, 30, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    img.save(&source).unwrap();

    let output = tmp.path().join("thumb.webp");
    let mut options = percent_options(50.0);
    options.output = Some(output.clone());

    let report = process::process(&[source], &options).unwrap();
    assert!(report.all_ok());
    assert_eq!(report.outcomes[0].output, output);

    // The named file must actually hold WebP bytes, not re-encoded JPEG.
    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::WebP);
    assert_eq!(image::image_dimensions(&output).unwrap(), (20, 15));
}

#[test]
fn out_dir_collects_outputs() {
    let tmp = TempDir::new().unwrap();
    let sources = tmp.path().join("sources");
    std::fs::create_dir(&sources).unwrap();
    write_gradient_png(&sources.join("a.png"), 16, 16);
    write_gradient_png(&sources.join("b.png"), 32, 16);

    let mut options = percent_options(50.0);
    let out_dir = tmp.path().join("resized");
    options.out_dir = Some(out_dir.clone());

    let report = process::process(&[sources], &options).unwrap();
    assert!(report.all_ok());
    assert!(out_dir.join("a-8x8.png").is_file());
    assert!(out_dir.join("b-16x8.png").is_file());
}
