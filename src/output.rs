//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Resize
//!
//! One line per image, source first, arrow to the written file. Cropped
//! images carry the crop geometry in ImageMagick's `WxH+X+Y` notation:
//!
//! ```text
//! photos/holiday.jpg 4000x3000 → photos/holiday-1200x900.jpg 1200x900
//! photos/wide.jpg 1000x500 → photos/wide-500x500.jpg 500x500 (crop 500x500+250+0)
//! photos/broken.jpg: Failed to decode photos/broken.jpg: ...
//! Resized 2 images, 1 failed
//! ```
//!
//! ## Plan
//!
//! ```text
//! Source: 1000x500
//! Target: 500x500
//! Crop:   500x500+250+0
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>` or `String`)
//! for testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use serde::Serialize;

use crate::geometry::{CropRect, Dimensions, ResolvedGeometry};
use crate::process::{Failure, Outcome, Report};

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a crop rectangle in ImageMagick's `WxH+X+Y` geometry notation.
fn crop_geometry(crop: &CropRect) -> String {
    format!("{}x{}+{}+{}", crop.width, crop.height, crop.x, crop.y)
}

/// `"1 image"` / `"3 images"`.
fn count_images(n: usize) -> String {
    if n == 1 {
        "1 image".to_string()
    } else {
        format!("{} images", n)
    }
}

// ============================================================================
// Plan output
// ============================================================================

/// Format the resolved geometry for one source size.
pub fn format_plan(source: Dimensions, geometry: &ResolvedGeometry) -> Vec<String> {
    let crop_line = if geometry.crop.is_full(source) {
        "Crop:   full frame".to_string()
    } else {
        format!("Crop:   {}", crop_geometry(&geometry.crop))
    };
    vec![
        format!("Source: {}", source),
        format!("Target: {}", geometry.target),
        crop_line,
    ]
}

#[derive(Serialize)]
struct PlanJson {
    source: Dimensions,
    target: Dimensions,
    crop: CropRect,
}

/// The resolved geometry as pretty-printed JSON, for scripting.
pub fn plan_json(
    source: Dimensions,
    geometry: &ResolvedGeometry,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&PlanJson {
        source,
        target: geometry.target,
        crop: geometry.crop,
    })
}

/// Print plan output to stdout.
pub fn print_plan(source: Dimensions, geometry: &ResolvedGeometry) {
    for line in format_plan(source, geometry) {
        println!("{}", line);
    }
}

// ============================================================================
// Resize report output
// ============================================================================

/// Format one successful resize as a single line.
pub fn format_outcome(outcome: &Outcome) -> String {
    let mut line = format!(
        "{} {} \u{2192} {} {}",
        outcome.source.display(),
        outcome.source_dims,
        outcome.output.display(),
        outcome.geometry.target,
    );
    if !outcome.geometry.crop.is_full(outcome.source_dims) {
        line.push_str(&format!(" (crop {})", crop_geometry(&outcome.geometry.crop)));
    }
    line
}

/// Format one failed resize as a single line.
pub fn format_failure(failure: &Failure) -> String {
    format!("{}: {}", failure.source.display(), failure.reason)
}

/// Format a whole batch report: outcomes, failures, then the summary line.
pub fn format_report(report: &Report) -> Vec<String> {
    let mut lines = Vec::new();
    for outcome in &report.outcomes {
        lines.push(format_outcome(outcome));
    }
    for failure in &report.failures {
        lines.push(format_failure(failure));
    }
    let summary = if report.failures.is_empty() {
        format!("Resized {}", count_images(report.outcomes.len()))
    } else {
        format!(
            "Resized {}, {} failed",
            count_images(report.outcomes.len()),
            report.failures.len()
        )
    };
    lines.push(summary);
    lines
}

/// Print a batch report to stdout.
pub fn print_report(report: &Report) {
    for line in format_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
