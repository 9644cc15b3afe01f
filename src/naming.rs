//! Output filename derivation.
//!
//! Outputs are named `{stem}-{width}x{height}.{ext}` so a directory can hold
//! several sizes of the same image side by side. A stem that already ends in
//! a size token from an earlier run has it replaced rather than stacked
//! (`photo-800x600.jpg` resized to 400x300 becomes `photo-400x300.jpg`).
//! When the derived name would land on the source itself (resizing
//! `photo-800x600.jpg` to 800x600 again), a `-resized` suffix keeps the
//! source intact. Overwriting an existing *output* from an earlier run is
//! deliberate; re-running a command should refresh its results.

use std::path::{Path, PathBuf};

use crate::geometry::Dimensions;
use crate::render::OutputFormat;

/// Derive the output path for a resized image.
///
/// The file lands in `out_dir` when given, otherwise next to its source. The
/// extension always reflects the output format, so converting formats renames
/// as well as resizes.
pub fn output_path(
    source: &Path,
    out_dir: Option<&Path>,
    target: Dimensions,
    format: OutputFormat,
) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    let stem = strip_size_token(stem);
    let dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => source.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let candidate = dir.join(format!(
        "{}-{}x{}.{}",
        stem,
        target.width,
        target.height,
        format.extension()
    ));
    if candidate == source {
        dir.join(format!(
            "{}-{}x{}-resized.{}",
            stem,
            target.width,
            target.height,
            format.extension()
        ))
    } else {
        candidate
    }
}

/// Strip one trailing `-{digits}x{digits}` token from a stem, so re-resizing
/// an earlier output replaces its size token instead of appending another.
fn strip_size_token(stem: &str) -> &str {
    let Some((rest, token)) = stem.rsplit_once('-') else {
        return stem;
    };
    let Some((w, h)) = token.split_once('x') else {
        return stem;
    };
    let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if is_number(w) && is_number(h) { rest } else { stem }
}
