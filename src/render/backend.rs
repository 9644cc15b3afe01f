//! Render backend trait and shared job types.
//!
//! The [`RenderBackend`] trait defines the two operations every backend must
//! support: identify and render. The production implementation is
//! [`RasterBackend`](super::raster::RasterBackend) — pure Rust via the
//! `image` crate, statically linked into the binary.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::format::OutputFormat;
use crate::geometry::{Dimensions, Quality, ResolvedGeometry};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Complete description of one render: where to read, the geometry to draw,
/// and how to encode the result.
///
/// The geometry's crop rectangle is taken in source coordinates and scaled to
/// fill the target canvas exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    pub source: PathBuf,
    pub output: PathBuf,
    pub geometry: ResolvedGeometry,
    pub quality: Quality,
    pub format: OutputFormat,
}

/// Trait for render backends.
///
/// Both operations must be implemented so the batch layer stays
/// backend-agnostic: identify feeds geometry resolution, render executes the
/// resolved plan.
pub trait RenderBackend: Sync {
    /// Get image dimensions without a full decode.
    fn identify(&self, path: &Path) -> Result<Dimensions, RenderError>;

    /// Crop, scale, and encode one image according to the job.
    fn render(&self, job: &RenderJob) -> Result<(), RenderError>;
}
