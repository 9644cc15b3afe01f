//! Batch resize orchestration.
//!
//! Takes the files and directories named on the command line, expands them to
//! a concrete list of image files, and runs identify → resolve → render for
//! each one. Failures are isolated per file: one unreadable image ends up in
//! the report's failure list and the rest of the batch still renders.
//!
//! ## Parallel Processing
//!
//! Images are processed in parallel using [rayon](https://docs.rs/rayon).
//! Worker count follows the `[processing]` config section.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use walkdir::WalkDir;

use crate::geometry::{Dimensions, ResizeRequest, ResolvedGeometry, resolve};
use crate::naming;
use crate::render::{
    OutputFormat, RasterBackend, RenderBackend, RenderJob, supported_input_extensions,
};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Input not found: {0}")]
    InputNotFound(PathBuf),
    #[error("Not a supported image file: {0}")]
    UnsupportedInput(PathBuf),
    #[error("No image files found in directory: {0}")]
    EmptyDirectory(PathBuf),
    #[error("An explicit output path requires exactly one input file, got {0}")]
    OutputWithManyInputs(usize),
}

/// What to do with every image in the batch.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub request: ResizeRequest,
    /// Output format; `None` follows the explicit output path's extension
    /// when one is set, otherwise each source's own format.
    pub format: Option<OutputFormat>,
    /// Directory for outputs; `None` writes next to each source.
    pub out_dir: Option<PathBuf>,
    /// Explicit output path. Only valid for a single input file.
    pub output: Option<PathBuf>,
    /// Descend into subdirectories of directory inputs.
    pub recursive: bool,
}

impl ProcessOptions {
    pub fn new(request: ResizeRequest) -> Self {
        Self {
            request,
            format: None,
            out_dir: None,
            output: None,
            recursive: false,
        }
    }
}

/// One successfully resized image.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub source: PathBuf,
    pub output: PathBuf,
    pub source_dims: Dimensions,
    pub geometry: ResolvedGeometry,
}

/// One image that could not be resized, with the reason rendered for display.
#[derive(Debug, Clone)]
pub struct Failure {
    pub source: PathBuf,
    pub reason: String,
}

/// Batch result. Both lists preserve input order.
#[derive(Debug, Default)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
    pub failures: Vec<Failure>,
}

impl Report {
    pub fn all_ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len() + self.failures.len()
    }
}

fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            supported_input_extensions()
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

fn collect_from_directory(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>, ProcessError> {
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut images = Vec::new();
    for entry in WalkDir::new(dir).max_depth(max_depth) {
        let entry = entry?;
        if entry.file_type().is_file() && is_supported_image(entry.path()) {
            images.push(entry.path().to_path_buf());
        }
    }
    images.sort();
    if images.is_empty() {
        return Err(ProcessError::EmptyDirectory(dir.to_path_buf()));
    }
    Ok(images)
}

/// Expand the command-line inputs into a concrete file list.
///
/// Files must carry a supported image extension; directories contribute their
/// supported images in sorted order, optionally recursing. A directory with
/// nothing to resize is an error rather than a silent no-op.
pub fn collect_inputs(
    inputs: &[PathBuf],
    recursive: bool,
) -> Result<Vec<PathBuf>, ProcessError> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_file() {
            if !is_supported_image(input) {
                return Err(ProcessError::UnsupportedInput(input.clone()));
            }
            files.push(input.clone());
        } else if input.is_dir() {
            files.extend(collect_from_directory(input, recursive)?);
        } else {
            return Err(ProcessError::InputNotFound(input.clone()));
        }
    }
    // De-dupe while preserving order (e.g. overlapping directories/globs).
    let mut seen = HashSet::<PathBuf>::new();
    files.retain(|path| seen.insert(path.clone()));
    Ok(files)
}

/// Resize every input with the default backend.
pub fn process(inputs: &[PathBuf], options: &ProcessOptions) -> Result<Report, ProcessError> {
    let backend = RasterBackend::new();
    process_with_backend(&backend, inputs, options)
}

/// Resize every input using a specific backend (allows testing with mock).
pub fn process_with_backend(
    backend: &impl RenderBackend,
    inputs: &[PathBuf],
    options: &ProcessOptions,
) -> Result<Report, ProcessError> {
    let files = collect_inputs(inputs, options.recursive)?;
    if options.output.is_some() && files.len() != 1 {
        return Err(ProcessError::OutputWithManyInputs(files.len()));
    }
    if let Some(dir) = &options.out_dir {
        std::fs::create_dir_all(dir)?;
    }

    let results: Vec<Result<Outcome, Failure>> = files
        .par_iter()
        .map(|source| resize_one(backend, source, options))
        .collect();

    let mut report = Report::default();
    for result in results {
        match result {
            Ok(outcome) => report.outcomes.push(outcome),
            Err(failure) => report.failures.push(failure),
        }
    }
    Ok(report)
}

fn resize_one(
    backend: &impl RenderBackend,
    source: &Path,
    options: &ProcessOptions,
) -> Result<Outcome, Failure> {
    let fail = |reason: String| Failure {
        source: source.to_path_buf(),
        reason,
    };

    let source_dims = backend
        .identify(source)
        .map_err(|e| fail(e.to_string()))?;
    let geometry =
        resolve(source_dims, &options.request).map_err(|e| fail(e.to_string()))?;
    // An explicitly named output encodes as whatever its extension says.
    let format = options.format.unwrap_or_else(|| {
        options
            .output
            .as_deref()
            .and_then(OutputFormat::from_path)
            .unwrap_or_else(|| OutputFormat::for_source(source))
    });
    let output = match &options.output {
        Some(path) => path.clone(),
        None => naming::output_path(source, options.out_dir.as_deref(), geometry.target, format),
    };

    backend
        .render(&RenderJob {
            source: source.to_path_buf(),
            output: output.clone(),
            geometry,
            quality: options.request.quality,
            format,
        })
        .map_err(|e| fail(e.to_string()))?;

    Ok(Outcome {
        source: source.to_path_buf(),
        output,
        source_dims,
        geometry,
    })
}
