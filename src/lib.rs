//! # Reframe
//!
//! Resize images and change their aspect ratio from the command line. Point it
//! at files or directories, pick a size (percentage, explicit dimensions, or
//! nothing) and optionally a ratio (`1:1`, `16:9`, any `W:H` pair), and it
//! writes resized copies next to the originals or into an output directory.
//!
//! # Architecture: Geometry, Then Pixels
//!
//! Every resize runs in two phases:
//!
//! ```text
//! 1. Resolve   (source size, request)  →  target canvas + crop rect
//! 2. Render    decode → crop → resample (Lanczos3) → encode
//! ```
//!
//! Phase 1 is pure arithmetic in [`geometry`]: no I/O, no pixels. Phase 2 in
//! [`render`] does all the pixel work. This separation exists for three
//! reasons:
//!
//! - **Testability**: the geometry rules (sizing precedence, ratio override,
//!   center crop) are where the behavior lives, and they test exhaustively
//!   without encoding a single image.
//! - **Inspectability**: the `plan` command prints phase 1's answer for any
//!   source size, so you can see what a request will do before running it.
//! - **Parallelism**: phase 2 jobs are independent, so batches render across
//!   cores with rayon.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`geometry`] | Pure geometry resolution: sizing, aspect-ratio override, center crop |
//! | [`render`] | Pixel work behind a backend trait: decode, crop, Lanczos3 resample, encode |
//! | [`process`] | Batch orchestration: input collection, parallel rendering, the report |
//! | [`config`] | Optional `reframe.toml` with defaults for ratio, quality, format, threads |
//! | [`naming`] | Output path derivation (`photo.jpg` becomes `photo-800x600.jpg`) |
//! | [`output`] | CLI output formatting for plans and batch reports |
//!
//! # Design Decisions
//!
//! ## Crop, Then Scale
//!
//! Changing an image's aspect ratio has to lose pixels or distort them.
//! Reframe always crops: it takes the largest centered region of the source
//! matching the target's proportions and scales that to the target canvas.
//! Nothing is ever stretched, and the two steps compose into a single
//! `crop → resize_exact` pass over the decoded image.
//!
//! ## The Ratio Override Only Shrinks
//!
//! Applying a ratio to an already-sized target never grows an axis: a canvas
//! wider than the requested ratio gets narrower, anything else gets shorter.
//! Growing would invent pixels past what the sizing step asked for; shrinking
//! keeps every output axis within the requested bounds.
//!
//! ## Rounding Is Per-Step and Unreconciled
//!
//! Fractional sizes round half away from zero at each step independently.
//! The crop rectangle is computed against the target's realized (rounded)
//! ratio, not the requested one, and is never adjusted to divide evenly into
//! the canvas. On small or odd-sized sources the crop's proportions can
//! therefore drift a pixel from the target's, which Lanczos3 resampling
//! absorbs invisibly. Reconciling the steps would buy nothing visible and
//! cost the property that each step is predictable from its own inputs.
//!
//! ## Pure-Rust Imaging (No ImageMagick)
//!
//! All pixel work goes through the [`image`](https://crates.io/crates/image)
//! crate: decoding, Lanczos3 resampling, and encoding to JPEG, PNG, WebP, or
//! AVIF. This eliminates system dependencies entirely: no `apt install`, no
//! Homebrew, no version conflicts. The binary is fully self-contained.
//!
//! ## Rendering Behind a Trait
//!
//! [`process`] talks to pixels only through [`render::RenderBackend`], so
//! batch logic (collection, parallel dispatch, per-file error isolation,
//! reporting) is tested against a recording mock without decoding anything.
//! The real [`render::RasterBackend`] is exercised separately by integration
//! tests over real files.

pub mod config;
pub mod geometry;
pub mod naming;
pub mod output;
pub mod process;
pub mod render;
