//! Rendering: decode, crop, scale, encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Crop + scale** | `crop_imm` + `resize_exact` (Lanczos3) |
//! | **Encode** | `image::codecs` (JPEG, PNG, lossless WebP, AVIF) |
//!
//! The module is split into:
//! - **Backend**: [`RenderBackend`] trait + [`RenderJob`]
//! - **Format**: [`OutputFormat`] selection and parsing
//! - **Raster**: [`RasterBackend`], the `image`-crate implementation

pub mod backend;
mod format;
mod raster;

pub use backend::{RenderBackend, RenderError, RenderJob};
pub use format::{OutputFormat, ParseFormatError};
pub use raster::{RasterBackend, supported_input_extensions};
