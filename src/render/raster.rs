//! Pure Rust render backend — zero external dependencies.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` |
//! | Decode (JPEG, PNG, TIFF, WebP) | `image` crate (pure Rust decoders) |
//! | Crop | `image::DynamicImage::crop_imm` |
//! | Scale | `image::DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → JPEG/PNG | `image::codecs::{jpeg, png}` |
//! | Encode → WebP | `image::codecs::webp::WebPEncoder` (lossless) |
//! | Encode → AVIF | `image::codecs::avif::AvifEncoder` (rav1e, speed 6) |

use std::path::Path;
use std::sync::LazyLock;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};

use super::backend::{RenderBackend, RenderError, RenderJob};
use super::format::OutputFormat;
use crate::geometry::{Dimensions, Quality};

/// Extensions whose decoders are compiled in and known to work.
///
/// AVIF is deliberately excluded: the `image` crate's `"avif"` feature only
/// enables the **encoder** (rav1e); decoding would need `"avif-native"` and a
/// C library. So AVIF is an output format here, never an input.
const INPUT_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("png", ImageFormat::Png),
    ("tif", ImageFormat::Tiff),
    ("tiff", ImageFormat::Tiff),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    INPUT_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the set of image file extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RasterBackend;

impl RasterBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RasterBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, RenderError> {
    ImageReader::open(path)
        .map_err(RenderError::Io)?
        .decode()
        .map_err(|e| {
            RenderError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Re-sample to a pixel type the target encoder accepts.
///
/// JPEG has no alpha channel, and the WebP and AVIF encoders only take 8-bit
/// RGB(A) buffers. PNG encodes every pixel type we decode.
fn normalize_for(format: OutputFormat, img: DynamicImage) -> DynamicImage {
    use image::ColorType::{Rgb8, Rgba8};
    match format {
        OutputFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        OutputFormat::WebP | OutputFormat::Avif => match img.color() {
            Rgb8 | Rgba8 => img,
            other if other.has_alpha() => DynamicImage::ImageRgba8(img.to_rgba8()),
            _ => DynamicImage::ImageRgb8(img.to_rgb8()),
        },
        OutputFormat::Png => img,
    }
}

/// Encode and save in the requested format.
fn save_image(
    img: DynamicImage,
    path: &Path,
    format: OutputFormat,
    quality: Quality,
) -> Result<(), RenderError> {
    let img = normalize_for(format, img);
    let file = std::fs::File::create(path).map_err(RenderError::Io)?;
    let writer = std::io::BufWriter::new(file);
    let result = match format {
        OutputFormat::Jpeg => {
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(writer, quality.percent());
            img.write_with_encoder(encoder)
        }
        OutputFormat::Png => {
            img.write_with_encoder(image::codecs::png::PngEncoder::new(writer))
        }
        OutputFormat::WebP => {
            img.write_with_encoder(image::codecs::webp::WebPEncoder::new_lossless(writer))
        }
        OutputFormat::Avif => {
            let encoder = image::codecs::avif::AvifEncoder::new_with_speed_quality(
                writer,
                6,
                quality.percent(),
            );
            img.write_with_encoder(encoder)
        }
    };
    result.map_err(|e| {
        RenderError::ProcessingFailed(format!(
            "{} encode failed for {}: {}",
            format,
            path.display(),
            e
        ))
    })
}

impl RenderBackend for RasterBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, RenderError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            RenderError::ProcessingFailed(format!(
                "Failed to read dimensions of {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Dimensions { width, height })
    }

    fn render(&self, job: &RenderJob) -> Result<(), RenderError> {
        let img = load_image(&job.source)?;
        let crop = job.geometry.crop;
        let cropped = img.crop_imm(crop.x, crop.y, crop.width, crop.height);
        let target = job.geometry.target;
        let scaled = cropped.resize_exact(target.width, target.height, FilterType::Lanczos3);
        save_image(scaled, &job.output, job.format, job.quality)
    }
}
