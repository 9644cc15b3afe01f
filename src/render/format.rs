//! Output format selection.
//!
//! Four encodable formats are offered. Decoding accepts more (TIFF sources
//! decode fine) but anything we cannot encode falls back to PNG on output,
//! keeping the result lossless rather than guessing a lossy format.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

/// Encodable output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Png,
    WebP,
    Avif,
}

impl OutputFormat {
    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::WebP => "webp",
            OutputFormat::Avif => "avif",
        }
    }

    /// Whether the encoder consumes the quality factor.
    ///
    /// The `image` crate's WebP encoder is lossless-only, so quality is
    /// ignored for WebP as well as PNG.
    pub fn is_lossy(self) -> bool {
        matches!(self, OutputFormat::Jpeg | OutputFormat::Avif)
    }

    /// Derive from a path's extension; `None` if it is not encodable.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "png" => Some(OutputFormat::Png),
            "webp" => Some(OutputFormat::WebP),
            "avif" => Some(OutputFormat::Avif),
            _ => None,
        }
    }

    /// Output format for a source file: its own format when encodable,
    /// otherwise PNG.
    pub fn for_source(path: &Path) -> Self {
        Self::from_path(path).unwrap_or(OutputFormat::Png)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported output format '{0}' (expected jpg, png, webp, or avif)")]
pub struct ParseFormatError(pub String);

impl FromStr for OutputFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "webp" => Ok(OutputFormat::WebP),
            "avif" => Ok(OutputFormat::Avif),
            other => Err(ParseFormatError(other.to_string())),
        }
    }
}
