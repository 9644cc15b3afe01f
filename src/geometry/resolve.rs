//! Target-canvas and center-crop resolution.
//!
//! Everything here is pure arithmetic over pixel sizes: no I/O, no pixels,
//! no state. Resolution runs in three steps. Sizing picks the initial target
//! canvas from the request's sizing fields. The ratio override then shrinks
//! one target axis to honor a requested aspect ratio. Finally the crop step
//! picks the largest centered region of the source matching the target's
//! proportions, which the render stage scales to fill the canvas.
//!
//! Fractional pixel values are rounded half away from zero at every step,
//! independently per step. The steps are deliberately not reconciled against
//! each other, so the crop's proportions can drift a pixel from the target's
//! on small or odd-sized sources.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

use super::ratio::ratio_value;
use super::request::ResizeRequest;

/// Pixel extents of an image or canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width-over-height factor.
    pub(crate) fn ratio(self) -> f64 {
        self.width as f64 / self.height as f64
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected dimensions as WxH with positive components, got '{0}'")]
pub struct ParseDimensionsError(pub String);

impl FromStr for Dimensions {
    type Err = ParseDimensionsError;

    /// Parses `"800x600"` (or `"800X600"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let err = || ParseDimensionsError(token.to_string());
        let (w, h) = token.split_once(['x', 'X']).ok_or_else(|| err())?;
        let width: u32 = w.trim().parse().map_err(|_| err())?;
        let height: u32 = h.trim().parse().map_err(|_| err())?;
        if width == 0 || height == 0 {
            return Err(err());
        }
        Ok(Dimensions::new(width, height))
    }
}

/// Centered region of the source to draw from, in source pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// The whole source frame.
    pub fn full(source: Dimensions) -> Self {
        Self {
            x: 0,
            y: 0,
            width: source.width,
            height: source.height,
        }
    }

    /// Whether this rect covers the whole source frame.
    pub fn is_full(&self, source: Dimensions) -> bool {
        *self == Self::full(source)
    }
}

/// Output of geometry resolution: the canvas to produce and the source region
/// that fills it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedGeometry {
    pub target: Dimensions,
    pub crop: CropRect,
}

/// Rejected resize inputs.
///
/// Everything here is a caller mistake, reported before any pixel work
/// happens. `DegenerateTarget` is the one arithmetic outcome: a request that
/// is individually valid can still round the target down to a zero axis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("source dimensions must be positive, got {width}x{height}")]
    EmptySource { width: u32, height: u32 },
    #[error("{field} must be positive")]
    ZeroField { field: &'static str },
    #[error("percentage must be a positive finite number, got {value}")]
    InvalidPercentage { value: f64 },
    #[error("requested geometry collapses to {width}x{height}; nothing would be left to render")]
    DegenerateTarget { width: u32, height: u32 },
}

/// Resolve the target canvas and center crop for one resize request.
///
/// Runs the sizing, ratio-override, and center-crop steps in order and
/// reports the first problem found. The crop rectangle always lies fully
/// inside the source frame.
///
/// # Examples
/// ```
/// use reframe::geometry::{resolve, AspectRatio, Dimensions, ResizeRequest};
///
/// // Square a 2:1 landscape: the canvas shrinks to 500x500 and the crop
/// // takes the middle square of the source.
/// let request = ResizeRequest {
///     aspect_ratio: AspectRatio::Square,
///     ..ResizeRequest::default()
/// };
/// let geometry = resolve(Dimensions::new(1000, 500), &request).unwrap();
/// assert_eq!(geometry.target, Dimensions::new(500, 500));
/// assert_eq!((geometry.crop.x, geometry.crop.y), (250, 0));
/// assert_eq!((geometry.crop.width, geometry.crop.height), (500, 500));
/// ```
pub fn resolve(
    source: Dimensions,
    request: &ResizeRequest,
) -> Result<ResolvedGeometry, GeometryError> {
    validate(source, request)?;
    let target = ensure_positive(initial_target(source, request))?;
    let target = ensure_positive(apply_ratio_override(target, request))?;
    let crop = center_crop(source, target);
    Ok(ResolvedGeometry { target, crop })
}

fn validate(source: Dimensions, request: &ResizeRequest) -> Result<(), GeometryError> {
    if source.width == 0 || source.height == 0 {
        return Err(GeometryError::EmptySource {
            width: source.width,
            height: source.height,
        });
    }
    if let Some(value) = request.percentage {
        if !value.is_finite() || value <= 0.0 {
            return Err(GeometryError::InvalidPercentage { value });
        }
    }
    if request.width == Some(0) {
        return Err(GeometryError::ZeroField {
            field: "target width",
        });
    }
    if request.height == Some(0) {
        return Err(GeometryError::ZeroField {
            field: "target height",
        });
    }
    if let Some(pair) = request.custom_ratio {
        if pair.width == 0 {
            return Err(GeometryError::ZeroField {
                field: "custom ratio width",
            });
        }
        if pair.height == 0 {
            return Err(GeometryError::ZeroField {
                field: "custom ratio height",
            });
        }
    }
    Ok(())
}

/// Sizing step: initial target from the request's sizing fields.
///
/// Precedence is strict: percentage beats explicit dimensions, both explicit
/// dimensions are taken verbatim, a single dimension derives or carries the
/// other axis, and no sizing field keeps the source size.
fn initial_target(source: Dimensions, request: &ResizeRequest) -> (u32, u32) {
    match (request.percentage, request.width, request.height) {
        (Some(percentage), _, _) => {
            let scale = percentage / 100.0;
            (
                (source.width as f64 * scale).round() as u32,
                (source.height as f64 * scale).round() as u32,
            )
        }
        (None, Some(width), Some(height)) => (width, height),
        (None, Some(width), None) => {
            let height = if request.maintain_aspect_ratio {
                (width as f64 / source.ratio()).round() as u32
            } else {
                source.height
            };
            (width, height)
        }
        (None, None, Some(height)) => {
            let width = if request.maintain_aspect_ratio {
                (height as f64 * source.ratio()).round() as u32
            } else {
                source.width
            };
            (width, height)
        }
        (None, None, None) => (source.width, source.height),
    }
}

/// Ratio-override step: shrink one target axis to honor the requested ratio.
///
/// Never grows an axis. A target wider than the requested ratio keeps its
/// height and narrows; anything else (including an exact match) keeps its
/// width and recomputes the height.
fn apply_ratio_override(target: Dimensions, request: &ResizeRequest) -> (u32, u32) {
    let Some(ratio) = ratio_value(request.aspect_ratio, request.custom_ratio) else {
        return (target.width, target.height);
    };
    if target.ratio() > ratio {
        let width = (target.height as f64 * ratio).round() as u32;
        (width, target.height)
    } else {
        let height = (target.width as f64 / ratio).round() as u32;
        (target.width, height)
    }
}

/// Crop step: largest centered source region matching the target proportions.
///
/// One crop axis always spans the full source; the other is trimmed equally
/// from both ends, with an odd leftover pixel going to the leading edge. A
/// trimmed axis that rounds to zero is floored at one pixel.
fn center_crop(source: Dimensions, target: Dimensions) -> CropRect {
    let source_ratio = source.ratio();
    let target_ratio = target.ratio();

    if source_ratio > target_ratio {
        // Source is proportionally wider: trim the sides.
        let width = (source.height as f64 * target_ratio).round().max(1.0) as u32;
        let x = ((source.width - width) as f64 / 2.0).round() as u32;
        CropRect {
            x,
            y: 0,
            width,
            height: source.height,
        }
    } else if source_ratio < target_ratio {
        // Source is proportionally taller: trim top and bottom.
        let height = (source.width as f64 / target_ratio).round().max(1.0) as u32;
        let y = ((source.height - height) as f64 / 2.0).round() as u32;
        CropRect {
            x: 0,
            y,
            width: source.width,
            height,
        }
    } else {
        CropRect::full(source)
    }
}

fn ensure_positive(target: (u32, u32)) -> Result<Dimensions, GeometryError> {
    match target {
        (width @ 0, height) | (width, height @ 0) => {
            Err(GeometryError::DegenerateTarget { width, height })
        }
        (width, height) => Ok(Dimensions::new(width, height)),
    }
}
