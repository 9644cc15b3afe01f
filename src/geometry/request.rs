//! Resize request and encoder-quality types.

use super::ratio::{AspectRatio, CustomRatio};

/// Lossy-encoder quality factor in `[0.0, 1.0]`.
///
/// Values outside the range are clamped on construction; non-finite input
/// falls back to the default of `0.92`. Geometry resolution never reads this
/// field, it rides along for the encode step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quality(f32);

impl Quality {
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 1.0))
        } else {
            Self::default()
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Quality on the 1-100 scale the `image` crate encoders take.
    pub fn percent(self) -> u8 {
        ((self.0 * 100.0).round() as u8).clamp(1, 100)
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(0.92)
    }
}

/// Complete description of one resize action.
///
/// Mirrors the controls of an interactive resizer: an aspect-ratio choice, at
/// most one sizing mode, and the maintain-aspect toggle for single-dimension
/// requests. The sizing fields follow a strict precedence: `percentage` wins
/// over `width`/`height`, and with no sizing field at all the source size is
/// kept. Built once per action and never mutated by the resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeRequest {
    pub aspect_ratio: AspectRatio,
    /// Numeric pair for [`AspectRatio::Custom`]. Ignored by other variants;
    /// `Custom` without a pair means no ratio constraint.
    pub custom_ratio: Option<CustomRatio>,
    /// Target width in pixels.
    pub width: Option<u32>,
    /// Target height in pixels.
    pub height: Option<u32>,
    /// Uniform scale percentage, where 100 keeps the source size.
    pub percentage: Option<f64>,
    /// When exactly one of `width`/`height` is set: derive the other axis from
    /// the source proportions (`true`) or carry the source's value (`false`).
    pub maintain_aspect_ratio: bool,
    /// Encoder quality for lossy output formats.
    pub quality: Quality,
}

impl Default for ResizeRequest {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectRatio::Original,
            custom_ratio: None,
            width: None,
            height: None,
            percentage: None,
            maintain_aspect_ratio: true,
            quality: Quality::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Quality tests
    // =========================================================================

    #[test]
    fn quality_accepts_valid_range() {
        assert_eq!(Quality::new(0.0).value(), 0.0);
        assert_eq!(Quality::new(0.5).value(), 0.5);
        assert_eq!(Quality::new(1.0).value(), 1.0);
    }

    #[test]
    fn quality_clamps_out_of_range() {
        assert_eq!(Quality::new(-0.3).value(), 0.0);
        assert_eq!(Quality::new(1.7).value(), 1.0);
    }

    #[test]
    fn quality_rejects_non_finite() {
        assert_eq!(Quality::new(f32::NAN), Quality::default());
        assert_eq!(Quality::new(f32::INFINITY), Quality::default());
    }

    #[test]
    fn quality_default_is_ninety_two() {
        assert_eq!(Quality::default().value(), 0.92);
        assert_eq!(Quality::default().percent(), 92);
    }

    #[test]
    fn quality_percent_never_reaches_zero() {
        // Encoders take 1-100, so 0.0 maps to the floor of 1.
        assert_eq!(Quality::new(0.0).percent(), 1);
        assert_eq!(Quality::new(1.0).percent(), 100);
        assert_eq!(Quality::new(0.005).percent(), 1);
    }

    // =========================================================================
    // ResizeRequest tests
    // =========================================================================

    #[test]
    fn default_request_changes_nothing() {
        let request = ResizeRequest::default();
        assert_eq!(request.aspect_ratio, AspectRatio::Original);
        assert_eq!(request.custom_ratio, None);
        assert_eq!(request.width, None);
        assert_eq!(request.height, None);
        assert_eq!(request.percentage, None);
        assert!(request.maintain_aspect_ratio);
    }
}
