//! Aspect-ratio selection and the named-ratio lookup table.
//!
//! A resize request carries an [`AspectRatio`] choice plus, for the `Custom`
//! variant, a numeric [`CustomRatio`] pair. [`ratio_value`] turns that pair of
//! fields into the width-over-height factor the resolver constrains against,
//! or `None` when the source ratio should be left alone.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Target aspect-ratio choice for a resize request.
///
/// `Original` means no ratio constraint. `Custom` takes its numeric pair from
/// the request's `custom_ratio` field; a `Custom` choice without a pair also
/// resolves as unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectRatio {
    /// Keep the source's own proportions.
    Original,
    /// 1:1.
    Square,
    /// 4:1, a wide banner strip.
    Banner,
    /// 3:1.
    Wide,
    /// 16:9.
    Widescreen,
    /// 4:3.
    Standard,
    /// 9:16, the widescreen ratio turned on its side.
    Portrait,
    /// Arbitrary width:height pair supplied alongside the request.
    Custom,
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AspectRatio::Original => "original",
            AspectRatio::Square => "1:1",
            AspectRatio::Banner => "4:1",
            AspectRatio::Wide => "3:1",
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Standard => "4:3",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Custom => "custom",
        };
        write!(f, "{}", label)
    }
}

/// Width:height pair for [`AspectRatio::Custom`].
///
/// Both components must be positive; the resolver rejects zeroes before any
/// ratio arithmetic happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomRatio {
    pub width: u32,
    pub height: u32,
}

impl CustomRatio {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for CustomRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

/// Numeric width-over-height factor for a ratio choice.
///
/// Returns `None` when no ratio constraint applies: for `Original`, and for
/// `Custom` without a numeric pair. Assumes any custom pair has already been
/// validated as nonzero.
pub fn ratio_value(ratio: AspectRatio, custom: Option<CustomRatio>) -> Option<f64> {
    match ratio {
        AspectRatio::Original => None,
        AspectRatio::Square => Some(1.0),
        AspectRatio::Banner => Some(4.0),
        AspectRatio::Wide => Some(3.0),
        AspectRatio::Widescreen => Some(16.0 / 9.0),
        AspectRatio::Standard => Some(4.0 / 3.0),
        AspectRatio::Portrait => Some(9.0 / 16.0),
        AspectRatio::Custom => custom.map(|c| c.width as f64 / c.height as f64),
    }
}

/// A parsed ratio argument: the choice plus the custom pair when one was given.
///
/// This is the form ratio values arrive in from CLI flags and config files.
/// Accepted spellings: the names (`original`, `square`, `banner`, `wide`,
/// `widescreen`, `standard`, `portrait`), the equivalent `W:H` pairs (`1:1`,
/// `4:1`, ...), any other positive `W:H` pair (parsed as custom), or the bare
/// word `custom` (falls back to 16:9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatioSpec {
    pub ratio: AspectRatio,
    pub custom: Option<CustomRatio>,
}

impl RatioSpec {
    pub const ORIGINAL: RatioSpec = RatioSpec {
        ratio: AspectRatio::Original,
        custom: None,
    };

    pub const fn named(ratio: AspectRatio) -> Self {
        Self {
            ratio,
            custom: None,
        }
    }

    pub const fn custom(width: u32, height: u32) -> Self {
        Self {
            ratio: AspectRatio::Custom,
            custom: Some(CustomRatio::new(width, height)),
        }
    }
}

impl Default for RatioSpec {
    fn default() -> Self {
        Self::ORIGINAL
    }
}

impl fmt::Display for RatioSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.ratio, self.custom) {
            (AspectRatio::Custom, Some(pair)) => write!(f, "{}", pair),
            (ratio, _) => write!(f, "{}", ratio),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseRatioError {
    #[error("unrecognized aspect ratio '{0}' (expected a name like 'square', or a W:H pair like '21:9')")]
    Unrecognized(String),
    #[error("aspect ratio components must be positive in '{0}'")]
    ZeroComponent(String),
}

impl FromStr for RatioSpec {
    type Err = ParseRatioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let named = match token.to_ascii_lowercase().as_str() {
            "original" => Some(AspectRatio::Original),
            "square" | "1:1" => Some(AspectRatio::Square),
            "banner" | "4:1" => Some(AspectRatio::Banner),
            "wide" | "3:1" => Some(AspectRatio::Wide),
            "widescreen" | "16:9" => Some(AspectRatio::Widescreen),
            "standard" | "4:3" => Some(AspectRatio::Standard),
            "portrait" | "9:16" => Some(AspectRatio::Portrait),
            _ => None,
        };
        if let Some(ratio) = named {
            return Ok(RatioSpec::named(ratio));
        }
        // Bare "custom" keeps the interactive default of 16:9.
        if token.eq_ignore_ascii_case("custom") {
            return Ok(RatioSpec::custom(16, 9));
        }
        let Some((w, h)) = token.split_once(':') else {
            return Err(ParseRatioError::Unrecognized(token.to_string()));
        };
        let width: u32 = w
            .trim()
            .parse()
            .map_err(|_| ParseRatioError::Unrecognized(token.to_string()))?;
        let height: u32 = h
            .trim()
            .parse()
            .map_err(|_| ParseRatioError::Unrecognized(token.to_string()))?;
        if width == 0 || height == 0 {
            return Err(ParseRatioError::ZeroComponent(token.to_string()));
        }
        Ok(RatioSpec::custom(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // ratio_value tests
    // =========================================================================

    #[test]
    fn named_ratios_match_table() {
        assert_eq!(ratio_value(AspectRatio::Square, None), Some(1.0));
        assert_eq!(ratio_value(AspectRatio::Banner, None), Some(4.0));
        assert_eq!(ratio_value(AspectRatio::Wide, None), Some(3.0));
        assert_eq!(ratio_value(AspectRatio::Widescreen, None), Some(16.0 / 9.0));
        assert_eq!(ratio_value(AspectRatio::Standard, None), Some(4.0 / 3.0));
        assert_eq!(ratio_value(AspectRatio::Portrait, None), Some(9.0 / 16.0));
    }

    #[test]
    fn original_has_no_value() {
        assert_eq!(ratio_value(AspectRatio::Original, None), None);
        // A stray custom pair does not change that.
        assert_eq!(
            ratio_value(AspectRatio::Original, Some(CustomRatio::new(2, 1))),
            None
        );
    }

    #[test]
    fn custom_uses_the_pair() {
        assert_eq!(
            ratio_value(AspectRatio::Custom, Some(CustomRatio::new(21, 9))),
            Some(21.0 / 9.0)
        );
    }

    #[test]
    fn custom_without_pair_has_no_value() {
        assert_eq!(ratio_value(AspectRatio::Custom, None), None);
    }

    // =========================================================================
    // RatioSpec parsing tests
    // =========================================================================

    #[test]
    fn parses_names() {
        assert_eq!(
            "original".parse::<RatioSpec>(),
            Ok(RatioSpec::named(AspectRatio::Original))
        );
        assert_eq!(
            "square".parse::<RatioSpec>(),
            Ok(RatioSpec::named(AspectRatio::Square))
        );
        assert_eq!(
            "banner".parse::<RatioSpec>(),
            Ok(RatioSpec::named(AspectRatio::Banner))
        );
        assert_eq!(
            "wide".parse::<RatioSpec>(),
            Ok(RatioSpec::named(AspectRatio::Wide))
        );
        assert_eq!(
            "widescreen".parse::<RatioSpec>(),
            Ok(RatioSpec::named(AspectRatio::Widescreen))
        );
        assert_eq!(
            "standard".parse::<RatioSpec>(),
            Ok(RatioSpec::named(AspectRatio::Standard))
        );
        assert_eq!(
            "portrait".parse::<RatioSpec>(),
            Ok(RatioSpec::named(AspectRatio::Portrait))
        );
    }

    #[test]
    fn parses_named_pairs_as_names() {
        // "16:9" is the widescreen preset, not a custom pair.
        assert_eq!(
            "16:9".parse::<RatioSpec>(),
            Ok(RatioSpec::named(AspectRatio::Widescreen))
        );
        assert_eq!(
            "1:1".parse::<RatioSpec>(),
            Ok(RatioSpec::named(AspectRatio::Square))
        );
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!(
            "Square".parse::<RatioSpec>(),
            Ok(RatioSpec::named(AspectRatio::Square))
        );
        assert_eq!(
            " WIDESCREEN ".parse::<RatioSpec>(),
            Ok(RatioSpec::named(AspectRatio::Widescreen))
        );
    }

    #[test]
    fn parses_arbitrary_pair_as_custom() {
        assert_eq!("21:9".parse::<RatioSpec>(), Ok(RatioSpec::custom(21, 9)));
        assert_eq!("2:3".parse::<RatioSpec>(), Ok(RatioSpec::custom(2, 3)));
    }

    #[test]
    fn bare_custom_falls_back_to_widescreen_pair() {
        assert_eq!("custom".parse::<RatioSpec>(), Ok(RatioSpec::custom(16, 9)));
    }

    #[test]
    fn rejects_zero_components() {
        assert_eq!(
            "0:5".parse::<RatioSpec>(),
            Err(ParseRatioError::ZeroComponent("0:5".to_string()))
        );
        assert_eq!(
            "5:0".parse::<RatioSpec>(),
            Err(ParseRatioError::ZeroComponent("5:0".to_string()))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            "sideways".parse::<RatioSpec>(),
            Err(ParseRatioError::Unrecognized(_))
        ));
        assert!(matches!(
            "16x9".parse::<RatioSpec>(),
            Err(ParseRatioError::Unrecognized(_))
        ));
        assert!(matches!(
            "16:".parse::<RatioSpec>(),
            Err(ParseRatioError::Unrecognized(_))
        ));
        assert!(matches!(
            "-4:3".parse::<RatioSpec>(),
            Err(ParseRatioError::Unrecognized(_))
        ));
    }

    #[test]
    fn display_round_trips_the_useful_forms() {
        assert_eq!(RatioSpec::named(AspectRatio::Widescreen).to_string(), "16:9");
        assert_eq!(RatioSpec::custom(21, 9).to_string(), "21:9");
        assert_eq!(RatioSpec::ORIGINAL.to_string(), "original");
    }
}
