//! Tool configuration module.
//!
//! Handles loading and validating `reframe.toml`. Every command looks for the
//! file in the current directory unless `--config` points elsewhere; with no
//! file at all, stock defaults apply. Command-line flags override whatever the
//! file says.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [geometry]
//! ratio = "original"   # Default aspect ratio: a name or a W:H pair
//! keep_aspect = true   # Derive the missing axis on single-dimension requests
//!
//! [render]
//! quality = 0.92       # Lossy encode quality, 0.0-1.0
//! # format = "jpg"     # Force one output format; absent = follow each source
//!
//! [processing]
//! # max_threads = 4    # Parallel workers; absent = number of CPU cores
//! ```
//!
//! User files only need the keys they want to override; every struct carries
//! serde defaults. Unknown keys are rejected so typos fail loudly.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::RatioSpec;
use crate::render::OutputFormat;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Name of the config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "reframe.toml";

/// Tool configuration loaded from `reframe.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Default geometry settings (ratio, aspect handling).
    pub geometry: GeometryConfig,
    /// Encoder settings (quality, forced output format).
    pub render: RenderConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

/// Default geometry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeometryConfig {
    /// Default aspect ratio: a name like `"square"` or a pair like `"21:9"`.
    pub ratio: String,
    /// Derive the missing axis from the source proportions when only one
    /// of width/height is requested.
    pub keep_aspect: bool,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            ratio: "original".to_string(),
            keep_aspect: true,
        }
    }
}

/// Encoder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Lossy encode quality in `0.0-1.0` (JPEG and AVIF outputs).
    pub quality: f32,
    /// Force one output format for every file. Absent means each output
    /// keeps its source's format.
    pub format: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            quality: 0.92,
            format: None,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel render workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_threads: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_threads.map(|n| n.min(cores)).unwrap_or(cores)
}

impl ToolConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: ToolConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config the CLI should run with.
    ///
    /// An explicit `--config` path must exist and parse. Without one, the
    /// default file is loaded when present and stock defaults apply when not.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate semantic constraints beyond what serde enforces.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.render.quality) {
            return Err(ConfigError::Validation(format!(
                "render.quality must be between 0.0 and 1.0, got {}",
                self.render.quality
            )));
        }
        self.geometry
            .ratio
            .parse::<RatioSpec>()
            .map_err(|e| ConfigError::Validation(format!("geometry.ratio: {}", e)))?;
        if let Some(format) = &self.render.format {
            format
                .parse::<OutputFormat>()
                .map_err(|e| ConfigError::Validation(format!("render.format: {}", e)))?;
        }
        if self.processing.max_threads == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// The parsed default ratio. Validation guarantees this cannot fail on a
    /// loaded config.
    pub fn default_ratio(&self) -> Result<RatioSpec, ConfigError> {
        self.geometry
            .ratio
            .parse::<RatioSpec>()
            .map_err(|e| ConfigError::Validation(format!("geometry.ratio: {}", e)))
    }

    /// The parsed forced output format, if the config sets one.
    pub fn output_format(&self) -> Result<Option<OutputFormat>, ConfigError> {
        self.render
            .format
            .as_deref()
            .map(|format| {
                format
                    .parse::<OutputFormat>()
                    .map_err(|e| ConfigError::Validation(format!("render.format: {}", e)))
            })
            .transpose()
    }
}

/// Returns a fully-commented stock `reframe.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# reframe configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags always win
# over config values. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Geometry
# ---------------------------------------------------------------------------
[geometry]
# Default aspect ratio applied when --ratio is not given.
# Names: original, square, banner, wide, widescreen, standard, portrait.
# Or any width:height pair, e.g. "21:9".
ratio = "original"

# When only one of --width/--height is given, derive the other axis from
# the source proportions (true) or keep the source's own value (false).
keep_aspect = true

# ---------------------------------------------------------------------------
# Rendering
# ---------------------------------------------------------------------------
[render]
# Encode quality for lossy outputs (JPEG, AVIF), from 0.0 to 1.0.
# PNG is always lossless; WebP output is lossless in this build.
quality = 0.92

# Force every output into one format: "jpg", "png", "webp", or "avif".
# Leave unset to keep each source's own format.
# format = "jpg"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel render workers. Defaults to the number of CPU cores;
# values above the core count are clamped down.
# max_threads = 4
"##
}
