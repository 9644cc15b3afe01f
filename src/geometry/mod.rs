//! Geometry resolution: pure arithmetic, zero I/O.
//!
//! | Step | What it decides |
//! |---|---|
//! | **Sizing** | initial target canvas from percentage or explicit dimensions |
//! | **Ratio override** | shrink one axis to honor a requested aspect ratio |
//! | **Center crop** | largest centered source region matching the target |
//!
//! The module is split into:
//! - **Ratio**: [`AspectRatio`] choices, the named-ratio table, `W:H` parsing
//! - **Request**: [`ResizeRequest`] and the [`Quality`] factor it carries
//! - **Resolve**: [`resolve`], the three-step pipeline and its error taxonomy

mod ratio;
mod request;
mod resolve;

pub use ratio::{AspectRatio, CustomRatio, ParseRatioError, RatioSpec, ratio_value};
pub use request::{Quality, ResizeRequest};
pub use resolve::{
    CropRect, Dimensions, GeometryError, ParseDimensionsError, ResolvedGeometry, resolve,
};
