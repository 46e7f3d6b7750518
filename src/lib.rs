//! mipsvg renders an SVG into a ladder of power-of-two textures (a
//! resolution pyramid) and selects the best level for the current display
//! size under an aspect-ratio-preserving scale policy.
//!
//! The flow is settings-driven:
//!
//! - Build a [`SvgSource`] over a [`Rasterizer`]
//! - Feed it [`Settings`] snapshots via [`SvgSource::update`]
//! - Read back [`SvgSource::frame`] each render tick
//!
//! Rebuilds only happen when an input that feeds rasterization actually
//! changed; target-size changes just reselect, which is cheap.
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod pyramid;
pub mod raster;
pub mod scale;
pub mod select;
pub mod settings;
pub mod source;
pub mod texture;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{InputKind, ScaleMode, SourceConfig};
pub use error::{MipsvgError, MipsvgResult};
pub use pyramid::{PyramidLevel, TexturePyramid, build_pyramid};
pub use raster::{ResvgRasterizer, SoftwareTexture};
pub use scale::{clamped_level_index, level_index, next_power_of_2};
pub use select::{RenderSelection, select};
pub use settings::Settings;
pub use source::{DisplayDefaults, Frame, StaticDisplay, SvgSource};
pub use texture::{GpuTexture, GraphicsScope, Rasterizer, SvgInput};
