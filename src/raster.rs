//! Software rasterizer backend built on `usvg`/`resvg`.
//!
//! The engine treats its rasterizer as opaque; this backend exists so the
//! crate works end to end without a host GPU runtime. Output textures are
//! premultiplied RGBA8 pixel buffers sized per the scale mode: the requested
//! width/height are upper bounds and the produced dimensions respect the
//! SVG's intrinsic aspect ratio unless the mode is `Both`.

use std::sync::Arc;

use anyhow::Context as _;

use crate::config::ScaleMode;
use crate::error::{MipsvgError, MipsvgResult};
use crate::texture::{GpuTexture, Rasterizer, SvgInput};

/// CPU-resident texture: premultiplied RGBA8, row-major, tightly packed.
#[derive(Clone, Debug)]
pub struct SoftwareTexture {
    width: u32,
    height: u32,
    pixels: Option<Arc<Vec<u8>>>,
}

impl SoftwareTexture {
    /// Pixel bytes, `None` once destroyed.
    pub fn pixels(&self) -> Option<&Arc<Vec<u8>>> {
        self.pixels.as_ref()
    }
}

impl GpuTexture for SoftwareTexture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn destroy(&mut self) {
        // Idempotent: dropping the buffer twice is a no-op.
        self.pixels = None;
    }
}

/// Rasterizer over `resvg` with no graphics-context requirement (the
/// enter/leave hooks are no-ops for CPU pixmaps).
#[derive(Default)]
pub struct ResvgRasterizer {
    options: usvg::Options<'static>,
}

impl ResvgRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn parse(&self, input: SvgInput<'_>) -> MipsvgResult<usvg::Tree> {
        let bytes = match input {
            SvgInput::File(path) => std::fs::read(path).map_err(MipsvgError::Io)?,
            SvgInput::Text(markup) => markup.as_bytes().to_vec(),
        };
        usvg::Tree::from_data(&bytes, &self.options)
            .context("parse svg tree")
            .map_err(MipsvgError::Other)
    }

    fn try_rasterize(
        &self,
        input: SvgInput<'_>,
        width: u32,
        height: u32,
        mode: ScaleMode,
    ) -> MipsvgResult<SoftwareTexture> {
        let tree = self.parse(input)?;
        let (out_w, out_h) = output_dims(&tree, width, height, mode)?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(out_w, out_h)
            .ok_or_else(|| MipsvgError::raster("failed to allocate svg pixmap"))?;

        let sx = (out_w as f32) / tree.size().width();
        let sy = (out_h as f32) / tree.size().height();
        let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

        resvg::render(&tree, xform, &mut pixmap.as_mut());

        Ok(SoftwareTexture {
            width: out_w,
            height: out_h,
            pixels: Some(Arc::new(pixmap.data().to_vec())),
        })
    }
}

impl Rasterizer for ResvgRasterizer {
    type Texture = SoftwareTexture;

    fn enter_graphics(&self) {}

    fn leave_graphics(&self) {}

    fn rasterize(
        &self,
        input: SvgInput<'_>,
        width: u32,
        height: u32,
        mode: ScaleMode,
    ) -> Option<Self::Texture> {
        match self.try_rasterize(input, width, height, mode) {
            Ok(tex) => Some(tex),
            Err(err) => {
                tracing::warn!(%err, width, height, "svg rasterization failed");
                None
            }
        }
    }
}

/// Aspect-respecting output size for a requested bound under `mode`.
fn output_dims(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
    mode: ScaleMode,
) -> MipsvgResult<(u32, u32)> {
    fn to_px(v: f32) -> MipsvgResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(MipsvgError::raster("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let base_w = to_px(tree.size().width())?;
    let base_h = to_px(tree.size().height())?;

    let (w, h) = match mode {
        ScaleMode::Width => {
            let h = (f64::from(width) * f64::from(base_h) / f64::from(base_w)).round() as u32;
            (width, h)
        }
        ScaleMode::Height => {
            let w = (f64::from(height) * f64::from(base_w) / f64::from(base_h)).round() as u32;
            (w, height)
        }
        ScaleMode::Both => (width, height),
    };

    if w == 0 || h == 0 {
        return Err(MipsvgError::raster("svg output size collapsed to zero"));
    }
    Ok((w, h))
}
