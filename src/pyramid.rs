//! Resolution-pyramid construction.
//!
//! A pyramid is the ladder of rasterized textures for one SVG input: sizes
//! 8, 16, 32, ... up to the largest power of two `<= max_texture_size`, plus
//! one capped level at exactly `max_texture_size` when it is not a power of
//! two already covered. Rebuilds are wholesale: the previous pyramid is torn
//! down completely, individual levels are never patched.

use crate::config::ScaleMode;
use crate::scale::MIN_LEVEL_SIZE;
use crate::texture::{GpuTexture, GraphicsScope, Rasterizer, SvgInput};

/// One rasterized level of the pyramid.
#[derive(Debug)]
pub struct PyramidLevel<T> {
    /// Size the level was requested at (power of two, or the capped tail).
    pub size_px: u32,
    /// Actual texture width as produced by the rasterizer.
    pub width: u32,
    /// Actual texture height as produced by the rasterizer.
    pub height: u32,
    pub texture: T,
}

/// Ordered ladder of levels, strictly increasing in `size_px`.
///
/// Exclusively owned by its source; destroy via [`TexturePyramid::destroy`]
/// inside a graphics scope before dropping.
#[derive(Debug, Default)]
pub struct TexturePyramid<T> {
    levels: Vec<PyramidLevel<T>>,
}

impl<T> TexturePyramid<T> {
    pub fn empty() -> Self {
        Self { levels: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, index: usize) -> Option<&PyramidLevel<T>> {
        self.levels.get(index)
    }

    pub fn first(&self) -> Option<&PyramidLevel<T>> {
        self.levels.first()
    }

    pub fn levels(&self) -> &[PyramidLevel<T>] {
        &self.levels
    }
}

impl<T: GpuTexture> TexturePyramid<T> {
    /// Destroy every level's texture and clear the ladder.
    ///
    /// Caller must hold a graphics scope. Safe to call repeatedly: texture
    /// destroy is idempotent by contract and the level list is drained.
    pub fn destroy(&mut self) {
        for mut level in self.levels.drain(..) {
            level.texture.destroy();
        }
    }
}

/// Rasterize the full ladder for `input`.
///
/// `max_texture_size` below 8 is clamped to 8 (single-level pyramid). Failed
/// levels (rasterizer returned `None`) are skipped rather than stored; when
/// every level fails the result is empty and the caller renders nothing.
///
/// One graphics scope is held for the whole build.
#[tracing::instrument(skip(raster, input), fields(input_len = input.value().len()))]
pub fn build_pyramid<R: Rasterizer>(
    raster: &R,
    input: SvgInput<'_>,
    mode: ScaleMode,
    max_texture_size: u32,
) -> TexturePyramid<R::Texture> {
    let max_size = max_texture_size.max(MIN_LEVEL_SIZE);
    let mut levels = Vec::new();

    let _scope = GraphicsScope::enter(raster);

    let mut size = MIN_LEVEL_SIZE;
    let mut last_requested = size;
    while size <= max_size {
        push_level(&mut levels, raster, input, size, mode);
        last_requested = size;
        let Some(next) = size.checked_mul(2) else {
            // Doubling left u32 range; the capped tail below covers the rest.
            break;
        };
        size = next;
    }

    // Cap the ladder at exactly max_size when the power-of-two walk stopped
    // short of it.
    if last_requested < max_size {
        push_level(&mut levels, raster, input, max_size, mode);
    }

    tracing::debug!(levels = levels.len(), max_size, "pyramid built");
    TexturePyramid { levels }
}

fn push_level<R: Rasterizer>(
    levels: &mut Vec<PyramidLevel<R::Texture>>,
    raster: &R,
    input: SvgInput<'_>,
    size: u32,
    mode: ScaleMode,
) {
    match raster.rasterize(input, size, size, mode) {
        Some(texture) => {
            levels.push(PyramidLevel {
                size_px: size,
                width: texture.width(),
                height: texture.height(),
                texture,
            });
        }
        None => {
            tracing::warn!(size, "rasterization failed, skipping pyramid level");
        }
    }
}
