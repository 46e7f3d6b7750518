//! Owning source state: settings diffing, pyramid regeneration, selection.
//!
//! `SvgSource` is the single owner of the texture pyramid. Updates are
//! synchronous and single-threaded by host contract; the render view reads
//! whatever the last update selected.

use std::mem;

use crate::config::{InputKind, SourceConfig, keys};
use crate::pyramid::{TexturePyramid, build_pyramid};
use crate::select::{RenderSelection, select};
use crate::settings::Settings;
use crate::texture::{GraphicsScope, Rasterizer, SvgInput};

/// Baseline size provider, typically backed by the active display surface.
pub trait DisplayDefaults {
    /// Base width/height of the active surface.
    fn base_dimensions(&self) -> (u32, u32);
}

/// Fixed baseline, for hosts without a live surface and for tests.
#[derive(Clone, Copy, Debug)]
pub struct StaticDisplay {
    pub width: u32,
    pub height: u32,
}

impl DisplayDefaults for StaticDisplay {
    fn base_dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// One selectable frame: the chosen texture and the dimensions to draw it at.
#[derive(Debug)]
pub struct Frame<'a, T> {
    pub texture: &'a T,
    pub width: u32,
    pub height: u32,
}

/// The resolution-pyramid engine for a single SVG source.
pub struct SvgSource<R: Rasterizer> {
    raster: R,
    config: Option<SourceConfig>,
    pyramid: TexturePyramid<R::Texture>,
    selection: RenderSelection,
}

impl<R: Rasterizer> SvgSource<R> {
    pub fn new(raster: R) -> Self {
        Self {
            raster,
            config: None,
            pyramid: TexturePyramid::empty(),
            selection: RenderSelection::default(),
        }
    }

    /// Apply a settings snapshot.
    ///
    /// Regenerates the pyramid only when an input that feeds rasterization
    /// changed (input value under the active kind, the kind itself, the
    /// scale mode, or the max texture size); the selection is recomputed
    /// unconditionally so it always reflects the latest target size.
    pub fn update(
        &mut self,
        settings: &mut Settings,
        display: &dyn DisplayDefaults,
    ) -> crate::MipsvgResult<()> {
        // Feed the current render size back into the snapshot; when it is
        // not known yet, fall back to the last stored one.
        let mut reported_w = self.selection.render_width;
        let mut reported_h = self.selection.render_height;
        if reported_w > 0 {
            settings.set_int(keys::SOURCE_WIDTH, i64::from(reported_w));
        } else {
            reported_w = settings.int(keys::SOURCE_WIDTH).max(0) as u32;
        }
        if reported_h > 0 {
            settings.set_int(keys::SOURCE_HEIGHT, i64::from(reported_h));
        } else {
            reported_h = settings.int(keys::SOURCE_HEIGHT).max(0) as u32;
        }

        write_defaults(settings, display);

        let mut config = SourceConfig::from_settings(settings)?;
        if config.target_width == 0 {
            config.target_width = reported_w;
        }
        if config.target_height == 0 {
            config.target_height = reported_h;
        }

        let (regen, kind_changed) = match &self.config {
            None => (true, true),
            Some(prev) => {
                // The value comparison happens under the *new* input kind.
                let input_changed = match config.input_kind {
                    InputKind::File => prev.file_path != config.file_path,
                    InputKind::Text => prev.inline_text != config.inline_text,
                };
                let kind_changed = prev.input_kind != config.input_kind;
                (
                    input_changed
                        || kind_changed
                        || prev.scale_mode != config.scale_mode
                        || prev.max_texture_size != config.max_texture_size,
                    kind_changed,
                )
            }
        };

        if regen {
            if !config.input_is_empty() {
                self.rebuild_pyramid(&config);
            } else if kind_changed {
                // Empty input under a *new* kind invalidates the old pyramid;
                // momentary emptiness under the same kind keeps it (stale but
                // valid beats flicker).
                self.teardown_pyramid();
            }
        }

        self.selection = if self.pyramid.is_empty() {
            RenderSelection::default()
        } else {
            select(
                &self.pyramid,
                config.scale_mode,
                config.target_width,
                config.target_height,
            )
        };

        self.config = Some(config);
        Ok(())
    }

    fn rebuild_pyramid(&mut self, config: &SourceConfig) {
        let input = SvgInput::new(config.input_kind, config.active_input());
        let fresh = build_pyramid(
            &self.raster,
            input,
            config.scale_mode,
            config.max_texture_size,
        );
        let old = mem::replace(&mut self.pyramid, fresh);
        Self::destroy_in_scope(&self.raster, old);
    }

    fn teardown_pyramid(&mut self) {
        let old = mem::replace(&mut self.pyramid, TexturePyramid::empty());
        Self::destroy_in_scope(&self.raster, old);
    }

    fn destroy_in_scope(raster: &R, mut pyramid: TexturePyramid<R::Texture>) {
        if pyramid.is_empty() {
            return;
        }
        let _scope = GraphicsScope::enter(raster);
        pyramid.destroy();
    }

    /// Currently selected texture plus the dimensions to draw it at.
    ///
    /// `None` while the pyramid is empty (no input yet, or every level
    /// failed to rasterize): the render step draws nothing and stays quiet.
    pub fn frame(&self) -> Option<Frame<'_, R::Texture>> {
        let level = self.pyramid.level(self.selection.selected_index)?;
        Some(Frame {
            texture: &level.texture,
            width: self.selection.render_width,
            height: self.selection.render_height,
        })
    }

    /// Current render width, as reported to the host.
    pub fn width(&self) -> u32 {
        self.selection.render_width
    }

    /// Current render height, as reported to the host.
    pub fn height(&self) -> u32 {
        self.selection.render_height
    }

    pub fn selection(&self) -> RenderSelection {
        self.selection
    }

    pub fn pyramid(&self) -> &TexturePyramid<R::Texture> {
        &self.pyramid
    }

    pub fn rasterizer(&self) -> &R {
        &self.raster
    }
}

impl<R: Rasterizer> Drop for SvgSource<R> {
    fn drop(&mut self) {
        if self.pyramid.is_empty() {
            return;
        }
        let _scope = GraphicsScope::enter(&self.raster);
        self.pyramid.destroy();
    }
}

/// Derive and store defaults once: a square baseline from the display
/// surface, a max texture size of twice that, file input, width scaling.
fn write_defaults(settings: &mut Settings, display: &dyn DisplayDefaults) {
    let (base_w, base_h) = display.base_dimensions();
    let size = i64::from(base_w.min(base_h));
    settings.set_default_int(keys::TARGET_WIDTH, size);
    settings.set_default_int(keys::TARGET_HEIGHT, size);
    settings.set_default_int(keys::MAX_TEXTURE_SIZE, 2 * size);
    settings.set_default_int(keys::INPUT_KIND, InputKind::File as i64);
    settings.set_default_int(keys::SCALE_MODE, crate::config::ScaleMode::Width as i64);
}
