//! Seams to the host graphics runtime.
//!
//! The engine never allocates GPU resources itself: it consumes a
//! [`Rasterizer`] that turns SVG data into textures and a [`GpuTexture`]
//! handle with size accessors and an explicit destroy. Both are only touched
//! while a graphics-context scope is held; [`GraphicsScope`] makes the
//! acquire/release pairing survive every exit path, including early returns
//! on rasterization failure.

use crate::config::{InputKind, ScaleMode};

/// SVG input for one rasterization call, dispatched by kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SvgInput<'a> {
    /// Path to an `.svg` file on disk.
    File(&'a str),
    /// Inline SVG markup.
    Text(&'a str),
}

impl<'a> SvgInput<'a> {
    /// Pair a kind with its value, as stored in the configuration snapshot.
    pub fn new(kind: InputKind, value: &'a str) -> Self {
        match kind {
            InputKind::File => Self::File(value),
            InputKind::Text => Self::Text(value),
        }
    }

    /// The underlying path or markup string.
    pub fn value(self) -> &'a str {
        match self {
            Self::File(v) | Self::Text(v) => v,
        }
    }

    /// Whether there is nothing to rasterize.
    pub fn is_empty(self) -> bool {
        self.value().is_empty()
    }
}

/// Owned texture handle produced by a [`Rasterizer`].
///
/// `width`/`height` and `destroy` may only be called inside a graphics scope.
/// `destroy` must be idempotent: pyramids are torn down wholesale on rebuild
/// and a double destroy must be a no-op, not a fault.
pub trait GpuTexture {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn destroy(&mut self);
}

/// External SVG rasterizer plus the graphics-context discipline it requires.
///
/// `rasterize` returns `None` on failure; the caller decides whether a failed
/// level is skipped or the whole pyramid ends up empty. The requested
/// `width`/`height` are upper bounds: the rasterizer returns a texture whose
/// actual dimensions respect the SVG's aspect ratio under `mode`, which is
/// why pyramid levels record the produced size rather than the requested one.
pub trait Rasterizer {
    type Texture: GpuTexture;

    /// Enter the graphics-context scope. Prefer [`GraphicsScope::enter`].
    fn enter_graphics(&self);

    /// Leave the graphics-context scope.
    fn leave_graphics(&self);

    /// Rasterize `input` into a texture no larger than `width` x `height`.
    ///
    /// Must only be called inside a graphics scope.
    fn rasterize(
        &self,
        input: SvgInput<'_>,
        width: u32,
        height: u32,
        mode: ScaleMode,
    ) -> Option<Self::Texture>;
}

/// RAII graphics-context scope: entered on construction, left on drop.
pub struct GraphicsScope<'a, R: Rasterizer + ?Sized> {
    ctx: &'a R,
}

impl<'a, R: Rasterizer + ?Sized> GraphicsScope<'a, R> {
    pub fn enter(ctx: &'a R) -> Self {
        ctx.enter_graphics();
        Self { ctx }
    }
}

impl<R: Rasterizer + ?Sized> Drop for GraphicsScope<'_, R> {
    fn drop(&mut self) {
        self.ctx.leave_graphics();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct ScopeCounter {
        depth: Cell<i32>,
        max_depth: Cell<i32>,
    }

    impl Rasterizer for ScopeCounter {
        type Texture = NeverTexture;

        fn enter_graphics(&self) {
            let d = self.depth.get() + 1;
            self.depth.set(d);
            self.max_depth.set(self.max_depth.get().max(d));
        }

        fn leave_graphics(&self) {
            self.depth.set(self.depth.get() - 1);
        }

        fn rasterize(
            &self,
            _input: SvgInput<'_>,
            _width: u32,
            _height: u32,
            _mode: ScaleMode,
        ) -> Option<Self::Texture> {
            None
        }
    }

    pub struct NeverTexture;

    impl GpuTexture for NeverTexture {
        fn width(&self) -> u32 {
            0
        }
        fn height(&self) -> u32 {
            0
        }
        fn destroy(&mut self) {}
    }

    #[test]
    fn scope_is_balanced_on_early_return() {
        let ctx = ScopeCounter {
            depth: Cell::new(0),
            max_depth: Cell::new(0),
        };

        let attempt = || -> Option<()> {
            let _scope = GraphicsScope::enter(&ctx);
            ctx.rasterize(SvgInput::Text("<svg/>"), 8, 8, ScaleMode::Width)?;
            Some(())
        };
        assert!(attempt().is_none());

        assert_eq!(ctx.depth.get(), 0);
        assert_eq!(ctx.max_depth.get(), 1);
    }

    #[test]
    fn input_dispatches_by_kind() {
        assert_eq!(SvgInput::new(InputKind::File, "a.svg"), SvgInput::File("a.svg"));
        assert_eq!(SvgInput::new(InputKind::Text, "<svg/>"), SvgInput::Text("<svg/>"));
        assert!(SvgInput::new(InputKind::File, "").is_empty());
        assert!(!SvgInput::new(InputKind::Text, "<svg/>").is_empty());
    }
}
