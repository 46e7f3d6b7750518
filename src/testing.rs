//! In-crate test doubles for the rasterizer seam.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::config::ScaleMode;
use crate::texture::{GpuTexture, Rasterizer, SvgInput};

/// Texture handle with a stable identity and a guarded destroy.
#[derive(Clone, Debug)]
pub(crate) struct FakeTexture {
    pub(crate) id: u64,
    width: u32,
    height: u32,
    alive: bool,
    destroyed: Rc<Cell<usize>>,
}

impl GpuTexture for FakeTexture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn destroy(&mut self) {
        if self.alive {
            self.alive = false;
            self.destroyed.set(self.destroyed.get() + 1);
        }
    }
}

/// Deterministic rasterizer: pretends the SVG has a fixed intrinsic size and
/// produces aspect-respecting dimensions like a real backend. Records scope
/// balance, per-call requests, and texture destruction.
pub(crate) struct FakeRasterizer {
    intrinsic_w: u32,
    intrinsic_h: u32,
    fail_sizes: Vec<u32>,
    next_id: Cell<u64>,
    scope_depth: Cell<i32>,
    scope_ever_negative: Cell<bool>,
    destroyed: Rc<Cell<usize>>,
    pub(crate) requests: RefCell<Vec<u32>>,
}

impl FakeRasterizer {
    pub(crate) fn new(intrinsic_w: u32, intrinsic_h: u32) -> Self {
        Self {
            intrinsic_w,
            intrinsic_h,
            fail_sizes: Vec::new(),
            next_id: Cell::new(1),
            scope_depth: Cell::new(0),
            scope_ever_negative: Cell::new(false),
            destroyed: Rc::new(Cell::new(0)),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Fail every rasterization whose requested size is in `sizes`.
    pub(crate) fn failing_at(mut self, sizes: impl IntoIterator<Item = u32>) -> Self {
        self.fail_sizes = sizes.into_iter().collect();
        self
    }

    pub(crate) fn rasterize_calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub(crate) fn destroyed(&self) -> usize {
        self.destroyed.get()
    }

    /// Counter shared with every texture; survives the rasterizer owner.
    pub(crate) fn destroyed_handle(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.destroyed)
    }

    pub(crate) fn scope_balanced(&self) -> bool {
        self.scope_depth.get() == 0 && !self.scope_ever_negative.get()
    }
}

impl Rasterizer for FakeRasterizer {
    type Texture = FakeTexture;

    fn enter_graphics(&self) {
        self.scope_depth.set(self.scope_depth.get() + 1);
    }

    fn leave_graphics(&self) {
        let d = self.scope_depth.get() - 1;
        self.scope_depth.set(d);
        if d < 0 {
            self.scope_ever_negative.set(true);
        }
    }

    fn rasterize(
        &self,
        _input: SvgInput<'_>,
        width: u32,
        height: u32,
        mode: ScaleMode,
    ) -> Option<Self::Texture> {
        assert!(self.scope_depth.get() > 0, "rasterize outside graphics scope");
        self.requests.borrow_mut().push(width);

        if self.fail_sizes.contains(&width) {
            return None;
        }

        let (w, h) = match mode {
            ScaleMode::Width => {
                let h = (f64::from(width) * f64::from(self.intrinsic_h)
                    / f64::from(self.intrinsic_w))
                .round() as u32;
                (width, h.max(1))
            }
            ScaleMode::Height => {
                let w = (f64::from(height) * f64::from(self.intrinsic_w)
                    / f64::from(self.intrinsic_h))
                .round() as u32;
                (w.max(1), height)
            }
            ScaleMode::Both => (width, height),
        };

        let id = self.next_id.get();
        self.next_id.set(id + 1);

        Some(FakeTexture {
            id,
            width: w,
            height: h,
            alive: true,
            destroyed: Rc::clone(&self.destroyed),
        })
    }
}
