//! Scale policy: derive render dimensions and pick the pyramid level.

use crate::config::ScaleMode;
use crate::pyramid::TexturePyramid;
use crate::scale::clamped_level_index;

/// Derived render state, recomputed on every update and never persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderSelection {
    pub render_width: u32,
    pub render_height: u32,
    /// Index into the pyramid, always `< pyramid.len()` for the pyramid it
    /// was computed against.
    pub selected_index: usize,
}

/// Compute render dimensions and the pyramid level for the current target.
///
/// The aspect-ratio reference is the *first* level's width/height; later
/// levels are assumed to share it modulo rounding. In `Both` mode the target
/// width still drives the level choice; that asymmetry is load-bearing for
/// downstream visual behavior and must not be "fixed".
///
/// Calling with an empty pyramid is a logic error: debug builds assert,
/// release builds return a zeroed selection that renders nothing.
pub fn select<T>(
    pyramid: &TexturePyramid<T>,
    mode: ScaleMode,
    target_width: u32,
    target_height: u32,
) -> RenderSelection {
    debug_assert!(!pyramid.is_empty(), "select called with empty pyramid");
    let Some(first) = pyramid.first() else {
        return RenderSelection::default();
    };

    let (render_width, render_height, driving) = match mode {
        ScaleMode::Width => {
            let h = derive_dimension(target_width, first.height, first.width);
            (target_width, h, target_width)
        }
        ScaleMode::Height => {
            let w = derive_dimension(target_height, first.width, first.height);
            (w, target_height, target_height)
        }
        ScaleMode::Both => (target_width, target_height, target_width),
    };

    RenderSelection {
        render_width,
        render_height,
        selected_index: clamped_level_index(driving, pyramid.len()),
    }
}

/// `round(target * numer / denom)` in f64, 0 when the reference dimension
/// is degenerate.
fn derive_dimension(target: u32, numer: u32, denom: u32) -> u32 {
    if denom == 0 {
        return 0;
    }
    (f64::from(target) * f64::from(numer) / f64::from(denom)).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pyramid::build_pyramid;
    use crate::testing::FakeRasterizer;
    use crate::texture::SvgInput;

    fn pyramid(
        intrinsic_w: u32,
        intrinsic_h: u32,
        mode: ScaleMode,
        max: u32,
    ) -> TexturePyramid<crate::testing::FakeTexture> {
        let raster = FakeRasterizer::new(intrinsic_w, intrinsic_h);
        build_pyramid(&raster, SvgInput::Text("<svg/>"), mode, max)
    }

    #[test]
    fn width_mode_derives_height_from_first_level_aspect() {
        // First level 8x4 under Width mode for a 512x256 (2:1) source.
        let p = pyramid(512, 256, ScaleMode::Width, 1024);
        let sel = select(&p, ScaleMode::Width, 800, 0);
        assert_eq!(sel.render_width, 800);
        assert_eq!(sel.render_height, 400);
    }

    #[test]
    fn height_mode_derives_width_from_first_level_aspect() {
        let p = pyramid(512, 256, ScaleMode::Height, 1024);
        let sel = select(&p, ScaleMode::Height, 0, 300);
        assert_eq!(sel.render_height, 300);
        assert_eq!(sel.render_width, 600);
    }

    #[test]
    fn both_mode_passes_target_through_and_width_drives_index() {
        let p = pyramid(512, 256, ScaleMode::Both, 1024);
        let sel = select(&p, ScaleMode::Both, 100, 9000);
        assert_eq!((sel.render_width, sel.render_height), (100, 9000));
        // width 100 -> npt 128 -> raw index 4, not the huge height index
        assert_eq!(sel.selected_index, 4);
    }

    #[test]
    fn index_is_clamped_at_both_ends() {
        let p = pyramid(64, 64, ScaleMode::Both, 64); // levels 8..64 (4)
        for (target, expect) in [(0u32, 0usize), (7, 0), (8, 0), (64, 3), (1 << 20, 3)] {
            let sel = select(&p, ScaleMode::Both, target, target);
            assert_eq!(sel.selected_index, expect, "target={target}");
        }
    }

    #[test]
    fn single_level_pyramid_always_selects_index_zero() {
        let p = pyramid(64, 64, ScaleMode::Both, 8);
        assert_eq!(p.len(), 1);
        for target in [0u32, 1, 8, 500, 100_000] {
            assert_eq!(select(&p, ScaleMode::Both, target, target).selected_index, 0);
        }
    }

    #[test]
    fn index_in_range_for_arbitrary_targets() {
        let p = pyramid(300, 200, ScaleMode::Width, 300);
        for target in (0..2000u32).step_by(37) {
            let sel = select(&p, ScaleMode::Width, target, 0);
            assert!(sel.selected_index < p.len());
        }
    }
}
