//! Per-update configuration snapshot.

use crate::error::{MipsvgError, MipsvgResult};
use crate::scale::MIN_LEVEL_SIZE;
use crate::settings::Settings;

/// Where the SVG data comes from.
///
/// Discriminants mirror the integers stored in the settings snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum InputKind {
    File = 1,
    Text = 2,
}

impl InputKind {
    pub fn from_settings_int(v: i64) -> MipsvgResult<Self> {
        match v {
            1 => Ok(Self::File),
            2 => Ok(Self::Text),
            other => Err(MipsvgError::validation(format!(
                "unknown input kind: {other}"
            ))),
        }
    }
}

/// Which target dimension drives the output size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScaleMode {
    /// Output width = target width, height derived from the aspect ratio.
    Width = 1,
    /// Output height = target height, width derived from the aspect ratio.
    Height = 2,
    /// Both dimensions taken from the target, aspect ratio not preserved.
    Both = 3,
}

impl ScaleMode {
    pub fn from_settings_int(v: i64) -> MipsvgResult<Self> {
        match v {
            1 => Ok(Self::Width),
            2 => Ok(Self::Height),
            3 => Ok(Self::Both),
            other => Err(MipsvgError::validation(format!(
                "unknown scale mode: {other}"
            ))),
        }
    }
}

/// Settings keys read (and, for defaults, written) by the engine.
pub mod keys {
    pub const INPUT_KIND: &str = "svg_input_kind";
    pub const FILE_PATH: &str = "svg_file";
    pub const INLINE_TEXT: &str = "svg_text";
    pub const TARGET_WIDTH: &str = "svg_width";
    pub const TARGET_HEIGHT: &str = "svg_height";
    pub const SCALE_MODE: &str = "svg_scale_by";
    pub const MAX_TEXTURE_SIZE: &str = "svg_max_texture_size";
    pub const SOURCE_WIDTH: &str = "source_width";
    pub const SOURCE_HEIGHT: &str = "source_height";
}

/// Immutable-per-update snapshot of everything the engine reads from the
/// host settings. Values are consumer-supplied and are clamped on parse,
/// never trusted downstream.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SourceConfig {
    pub input_kind: InputKind,
    /// File path when `input_kind` is `File`.
    pub file_path: String,
    /// Inline markup when `input_kind` is `Text`.
    pub inline_text: String,
    /// Desired display width; 0 means "unknown, use stored default".
    pub target_width: u32,
    /// Desired display height; 0 means "unknown, use stored default".
    pub target_height: u32,
    pub scale_mode: ScaleMode,
    /// Upper bound of the pyramid, clamped to `>= 8`.
    pub max_texture_size: u32,
}

impl SourceConfig {
    /// Parse a snapshot out of the flat settings object.
    pub fn from_settings(settings: &Settings) -> MipsvgResult<Self> {
        let input_kind = InputKind::from_settings_int(settings.int(keys::INPUT_KIND))?;
        let scale_mode = ScaleMode::from_settings_int(settings.int(keys::SCALE_MODE))?;

        Ok(Self {
            input_kind,
            file_path: settings.string(keys::FILE_PATH),
            inline_text: settings.string(keys::INLINE_TEXT),
            target_width: clamp_u32(settings.int(keys::TARGET_WIDTH)),
            target_height: clamp_u32(settings.int(keys::TARGET_HEIGHT)),
            scale_mode,
            max_texture_size: clamp_u32(settings.int(keys::MAX_TEXTURE_SIZE)).max(MIN_LEVEL_SIZE),
        })
    }

    /// The input string selected by the active input kind.
    pub fn active_input(&self) -> &str {
        match self.input_kind {
            InputKind::File => &self.file_path,
            InputKind::Text => &self.inline_text,
        }
    }

    /// True when there is nothing to rasterize under the active kind.
    pub fn input_is_empty(&self) -> bool {
        self.active_input().is_empty()
    }
}

fn clamp_u32(v: i64) -> u32 {
    v.clamp(0, i64::from(u32::MAX)) as u32
}
