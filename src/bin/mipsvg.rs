use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};

use mipsvg::{ResvgRasterizer, ScaleMode, SvgInput, build_pyramid};

#[derive(Parser, Debug)]
#[command(name = "mipsvg", version)]
/// Build an SVG resolution pyramid and dump every level as a PNG.
struct Cli {
    /// Input SVG file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Upper bound of the pyramid in pixels.
    #[arg(long, default_value_t = 1024)]
    max_size: u32,

    /// Which target dimension drives the output size.
    #[arg(long, value_enum, default_value_t = ScaleChoice::Width)]
    scale_by: ScaleChoice,

    /// Output directory for level PNGs (level_<size>.png).
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScaleChoice {
    Width,
    Height,
    Both,
}

impl From<ScaleChoice> for ScaleMode {
    fn from(c: ScaleChoice) -> Self {
        match c {
            ScaleChoice::Width => ScaleMode::Width,
            ScaleChoice::Height => ScaleMode::Height,
            ScaleChoice::Both => ScaleMode::Both,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let raster = ResvgRasterizer::new();
    let in_path = cli.in_path.to_string_lossy().into_owned();
    let pyramid = build_pyramid(
        &raster,
        SvgInput::File(&in_path),
        cli.scale_by.into(),
        cli.max_size,
    );

    if pyramid.is_empty() {
        anyhow::bail!("no pyramid levels could be rasterized from '{in_path}'");
    }

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("create output dir '{}'", cli.out_dir.display()))?;

    for level in pyramid.levels() {
        let pixels = level
            .texture
            .pixels()
            .context("texture destroyed before dump")?;
        let rgba = unpremultiply(pixels);
        let img = image::RgbaImage::from_raw(level.width, level.height, rgba)
            .context("pixel buffer does not match level dimensions")?;

        let out = cli.out_dir.join(format!("level_{}.png", level.size_px));
        img.save(&out)
            .with_context(|| format!("write '{}'", out.display()))?;
        println!(
            "level {:>5}px -> {}x{} {}",
            level.size_px,
            level.width,
            level.height,
            out.display()
        );
    }

    Ok(())
}

/// PNG wants straight alpha; the pyramid stores premultiplied RGBA8.
fn unpremultiply(premul: &[u8]) -> Vec<u8> {
    let mut out = premul.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
    out
}
