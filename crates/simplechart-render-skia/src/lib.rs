// File: crates/simplechart-render-skia/src/lib.rs
// Summary: Headless PNG preview of a rendered chart: standalone SVG -> Skia SVG DOM -> CPU raster -> PNG.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use simplechart_core::export::standalone_svg;
use simplechart_core::{Document, RenderedChart, Theme};
use skia_safe as skia;
use tracing::info;

/// Parse a `#rrggbb` CSS colour.
pub fn parse_hex(css: &str) -> Option<skia::Color> {
    let hex = css.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(skia::Color::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Rasterize SVG markup onto a `width` x `height` surface cleared to
/// `background` and return the encoded PNG.
pub fn rasterize_svg(svg: &str, width: i32, height: i32, background: skia::Color) -> Result<Vec<u8>> {
    if width <= 0 || height <= 0 {
        return Err(anyhow!("invalid surface size {width}x{height}"));
    }
    let mut dom = skia::svg::Dom::from_str(svg, skia::FontMgr::default())
        .map_err(|e| anyhow!("parse svg: {e:?}"))?;
    dom.set_container_size((width as f32, height as f32));

    let mut surface = skia::surfaces::raster_n32_premul((width, height))
        .ok_or_else(|| anyhow!("failed to create raster surface"))?;
    let canvas = surface.canvas();
    canvas.clear(background);
    dom.render(canvas);

    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

/// PNG bytes for a chart already rendered into `doc`.
pub fn render_png_bytes(doc: &Document, chart: &RenderedChart, theme: &Theme) -> Result<Vec<u8>> {
    let size = chart.model.size;
    let background = parse_hex(theme.background).unwrap_or(skia::Color::WHITE);
    rasterize_svg(&standalone_svg(doc, chart, theme), size.outer_width, size.outer_height, background)
}

/// Write [`render_png_bytes`] to `path`, creating parent directories.
pub fn render_to_png(
    doc: &Document,
    chart: &RenderedChart,
    theme: &Theme,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let bytes = render_png_bytes(doc, chart, theme)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote chart png");
    Ok(())
}
