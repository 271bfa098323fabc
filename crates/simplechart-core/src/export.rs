// File: crates/simplechart-core/src/export.rs
// Summary: Standalone SVG export of a rendered chart (namespace + embedded theme stylesheet).

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::chart::RenderedChart;
use crate::dom::Document;
use crate::theme::Theme;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// The chart's `svg` subtree as a self-contained SVG document.
pub fn standalone_svg(doc: &Document, chart: &RenderedChart, theme: &Theme) -> String {
    let width = doc.attr(chart.svg, "width").unwrap_or("0");
    let height = doc.attr(chart.svg, "height").unwrap_or("0");
    let mut out = format!(
        "<svg xmlns=\"{SVG_NS}\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    out.push_str("<style>");
    out.push_str(&theme.stylesheet(chart.model.data.series.len()));
    out.push_str("</style>");
    for child in doc.children(chart.svg) {
        out.push_str(&doc.outer_markup(*child));
    }
    out.push_str("</svg>\n");
    out
}

/// Write [`standalone_svg`] to `path`, creating parent directories.
pub fn write_svg(
    doc: &Document,
    chart: &RenderedChart,
    theme: &Theme,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let svg = standalone_svg(doc, chart, theme);
    std::fs::write(path, &svg).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), bytes = svg.len(), "wrote chart svg");
    Ok(())
}
