// File: crates/simplechart-core/src/theme.rs
// Summary: Light/Dark theming as CSS rules for the chart's `sc-*` classes.

use std::fmt::Write as _;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: &'static str,
    pub grid: &'static str,
    pub axis_line: &'static str,
    pub axis_label: &'static str,
    /// Stroke per series, cycled when there are more series than entries.
    pub series: [&'static str; 4],
    /// Opacity of area fills (fill colour follows the series stroke).
    pub area_opacity: f32,
    pub point_fill: &'static str,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: "#121214",
            grid: "#28282d",
            axis_line: "#b4b4be",
            axis_label: "#ebebf5",
            series: ["#40a0ff", "#28c878", "#dc5050", "#ffe646"],
            area_opacity: 0.38,
            point_fill: "#121214",
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: "#fafafc",
            grid: "#e6e6eb",
            axis_line: "#3c3c46",
            axis_label: "#14141e",
            series: ["#2078c8", "#14a05a", "#c83c3c", "#1e78f0"],
            area_opacity: 0.31,
            point_fill: "#ffffff",
        }
    }

    pub fn solarized_dark() -> Self {
        Self {
            name: "solarized-dark",
            background: "#002b36", // base03
            grid: "#073642",       // base02
            axis_line: "#93a1a1",  // base1
            axis_label: "#eee8d5", // base2
            series: ["#268bd2", "#2aa198", "#dc322f", "#b58900"],
            area_opacity: 0.38,
            point_fill: "#002b36",
        }
    }

    pub fn solarized_light() -> Self {
        Self {
            name: "solarized-light",
            background: "#fdf6e3", // base3
            grid: "#eee8d5",       // base2
            axis_line: "#657b83",  // base00
            axis_label: "#002b36", // base03
            series: ["#268bd2", "#2aa198", "#dc322f", "#cb4b16"],
            area_opacity: 0.31,
            point_fill: "#fdf6e3",
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: "#000000",
            grid: "#222222",
            axis_line: "#ffffff",
            axis_label: "#ffffff",
            series: ["#00ffff", "#00ff00", "#ff0000", "#ffff00"],
            area_opacity: 0.47,
            point_fill: "#000000",
        }
    }

    /// CSS for one chart; `series_count` controls how many per-series rules
    /// are emitted.
    pub fn stylesheet(&self, series_count: usize) -> String {
        let mut css = String::new();
        let _ = writeln!(css, "svg {{ background: {}; font: 10px sans-serif; }}", self.background);
        let _ = writeln!(css, ".sc-grid .tick line {{ stroke: {}; }}", self.grid);
        let _ = writeln!(css, ".sc-grid path {{ stroke-width: 0; fill: none; }}");
        let _ = writeln!(
            css,
            ".sc-axis path, .sc-axis line {{ fill: none; stroke: {}; shape-rendering: crispEdges; }}",
            self.axis_line
        );
        let _ = writeln!(css, ".sc-axis text {{ fill: {}; }}", self.axis_label);
        let _ = writeln!(css, "line.sc-line {{ stroke: {}; }}", self.axis_line);
        let _ = writeln!(css, "path.sc-line {{ fill: none; stroke-width: 2px; }}");
        let _ = writeln!(css, ".sc-area {{ stroke: none; fill-opacity: {}; }}", self.area_opacity);
        let _ = writeln!(
            css,
            ".sc-point {{ fill: {}; stroke: {}; stroke-width: 2px; }}",
            self.point_fill, self.series[0]
        );
        for i in 0..series_count {
            let color = self.series[i % self.series.len()];
            let _ = writeln!(css, ".sc-line-{i} {{ stroke: {color}; }}");
            let _ = writeln!(css, ".sc-area-{i} {{ fill: {color}; }}");
        }
        css
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::light()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![
        Theme::dark(),
        Theme::light(),
        Theme::solarized_dark(),
        Theme::solarized_light(),
        Theme::high_contrast_dark(),
    ]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_is_case_insensitive_with_fallback() {
        assert_eq!(find("Solarized-Dark").name, "solarized-dark");
        assert_eq!(find("neon").name, "light");
    }

    #[test]
    fn stylesheet_cycles_series_palette() {
        let css = Theme::dark().stylesheet(6);
        assert!(css.contains(".sc-line-0 { stroke: #40a0ff; }"));
        assert!(css.contains(".sc-line-4 { stroke: #40a0ff; }"));
        assert!(css.contains(".sc-area-5 { fill: #28c878; }"));
    }
}
