// File: crates/demo/src/main.rs
// Summary: Demo loads date-keyed CSV columns (or built-in sample data), renders a line chart
// into an in-memory document and writes it as a themed standalone SVG.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use simplechart_core::{export, line, theme, ChartOptions, Document, LogNotifier, RawSeries};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Render date-keyed series to an SVG line chart
#[derive(Parser, Debug)]
#[command(name = "simplechart-demo")]
#[command(about = "Render date-keyed CSV series to an SVG line chart")]
#[command(version)]
struct Args {
    /// CSV with a date column followed by one column per series; sample data when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// JSON chart options (camelCase keys, e.g. {"smooth": false, "dualAxis": true})
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Container width in pixels
    #[arg(long, default_value = "640")]
    width: u32,

    /// Container height in pixels
    #[arg(long, default_value = "320")]
    height: u32,

    /// Theme preset (light, dark, solarized-dark, solarized-light, high-contrast-dark)
    #[arg(long, default_value = "light")]
    theme: String,

    /// Output SVG path
    #[arg(long, default_value = "target/out/chart.svg")]
    out: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let series = match &args.input {
        Some(path) => load_series_csv(path).with_context(|| format!("failed to load CSV '{}'", path.display()))?,
        None => {
            info!("no --input given, using sample data");
            sample_series()
        }
    };
    info!(series = series.len(), points = series.iter().map(RawSeries::len).sum::<usize>(), "loaded series");

    let options = match &args.options {
        Some(path) => {
            let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            ChartOptions::from_json(&json).with_context(|| format!("parsing options {}", path.display()))?
        }
        None => ChartOptions::default(),
    };

    let mut doc = Document::with_notifier(LogNotifier);
    let body = doc.body();
    let container = doc.append(body, "div");
    doc.set_attr(container, "id", "chart");
    doc.set_style(container, "width", format!("{}px", args.width));
    doc.set_style(container, "height", format!("{}px", args.height));

    let chart = line(&mut doc, "chart", series, &options)?;
    let theme = theme::find(&args.theme);
    if !theme.name.eq_ignore_ascii_case(&args.theme) {
        warn!(requested = %args.theme, "unknown theme, using {}", theme.name);
    }
    export::write_svg(&doc, &chart, &theme, &args.out)?;
    println!("Wrote {}", args.out.display());
    Ok(())
}

/// Load a CSV whose first column holds dates and every further column one
/// series. Blank cells are skipped so series may cover different dates.
fn load_series_csv(path: &Path) -> Result<Vec<RawSeries>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let columns = rdr.headers()?.len().saturating_sub(1);
    if columns == 0 {
        anyhow::bail!("expected a date column followed by at least one series column");
    }

    let mut out = vec![RawSeries::new(); columns];
    for rec in rdr.records() {
        let rec = rec?;
        let Some(date) = rec.get(0).filter(|d| !d.is_empty()) else {
            continue;
        };
        for (series, cell) in out.iter_mut().zip(rec.iter().skip(1)) {
            if !cell.is_empty() {
                series.insert(date, cell);
            }
        }
    }
    Ok(out)
}

fn sample_series() -> Vec<RawSeries> {
    let visits = [
        ("2014-03-01", 120),
        ("2014-03-02", 180),
        ("2014-03-03", 95),
        ("2014-03-04", 240),
        ("2014-03-05", 210),
        ("2014-03-06", 160),
        ("2014-03-07", 130),
    ];
    let signups = [
        ("2014-03-01", 20),
        ("2014-03-02", 35),
        ("2014-03-03", 15),
        ("2014-03-04", 60),
        ("2014-03-05", 45),
        ("2014-03-06", 30),
        ("2014-03-07", 25),
    ];
    vec![visits.into_iter().collect(), signups.into_iter().collect()]
}
