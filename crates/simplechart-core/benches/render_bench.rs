use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use simplechart_core::export::standalone_svg;
use simplechart_core::{line, ChartOptions, Document, RawSeries, Theme};

fn daily_series(n: usize, phase: f64) -> RawSeries {
    let start = NaiveDate::from_ymd_opt(2014, 1, 1).expect("valid start date");
    (0..n)
        .map(|i| {
            let date = start + Duration::days(i as i64);
            let y = (i as f64 * 0.05 + phase).sin() * 10.0 + 20.0;
            (date.format("%Y-%m-%d").to_string(), y)
        })
        .collect()
}

fn page() -> Document {
    let mut doc = Document::new();
    let body = doc.body();
    let div = doc.append(body, "div");
    doc.set_attr(div, "id", "chart");
    doc.set_style(div, "width", "800px");
    doc.set_style(div, "height", "500px");
    doc
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_svg");
    for &n in &[365usize, 3_650usize] {
        let series = vec![daily_series(n, 0.0), daily_series(n, 1.5)];
        for (label, smooth) in [("linear", false), ("monotone", true)] {
            let opts = ChartOptions { smooth, ..Default::default() };
            group.bench_function(format!("{label}_{n}"), |b| {
                b.iter(|| {
                    let mut doc = page();
                    let chart = line(&mut doc, "chart", series.clone(), &opts).expect("render");
                    black_box(standalone_svg(&doc, &chart, &Theme::light()));
                });
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
