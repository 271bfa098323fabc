// File: crates/simplechart-core/src/chart.rs
// Summary: Line/area chart renderer: sizes the plot, builds scales from the data and
// appends the SVG scene (areas, grid, axes, lines, interactive points) into a container.

use std::rc::Rc;

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::axis::{Axis, Orient, TickFormat};
use crate::dom::{Document, EventKind, NodeId};
use crate::error::{ChartError, Result};
use crate::format::{number, DateFormat};
use crate::options::ChartOptions;
use crate::scale::{LinearScale, Scale, TimeScale};
use crate::series::{Point, SeriesSet, ShapedData};
use crate::shape::{AreaGenerator, LineGenerator};
use crate::types::{Margin, PlotSize, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Leading integer of a CSS length (`"300px"` → 300), saturating at the
/// `i32` bounds. Zero, missing or unparsable values yield `None`.
fn css_int(value: Option<&str>) -> Option<i32> {
    let s = value?.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    let end = digits.bytes().take_while(u8::is_ascii_digit).count();
    let n: f64 = digits[..end].parse().ok()?;
    // `as` saturates, so oversized lengths clamp instead of being dropped.
    let n = (sign * n) as i32;
    (n != 0).then_some(n)
}

/// Container size from its inline `width`/`height` style.
pub fn plot_size(doc: &Document, container: NodeId) -> PlotSize {
    let width = css_int(doc.style(container, "width")).unwrap_or(DEFAULT_WIDTH);
    let height = css_int(doc.style(container, "height")).unwrap_or(DEFAULT_HEIGHT);
    PlotSize::new(width, height, Margin::default())
}

/// Pixel-space model of a chart: scales plus the points they position.
#[derive(Clone, Debug)]
pub struct ChartModel {
    pub size: PlotSize,
    pub x: TimeScale,
    pub y: LinearScale,
    pub data: ShapedData,
}

impl ChartModel {
    /// Build scales for `data` inside `size`. The value scale runs from the
    /// maximum at the top edge (pixel 0) to the minimum at the plot bottom.
    pub fn build(size: PlotSize, data: ShapedData, options: &ChartOptions) -> Result<Self> {
        let (start, end) = data.time_extent(options.time_domain).ok_or(ChartError::EmptySeries)?;
        let (width, height) = (size.width(), size.height());
        let x = TimeScale::new(start, end).with_range(0.0, width);
        let y = LinearScale::new()
            .with_domain(data.values.max, data.values.min)
            .with_range(0.0, height);
        debug!(
            width,
            height,
            %start,
            %end,
            min = data.values.min,
            max = data.values.max,
            "chart scales"
        );
        Ok(Self { size, x, y, data })
    }

    pub fn project(&self, p: &Point) -> (f64, f64) {
        (self.x.apply(p.date), self.y.apply(p.value))
    }

    fn projected(&self, series: &[Point]) -> Vec<(f64, f64)> {
        series.iter().map(|p| self.project(p)).collect()
    }
}

/// What a successful render appended.
#[derive(Clone, Debug)]
pub struct RenderedChart {
    /// The appended `svg` element.
    pub svg: NodeId,
    /// The translated `g` holding the plot.
    pub plot: NodeId,
    pub model: ChartModel,
}

/// Draw a time-series line chart into the element with id `container_id`.
///
/// Every failure is sent to the document's notifier and returned; nothing is
/// appended unless the whole chart can be drawn. Rendering again into the same
/// container appends another chart next to the first one.
pub fn line(
    doc: &mut Document,
    container_id: &str,
    data: impl Into<SeriesSet>,
    options: &ChartOptions,
) -> Result<RenderedChart> {
    let data = data.into();
    match prepare(doc, container_id, &data, options) {
        Ok((container, model, date_format)) => Ok(draw(doc, container, model, &date_format, options)),
        Err(err) => {
            warn!(container = container_id, error = %err, "chart not rendered");
            doc.alert(&err.to_string());
            Err(err)
        }
    }
}

fn prepare(
    doc: &Document,
    container_id: &str,
    data: &SeriesSet,
    options: &ChartOptions,
) -> Result<(NodeId, ChartModel, DateFormat)> {
    let container = doc
        .get_element_by_id(container_id)
        .ok_or_else(|| ChartError::MissingContainer { id: container_id.to_string() })?;
    let date_format = options.validate()?;
    let shaped = ShapedData::from_set(data, &date_format)?;
    let model = ChartModel::build(plot_size(doc, container), shaped, options)?;
    Ok((container, model, date_format))
}

fn draw(
    doc: &mut Document,
    container: NodeId,
    model: ChartModel,
    date_format: &DateFormat,
    options: &ChartOptions,
) -> RenderedChart {
    let size = model.size;
    let (width, height) = (size.width(), size.height());

    let svg = doc.append(container, "svg");
    doc.set_attr(svg, "width", size.outer_width.to_string());
    doc.set_attr(svg, "height", size.outer_height.to_string());
    let plot = doc.append(svg, "g");
    doc.set_attr(plot, "transform", format!("translate({},{})", size.margin.left, size.margin.top));

    let interpolation = options.interpolation();

    if options.area {
        let area = AreaGenerator::new(height).interpolation(interpolation);
        for (i, series) in model.data.series.iter().enumerate() {
            let path = doc.append(plot, "path");
            doc.set_attr(path, "data-index", i.to_string());
            doc.set_attr(path, "class", format!("sc-area sc-area-{i}"));
            if let Some(d) = area.path(&model.projected(series)) {
                doc.set_attr(path, "d", d);
            }
        }
    }

    if options.grid {
        let x_grid = Axis::new(model.x)
            .orient(Orient::Top)
            .tick_size(-height, 0.0)
            .tick_format(TickFormat::Blank);
        let y_grid = Axis::new(model.y)
            .orient(Orient::Right)
            .tick_size(width, 0.0)
            .tick_format(TickFormat::Blank);
        let g = doc.append(plot, "g");
        doc.set_attr(g, "class", "sc-grid");
        x_grid.render(doc, g);
        let g = doc.append(plot, "g");
        doc.set_attr(g, "class", "sc-grid");
        y_grid.render(doc, g);
    }

    if options.axis {
        if options.grid {
            let top = doc.append(plot, "line");
            doc.set_attr(top, "x1", "0");
            doc.set_attr(top, "y1", "0");
            doc.set_attr(top, "x2", number(width));
            doc.set_attr(top, "y2", "0");
            doc.set_attr(top, "class", "sc-line");
        }

        let day = DateFormat::day_of_month();
        let x_axis = Axis::new(model.x)
            .orient(Orient::Bottom)
            .tick_format(TickFormat::Custom(Rc::new(move |d: &NaiveDateTime| day.format(d))));
        let g = doc.append(plot, "g");
        doc.set_attr(g, "class", "x sc-axis");
        doc.set_attr(g, "transform", format!("translate(0,{})", number(height)));
        x_axis.render(doc, g);

        let g = doc.append(plot, "g");
        doc.set_attr(g, "class", "y sc-axis");
        Axis::new(model.y).orient(Orient::Left).render(doc, g);

        if options.dual_axis {
            let g = doc.append(plot, "g");
            doc.set_attr(g, "class", "y sc-axis");
            doc.set_attr(g, "transform", format!("translate({}, 0)", number(width)));
            Axis::new(model.y).orient(Orient::Right).render(doc, g);
        }
    }

    let line = LineGenerator::new().interpolation(interpolation);
    for (i, series) in model.data.series.iter().enumerate() {
        let path = doc.append(plot, "path");
        doc.set_attr(path, "class", format!("sc-line sc-line-{i}"));
        if let Some(d) = line.path(&model.projected(series)) {
            doc.set_attr(path, "d", d);
        }
    }

    if options.points {
        for point in model.data.series.iter().flatten() {
            draw_point(doc, plot, &model, point, date_format, options);
        }
    }

    debug!(
        series = model.data.series.len(),
        points = model.data.point_count(),
        "chart rendered"
    );
    RenderedChart { svg, plot, model }
}

fn draw_point(
    doc: &mut Document,
    plot: NodeId,
    model: &ChartModel,
    point: &Point,
    date_format: &DateFormat,
    options: &ChartOptions,
) {
    let (cx, cy) = model.project(point);
    let radius = options.point_size;
    let circle = doc.append(plot, "circle");
    doc.set_attr(circle, "class", "sc-point");
    doc.set_attr(circle, "cx", number(cx));
    doc.set_attr(circle, "cy", number(cy));
    doc.set_attr(circle, "r", number(radius));

    doc.on(circle, EventKind::MouseEnter, move |d, n| d.set_attr(n, "r", number(radius + 2.0)));
    doc.on(circle, EventKind::MouseLeave, move |d, n| d.set_attr(n, "r", number(radius)));

    let date = date_format.format(&point.date);
    if let Some(click) = &options.point_click {
        let click = Rc::clone(click);
        let (date, value, series) = (date.clone(), point.value, point.series_index);
        doc.on(circle, EventKind::Click, move |_, _| click(date.as_str(), value, series));
    }

    let title = doc.append(circle, "title");
    doc.set_text(title, options.title_for(&date, point.value, point.series_index));
}
