// File: crates/simplechart-core/src/options.rs
// Summary: Chart options with documented defaults, callbacks, JSON config and boundary validation.

use std::fmt;
use std::rc::Rc;

use serde::Deserialize;

use crate::error::{ChartError, Result};
use crate::format::{number, DateFormat};
use crate::shape::Interpolation;

/// Called with the formatted date, the value and the series index.
pub type PointCallback = Rc<dyn Fn(&str, f64, usize)>;
/// Produces the tooltip text for a point from the formatted date, the value
/// and the series index.
pub type TitleCallback = Rc<dyn Fn(&str, f64, usize) -> String>;

/// How the shared time axis domain is chosen when several series are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeDomain {
    /// First and last entry of the first series, in enumeration order. Later
    /// series outside that span are clipped.
    #[default]
    FirstSeries,
    /// Earliest to latest date over every point of every series.
    Union,
}

/// Rendering options for [`crate::line`].
#[derive(Clone)]
pub struct ChartOptions {
    /// Fill the region under each line. Default `true`.
    pub area: bool,
    /// Draw the time and value axes. Default `true`.
    pub axis: bool,
    /// Monotone cubic interpolation instead of straight segments. Default `true`.
    pub smooth: bool,
    /// Draw unlabeled grid lines. Default `true`.
    pub grid: bool,
    /// Mirror the value axis on the right edge. Default `false`.
    pub dual_axis: bool,
    /// Draw a marker per data point. Default `true`.
    pub points: bool,
    /// Marker radius in pixels. Default `4`.
    pub point_size: f64,
    /// Invoked when a marker is clicked. Default none.
    pub point_click: Option<PointCallback>,
    /// strftime pattern for series keys and callback dates. Default `%Y-%m-%d`.
    pub date_format: String,
    /// Tooltip text. Default `"{date}: {value}"`.
    pub point_title: Option<TitleCallback>,
    /// Default [`TimeDomain::FirstSeries`].
    pub time_domain: TimeDomain,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            area: true,
            axis: true,
            smooth: true,
            grid: true,
            dual_axis: false,
            points: true,
            point_size: 4.0,
            point_click: None,
            date_format: "%Y-%m-%d".to_string(),
            point_title: None,
            time_domain: TimeDomain::FirstSeries,
        }
    }
}

impl fmt::Debug for ChartOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartOptions")
            .field("area", &self.area)
            .field("axis", &self.axis)
            .field("smooth", &self.smooth)
            .field("grid", &self.grid)
            .field("dual_axis", &self.dual_axis)
            .field("points", &self.points)
            .field("point_size", &self.point_size)
            .field("point_click", &self.point_click.is_some())
            .field("date_format", &self.date_format)
            .field("point_title", &self.point_title.is_some())
            .field("time_domain", &self.time_domain)
            .finish()
    }
}

impl ChartOptions {
    pub fn with_point_click(mut self, f: impl Fn(&str, f64, usize) + 'static) -> Self {
        self.point_click = Some(Rc::new(f));
        self
    }

    pub fn with_point_title(mut self, f: impl Fn(&str, f64, usize) -> String + 'static) -> Self {
        self.point_title = Some(Rc::new(f));
        self
    }

    /// Defaults overlaid with the keys present in a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: OptionsConfig = serde_json::from_str(json)?;
        Ok(config.apply(Self::default()))
    }

    pub fn interpolation(&self) -> Interpolation {
        if self.smooth { Interpolation::Monotone } else { Interpolation::Linear }
    }

    /// Tooltip text for one point.
    pub fn title_for(&self, date: &str, value: f64, series: usize) -> String {
        match &self.point_title {
            Some(f) => f(date, value, series),
            None => format!("{date}: {}", number(value)),
        }
    }

    /// Check option values and compile the date format.
    pub fn validate(&self) -> Result<DateFormat> {
        if !self.point_size.is_finite() || self.point_size < 0.0 {
            return Err(ChartError::InvalidOption {
                name: "pointSize",
                reason: format!("expected a non-negative number, got {}", self.point_size),
            });
        }
        DateFormat::new(self.date_format.clone())
    }
}

/// Serializable subset of [`ChartOptions`]; every key is optional and
/// callbacks cannot be expressed.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionsConfig {
    pub area: Option<bool>,
    pub axis: Option<bool>,
    pub smooth: Option<bool>,
    pub grid: Option<bool>,
    pub dual_axis: Option<bool>,
    pub points: Option<bool>,
    pub point_size: Option<f64>,
    pub date_format: Option<String>,
    pub time_domain: Option<TimeDomain>,
}

impl OptionsConfig {
    /// Overlay the keys that are present onto `base`.
    pub fn apply(self, mut base: ChartOptions) -> ChartOptions {
        if let Some(v) = self.area { base.area = v; }
        if let Some(v) = self.axis { base.axis = v; }
        if let Some(v) = self.smooth { base.smooth = v; }
        if let Some(v) = self.grid { base.grid = v; }
        if let Some(v) = self.dual_axis { base.dual_axis = v; }
        if let Some(v) = self.points { base.points = v; }
        if let Some(v) = self.point_size { base.point_size = v; }
        if let Some(v) = self.date_format { base.date_format = v; }
        if let Some(v) = self.time_domain { base.time_domain = v; }
        base
    }
}
