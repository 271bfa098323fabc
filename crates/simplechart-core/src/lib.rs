// File: crates/simplechart-core/src/lib.rs
// Summary: Core library entry point; exports the line chart renderer and its building blocks.

pub mod axis;
pub mod chart;
pub mod dom;
pub mod error;
pub mod export;
pub mod format;
pub mod interval;
pub mod options;
pub mod scale;
pub mod series;
pub mod shape;
pub mod theme;
pub mod types;

pub use chart::{line, ChartModel, RenderedChart};
pub use dom::{Document, EventKind, LogNotifier, NodeId, Notifier};
pub use error::{ChartError, Result};
pub use options::{ChartOptions, OptionsConfig, TimeDomain};
pub use scale::{LinearScale, Scale, TimeScale};
pub use series::{Point, RawSeries, RawValue, SeriesSet, ValueDomain};
pub use shape::Interpolation;
pub use theme::Theme;
