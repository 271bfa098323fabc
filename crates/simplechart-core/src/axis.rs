// File: crates/simplechart-core/src/axis.rs
// Summary: Axis generator: tick marks, labels and domain path for a scale, appended into a group.

use std::rc::Rc;

use crate::dom::{Document, NodeId};
use crate::format::number;
use crate::scale::Scale;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orient {
    Top,
    Bottom,
    Left,
    Right,
}

impl Orient {
    fn is_horizontal(self) -> bool {
        matches!(self, Orient::Top | Orient::Bottom)
    }

    /// +1 when ticks point down/right, -1 when they point up/left.
    fn sign(self) -> f64 {
        match self {
            Orient::Top | Orient::Left => -1.0,
            Orient::Bottom | Orient::Right => 1.0,
        }
    }
}

/// How tick labels are produced.
pub enum TickFormat<T> {
    /// The scale's own label format.
    Scale,
    /// Labels present but empty (grid lines).
    Blank,
    Custom(Rc<dyn Fn(&T) -> String>),
}

impl<T> Clone for TickFormat<T> {
    fn clone(&self) -> Self {
        match self {
            TickFormat::Scale => TickFormat::Scale,
            TickFormat::Blank => TickFormat::Blank,
            TickFormat::Custom(f) => TickFormat::Custom(Rc::clone(f)),
        }
    }
}

/// Axis configuration for one scale. Defaults: bottom orientation, 6px inner
/// and outer ticks, 3px label padding, about 10 ticks.
#[derive(Clone)]
pub struct Axis<S: Scale> {
    scale: S,
    orient: Orient,
    inner_tick_size: f64,
    outer_tick_size: f64,
    tick_padding: f64,
    tick_count: usize,
    tick_format: TickFormat<S::Value>,
}

impl<S: Scale> Axis<S> {
    pub fn new(scale: S) -> Self {
        Self {
            scale,
            orient: Orient::Bottom,
            inner_tick_size: 6.0,
            outer_tick_size: 6.0,
            tick_padding: 3.0,
            tick_count: 10,
            tick_format: TickFormat::Scale,
        }
    }

    pub fn orient(mut self, orient: Orient) -> Self {
        self.orient = orient;
        self
    }

    /// Length of tick lines (`inner`) and of the domain path end caps (`outer`).
    /// A negative inner size draws ticks across the plot instead of away from it.
    pub fn tick_size(mut self, inner: f64, outer: f64) -> Self {
        self.inner_tick_size = inner;
        self.outer_tick_size = outer;
        self
    }

    pub fn tick_padding(mut self, padding: f64) -> Self {
        self.tick_padding = padding;
        self
    }

    pub fn ticks(mut self, count: usize) -> Self {
        self.tick_count = count;
        self
    }

    pub fn tick_format(mut self, format: TickFormat<S::Value>) -> Self {
        self.tick_format = format;
        self
    }

    pub fn scale(&self) -> &S {
        &self.scale
    }

    fn label(&self, value: S::Value) -> String {
        match &self.tick_format {
            TickFormat::Scale => self.scale.tick_label(value, self.tick_count),
            TickFormat::Blank => String::new(),
            TickFormat::Custom(f) => f(&value),
        }
    }

    /// Append one `g.tick` per tick value followed by the `path.domain` into
    /// `group`.
    pub fn render(&self, doc: &mut Document, group: NodeId) {
        let sign = self.orient.sign();
        let inner = self.inner_tick_size;
        let outer = self.outer_tick_size;
        let label_offset = sign * (inner.max(0.0) + self.tick_padding);
        let horizontal = self.orient.is_horizontal();

        for value in self.scale.ticks(self.tick_count) {
            let pos = number(self.scale.apply(value));
            let tick = doc.append(group, "g");
            doc.set_attr(tick, "class", "tick");
            let transform = if horizontal {
                format!("translate({pos},0)")
            } else {
                format!("translate(0,{pos})")
            };
            doc.set_attr(tick, "transform", transform);

            let line = doc.append(tick, "line");
            let text = doc.append(tick, "text");
            let (along, across) = if horizontal { ("x", "y") } else { ("y", "x") };
            doc.set_attr(line, &format!("{along}2"), "0");
            doc.set_attr(line, &format!("{across}2"), number(sign * inner));
            doc.set_attr(text, across, number(label_offset));
            doc.set_attr(text, along, "0");
            let (dy, anchor) = match self.orient {
                Orient::Top => ("0em", "middle"),
                Orient::Bottom => (".71em", "middle"),
                Orient::Left => (".32em", "end"),
                Orient::Right => (".32em", "start"),
            };
            doc.set_attr(text, "dy", dy);
            doc.set_style(text, "text-anchor", anchor);
            doc.set_text(text, self.label(value));
        }

        let [r0, r1] = self.scale.range();
        let (lo, hi) = (number(r0.min(r1)), number(r0.max(r1)));
        let cap = number(sign * outer);
        let d = if horizontal {
            format!("M{lo},{cap}V0H{hi}V{cap}")
        } else {
            format!("M{cap},{lo}H0V{hi}H{cap}")
        };
        let domain = doc.append(group, "path");
        doc.set_attr(domain, "class", "domain");
        doc.set_attr(domain, "d", d);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::LinearScale;

    fn render(axis: &Axis<LinearScale>) -> (Document, NodeId) {
        let mut doc = Document::new();
        let body = doc.body();
        let g = doc.append(body, "g");
        axis.render(&mut doc, g);
        (doc, g)
    }

    #[test]
    fn bottom_axis_places_ticks_and_labels() {
        let scale = LinearScale::new().with_domain(0.0, 10.0).with_range(0.0, 100.0);
        let (doc, g) = render(&Axis::new(scale).ticks(5));
        let ticks = doc.query_class(g, "tick");
        assert_eq!(ticks.len(), 6);
        assert_eq!(doc.attr(ticks[1], "transform"), Some("translate(20,0)"));

        let line = doc.children(ticks[1])[0];
        assert_eq!(doc.attr(line, "y2"), Some("6"));
        let text = doc.children(ticks[1])[1];
        assert_eq!(doc.attr(text, "y"), Some("9"));
        assert_eq!(doc.text(text), Some("2"));

        let domain = doc.query_class(g, "domain")[0];
        assert_eq!(doc.attr(domain, "d"), Some("M0,6V0H100V6"));
    }

    #[test]
    fn left_axis_points_outward() {
        let scale = LinearScale::new().with_domain(10.0, 0.0).with_range(0.0, 50.0);
        let (doc, g) = render(&Axis::new(scale).orient(Orient::Left).ticks(2));
        let ticks = doc.query_class(g, "tick");
        let line = doc.children(ticks[0])[0];
        assert_eq!(doc.attr(line, "x2"), Some("-6"));
        let text = doc.children(ticks[0])[1];
        assert_eq!(doc.style(text, "text-anchor"), Some("end"));
        let domain = doc.query_class(g, "domain")[0];
        assert_eq!(doc.attr(domain, "d"), Some("M-6,0H0V50H-6"));
    }

    #[test]
    fn grid_axis_spans_plot_with_blank_labels() {
        let scale = LinearScale::new().with_domain(0.0, 10.0).with_range(0.0, 80.0);
        let axis = Axis::new(scale)
            .orient(Orient::Right)
            .tick_size(300.0, 0.0)
            .tick_format(TickFormat::Blank);
        let (doc, g) = render(&axis);
        for tick in doc.query_class(g, "tick") {
            let line = doc.children(tick)[0];
            assert_eq!(doc.attr(line, "x2"), Some("300"));
            assert_eq!(doc.text(doc.children(tick)[1]), Some(""));
        }
        let domain = doc.query_class(g, "domain")[0];
        assert_eq!(doc.attr(domain, "d"), Some("M0,0H0V80H0"));
    }
}
