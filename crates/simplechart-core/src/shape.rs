// File: crates/simplechart-core/src/shape.rs
// Summary: Line and area path generators (SVG path data) with linear or monotone interpolation.

use crate::format::number;

/// How consecutive points are joined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Straight segments.
    #[default]
    Linear,
    /// Cubic Hermite segments whose tangents keep the curve monotone between
    /// points (no overshoot).
    Monotone,
}

const EPSILON: f64 = 1e-6;

fn pt(p: (f64, f64)) -> String {
    format!("{},{}", number(p.0), number(p.1))
}

fn slope(p0: (f64, f64), p1: (f64, f64)) -> f64 {
    (p1.1 - p0.1) / (p1.0 - p0.0)
}

/// Degenerate spans (coincident x) yield `NaN`; treat them as flat.
fn or_zero(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v }
}

fn linear(points: &[(f64, f64)]) -> String {
    match points {
        [] => String::new(),
        [only] => format!("{}Z", pt(*only)),
        _ => points.iter().map(|p| pt(*p)).collect::<Vec<_>>().join("L"),
    }
}

/// Average of neighbouring secant slopes; one-sided at the ends.
fn finite_differences(points: &[(f64, f64)]) -> Vec<f64> {
    let n = points.len();
    let mut m = vec![0.0; n];
    let mut d = slope(points[0], points[1]);
    m[0] = d;
    for i in 1..n - 1 {
        let next = slope(points[i], points[i + 1]);
        m[i] = (d + next) / 2.0;
        d = next;
    }
    m[n - 1] = d;
    m
}

/// Fritsch–Carlson tangents, returned as (dx, dy) control offsets.
fn monotone_tangents(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut m = finite_differences(points);
    let last = points.len() - 1;

    for i in 0..last {
        let d = slope(points[i], points[i + 1]);
        if d.abs() < EPSILON {
            m[i] = 0.0;
            m[i + 1] = 0.0;
        } else {
            let a = m[i] / d;
            let b = m[i + 1] / d;
            let s = a * a + b * b;
            if s > 9.0 {
                let s = d * 3.0 / s.sqrt();
                m[i] = s * a;
                m[i + 1] = s * b;
            }
        }
    }

    (0..=last)
        .map(|i| {
            let span = points[last.min(i + 1)].0 - points[i.saturating_sub(1)].0;
            let s = span / (6.0 * (1.0 + m[i] * m[i]));
            (or_zero(s), or_zero(m[i] * s))
        })
        .collect()
}

fn hermite(points: &[(f64, f64)], tangents: &[(f64, f64)]) -> String {
    let mut out = String::new();
    let (p0, t0) = (points[0], tangents[0]);
    let (p1, t1) = (points[1], tangents[1]);
    out.push('C');
    out.push_str(&pt((p0.0 + t0.0, p0.1 + t0.1)));
    out.push(',');
    out.push_str(&pt((p1.0 - t1.0, p1.1 - t1.1)));
    out.push(',');
    out.push_str(&pt(p1));
    for (p, t) in points.iter().zip(tangents).skip(2) {
        out.push('S');
        out.push_str(&pt((p.0 - t.0, p.1 - t.1)));
        out.push(',');
        out.push_str(&pt(*p));
    }
    out
}

/// Path body (without the leading move command) through `points`.
fn interpolate(points: &[(f64, f64)], mode: Interpolation) -> String {
    match mode {
        Interpolation::Monotone if points.len() >= 3 => {
            let tangents = monotone_tangents(points);
            format!("{}{}", pt(points[0]), hermite(points, &tangents))
        }
        _ => linear(points),
    }
}

/// Builds an open polyline/curve path through pixel points.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineGenerator {
    interpolation: Interpolation,
}

impl LineGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interpolation(mut self, mode: Interpolation) -> Self {
        self.interpolation = mode;
        self
    }

    /// SVG path data, or `None` when there are no points.
    pub fn path(&self, points: &[(f64, f64)]) -> Option<String> {
        if points.is_empty() {
            return None;
        }
        Some(format!("M{}", interpolate(points, self.interpolation)))
    }
}

/// Builds a closed region between a horizontal baseline and the points.
#[derive(Clone, Copy, Debug, Default)]
pub struct AreaGenerator {
    interpolation: Interpolation,
    baseline: f64,
}

impl AreaGenerator {
    pub fn new(baseline: f64) -> Self {
        Self { interpolation: Interpolation::Linear, baseline }
    }

    pub fn interpolation(mut self, mode: Interpolation) -> Self {
        self.interpolation = mode;
        self
    }

    /// SVG path data for the top edge through `points` and back along the
    /// baseline, or `None` when there are no points.
    pub fn path(&self, points: &[(f64, f64)]) -> Option<String> {
        if points.is_empty() {
            return None;
        }
        let bottom: Vec<(f64, f64)> = points.iter().rev().map(|p| (p.0, self.baseline)).collect();
        Some(format!(
            "M{}L{}Z",
            interpolate(points, self.interpolation),
            interpolate(&bottom, self.interpolation)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_line_joins_points() {
        let line = LineGenerator::new();
        assert_eq!(line.path(&[(0.0, 10.0), (5.0, 2.5), (10.0, 0.0)]).unwrap(), "M0,10L5,2.5L10,0");
        assert_eq!(line.path(&[(3.0, 4.0)]).unwrap(), "M3,4Z");
        assert!(line.path(&[]).is_none());
    }

    #[test]
    fn monotone_with_two_points_stays_straight() {
        let line = LineGenerator::new().interpolation(Interpolation::Monotone);
        assert_eq!(line.path(&[(0.0, 0.0), (10.0, 10.0)]).unwrap(), "M0,0L10,10");
    }

    #[test]
    fn monotone_curve_uses_cubic_segments() {
        let line = LineGenerator::new().interpolation(Interpolation::Monotone);
        let d = line.path(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]).unwrap();
        assert!(d.starts_with("M0,0C"), "{d}");
        assert_eq!(d.matches('S').count(), 1);
        assert!(d.ends_with(",2,2"), "{d}");
    }

    #[test]
    fn monotone_flattens_at_plateaus() {
        // Flat middle segment forces zero tangents at both of its ends.
        let tangents = monotone_tangents(&[(0.0, 0.0), (1.0, 5.0), (2.0, 5.0), (3.0, 9.0)]);
        assert_eq!(tangents[1].1, 0.0);
        assert_eq!(tangents[2].1, 0.0);
    }

    #[test]
    fn area_closes_along_baseline() {
        let area = AreaGenerator::new(100.0);
        assert_eq!(
            area.path(&[(0.0, 10.0), (50.0, 20.0)]).unwrap(),
            "M0,10L50,20L50,100L0,100Z"
        );
    }
}
