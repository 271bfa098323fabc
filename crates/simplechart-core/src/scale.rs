// File: crates/simplechart-core/src/scale.rs
// Summary: Linear (value) and time scales with domain/range mapping and tick generation.

use chrono::NaiveDateTime;

use crate::format::{grouped_fixed, time_tick_label};
use crate::interval::{from_millis, to_millis, TimeInterval};

/// A scale maps domain values to pixel positions along one axis.
pub trait Scale {
    type Value: Copy;

    fn apply(&self, value: Self::Value) -> f64;
    /// Output range as configured (not sorted).
    fn range(&self) -> [f64; 2];
    /// Roughly `count` human-friendly tick values inside the domain.
    fn ticks(&self, count: usize) -> Vec<Self::Value>;
    /// Default label for a tick produced by `ticks(count)`.
    fn tick_label(&self, value: Self::Value, count: usize) -> String;
}

/// Tick spacing of 1, 2 or 5 times a power of ten giving about `count`
/// ticks over `[start, stop]`.
pub fn linear_tick_step(start: f64, stop: f64, count: usize) -> Option<f64> {
    let (lo, hi) = if start <= stop { (start, stop) } else { (stop, start) };
    let span = hi - lo;
    let m = count.max(1) as f64;
    if !span.is_finite() || span <= 0.0 {
        return None;
    }
    let mut step = 10f64.powf((span / m).log10().floor());
    let err = m / span * step;
    if err <= 0.15 {
        step *= 10.0;
    } else if err <= 0.35 {
        step *= 5.0;
    } else if err <= 0.75 {
        step *= 2.0;
    }
    Some(step)
}

/// Smallest power of ten that turns `x` into an integer.
fn integer_scale(x: f64) -> f64 {
    let mut k = 1.0;
    for _ in 0..16 {
        if (x * k) % 1.0 == 0.0 {
            break;
        }
        k *= 10.0;
    }
    k
}

/// Tick values at multiples of `linear_tick_step`, in ascending order.
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let Some(step) = linear_tick_step(start, stop, count) else {
        return Vec::new();
    };
    let (lo, hi) = if start <= stop { (start, stop) } else { (stop, start) };
    let first = (lo / step).ceil() * step;
    let last = (hi / step).floor() * step + step * 0.5;

    // Scale to integers so repeated addition does not drift.
    let k = integer_scale(step);
    let (first, last, step) = (first * k, last * k, step * k);
    (0..)
        .map(|i| first + step * f64::from(i))
        .take_while(|&v| v < last)
        .map(|v| v / k)
        .collect()
}

/// Decimal places needed to tell ticks spaced by `step` apart.
fn step_precision(step: f64) -> usize {
    let p = -((step.log10() + 0.01).floor());
    if p.is_finite() && p > 0.0 { p as usize } else { 0 }
}

/// Continuous linear scale over numbers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl Default for LinearScale {
    fn default() -> Self {
        Self { domain: [0.0, 1.0], range: [0.0, 1.0] }
    }
}

impl LinearScale {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(mut self, d0: f64, d1: f64) -> Self {
        self.domain = [d0, d1];
        self
    }

    pub fn with_range(mut self, r0: f64, r1: f64) -> Self {
        self.range = [r0, r1];
        self
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    /// Position of `v` within the domain as a 0..1 fraction. A collapsed
    /// domain maps every finite value to 0.
    fn normalize(&self, v: f64) -> f64 {
        let [d0, d1] = self.domain;
        let span = d1 - d0;
        if span == 0.0 {
            return if v.is_finite() { 0.0 } else { f64::NAN };
        }
        (v - d0) / span
    }

    /// Inverse mapping from a pixel position back to the domain.
    pub fn invert(&self, px: f64) -> f64 {
        let [r0, r1] = self.range;
        let [d0, d1] = self.domain;
        let span = r1 - r0;
        if span == 0.0 {
            return d0;
        }
        d0 + (px - r0) / span * (d1 - d0)
    }
}

impl Scale for LinearScale {
    type Value = f64;

    fn apply(&self, value: f64) -> f64 {
        let [r0, r1] = self.range;
        r0 + self.normalize(value) * (r1 - r0)
    }

    fn range(&self) -> [f64; 2] {
        self.range
    }

    fn ticks(&self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain[0], self.domain[1], count)
    }

    fn tick_label(&self, value: f64, count: usize) -> String {
        let precision = linear_tick_step(self.domain[0], self.domain[1], count)
            .map(step_precision)
            .unwrap_or(0);
        grouped_fixed(value, precision)
    }
}

const MS_PER_YEAR: f64 = 31_536e6;

/// Target spacings (milliseconds) and the calendar interval used for each.
const TIME_STEPS: [(f64, TimeInterval, i64); 18] = [
    (1e3, TimeInterval::Second, 1),
    (5e3, TimeInterval::Second, 5),
    (15e3, TimeInterval::Second, 15),
    (3e4, TimeInterval::Second, 30),
    (6e4, TimeInterval::Minute, 1),
    (3e5, TimeInterval::Minute, 5),
    (9e5, TimeInterval::Minute, 15),
    (18e5, TimeInterval::Minute, 30),
    (36e5, TimeInterval::Hour, 1),
    (108e5, TimeInterval::Hour, 3),
    (216e5, TimeInterval::Hour, 6),
    (432e5, TimeInterval::Hour, 12),
    (864e5, TimeInterval::Day, 1),
    (1728e5, TimeInterval::Day, 2),
    (6048e5, TimeInterval::Week, 1),
    (2592e6, TimeInterval::Month, 1),
    (7776e6, TimeInterval::Month, 3),
    (MS_PER_YEAR, TimeInterval::Year, 1),
];

/// Pick the calendar interval whose spacing is closest to `span / count`.
pub fn time_tick_interval(start_ms: f64, stop_ms: f64, count: usize) -> Option<(TimeInterval, i64)> {
    let span = stop_ms - start_ms;
    if !span.is_finite() || span <= 0.0 {
        return None;
    }
    let target = span / count.max(1) as f64;
    let i = TIME_STEPS.partition_point(|(ms, _, _)| *ms <= target);

    if i == TIME_STEPS.len() {
        let step = linear_tick_step(start_ms / MS_PER_YEAR, stop_ms / MS_PER_YEAR, count)?;
        return Some((TimeInterval::Year, (step as i64).max(1)));
    }
    if i == 0 {
        let step = linear_tick_step(start_ms, stop_ms, count)?;
        return Some((TimeInterval::Millisecond, (step as i64).max(1)));
    }
    let (lo_ms, lo_iv, lo_step) = TIME_STEPS[i - 1];
    let (hi_ms, hi_iv, hi_step) = TIME_STEPS[i];
    if target / lo_ms < hi_ms / target {
        Some((lo_iv, lo_step))
    } else {
        Some((hi_iv, hi_step))
    }
}

/// Continuous scale over timestamps (naive datetimes treated as UTC).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    domain: [NaiveDateTime; 2],
    linear: LinearScale,
}

impl TimeScale {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        let linear = LinearScale::new().with_domain(to_millis(&start) as f64, to_millis(&end) as f64);
        Self { domain: [start, end], linear }
    }

    pub fn with_domain(self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        let [r0, r1] = self.linear.range();
        Self::new(start, end).with_range(r0, r1)
    }

    pub fn with_range(mut self, r0: f64, r1: f64) -> Self {
        self.linear = self.linear.with_range(r0, r1);
        self
    }

    pub fn domain(&self) -> [NaiveDateTime; 2] {
        self.domain
    }

    pub fn invert(&self, px: f64) -> Option<NaiveDateTime> {
        from_millis(self.linear.invert(px).round() as i64)
    }
}

impl Scale for TimeScale {
    type Value = NaiveDateTime;

    fn apply(&self, value: NaiveDateTime) -> f64 {
        self.linear.apply(to_millis(&value) as f64)
    }

    fn range(&self) -> [f64; 2] {
        self.linear.range()
    }

    fn ticks(&self, count: usize) -> Vec<NaiveDateTime> {
        let (lo, hi) = if self.domain[0] <= self.domain[1] {
            (self.domain[0], self.domain[1])
        } else {
            (self.domain[1], self.domain[0])
        };
        let Some((interval, step)) = time_tick_interval(to_millis(&lo) as f64, to_millis(&hi) as f64, count) else {
            return Vec::new();
        };
        // Inclusive of the upper bound.
        let stop = TimeInterval::Millisecond.offset(hi, 1).unwrap_or(hi);
        interval.range(lo, stop, step)
    }

    fn tick_label(&self, value: NaiveDateTime, _count: usize) -> String {
        time_tick_label(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn linear_maps_domain_onto_range() {
        let s = LinearScale::new().with_domain(10.0, 0.0).with_range(0.0, 200.0);
        assert_eq!(s.apply(10.0), 0.0);
        assert_eq!(s.apply(0.0), 200.0);
        assert_eq!(s.apply(5.0), 100.0);
        assert_eq!(s.invert(50.0), 7.5);
    }

    #[test]
    fn collapsed_domain_maps_to_range_start() {
        let s = LinearScale::new().with_domain(5.0, 5.0).with_range(0.0, 200.0);
        assert_eq!(s.apply(5.0), 0.0);
        assert!(s.ticks(10).is_empty());
    }

    #[test]
    fn linear_ticks_use_round_steps() {
        assert_eq!(linear_ticks(0.0, 10.0, 10), vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        assert_eq!(linear_ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(linear_ticks(12.0, 3.0, 4), vec![4.0, 6.0, 8.0, 10.0, 12.0]);
    }

    #[test]
    fn linear_labels_follow_step_precision() {
        let s = LinearScale::new().with_domain(0.0, 1.0);
        assert_eq!(s.tick_label(0.2, 5), "0.2");
        let big = LinearScale::new().with_domain(0.0, 5000.0);
        assert_eq!(big.tick_label(2500.0, 10), "2,500");
    }

    #[test]
    fn time_scale_interpolates_between_dates() {
        let s = TimeScale::new(day(2014, 3, 1), day(2014, 3, 11)).with_range(0.0, 100.0);
        assert_eq!(s.apply(day(2014, 3, 1)), 0.0);
        assert_eq!(s.apply(day(2014, 3, 6)), 50.0);
        assert_eq!(s.apply(day(2014, 3, 11)), 100.0);
        assert_eq!(s.invert(50.0), Some(day(2014, 3, 6)));
    }

    #[test]
    fn ten_day_domain_ticks_daily() {
        let s = TimeScale::new(day(2014, 3, 1), day(2014, 3, 11));
        let ticks = s.ticks(10);
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks.first().copied(), Some(day(2014, 3, 1)));
        assert_eq!(ticks.last().copied(), Some(day(2014, 3, 11)));
    }

    #[test]
    fn multi_year_domain_ticks_on_years() {
        let s = TimeScale::new(day(2000, 6, 1), day(2030, 6, 1));
        let years: Vec<i32> = s.ticks(10).iter().map(|t| t.year()).collect();
        assert_eq!(years, vec![2005, 2010, 2015, 2020, 2025, 2030]);
    }

    #[test]
    fn interval_choice_prefers_nearest_spacing() {
        let two_months = 61.0 * 864e5;
        assert_eq!(time_tick_interval(0.0, two_months, 10), Some((TimeInterval::Week, 1)));
        assert_eq!(time_tick_interval(0.0, 0.0, 10), None);
    }
}
