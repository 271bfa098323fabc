// File: crates/simplechart-core/src/series.rs
// Summary: Raw date→value series, normalization to point lists, and value/time extents.
// Notes:
// - Entry order is insertion order of the source map; nothing is sorted. The
//   first-series time domain therefore uses the first and last *enumerated*
//   keys, which need not be the earliest and latest dates.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{ChartError, Result};
use crate::format::DateFormat;
use crate::options::TimeDomain;

/// A series value as supplied: a number or a numeric string.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Numeric value with the loose rules applied to form input: surrounding
    /// whitespace is ignored, an empty string is zero, `0x` prefixes are hex,
    /// and anything else unparsable is `NaN`.
    pub fn coerce(&self) -> f64 {
        let text = match self {
            RawValue::Number(n) => return *n,
            RawValue::Text(s) => s.trim(),
        };
        match text {
            "" => 0.0,
            "Infinity" | "+Infinity" => f64::INFINITY,
            "-Infinity" => f64::NEG_INFINITY,
            _ => {
                if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
                    return i64::from_str_radix(hex, 16).map(|v| v as f64).unwrap_or(f64::NAN);
                }
                let numeric = text.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
                if numeric { text.parse().unwrap_or(f64::NAN) } else { f64::NAN }
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self { RawValue::Number(v) }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self { RawValue::Number(f64::from(v)) }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self { RawValue::Text(v.to_string()) }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self { RawValue::Text(v) }
}

/// One series: date-string keys to values, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RawSeries(IndexMap<String, RawValue>);

impl RawSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry. Replacing keeps the existing position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawSeries {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SeriesInput {
    Many(Vec<RawSeries>),
    One(RawSeries),
}

/// One or more series; a single series is normalized to a one-element set.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "SeriesInput")]
pub struct SeriesSet(Vec<RawSeries>);

impl SeriesSet {
    pub fn series(&self) -> &[RawSeries] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<SeriesInput> for SeriesSet {
    fn from(input: SeriesInput) -> Self {
        match input {
            SeriesInput::Many(v) => SeriesSet(v),
            SeriesInput::One(s) => SeriesSet(vec![s]),
        }
    }
}

impl From<RawSeries> for SeriesSet {
    fn from(s: RawSeries) -> Self { SeriesSet(vec![s]) }
}

impl From<Vec<RawSeries>> for SeriesSet {
    fn from(v: Vec<RawSeries>) -> Self { SeriesSet(v) }
}

/// A parsed observation tagged with the index of the series it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub date: NaiveDateTime,
    pub value: f64,
    pub series_index: usize,
}

/// Smallest and largest value seen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueDomain {
    pub min: f64,
    pub max: f64,
}

impl ValueDomain {
    fn seed(v: f64) -> Self {
        Self { min: v, max: v }
    }

    /// Widen to include `v`; both bounds are checked on every value.
    pub fn include(&mut self, v: f64) {
        if v < self.min {
            self.min = v;
        }
        if v > self.max {
            self.max = v;
        }
    }
}

/// Series converted to points, with extents.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapedData {
    pub series: Vec<Vec<Point>>,
    pub values: ValueDomain,
}

impl ShapedData {
    /// Parse every key with `format` and coerce every value. Fails on the first
    /// key that cannot be read or value that is not a finite number, or when the
    /// first series is empty.
    pub fn from_set(set: &SeriesSet, format: &DateFormat) -> Result<Self> {
        if set.series().first().map_or(true, RawSeries::is_empty) {
            return Err(ChartError::EmptySeries);
        }

        let mut values: Option<ValueDomain> = None;
        let mut series = Vec::with_capacity(set.len());
        for (index, raw) in set.series().iter().enumerate() {
            let mut points = Vec::with_capacity(raw.len());
            for (key, raw_value) in raw.iter() {
                let date = format.parse(key).ok_or_else(|| ChartError::MalformedDate {
                    series: index,
                    key: key.to_string(),
                    format: format.pattern().to_string(),
                })?;
                let value = raw_value.coerce();
                // Infinite values would collapse the value scale for every point.
                if !value.is_finite() {
                    return Err(ChartError::MalformedValue {
                        series: index,
                        key: key.to_string(),
                        raw: raw_value.describe(),
                    });
                }
                match values.as_mut() {
                    Some(d) => d.include(value),
                    None => values = Some(ValueDomain::seed(value)),
                }
                points.push(Point { date, value, series_index: index });
            }
            series.push(points);
        }

        let values = values.ok_or(ChartError::EmptySeries)?;
        Ok(Self { series, values })
    }

    /// Time extent for the shared time axis.
    pub fn time_extent(&self, mode: TimeDomain) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match mode {
            TimeDomain::FirstSeries => {
                let first = self.series.first()?;
                Some((first.first()?.date, first.last()?.date))
            }
            TimeDomain::Union => {
                let mut dates = self.series.iter().flatten().map(|p| p.date);
                let seed = dates.next()?;
                Some(dates.fold((seed, seed), |(lo, hi), d| (lo.min(d), hi.max(d))))
            }
        }
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn coercion_follows_loose_numeric_rules() {
        assert_eq!(RawValue::from(" 12.5 ").coerce(), 12.5);
        assert_eq!(RawValue::from("").coerce(), 0.0);
        assert_eq!(RawValue::from("0x1f").coerce(), 31.0);
        assert_eq!(RawValue::from("-Infinity").coerce(), f64::NEG_INFINITY);
        assert!(RawValue::from("12px").coerce().is_nan());
        assert!(RawValue::from("inf").coerce().is_nan());
    }

    #[test]
    fn single_object_and_array_both_deserialize() {
        let one: SeriesSet = serde_json::from_str(r#"{"2014-01-02": 3, "2014-01-01": "4"}"#).unwrap();
        assert_eq!(one.len(), 1);
        let keys: Vec<&str> = one.series()[0].iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["2014-01-02", "2014-01-01"]);

        let many: SeriesSet = serde_json::from_str(r#"[{"2014-01-01": 1}, {"2014-01-01": 2}]"#).unwrap();
        assert_eq!(many.len(), 2);
    }

    #[test]
    fn value_domain_checks_both_bounds() {
        let s: RawSeries = [("2014-01-01", 10), ("2014-01-02", 3), ("2014-01-03", 7)].into_iter().collect();
        let shaped = ShapedData::from_set(&s.into(), &DateFormat::default()).unwrap();
        assert_eq!(shaped.values, ValueDomain { min: 3.0, max: 10.0 });
    }

    #[test]
    fn negative_only_values_keep_true_max() {
        let s: RawSeries = [("2014-01-01", -4), ("2014-01-02", -9)].into_iter().collect();
        let shaped = ShapedData::from_set(&s.into(), &DateFormat::default()).unwrap();
        assert_eq!(shaped.values, ValueDomain { min: -9.0, max: -4.0 });
    }

    #[test]
    fn first_series_extent_uses_enumeration_order() {
        let s: RawSeries = [("2014-01-05", 1), ("2014-01-01", 2), ("2014-01-03", 3)].into_iter().collect();
        let shaped = ShapedData::from_set(&s.into(), &DateFormat::default()).unwrap();
        assert_eq!(shaped.time_extent(TimeDomain::FirstSeries), Some((day(2014, 1, 5), day(2014, 1, 3))));
        assert_eq!(shaped.time_extent(TimeDomain::Union), Some((day(2014, 1, 1), day(2014, 1, 5))));
    }

    #[test]
    fn points_carry_series_index() {
        let a: RawSeries = [("2014-01-01", 1)].into_iter().collect();
        let b: RawSeries = [("2014-01-01", 2), ("2014-01-02", 3)].into_iter().collect();
        let shaped = ShapedData::from_set(&vec![a, b].into(), &DateFormat::default()).unwrap();
        assert_eq!(shaped.point_count(), 3);
        assert!(shaped.series[1].iter().all(|p| p.series_index == 1));
    }

    #[test]
    fn malformed_entries_are_reported() {
        let bad_value: RawSeries = [("2014-01-01", "lots")].into_iter().collect();
        assert!(matches!(
            ShapedData::from_set(&bad_value.into(), &DateFormat::default()),
            Err(ChartError::MalformedValue { series: 0, .. })
        ));

        for infinite in [RawValue::from("Infinity"), RawValue::Number(f64::NEG_INFINITY)] {
            let mut s = RawSeries::new();
            s.insert("2014-01-01", 1);
            s.insert("2014-01-02", infinite);
            assert!(matches!(
                ShapedData::from_set(&s.into(), &DateFormat::default()),
                Err(ChartError::MalformedValue { series: 0, ref key, .. }) if key == "2014-01-02"
            ));
        }

        let bad_date: RawSeries = [("01/02/2014", 1)].into_iter().collect();
        assert!(matches!(
            ShapedData::from_set(&bad_date.into(), &DateFormat::default()),
            Err(ChartError::MalformedDate { .. })
        ));

        assert!(matches!(
            ShapedData::from_set(&SeriesSet::default(), &DateFormat::default()),
            Err(ChartError::EmptySeries)
        ));
    }
}
