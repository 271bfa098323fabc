// File: crates/simplechart-core/src/format.rs
// Summary: Number and date formatting used for path data, tick labels and callbacks.

use std::fmt::Write as _;

use chrono::format::{self, Fixed, Item, Numeric, Parsed, StrftimeItems};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

use crate::error::{ChartError, Result};

/// Shortest round-trip text for a coordinate or value, with `-0` folded to `0`.
/// Magnitudes from `1e21` up and below `1e-6` use exponent notation (`1e+21`,
/// `1.5e-7`).
pub fn number(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    let magnitude = v.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{v}");
    }
    let exp = format!("{v:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

/// Fixed-precision number with thousands separators (`,.Nf`).
pub fn grouped_fixed(v: f64, precision: usize) -> String {
    let body = format!("{:.*}", precision, v.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let is_zero = body.chars().all(|c| c == '0' || c == '.');
    if v.is_sign_negative() && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}

/// Validated strftime pattern used both to parse series keys and to format
/// dates handed to callbacks and tick labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    fields: Fields,
}

/// Which parts of a timestamp a pattern reads. Parsing fills the others with
/// 1900-01-01 00:00:00.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Fields {
    year: bool,
    month: bool,
    day: bool,
    /// Ordinal or week-based day; month and day are derived from it.
    day_of_year: bool,
    hour: bool,
    hour12: bool,
    am_pm: bool,
    minute: bool,
    timestamp: bool,
}

impl Fields {
    fn of(pattern: &str) -> Self {
        let mut f = Fields::default();
        for item in StrftimeItems::new(pattern) {
            match item {
                Item::Numeric(n, _) => match n {
                    Numeric::Year
                    | Numeric::YearDiv100
                    | Numeric::YearMod100
                    | Numeric::IsoYear
                    | Numeric::IsoYearDiv100
                    | Numeric::IsoYearMod100 => f.year = true,
                    Numeric::Month => f.month = true,
                    Numeric::Day => f.day = true,
                    Numeric::Ordinal | Numeric::WeekFromSun | Numeric::WeekFromMon | Numeric::IsoWeek => {
                        f.day_of_year = true
                    }
                    Numeric::Hour => f.hour = true,
                    Numeric::Hour12 => f.hour12 = true,
                    Numeric::Minute => f.minute = true,
                    Numeric::Timestamp => f.timestamp = true,
                    _ => {}
                },
                Item::Fixed(Fixed::ShortMonthName | Fixed::LongMonthName) => f.month = true,
                Item::Fixed(Fixed::UpperAmPm | Fixed::LowerAmPm) => f.am_pm = true,
                _ => {}
            }
        }
        f
    }
}

impl DateFormat {
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let has_error = StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error));
        // Naive timestamps cannot render zone specifiers; format a sample once so later
        // formatting never fails.
        let mut sample_text = String::new();
        let sample = NaiveDate::from_ymd_opt(2000, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(|| ChartError::InvalidDateFormat { format: pattern.clone() })?;
        if has_error || write!(sample_text, "{}", sample.format(&pattern)).is_err() {
            return Err(ChartError::InvalidDateFormat { format: pattern });
        }
        let fields = Fields::of(&pattern);
        Ok(Self { pattern, fields })
    }

    /// Day of month, zero padded (`%d`).
    pub fn day_of_month() -> Self {
        Self { fields: Fields::of("%d"), pattern: "%d".to_string() }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Parse a series key. Fields the pattern does not mention default to
    /// 1900-01-01 00:00:00, so `%Y-%m` reads `"2014-03"` as March 1st 2014
    /// at midnight and `%H:%M` reads a time of day on 1900-01-01.
    pub fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        let mut parsed = Parsed::new();
        format::parse(&mut parsed, text, StrftimeItems::new(&self.pattern)).ok()?;
        let f = self.fields;
        if f.timestamp {
            return parsed.to_naive_datetime_with_offset(0).ok();
        }
        if !f.year {
            parsed.set_year(1900).ok()?;
        }
        if !f.day_of_year {
            if !f.month {
                parsed.set_month(1).ok()?;
            }
            if !f.day {
                parsed.set_day(1).ok()?;
            }
        }
        if f.hour12 && !f.hour && !f.am_pm {
            parsed.set_ampm(false).ok()?;
        }
        if !f.hour && !f.hour12 {
            parsed.set_hour(0).ok()?;
        }
        if !f.minute {
            parsed.set_minute(0).ok()?;
        }
        let date = parsed.to_naive_date().ok()?;
        let time = parsed.to_naive_time().ok()?;
        Some(date.and_time(time))
    }

    pub fn format(&self, dt: &NaiveDateTime) -> String {
        let mut out = String::new();
        if write!(out, "{}", dt.format(&self.pattern)).is_err() {
            out.clear();
        }
        out
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self { fields: Fields::of("%Y-%m-%d"), pattern: "%Y-%m-%d".to_string() }
    }
}

/// Multi-resolution label for a time tick: the coarsest unit that is not at
/// its boundary decides the format.
pub fn time_tick_label(dt: &NaiveDateTime) -> String {
    let millis = dt.and_utc().timestamp_subsec_millis();
    if millis != 0 {
        return format!(".{millis:03}");
    }
    let pattern = if dt.second() != 0 {
        ":%S"
    } else if dt.minute() != 0 {
        "%I:%M"
    } else if dt.hour() != 0 {
        "%I %p"
    } else if dt.day() != 1 {
        if dt.weekday() != Weekday::Sun { "%a %d" } else { "%b %d" }
    } else if dt.month() != 1 {
        "%B"
    } else {
        "%Y"
    };
    dt.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn numbers_drop_trailing_zeroes() {
        assert_eq!(number(4.0), "4");
        assert_eq!(number(-0.0), "0");
        assert_eq!(number(12.5), "12.5");
        assert_eq!(number(-3.25), "-3.25");
    }

    #[test]
    fn numbers_switch_to_exponents_at_the_extremes() {
        assert_eq!(number(1e21), "1e+21");
        assert_eq!(number(-2.5e22), "-2.5e+22");
        assert_eq!(number(1e-7), "1e-7");
        assert_eq!(number(1.5e-7), "1.5e-7");
        assert_eq!(number(123456789012345680000.0), "123456789012345680000");
        assert_eq!(number(0.000001), "0.000001");
    }

    #[test]
    fn grouped_fixed_inserts_separators() {
        assert_eq!(grouped_fixed(1234567.0, 0), "1,234,567");
        assert_eq!(grouped_fixed(-1500.0, 1), "-1,500.0");
        assert_eq!(grouped_fixed(0.25, 2), "0.25");
        assert_eq!(grouped_fixed(-0.001, 1), "0.0");
        assert_eq!(grouped_fixed(999.0, 0), "999");
    }

    #[test]
    fn parses_date_only_keys_to_midnight() {
        let f = DateFormat::default();
        assert_eq!(f.parse("2014-03-02"), Some(ymd(2014, 3, 2)));
        assert_eq!(f.parse("2014-03-02 extra"), None);
        assert_eq!(f.parse("yesterday"), None);
        assert_eq!(f.format(&ymd(2014, 3, 2)), "2014-03-02");
    }

    #[test]
    fn parses_date_time_keys() {
        let f = DateFormat::new("%Y-%m-%d %H:%M").unwrap();
        let dt = f.parse("2014-03-02 13:45").unwrap();
        assert_eq!(dt.hour(), 13);
        assert_eq!(dt.minute(), 45);
    }

    #[test]
    fn partial_patterns_default_missing_fields() {
        let month = DateFormat::new("%Y-%m").unwrap();
        assert_eq!(month.parse("2014-03"), Some(ymd(2014, 3, 1)));
        assert_eq!(month.parse("2014-13"), None);

        let year = DateFormat::new("%Y").unwrap();
        assert_eq!(year.parse("2014"), Some(ymd(2014, 1, 1)));

        let clock = DateFormat::new("%H:%M").unwrap();
        assert_eq!(clock.parse("13:45"), ymd(1900, 1, 1).with_hour(13).and_then(|d| d.with_minute(45)));

        let named = DateFormat::new("%b %Y").unwrap();
        assert_eq!(named.parse("Jun 2014"), Some(ymd(2014, 6, 1)));

        let ordinal = DateFormat::new("%Y/%j").unwrap();
        assert_eq!(ordinal.parse("2014/032"), Some(ymd(2014, 2, 1)));

        let twelve = DateFormat::new("%Y-%m-%d %I:%M").unwrap();
        assert_eq!(twelve.parse("2014-03-02 09:30"), ymd(2014, 3, 2).with_hour(9).and_then(|d| d.with_minute(30)));
    }

    #[test]
    fn rejects_unusable_patterns() {
        assert!(DateFormat::new("%Q").is_err());
        assert!(DateFormat::new("%Y %Z").is_err());
        assert!(DateFormat::new("%d/%m/%Y").is_ok());
    }

    #[test]
    fn tick_labels_pick_coarsest_unit() {
        assert_eq!(time_tick_label(&ymd(2014, 1, 1)), "2014");
        assert_eq!(time_tick_label(&ymd(2014, 3, 1)), "March");
        // 2014-03-02 is a Sunday
        assert_eq!(time_tick_label(&ymd(2014, 3, 2)), "Mar 02");
        assert_eq!(time_tick_label(&ymd(2014, 3, 3)), "Mon 03");
        let noon = ymd(2014, 3, 3).with_hour(12).unwrap();
        assert_eq!(time_tick_label(&noon), "12 PM");
    }
}
