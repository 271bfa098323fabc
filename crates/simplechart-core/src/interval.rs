// File: crates/simplechart-core/src/interval.rs
// Summary: Calendar intervals (second .. year) used to place time-axis ticks.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeInterval {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    /// Sunday-based weeks.
    Week,
    Month,
    Year,
}

pub(crate) fn to_millis(dt: &NaiveDateTime) -> i64 {
    dt.and_utc().timestamp_millis()
}

pub(crate) fn from_millis(ms: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(ms).map(|d| d.naive_utc())
}

fn midnight(d: NaiveDate) -> NaiveDateTime {
    d.and_time(NaiveTime::MIN)
}

impl TimeInterval {
    /// Latest interval boundary at or before `dt`.
    pub fn floor(self, dt: NaiveDateTime) -> NaiveDateTime {
        let date = dt.date();
        match self {
            TimeInterval::Millisecond => {
                let nanos = dt.nanosecond() / 1_000_000 * 1_000_000;
                dt.with_nanosecond(nanos).unwrap_or(dt)
            }
            TimeInterval::Second => dt.with_nanosecond(0).unwrap_or(dt),
            TimeInterval::Minute => date
                .and_hms_opt(dt.hour(), dt.minute(), 0)
                .unwrap_or(dt),
            TimeInterval::Hour => date.and_hms_opt(dt.hour(), 0, 0).unwrap_or(dt),
            TimeInterval::Day => midnight(date),
            TimeInterval::Week => {
                let back = i64::from(date.weekday().num_days_from_sunday());
                midnight(date - Duration::days(back))
            }
            TimeInterval::Month => date.with_day(1).map(midnight).unwrap_or(dt),
            TimeInterval::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)
                .map(midnight)
                .unwrap_or(dt),
        }
    }

    /// Earliest interval boundary at or after `dt`.
    pub fn ceil(self, dt: NaiveDateTime) -> NaiveDateTime {
        let floored = self.floor(dt);
        if floored == dt {
            return dt;
        }
        self.offset(floored, 1).unwrap_or(floored)
    }

    /// Move `dt` by `n` whole intervals.
    pub fn offset(self, dt: NaiveDateTime, n: i64) -> Option<NaiveDateTime> {
        let months = |count: i64| {
            let m = Months::new(u32::try_from(count.unsigned_abs()).ok()?);
            if count >= 0 { dt.checked_add_months(m) } else { dt.checked_sub_months(m) }
        };
        match self {
            TimeInterval::Millisecond => dt.checked_add_signed(Duration::milliseconds(n)),
            TimeInterval::Second => dt.checked_add_signed(Duration::seconds(n)),
            TimeInterval::Minute => dt.checked_add_signed(Duration::minutes(n)),
            TimeInterval::Hour => dt.checked_add_signed(Duration::hours(n)),
            TimeInterval::Day => dt.checked_add_signed(Duration::days(n)),
            TimeInterval::Week => dt.checked_add_signed(Duration::weeks(n)),
            TimeInterval::Month => months(n),
            TimeInterval::Year => months(n.checked_mul(12)?),
        }
    }

    /// Field value that stepped ranges filter on (`value % step == 0`).
    fn number(self, dt: &NaiveDateTime) -> i64 {
        match self {
            TimeInterval::Millisecond => to_millis(dt),
            TimeInterval::Second => i64::from(dt.second()),
            TimeInterval::Minute => i64::from(dt.minute()),
            TimeInterval::Hour => i64::from(dt.hour()),
            TimeInterval::Day => i64::from(dt.day0()),
            TimeInterval::Week => {
                let jan1 = NaiveDate::from_ymd_opt(dt.year(), 1, 1)
                    .map(|d| d.weekday().num_days_from_sunday())
                    .unwrap_or(0);
                i64::from((dt.ordinal0() + jan1) / 7)
            }
            TimeInterval::Month => i64::from(dt.month0()),
            TimeInterval::Year => i64::from(dt.year()),
        }
    }

    /// Boundaries in `[start, stop)`; with `step > 1` only boundaries whose
    /// field value is a multiple of `step` are kept.
    pub fn range(self, start: NaiveDateTime, stop: NaiveDateTime, step: i64) -> Vec<NaiveDateTime> {
        let step = step.max(1);
        if self == TimeInterval::Millisecond {
            let first = to_millis(&start).div_euclid(step) * step
                + if to_millis(&start).rem_euclid(step) == 0 { 0 } else { step };
            let end = to_millis(&stop);
            return (0..)
                .map(|i| first + i * step)
                .take_while(|&ms| ms < end)
                .filter_map(from_millis)
                .collect();
        }

        let mut out = Vec::new();
        let mut t = self.ceil(start);
        while t < stop {
            if step == 1 || self.number(&t) % step == 0 {
                out.push(t);
            }
            match self.offset(t, 1) {
                Some(next) => t = next,
                None => break,
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn week_floor_lands_on_sunday() {
        // 2014-03-05 is a Wednesday
        assert_eq!(TimeInterval::Week.floor(at(2014, 3, 5, 10, 0)), at(2014, 3, 2, 0, 0));
    }

    #[test]
    fn ceil_keeps_exact_boundaries() {
        assert_eq!(TimeInterval::Day.ceil(at(2014, 3, 5, 0, 0)), at(2014, 3, 5, 0, 0));
        assert_eq!(TimeInterval::Day.ceil(at(2014, 3, 5, 0, 1)), at(2014, 3, 6, 0, 0));
        assert_eq!(TimeInterval::Month.ceil(at(2014, 1, 31, 0, 0)), at(2014, 2, 1, 0, 0));
    }

    #[test]
    fn stepped_day_range_filters_on_day_of_month() {
        let days = TimeInterval::Day.range(at(2014, 3, 1, 0, 0), at(2014, 3, 8, 0, 0), 2);
        let dom: Vec<u32> = days.iter().map(|d| d.day()).collect();
        assert_eq!(dom, vec![1, 3, 5, 7]);
    }

    #[test]
    fn month_offsets_clamp_to_month_end() {
        let jan31 = at(2014, 1, 31, 0, 0);
        assert_eq!(TimeInterval::Month.offset(jan31, 1), Some(at(2014, 2, 28, 0, 0)));
        assert_eq!(TimeInterval::Year.offset(jan31, -1), Some(at(2013, 1, 31, 0, 0)));
    }

    #[test]
    fn millisecond_range_is_aligned_to_step() {
        let start = at(2014, 1, 1, 0, 0) + Duration::milliseconds(3);
        let stop = at(2014, 1, 1, 0, 0) + Duration::milliseconds(20);
        let ticks = TimeInterval::Millisecond.range(start, stop, 5);
        let ms: Vec<u32> = ticks.iter().map(|t| t.nanosecond() / 1_000_000).collect();
        assert_eq!(ms, vec![5, 10, 15]);
    }
}
