//! Five-field cron expressions evaluated in UTC.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::domain::AppError;

const MONTH_NAMES: &[&str] =
    &["JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC"];
const WEEKDAY_NAMES: &[&str] = &["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// Upper bound for `next_after` searches.
const SEARCH_HORIZON_DAYS: i64 = 5 * 366;

/// Set of allowed values for one cron field, as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldSet(u64);

impl FieldSet {
    fn contains(self, value: u32) -> bool {
        value < 64 && self.0 & (1 << value) != 0
    }
}

struct FieldSpec {
    label: &'static str,
    min: u32,
    max: u32,
    names: &'static [&'static str],
    /// Value the first entry of `names` maps to.
    name_base: u32,
}

const MINUTE: FieldSpec = FieldSpec { label: "minute", min: 0, max: 59, names: &[], name_base: 0 };
const HOUR: FieldSpec = FieldSpec { label: "hour", min: 0, max: 23, names: &[], name_base: 0 };
const DAY_OF_MONTH: FieldSpec =
    FieldSpec { label: "day-of-month", min: 1, max: 31, names: &[], name_base: 0 };
const MONTH: FieldSpec =
    FieldSpec { label: "month", min: 1, max: 12, names: MONTH_NAMES, name_base: 1 };
const DAY_OF_WEEK: FieldSpec =
    FieldSpec { label: "day-of-week", min: 0, max: 7, names: WEEKDAY_NAMES, name_base: 0 };

/// A parsed cron schedule (minute, hour, day-of-month, month, day-of-week).
///
/// When both day fields are restricted a time matches if either does, as in
/// Vixie cron. Day-of-week accepts both 0 and 7 for Sunday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronExpr {
    source: String,
    minutes: FieldSet,
    hours: FieldSet,
    days_of_month: FieldSet,
    months: FieldSet,
    days_of_week: FieldSet,
    dom_restricted: bool,
    dow_restricted: bool,
}

impl CronExpr {
    pub fn parse(expression: &str) -> Result<Self, AppError> {
        let invalid = |reason: String| AppError::InvalidCron {
            expression: expression.to_string(),
            reason,
        };

        let fields: Vec<&str> = expression.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(invalid(format!("expected 5 fields, found {}", fields.len())));
        }

        let minutes = parse_field(fields[0], &MINUTE).map_err(invalid)?;
        let hours = parse_field(fields[1], &HOUR).map_err(invalid)?;
        let days_of_month = parse_field(fields[2], &DAY_OF_MONTH).map_err(invalid)?;
        let months = parse_field(fields[3], &MONTH).map_err(invalid)?;
        let mut days_of_week = parse_field(fields[4], &DAY_OF_WEEK).map_err(invalid)?;

        // Fold Sunday-as-7 onto 0.
        if days_of_week.contains(7) {
            days_of_week = FieldSet((days_of_week.0 | 1) & !(1 << 7));
        }

        Ok(Self {
            source: fields.join(" "),
            minutes,
            hours,
            days_of_month,
            months,
            days_of_week,
            dom_restricted: !fields[2].starts_with('*'),
            dow_restricted: !fields[4].starts_with('*'),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the minute containing `at` is a scheduled minute.
    pub fn matches(&self, at: DateTime<Utc>) -> bool {
        let naive = at.naive_utc();
        self.minutes.contains(naive.minute())
            && self.hours.contains(naive.hour())
            && self.months.contains(naive.month())
            && self.day_matches(naive.date())
    }

    /// First scheduled minute strictly after `after`.
    pub fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let start = after.naive_utc();
        let horizon = start + Duration::days(SEARCH_HORIZON_DAYS);
        let mut t = start.with_second(0)?.with_nanosecond(0)? + Duration::minutes(1);

        while t <= horizon {
            if !self.months.contains(t.month()) {
                t = first_of_next_month(t)?;
                continue;
            }
            if !self.day_matches(t.date()) {
                t = t.date().succ_opt()?.and_hms_opt(0, 0, 0)?;
                continue;
            }
            if !self.hours.contains(t.hour()) {
                t = t.date().and_hms_opt(t.hour(), 0, 0)? + Duration::hours(1);
                continue;
            }
            if !self.minutes.contains(t.minute()) {
                t += Duration::minutes(1);
                continue;
            }
            return Some(Utc.from_utc_datetime(&t));
        }
        None
    }

    /// The next `count` scheduled minutes after `after`.
    pub fn upcoming(&self, after: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
        let mut times = Vec::with_capacity(count);
        let mut cursor = after;
        while times.len() < count {
            match self.next_after(cursor) {
                Some(next) => {
                    times.push(next);
                    cursor = next;
                }
                None => break,
            }
        }
        times
    }

    fn day_matches(&self, date: NaiveDate) -> bool {
        let dom = self.days_of_month.contains(date.day());
        let dow = self.days_of_week.contains(date.weekday().num_days_from_sunday());
        if self.dom_restricted && self.dow_restricted { dom || dow } else { dom && dow }
    }
}

impl FromStr for CronExpr {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CronExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn first_of_next_month(t: NaiveDateTime) -> Option<NaiveDateTime> {
    let (year, month) = if t.month() == 12 { (t.year() + 1, 1) } else { (t.year(), t.month() + 1) };
    NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)
}

fn parse_field(field: &str, spec: &FieldSpec) -> Result<FieldSet, String> {
    let mut set = 0u64;

    for part in field.split(',') {
        if part.is_empty() {
            return Err(format!("empty list item in {} field", spec.label));
        }

        let (range, step) = match part.split_once('/') {
            Some((range, step)) => {
                let step: u32 = step
                    .parse()
                    .map_err(|_| format!("invalid step '{}' in {} field", step, spec.label))?;
                if step == 0 {
                    return Err(format!("step must be positive in {} field", spec.label));
                }
                (range, Some(step))
            }
            None => (part, None),
        };

        let (start, end) = if range == "*" {
            (spec.min, spec.max)
        } else if let Some((lo, hi)) = range.split_once('-') {
            (parse_value(lo, spec)?, parse_value(hi, spec)?)
        } else {
            let value = parse_value(range, spec)?;
            // `5/15` means "from 5 to the end, every 15".
            if step.is_some() { (value, spec.max) } else { (value, value) }
        };

        if start > end {
            return Err(format!("range {}-{} is reversed in {} field", start, end, spec.label));
        }

        let step = step.unwrap_or(1) as usize;
        for value in (start..=end).step_by(step) {
            set |= 1 << value;
        }
    }

    Ok(FieldSet(set))
}

fn parse_value(token: &str, spec: &FieldSpec) -> Result<u32, String> {
    let value = match token.parse::<u32>() {
        Ok(value) => value,
        Err(_) => spec
            .names
            .iter()
            .position(|name| name.eq_ignore_ascii_case(token))
            .map(|index| index as u32 + spec.name_base)
            .ok_or_else(|| format!("invalid value '{}' in {} field", token, spec.label))?,
    };

    if value < spec.min || value > spec.max {
        return Err(format!(
            "value {} out of range {}-{} in {} field",
            value, spec.min, spec.max, spec.label
        ));
    }
    Ok(value)
}
