//! Date-part model: the transient, wrap-aware representation behind
//! the date/date-time editor, plus ISO-8601 parse/serialize helpers.

use crate::schema::DateFormat;
use chrono::{Datelike, Local, Timelike};
use regex::Regex;
use std::sync::OnceLock;

/// `[year, month, day]` for `date`, `[year, month, day, hour, minute]` for
/// `date-time`, plus the part currently under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParts {
    pub parts: Vec<i32>,
    pub cursor: usize,
    pub format: DateFormat,
}

fn date_time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{2})-(\d{2})(?:T(\d{2}):(\d{2}))?").expect("valid regex")
    })
}

impl DateParts {
    /// A fresh picker seeded from the host clock.
    pub fn today(format: DateFormat) -> Self {
        let now = Local::now();
        let mut parts = vec![now.year(), now.month() as i32, now.day() as i32];
        if format == DateFormat::DateTime {
            parts.push(now.hour() as i32);
            parts.push(now.minute() as i32);
        }
        Self {
            parts,
            cursor: 0,
            format,
        }
    }

    /// Parse an ISO-8601 `date` or `date-time` string into parts.
    /// A `date-time` string with no time component defaults to `00:00`.
    pub fn parse(s: &str, format: DateFormat) -> Option<Self> {
        let caps = date_time_re().captures(s)?;
        let year: i32 = caps.get(1)?.as_str().parse().ok()?;
        let month: i32 = caps.get(2)?.as_str().parse().ok()?;
        let day: i32 = caps.get(3)?.as_str().parse().ok()?;
        let mut parts = vec![year, month, day];
        if format == DateFormat::DateTime {
            let hour: i32 = caps.get(4).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
            let minute: i32 = caps.get(5).map_or(Ok(0), |m| m.as_str().parse()).ok()?;
            parts.push(hour);
            parts.push(minute);
        }
        Some(Self {
            parts,
            cursor: 0,
            format,
        })
    }

    /// Serialize back to the canonical ISO form. `date-time` always
    /// carries `:00Z` seconds to force UTC, matching the draft invariant.
    pub fn to_string_iso(&self) -> String {
        match self.format {
            DateFormat::Date => format!(
                "{:04}-{:02}-{:02}",
                self.parts[0], self.parts[1], self.parts[2]
            ),
            DateFormat::DateTime => format!(
                "{:04}-{:02}-{:02}T{:02}:{:02}:00Z",
                self.parts[0], self.parts[1], self.parts[2], self.parts[3], self.parts[4]
            ),
        }
    }

    /// Number of editable parts (3 for `date`, 5 for `date-time`).
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn move_cursor(&mut self, delta: i32) {
        let len = self.len() as i32;
        self.cursor = ((self.cursor as i32 + delta).rem_euclid(len)) as usize;
    }

    /// Adjust the value under the cursor by `delta`, wrapping per-field
    /// and clamping the day to the (possibly new) month's length.
    pub fn adjust(&mut self, delta: i32) {
        match self.cursor {
            0 => {
                self.parts[0] = (self.parts[0] + delta).clamp(1900, 2100);
            }
            1 => {
                let wrapped = (self.parts[1] - 1 + delta).rem_euclid(12);
                self.parts[1] = wrapped + 1;
            }
            2 => {
                let max = days_in_month(self.parts[0], self.parts[1]);
                let wrapped = (self.parts[2] - 1 + delta).rem_euclid(max);
                self.parts[2] = wrapped + 1;
            }
            3 if self.parts.len() > 3 => {
                self.parts[3] = (self.parts[3] + delta).rem_euclid(24);
            }
            4 if self.parts.len() > 4 => {
                self.parts[4] = (self.parts[4] + delta).rem_euclid(60);
            }
            _ => {}
        }
        let max_day = days_in_month(self.parts[0], self.parts[1]);
        if self.parts[2] > max_day {
            self.parts[2] = max_day;
        }
    }
}

/// Days in `month` (1-12) of `year`, Gregorian leap-year rules.
pub fn days_in_month(year: i32, month: i32) -> i32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 30,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
