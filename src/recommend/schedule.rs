// File: ./src/recommend/schedule.rs
//! Turns the advisor's raw date and time strings into one absolute
//! timestamp. Both strings are free-form enough to need a ranked list of
//! format attempts; the lists live here as plain constants so their order
//! can be inspected and tested rather than buried in control flow.
use chrono::{
    DateTime, Datelike, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Timelike, Utc,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Year the advisor's date formatter falls back to when the input carried no
/// year. A parsed date in this year is treated as year-less and rewritten to
/// the current year, which means a genuine date in this year cannot be
/// expressed through the pipeline.
pub const PLACEHOLDER_YEAR: i32 = 2024;

#[derive(Debug, Clone, Copy)]
pub struct DateFormat {
    pub fmt: &'static str,
    /// Year-less entries are parsed with [`PLACEHOLDER_YEAR`] pinned so the
    /// substitution rule sees them the same way as an explicit "2024".
    pub has_year: bool,
}

/// Ranked date formats, first successful parse wins. Full forms come before
/// year-less ones so a 4-digit year is never swallowed by a shorter format.
pub const DATE_FORMATS: &[DateFormat] = &[
    DateFormat { fmt: "%b %d, %Y", has_year: true },
    DateFormat { fmt: "%b %e, %Y", has_year: true },
    DateFormat { fmt: "%b %d %Y", has_year: true },
    DateFormat { fmt: "%b %e %Y", has_year: true },
    DateFormat { fmt: "%b %d", has_year: false },
    DateFormat { fmt: "%b %e", has_year: false },
];

/// 12-hour formats, tried when the string carries a literal "AM"/"PM".
pub const TIME_FORMATS_12H: &[&str] = &["%I:%M %p", "%I:%M%p", "%I%p"];
/// 24-hour formats. Seconds, when present, are parsed and then discarded.
pub const TIME_FORMATS_24H: &[&str] = &["%H:%M", "%k:%M", "%H:%M:%S"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("unrecognized date '{0}'")]
    DateParse(String),
    #[error("unrecognized time '{0}'")]
    TimeParse(String),
    #[error("no valid instant for {date} {time} in the configured zone")]
    Combine { date: NaiveDate, time: NaiveTime },
}

/// Zone in which the resolved hour/minute is applied onto the resolved
/// calendar day. Both the date and time parses themselves are zone-naive;
/// this single knob is the only place a zone enters the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// The machine's local zone. Matches what a user reading "2:30 PM" in
    /// the advice expects to see on their calendar.
    #[default]
    Local,
    Utc,
}

/// Resolves raw advice strings into absolute timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleResolver {
    pub zone: Zone,
}

impl ScheduleResolver {
    pub fn new(zone: Zone) -> Self {
        Self { zone }
    }

    /// Full resolution: date grammar, placeholder-year rule, time grammar,
    /// then combination in the configured zone.
    pub fn resolve(&self, raw_date: &str, raw_time: &str) -> Result<DateTime<Utc>, ScheduleError> {
        let date = self.resolve_date(raw_date)?;
        let time = resolve_time(raw_time)?;
        self.combine(date, time)
    }

    pub fn resolve_date(&self, raw: &str) -> Result<NaiveDate, ScheduleError> {
        let parsed = parse_date(raw).ok_or_else(|| ScheduleError::DateParse(raw.to_string()))?;
        correct_placeholder_year(parsed, self.current_year())
            .ok_or_else(|| ScheduleError::DateParse(raw.to_string()))
    }

    fn current_year(&self) -> i32 {
        match self.zone {
            Zone::Local => Local::now().year(),
            Zone::Utc => Utc::now().year(),
        }
    }

    fn combine(&self, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Utc>, ScheduleError> {
        let naive = date.and_time(time);
        let resolved = match self.zone {
            Zone::Utc => Some(naive.and_utc()),
            Zone::Local => match Local.from_local_datetime(&naive) {
                LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
                // DST fold: the earlier instant wins.
                LocalResult::Ambiguous(dt, _) => Some(dt.with_timezone(&Utc)),
                LocalResult::None => None,
            },
        };
        resolved.ok_or(ScheduleError::Combine { date, time })
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    for format in DATE_FORMATS {
        let attempt = if format.has_year {
            NaiveDate::parse_from_str(raw, format.fmt)
        } else {
            NaiveDate::parse_from_str(
                &format!("{raw} {PLACEHOLDER_YEAR}"),
                &format!("{} %Y", format.fmt),
            )
        };
        if let Ok(date) = attempt {
            return Some(date);
        }
    }
    None
}

/// Placeholder-year substitution: [`PLACEHOLDER_YEAR`] means "the input had
/// no year", so month/day are carried into `current_year`. Any other year is
/// explicit and kept. `None` when the rewritten month/day does not exist in
/// the target year (Feb 29 landing in a non-leap year).
pub fn correct_placeholder_year(date: NaiveDate, current_year: i32) -> Option<NaiveDate> {
    if date.year() == PLACEHOLDER_YEAR {
        date.with_year(current_year)
    } else {
        Some(date)
    }
}

/// Parses the advisor's time-of-day string. Whitespace runs are collapsed
/// first; the meridiem check is case-sensitive because the advisor emits
/// uppercase markers and a stray "am" inside a word must not flip the
/// grammar. Seconds never survive.
pub fn resolve_time(raw: &str) -> Result<NaiveTime, ScheduleError> {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let formats = if normalized.contains("AM") || normalized.contains("PM") {
        TIME_FORMATS_12H
    } else {
        TIME_FORMATS_24H
    };
    for fmt in formats {
        if let Ok(t) = NaiveTime::parse_from_str(&normalized, fmt) {
            return Ok(NaiveTime::from_hms_opt(t.hour(), t.minute(), 0).unwrap_or(t));
        }
    }
    Err(ScheduleError::TimeParse(raw.to_string()))
}
