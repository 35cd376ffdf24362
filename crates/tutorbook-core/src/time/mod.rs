pub mod clock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub use clock::{canonical, parse_clock};

/// A calendar date with a start and end time-of-day, `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSpan")]
pub struct TimeSpan {
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
}

// Stored spans go back through `TimeSpan::new`.
#[derive(Deserialize)]
struct RawTimeSpan {
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
}

impl TryFrom<RawTimeSpan> for TimeSpan {
    type Error = DomainError;

    fn try_from(raw: RawTimeSpan) -> Result<Self, Self::Error> {
        Self::new(raw.date, raw.start_time, raw.end_time)
    }
}

impl TimeSpan {
    pub fn new(
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Self, DomainError> {
        if end_time <= start_time {
            return Err(DomainError::InvalidTimeSpan);
        }
        Ok(Self {
            date,
            start_time,
            end_time,
        })
    }

    /// Builds a span from clock strings in either 12-hour or 24-hour form.
    pub fn parse(date: NaiveDate, start: &str, end: &str) -> Result<Self, DomainError> {
        Self::new(date, parse_clock(start)?, parse_clock(end)?)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    /// Weekday of the span's date. Index it with `num_days_from_sunday`.
    pub fn weekday(&self) -> Weekday {
        chrono::Datelike::weekday(&self.date)
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.date.and_time(self.end_time)
    }

    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        overlaps(self, other)
    }
}

/// Same date and `a.start < b.end && b.start < a.end`. Touching edges do not overlap.
pub fn overlaps(a: &TimeSpan, b: &TimeSpan) -> bool {
    a.date == b.date && a.start_time < b.end_time && b.start_time < a.end_time
}
