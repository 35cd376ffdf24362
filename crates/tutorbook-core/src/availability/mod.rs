pub mod days;
pub mod time_off;

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::time::TimeSpan;

pub use days::DaySet;
pub use time_off::{can_take_time_off, TimeOff};

/// A weekly-repeating open window. Boundaries are inclusive for containment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct RecurringAvailability {
    days_of_week: DaySet,
    start_time: NaiveTime,
    end_time: NaiveTime,
}

#[derive(Deserialize)]
struct RawWindow {
    days_of_week: DaySet,
    start_time: NaiveTime,
    end_time: NaiveTime,
}

impl TryFrom<RawWindow> for RecurringAvailability {
    type Error = DomainError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        Self::new(raw.days_of_week, raw.start_time, raw.end_time)
    }
}

impl RecurringAvailability {
    pub fn new(
        days_of_week: DaySet,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Self, DomainError> {
        if days_of_week.is_empty() {
            return Err(DomainError::AvailabilityRequiresDay);
        }
        if end_time <= start_time {
            return Err(DomainError::InvalidTimeSpan);
        }
        Ok(Self {
            days_of_week,
            start_time,
            end_time,
        })
    }

    pub fn days_of_week(&self) -> DaySet {
        self.days_of_week
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn applies_on(&self, day: Weekday) -> bool {
        self.days_of_week.contains(day)
    }

    /// Whole-span containment, ignoring the weekday.
    pub fn contains(&self, span: &TimeSpan) -> bool {
        self.start_time <= span.start_time() && span.end_time() <= self.end_time
    }

    pub fn covers(&self, span: &TimeSpan) -> bool {
        self.applies_on(span.weekday()) && self.contains(span)
    }
}

/// The single active window of a tutor, or the "nothing configured" sentinel
/// (empty day set, no times).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub days_of_week: DaySet,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl DayAvailability {
    pub fn none() -> Self {
        Self::default()
    }

    /// Last record wins when storage returns more than one.
    pub fn from_windows(windows: &[RecurringAvailability]) -> Self {
        windows.last().map(Self::from).unwrap_or_default()
    }

    pub fn is_configured(&self) -> bool {
        !self.days_of_week.is_empty()
    }
}

impl From<&RecurringAvailability> for DayAvailability {
    fn from(window: &RecurringAvailability) -> Self {
        Self {
            days_of_week: window.days_of_week,
            start_time: Some(window.start_time),
            end_time: Some(window.end_time),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Availability {
    Available,
    NoWindowForDay,
    OutsideWindow,
    OnTimeOff,
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Decides whether `span` is bookable. Time-off overrides any recurring window.
pub fn evaluate(
    windows: &[RecurringAvailability],
    time_off: &BTreeSet<NaiveDate>,
    span: &TimeSpan,
) -> Availability {
    if time_off.contains(&span.date()) {
        return Availability::OnTimeOff;
    }

    let weekday = span.weekday();
    let mut for_day = windows.iter().filter(|w| w.applies_on(weekday)).peekable();
    if for_day.peek().is_none() {
        return Availability::NoWindowForDay;
    }

    if for_day.any(|w| w.contains(span)) {
        Availability::Available
    } else {
        Availability::OutsideWindow
    }
}

pub fn is_available(
    windows: &[RecurringAvailability],
    time_off: &BTreeSet<NaiveDate>,
    span: &TimeSpan,
) -> bool {
    evaluate(windows, time_off, span).is_available()
}
