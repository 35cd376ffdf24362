use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::availability::{self, Availability, RecurringAvailability};
use crate::session::{find_conflict, Scheduled, Session};
use crate::time::TimeSpan;

/// Why a well-formed or malformed booking request was turned down.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Tutor is not available during the requested time")]
    TutorUnavailable(Availability),
    #[error("Requested time conflicts with an existing session on {date} from {start_time} to {end_time}")]
    SessionConflict {
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    },
    #[error("Invalid booking request: {0}")]
    InvalidRequest(String),
    #[error("Unable to verify availability: {0}")]
    DataUnavailable(String),
}

impl Rejection {
    fn conflict_with(session: &Session) -> Self {
        let span = session.span();
        Self::SessionConflict {
            date: span.date(),
            start_time: span.start_time(),
            end_time: span.end_time(),
        }
    }
}

/// Accept/reject outcome. Serializes as `{"available": bool, "conflict"?: string}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingVerdict {
    rejection: Option<Rejection>,
}

impl BookingVerdict {
    pub fn approved() -> Self {
        Self { rejection: None }
    }

    pub fn rejected(rejection: Rejection) -> Self {
        Self {
            rejection: Some(rejection),
        }
    }

    pub fn is_available(&self) -> bool {
        self.rejection.is_none()
    }

    pub fn conflict(&self) -> Option<String> {
        self.rejection.as_ref().map(ToString::to_string)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        self.rejection.as_ref()
    }

    pub fn into_result(self) -> Result<(), Rejection> {
        match self.rejection {
            Some(rejection) => Err(rejection),
            None => Ok(()),
        }
    }
}

impl From<Result<(), Rejection>> for BookingVerdict {
    fn from(result: Result<(), Rejection>) -> Self {
        match result {
            Ok(()) => Self::approved(),
            Err(rejection) => Self::rejected(rejection),
        }
    }
}

impl Serialize for BookingVerdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.rejection.is_some() { 2 } else { 1 };
        let mut state = serializer.serialize_struct("BookingVerdict", fields)?;
        state.serialize_field("available", &self.is_available())?;
        if let Some(conflict) = self.conflict() {
            state.serialize_field("conflict", &conflict)?;
        }
        state.end()
    }
}

pub fn check_availability(
    windows: &[RecurringAvailability],
    time_off: &BTreeSet<NaiveDate>,
    span: &TimeSpan,
) -> Result<(), Rejection> {
    match availability::evaluate(windows, time_off, span) {
        Availability::Available => Ok(()),
        other => Err(Rejection::TutorUnavailable(other)),
    }
}

pub fn check_conflicts<C>(existing: &[Session], candidate: &C) -> Result<(), Rejection>
where
    C: Scheduled + ?Sized,
{
    match find_conflict(existing, candidate) {
        Some(session) => Err(Rejection::conflict_with(session)),
        None => Ok(()),
    }
}

/// Everything the validator reads, already fetched.
#[derive(Debug, Clone, Copy)]
pub struct BookingSnapshot<'a> {
    pub windows: &'a [RecurringAvailability],
    pub time_off: &'a BTreeSet<NaiveDate>,
    pub sessions: &'a [Session],
}

/// Availability first, then conflicts; the first rejection wins.
pub fn validate<C>(snapshot: BookingSnapshot<'_>, candidate: &C) -> BookingVerdict
where
    C: Scheduled + ?Sized,
{
    check_availability(snapshot.windows, snapshot.time_off, candidate.span())
        .and_then(|()| check_conflicts(snapshot.sessions, candidate))
        .into()
}
