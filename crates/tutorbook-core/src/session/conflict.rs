use chrono::NaiveDateTime;

use super::{Scheduled, Session};
use crate::time::overlaps;

/// First existing session overlapping `candidate`.
///
/// No identity filtering happens here: the caller decides whether `existing`
/// holds the tutor's sessions, the student's, or both.
pub fn find_conflict<'a, C>(existing: &'a [Session], candidate: &C) -> Option<&'a Session>
where
    C: Scheduled + ?Sized,
{
    existing
        .iter()
        .find(|session| overlaps(session.span(), candidate.span()))
}

pub fn has_conflict<C>(existing: &[Session], candidate: &C) -> bool
where
    C: Scheduled + ?Sized,
{
    find_conflict(existing, candidate).is_some()
}

/// The open session whose end lies furthest in the past relative to `now`.
pub fn most_overdue(sessions: &[Session], now: NaiveDateTime) -> Option<&Session> {
    sessions
        .iter()
        .filter(|s| !s.is_completed() && s.has_ended_by(now))
        .min_by_key(|s| s.span().ends_at())
}
