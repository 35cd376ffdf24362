use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::availability::DayAvailability;
use crate::ids::{SessionId, StudentId, TutorId};
use crate::time::TimeSpan;

/// Facts the orchestration layer publishes after a successful write.
/// Notification delivery subscribes to these; the decision core never does.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DomainEvent {
    SessionBooked(SessionBooked),
    SessionCancelled(SessionCancelled),
    SessionCompleted(SessionCompleted),
    AvailabilityUpdated(AvailabilityUpdated),
    TimeOffAdded(TimeOffChanged),
    TimeOffRemoved(TimeOffChanged),
}

impl DomainEvent {
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::SessionBooked(e) => e.occurred_at,
            Self::SessionCancelled(e) => e.occurred_at,
            Self::SessionCompleted(e) => e.occurred_at,
            Self::AvailabilityUpdated(e) => e.occurred_at,
            Self::TimeOffAdded(e) | Self::TimeOffRemoved(e) => e.occurred_at,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SessionBooked(_) => "session.booked",
            Self::SessionCancelled(_) => "session.cancelled",
            Self::SessionCompleted(_) => "session.completed",
            Self::AvailabilityUpdated(_) => "availability.updated",
            Self::TimeOffAdded(_) => "time_off.added",
            Self::TimeOffRemoved(_) => "time_off.removed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionBooked {
    pub session_id: SessionId,
    pub student_id: StudentId,
    pub tutor_id: TutorId,
    pub span: TimeSpan,
    pub subject: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionCancelled {
    pub session_id: SessionId,
    pub student_id: StudentId,
    pub tutor_id: TutorId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionCompleted {
    pub session_id: SessionId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailabilityUpdated {
    pub tutor_id: TutorId,
    pub availability: DayAvailability,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeOffChanged {
    pub tutor_id: TutorId,
    pub date: NaiveDate,
    pub occurred_at: DateTime<Utc>,
}
