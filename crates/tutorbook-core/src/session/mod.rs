pub mod conflict;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::{SessionId, StudentId, TutorId};
use crate::time::TimeSpan;

pub use conflict::{find_conflict, has_conflict, most_overdue};

/// Anything occupying a time span on the calendar.
pub trait Scheduled {
    fn span(&self) -> &TimeSpan;
}

impl Scheduled for TimeSpan {
    fn span(&self) -> &TimeSpan {
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    Completed,
}

/// A session that has been asked for but not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub student_id: StudentId,
    pub tutor_id: TutorId,
    #[serde(flatten)]
    pub span: TimeSpan,
    pub subject: String,
}

impl Scheduled for SessionRequest {
    fn span(&self) -> &TimeSpan {
        &self.span
    }
}

/// A booked session. Identity comes from the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    student_id: StudentId,
    tutor_id: TutorId,
    #[serde(flatten)]
    span: TimeSpan,
    subject: String,
    status: SessionStatus,
}

impl Session {
    pub fn booked(id: SessionId, request: SessionRequest) -> Self {
        Self {
            id,
            student_id: request.student_id,
            tutor_id: request.tutor_id,
            span: request.span,
            subject: request.subject,
            status: SessionStatus::Scheduled,
        }
    }

    pub fn complete(&mut self) -> Result<(), DomainError> {
        if self.status == SessionStatus::Completed {
            return Err(DomainError::SessionAlreadyCompleted);
        }
        self.status = SessionStatus::Completed;
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    pub fn has_ended_by(&self, now: NaiveDateTime) -> bool {
        self.span.ends_at() < now
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn student_id(&self) -> &StudentId {
        &self.student_id
    }

    pub fn tutor_id(&self) -> &TutorId {
        &self.tutor_id
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }
}

impl Scheduled for Session {
    fn span(&self) -> &TimeSpan {
        &self.span
    }
}
