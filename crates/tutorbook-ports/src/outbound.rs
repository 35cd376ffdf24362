use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::NaiveDate;

use tutorbook_core::availability::{RecurringAvailability, TimeOff};
use tutorbook_core::events::DomainEvent;
use tutorbook_core::ids::{SessionId, StudentId, TutorId};
use tutorbook_core::matching::{StudentProfile, TutorCandidate};
use tutorbook_core::session::{Session, SessionRequest};

use crate::error::PortError;
use crate::types::{Diagnostic, SessionFilter};

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn find_for_tutor(
        &self,
        tutor_id: &TutorId,
    ) -> Result<Vec<RecurringAvailability>, PortError>;
    /// Replaces the tutor's active window.
    async fn replace(
        &self,
        tutor_id: &TutorId,
        window: &RecurringAvailability,
    ) -> Result<(), PortError>;
}

#[async_trait]
pub trait TimeOffRepository: Send + Sync {
    async fn find_dates(&self, tutor_id: &TutorId) -> Result<BTreeSet<NaiveDate>, PortError>;
    async fn exists(&self, tutor_id: &TutorId, date: NaiveDate) -> Result<bool, PortError>;
    async fn insert(&self, time_off: &TimeOff) -> Result<(), PortError>;
    /// Returns `false` when nothing matched.
    async fn remove(&self, tutor_id: &TutorId, date: NaiveDate) -> Result<bool, PortError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persists a new session and assigns its identity.
    async fn create(&self, request: SessionRequest) -> Result<Session, PortError>;
    async fn save(&self, session: &Session) -> Result<(), PortError>;
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, PortError>;
    async fn find(&self, filter: &SessionFilter) -> Result<Vec<Session>, PortError>;
    /// Sessions not yet completed, dated on or before `date`.
    async fn find_open_until(&self, date: NaiveDate) -> Result<Vec<Session>, PortError>;
    /// Returns `false` when nothing matched.
    async fn delete(&self, id: &SessionId) -> Result<bool, PortError>;
}

#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn save(&self, id: &StudentId, profile: &StudentProfile) -> Result<(), PortError>;
    async fn find_profile(&self, id: &StudentId) -> Result<Option<StudentProfile>, PortError>;
}

#[async_trait]
pub trait TutorRepository: Send + Sync {
    async fn save(&self, tutor: &TutorCandidate) -> Result<(), PortError>;
    /// Coarse pre-filter; callers still apply the grade rule themselves.
    async fn find_by_grade(&self, grade_level: &str) -> Result<Vec<TutorCandidate>, PortError>;
}

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), PortError>;
}

pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}
