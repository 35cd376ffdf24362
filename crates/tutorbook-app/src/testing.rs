//! In-memory port doubles shared by the service tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use tutorbook_core::availability::{RecurringAvailability, TimeOff};
use tutorbook_core::events::DomainEvent;
use tutorbook_core::ids::{SessionId, StudentId, TutorId};
use tutorbook_core::matching::{StudentProfile, TutorCandidate};
use tutorbook_core::session::{Scheduled, Session, SessionRequest};
use tutorbook_ports::error::PortError;
use tutorbook_ports::outbound::{
    AvailabilityRepository, DiagnosticSink, EventPublisher, SessionRepository, StudentRepository,
    TimeOffRepository, TutorRepository,
};
use tutorbook_ports::types::{Diagnostic, SessionFilter};

fn outage() -> PortError {
    PortError::Connection("database unreachable".into())
}

/// Makes every call on the owning double fail once switched on.
#[derive(Default)]
pub struct Outage(AtomicBool);

impl Outage {
    pub fn start(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), PortError> {
        if self.0.load(Ordering::SeqCst) {
            Err(outage())
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
pub struct MockAvailabilityRepo {
    pub windows: Mutex<HashMap<TutorId, Vec<RecurringAvailability>>>,
    pub outage: Outage,
}

#[async_trait]
impl AvailabilityRepository for MockAvailabilityRepo {
    async fn find_for_tutor(
        &self,
        tutor_id: &TutorId,
    ) -> Result<Vec<RecurringAvailability>, PortError> {
        self.outage.check()?;
        let windows = self.windows.lock().unwrap();
        Ok(windows.get(tutor_id).cloned().unwrap_or_default())
    }

    async fn replace(
        &self,
        tutor_id: &TutorId,
        window: &RecurringAvailability,
    ) -> Result<(), PortError> {
        self.outage.check()?;
        self.windows
            .lock()
            .unwrap()
            .insert(tutor_id.clone(), vec![window.clone()]);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockTimeOffRepo {
    pub entries: Mutex<Vec<TimeOff>>,
    pub outage: Outage,
}

#[async_trait]
impl TimeOffRepository for MockTimeOffRepo {
    async fn find_dates(&self, tutor_id: &TutorId) -> Result<BTreeSet<NaiveDate>, PortError> {
        self.outage.check()?;
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .iter()
            .filter(|t| &t.tutor_id == tutor_id)
            .map(|t| t.date)
            .collect())
    }

    async fn exists(&self, tutor_id: &TutorId, date: NaiveDate) -> Result<bool, PortError> {
        self.outage.check()?;
        let entries = self.entries.lock().unwrap();
        Ok(entries
            .iter()
            .any(|t| &t.tutor_id == tutor_id && t.date == date))
    }

    async fn insert(&self, time_off: &TimeOff) -> Result<(), PortError> {
        self.outage.check()?;
        self.entries.lock().unwrap().push(time_off.clone());
        Ok(())
    }

    async fn remove(&self, tutor_id: &TutorId, date: NaiveDate) -> Result<bool, PortError> {
        self.outage.check()?;
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|t| !(&t.tutor_id == tutor_id && t.date == date));
        Ok(entries.len() != before)
    }
}

#[derive(Default)]
pub struct MockSessionRepo {
    pub sessions: Mutex<Vec<Session>>,
    pub queries: Mutex<Vec<SessionFilter>>,
    pub outage: Outage,
}

#[async_trait]
impl SessionRepository for MockSessionRepo {
    async fn create(&self, request: SessionRequest) -> Result<Session, PortError> {
        self.outage.check()?;
        let session = Session::booked(SessionId::new(), request);
        self.sessions.lock().unwrap().push(session.clone());
        Ok(session)
    }

    async fn save(&self, session: &Session) -> Result<(), PortError> {
        self.outage.check()?;
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.iter().position(|s| s.id() == session.id()) {
            Some(pos) => sessions[pos] = session.clone(),
            None => sessions.push(session.clone()),
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, PortError> {
        self.outage.check()?;
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions.iter().find(|s| s.id() == id).cloned())
    }

    async fn find(&self, filter: &SessionFilter) -> Result<Vec<Session>, PortError> {
        self.queries.lock().unwrap().push(filter.clone());
        self.outage.check()?;
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions.iter().filter(|s| filter.matches(s)).cloned().collect())
    }

    async fn find_open_until(&self, date: NaiveDate) -> Result<Vec<Session>, PortError> {
        self.outage.check()?;
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions
            .iter()
            .filter(|s| !s.is_completed() && s.span().date() <= date)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, PortError> {
        self.outage.check()?;
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| s.id() != id);
        Ok(sessions.len() != before)
    }
}

#[derive(Default)]
pub struct MockStudentRepo {
    pub profiles: Mutex<HashMap<StudentId, StudentProfile>>,
    pub outage: Outage,
}

#[async_trait]
impl StudentRepository for MockStudentRepo {
    async fn save(&self, id: &StudentId, profile: &StudentProfile) -> Result<(), PortError> {
        self.outage.check()?;
        self.profiles
            .lock()
            .unwrap()
            .insert(id.clone(), profile.clone());
        Ok(())
    }

    async fn find_profile(&self, id: &StudentId) -> Result<Option<StudentProfile>, PortError> {
        self.outage.check()?;
        Ok(self.profiles.lock().unwrap().get(id).cloned())
    }
}

#[derive(Default)]
pub struct MockTutorRepo {
    pub tutors: Mutex<Vec<TutorCandidate>>,
    pub outage: Outage,
}

#[async_trait]
impl TutorRepository for MockTutorRepo {
    async fn save(&self, tutor: &TutorCandidate) -> Result<(), PortError> {
        self.outage.check()?;
        self.tutors.lock().unwrap().push(tutor.clone());
        Ok(())
    }

    // Returns every tutor so the service-side grade rule is exercised.
    async fn find_by_grade(&self, _grade_level: &str) -> Result<Vec<TutorCandidate>, PortError> {
        self.outage.check()?;
        Ok(self.tutors.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub struct MockEventPublisher {
    pub events: Mutex<Vec<DomainEvent>>,
    pub outage: Outage,
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), PortError> {
        self.outage.check()?;
        self.events.lock().unwrap().extend(events);
        Ok(())
    }
}

impl MockEventPublisher {
    pub fn types(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type())
            .collect()
    }
}

#[derive(Default)]
pub struct RecordingDiagnostics {
    pub reports: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticSink for RecordingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        self.reports.lock().unwrap().push(diagnostic);
    }
}

impl RecordingDiagnostics {
    pub fn messages(&self) -> Vec<String> {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .map(|d| d.message.clone())
            .collect()
    }
}
