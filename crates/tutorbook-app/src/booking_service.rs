use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use tutorbook_core::booking::{self, BookingVerdict, Rejection};
use tutorbook_core::events::{DomainEvent, SessionBooked, SessionCancelled, SessionCompleted};
use tutorbook_core::ids::{SessionId, StudentId, TutorId};
use tutorbook_core::session::{most_overdue, Scheduled, Session, SessionRequest};
use tutorbook_core::time::TimeSpan;
use tutorbook_ports::error::PortError;
use tutorbook_ports::outbound::{
    AvailabilityRepository, DiagnosticSink, EventPublisher, SessionRepository, TimeOffRepository,
};
use tutorbook_ports::types::{Diagnostic, SessionFilter};

use crate::error::AppError;

pub struct BookingService<A, T, S, EP, D>
where
    A: AvailabilityRepository,
    T: TimeOffRepository,
    S: SessionRepository,
    EP: EventPublisher,
    D: DiagnosticSink,
{
    availability: A,
    time_off: T,
    sessions: S,
    events: EP,
    diagnostics: D,
    timezone: Tz,
}

impl<A, T, S, EP, D> BookingService<A, T, S, EP, D>
where
    A: AvailabilityRepository,
    T: TimeOffRepository,
    S: SessionRepository,
    EP: EventPublisher,
    D: DiagnosticSink,
{
    /// `timezone` is the zone session dates and times are expressed in.
    pub fn new(
        availability: A,
        time_off: T,
        sessions: S,
        events: EP,
        diagnostics: D,
        timezone: Tz,
    ) -> Self {
        Self {
            availability,
            time_off,
            sessions,
            events,
            diagnostics,
            timezone,
        }
    }

    /// Decides whether the student may book the tutor for the given clock
    /// times. Never errors: every failure becomes a rejection.
    pub async fn validate(
        &self,
        student_id: &StudentId,
        tutor_id: &TutorId,
        date: NaiveDate,
        start: &str,
        end: &str,
    ) -> BookingVerdict {
        match TimeSpan::parse(date, start, end) {
            Ok(span) => {
                let request = SessionRequest {
                    student_id: student_id.clone(),
                    tutor_id: tutor_id.clone(),
                    span,
                    subject: String::new(),
                };
                self.decide(&request).await
            }
            Err(e) => BookingVerdict::rejected(Rejection::InvalidRequest(e.to_string())),
        }
    }

    /// Validates, persists and announces a new session.
    pub async fn book(
        &self,
        request: SessionRequest,
        now: DateTime<Utc>,
    ) -> Result<Session, AppError> {
        self.decide(&request).await.into_result()?;

        let session = self.sessions.create(request).await?;
        self.announce(
            "book",
            DomainEvent::SessionBooked(SessionBooked {
                session_id: session.id().clone(),
                student_id: session.student_id().clone(),
                tutor_id: session.tutor_id().clone(),
                span: *session.span(),
                subject: session.subject().to_string(),
                occurred_at: now,
            }),
        )
        .await;
        Ok(session)
    }

    // Availability is read and checked before any session is fetched.
    async fn decide(&self, request: &SessionRequest) -> BookingVerdict {
        let windows = match self.availability.find_for_tutor(&request.tutor_id).await {
            Ok(windows) => windows,
            Err(e) => return self.fail_closed("availability", e),
        };
        let time_off = match self.time_off.find_dates(&request.tutor_id).await {
            Ok(dates) => dates,
            Err(e) => return self.fail_closed("time_off", e),
        };
        if let Err(rejection) = booking::check_availability(&windows, &time_off, request.span()) {
            return BookingVerdict::rejected(rejection);
        }

        let filter = SessionFilter {
            student_id: Some(request.student_id.clone()),
            tutor_id: Some(request.tutor_id.clone()),
            exclude_completed: true,
        };
        let existing = match self.sessions.find(&filter).await {
            Ok(sessions) => sessions,
            Err(e) => return self.fail_closed("sessions", e),
        };
        booking::check_conflicts(&existing, request).into()
    }

    fn fail_closed(&self, source: &str, err: PortError) -> BookingVerdict {
        let message = format!("could not read {source}: {err}");
        self.diagnostics
            .report(Diagnostic::error("validate_booking", message.clone()));
        BookingVerdict::rejected(Rejection::DataUnavailable(message))
    }

    /// Publishes after a completed write. A publish failure is reported as a
    /// warning and never undoes or hides the write.
    async fn announce(&self, operation: &'static str, event: DomainEvent) {
        let event_type = event.event_type();
        if let Err(e) = self.events.publish(vec![event]).await {
            self.diagnostics.report(Diagnostic::warning(
                operation,
                format!("{event_type} event not published: {e}"),
            ));
        }
    }

    /// Sessions ordered by date then start time. An empty filter reads nothing.
    pub async fn sessions_for(&self, filter: &SessionFilter) -> Result<Vec<Session>, AppError> {
        if filter.is_empty() {
            return Ok(vec![]);
        }
        let mut sessions = self.sessions.find(filter).await?;
        sessions.sort_by_key(|s| (s.span().date(), s.span().start_time()));
        Ok(sessions)
    }

    pub async fn most_overdue_session(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Option<Session>, AppError> {
        let local_now = now.with_timezone(&self.timezone).naive_local();
        let open = self.sessions.find_open_until(local_now.date()).await?;
        Ok(most_overdue(&open, local_now).cloned())
    }

    pub async fn complete_session(
        &self,
        session_id: &SessionId,
        now: DateTime<Utc>,
    ) -> Result<Session, AppError> {
        let mut session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or(AppError::Port(PortError::NotFound))?;

        session.complete()?;
        self.sessions.save(&session).await?;
        self.announce(
            "complete_session",
            DomainEvent::SessionCompleted(SessionCompleted {
                session_id: session_id.clone(),
                occurred_at: now,
            }),
        )
        .await;
        Ok(session)
    }

    pub async fn delete_session(
        &self,
        session_id: &SessionId,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let session = self
            .sessions
            .find_by_id(session_id)
            .await?
            .ok_or(AppError::Port(PortError::NotFound))?;

        if !self.sessions.delete(session_id).await? {
            return Err(PortError::NotFound.into());
        }
        self.announce(
            "delete_session",
            DomainEvent::SessionCancelled(SessionCancelled {
                session_id: session_id.clone(),
                student_id: session.student_id().clone(),
                tutor_id: session.tutor_id().clone(),
                occurred_at: now,
            }),
        )
        .await;
        Ok(())
    }
}
