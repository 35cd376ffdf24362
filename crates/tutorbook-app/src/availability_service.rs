use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use tutorbook_core::availability::{
    self, can_take_time_off, Availability, DayAvailability, DaySet, RecurringAvailability, TimeOff,
};
use tutorbook_core::error::DomainError;
use tutorbook_core::events::{AvailabilityUpdated, DomainEvent, TimeOffChanged};
use tutorbook_core::ids::TutorId;
use tutorbook_core::time::TimeSpan;
use tutorbook_ports::error::PortError;
use tutorbook_ports::outbound::{
    AvailabilityRepository, DiagnosticSink, EventPublisher, TimeOffRepository,
};
use tutorbook_ports::types::Diagnostic;

use crate::error::AppError;

pub struct AvailabilityService<A, T, EP, D>
where
    A: AvailabilityRepository,
    T: TimeOffRepository,
    EP: EventPublisher,
    D: DiagnosticSink,
{
    availability: A,
    time_off: T,
    events: EP,
    diagnostics: D,
}

impl<A, T, EP, D> AvailabilityService<A, T, EP, D>
where
    A: AvailabilityRepository,
    T: TimeOffRepository,
    EP: EventPublisher,
    D: DiagnosticSink,
{
    pub fn new(availability: A, time_off: T, events: EP, diagnostics: D) -> Self {
        Self {
            availability,
            time_off,
            events,
            diagnostics,
        }
    }

    /// Recurring windows are read before time-off.
    pub async fn evaluate(
        &self,
        tutor_id: &TutorId,
        span: &TimeSpan,
    ) -> Result<Availability, AppError> {
        let windows = self.availability.find_for_tutor(tutor_id).await?;
        let time_off = self.time_off.find_dates(tutor_id).await?;
        Ok(availability::evaluate(&windows, &time_off, span))
    }

    /// Fail-closed: a read failure reports a diagnostic and answers `false`.
    pub async fn is_available(&self, tutor_id: &TutorId, span: &TimeSpan) -> bool {
        match self.evaluate(tutor_id, span).await {
            Ok(result) => result.is_available(),
            Err(e) => {
                self.diagnostics.report(Diagnostic::error(
                    "is_available",
                    format!("tutor availability not found: {e}"),
                ));
                false
            }
        }
    }

    pub async fn fetch_day_availability(
        &self,
        tutor_id: &TutorId,
    ) -> Result<DayAvailability, AppError> {
        let windows = self.availability.find_for_tutor(tutor_id).await?;
        Ok(DayAvailability::from_windows(&windows))
    }

    pub async fn update_availability(
        &self,
        tutor_id: &TutorId,
        days: DaySet,
        start_time: NaiveTime,
        end_time: NaiveTime,
        now: DateTime<Utc>,
    ) -> Result<RecurringAvailability, AppError> {
        let window = RecurringAvailability::new(days, start_time, end_time)?;
        self.availability.replace(tutor_id, &window).await?;
        self.announce(
            "update_availability",
            DomainEvent::AvailabilityUpdated(AvailabilityUpdated {
                tutor_id: tutor_id.clone(),
                availability: DayAvailability::from(&window),
                occurred_at: now,
            }),
        )
        .await;
        Ok(window)
    }

    pub async fn fetch_time_off(&self, tutor_id: &TutorId) -> Result<BTreeSet<NaiveDate>, AppError> {
        Ok(self.time_off.find_dates(tutor_id).await?)
    }

    /// True iff no time-off is recorded yet for this tutor and date.
    pub async fn validate_time_off(&self, tutor_id: &TutorId, date: NaiveDate) -> bool {
        match self.time_off.exists(tutor_id, date).await {
            Ok(exists) => !exists,
            Err(e) => {
                self.diagnostics.report(Diagnostic::error(
                    "validate_time_off",
                    format!("error validating time-off: {e}"),
                ));
                false
            }
        }
    }

    pub async fn add_time_off(
        &self,
        tutor_id: &TutorId,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let booked = self.time_off.find_dates(tutor_id).await?;
        if !can_take_time_off(&booked, date) {
            return Err(DomainError::TimeOffAlreadyBooked(date).into());
        }

        self.time_off
            .insert(&TimeOff::new(tutor_id.clone(), date))
            .await?;
        self.announce(
            "add_time_off",
            DomainEvent::TimeOffAdded(TimeOffChanged {
                tutor_id: tutor_id.clone(),
                date,
                occurred_at: now,
            }),
        )
        .await;
        Ok(())
    }

    pub async fn remove_time_off(
        &self,
        tutor_id: &TutorId,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if !self.time_off.remove(tutor_id, date).await? {
            return Err(PortError::NotFound.into());
        }
        self.announce(
            "remove_time_off",
            DomainEvent::TimeOffRemoved(TimeOffChanged {
                tutor_id: tutor_id.clone(),
                date,
                occurred_at: now,
            }),
        )
        .await;
        Ok(())
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use tutorbook_core::time::parse_clock;

    type Service = AvailabilityService<
        MockAvailabilityRepo,
        MockTimeOffRepo,
        MockEventPublisher,
        RecordingDiagnostics,
    >;

    fn make_service() -> Service {
        AvailabilityService::new(
            MockAvailabilityRepo::default(),
            MockTimeOffRepo::default(),
            MockEventPublisher::default(),
            RecordingDiagnostics::default(),
        )
    }

    fn now() -> DateTime<Utc> {
        chrono::DateTime::parse_from_rfc3339("2024-12-01T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn t(s: &str) -> NaiveTime {
        parse_clock(s).unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn monday(start: &str, end: &str) -> TimeSpan {
        TimeSpan::parse(day("2024-12-09"), start, end).unwrap()
    }

    async fn with_weekday_hours(svc: &Service, start: &str, end: &str) -> TutorId {
        let tutor = TutorId::new();
        svc.update_availability(&tutor, DaySet::weekdays(), t(start), t(end), now())
            .await
            .unwrap();
        tutor
    }

    #[tokio::test]
    async fn available_inside_window() {
        let svc = make_service();
        let tutor = with_weekday_hours(&svc, "09:00", "17:00").await;
        assert!(svc.is_available(&tutor, &monday("10:00 AM", "11:00 AM")).await);
    }

    #[tokio::test]
    async fn unavailable_without_any_window() {
        let svc = make_service();
        assert!(!svc.is_available(&TutorId::new(), &monday("10:00", "11:00")).await);
        assert!(svc.diagnostics.messages().is_empty());
    }

    #[tokio::test]
    async fn time_off_blocks_an_open_window() {
        let svc = make_service();
        let tutor = with_weekday_hours(&svc, "09:00", "17:00").await;
        svc.add_time_off(&tutor, day("2024-12-09"), now()).await.unwrap();

        assert_eq!(
            svc.evaluate(&tutor, &monday("10:00", "11:00")).await.unwrap(),
            Availability::OnTimeOff
        );
    }

    #[tokio::test]
    async fn read_failure_fails_closed_and_reports() {
        let svc = make_service();
        let tutor = with_weekday_hours(&svc, "09:00", "17:00").await;
        svc.availability.outage.start();

        assert!(!svc.is_available(&tutor, &monday("10:00", "11:00")).await);
        let reports = svc.diagnostics.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].operation, "is_available");
        assert!(reports[0].message.contains("database unreachable"));
    }

    #[tokio::test]
    async fn writes_stand_when_publishing_fails() {
        let svc = make_service();
        svc.events.outage.start();
        let tutor = with_weekday_hours(&svc, "09:00", "17:00").await;
        svc.add_time_off(&tutor, day("2024-12-09"), now()).await.unwrap();
        assert_eq!(
            svc.fetch_time_off(&tutor).await.unwrap(),
            BTreeSet::from([day("2024-12-09")])
        );
        svc.remove_time_off(&tutor, day("2024-12-09"), now())
            .await
            .unwrap();

        assert!(svc.fetch_time_off(&tutor).await.unwrap().is_empty());
        assert!(svc.fetch_day_availability(&tutor).await.unwrap().is_configured());
        let operations: Vec<&str> = svc
            .diagnostics
            .reports
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.operation)
            .collect();
        assert_eq!(
            operations,
            ["update_availability", "add_time_off", "remove_time_off"]
        );
        assert!(svc.events.types().is_empty());
    }

    #[tokio::test]
    async fn time_off_failure_also_fails_closed() {
        let svc = make_service();
        let tutor = with_weekday_hours(&svc, "09:00", "17:00").await;
        svc.time_off.outage.start();
        assert!(!svc.is_available(&tutor, &monday("10:00", "11:00")).await);
    }

    #[tokio::test]
    async fn day_availability_sentinel_when_unconfigured() {
        let svc = make_service();
        let result = svc.fetch_day_availability(&TutorId::new()).await.unwrap();
        assert_eq!(result, DayAvailability::none());
    }

    #[tokio::test]
    async fn update_replaces_previous_window() {
        let svc = make_service();
        let tutor = with_weekday_hours(&svc, "09:00", "17:00").await;
        svc.update_availability(
            &tutor,
            DaySet::from_indices(&[1, 2, 3]).unwrap(),
            t("12:00"),
            t("13:00"),
            now(),
        )
        .await
        .unwrap();

        let active = svc.fetch_day_availability(&tutor).await.unwrap();
        assert_eq!(active.days_of_week.indices(), vec![1, 2, 3]);
        assert_eq!(active.start_time, Some(t("12:00")));
        assert!(!svc.is_available(&tutor, &monday("10:00", "11:00")).await);
        assert_eq!(
            svc.events.types(),
            ["availability.updated", "availability.updated"]
        );
    }

    #[tokio::test]
    async fn update_rejects_inverted_window() {
        let svc = make_service();
        let result = svc
            .update_availability(&TutorId::new(), DaySet::weekdays(), t("17:00"), t("09:00"), now())
            .await;
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::InvalidTimeSpan))
        ));
        assert!(svc.events.types().is_empty());
    }

    #[tokio::test]
    async fn validate_time_off_reports_existing_entry() {
        let svc = make_service();
        let tutor = TutorId::new();
        assert!(svc.validate_time_off(&tutor, day("2024-12-09")).await);

        svc.add_time_off(&tutor, day("2024-12-09"), now()).await.unwrap();
        assert!(!svc.validate_time_off(&tutor, day("2024-12-09")).await);
    }

    #[tokio::test]
    async fn validate_time_off_fails_closed() {
        let svc = make_service();
        svc.time_off.outage.start();
        assert!(!svc.validate_time_off(&TutorId::new(), day("2024-12-09")).await);
        assert_eq!(svc.diagnostics.reports.lock().unwrap()[0].operation, "validate_time_off");
    }

    #[tokio::test]
    async fn duplicate_time_off_is_rejected() {
        let svc = make_service();
        let tutor = TutorId::new();
        svc.add_time_off(&tutor, day("2024-12-09"), now()).await.unwrap();
        let result = svc.add_time_off(&tutor, day("2024-12-09"), now()).await;
        assert!(matches!(
            result,
            Err(AppError::Domain(DomainError::TimeOffAlreadyBooked(_)))
        ));
        assert_eq!(svc.time_off.entries.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn fetch_time_off_lists_dates_in_order() {
        let svc = make_service();
        let tutor = TutorId::new();
        svc.add_time_off(&tutor, day("2024-12-10"), now()).await.unwrap();
        svc.add_time_off(&tutor, day("2024-12-09"), now()).await.unwrap();
        svc.add_time_off(&TutorId::new(), day("2024-12-11"), now()).await.unwrap();

        let dates: Vec<_> = svc.fetch_time_off(&tutor).await.unwrap().into_iter().collect();
        assert_eq!(dates, vec![day("2024-12-09"), day("2024-12-10")]);
    }

    #[tokio::test]
    async fn remove_time_off_publishes_event() {
        let svc = make_service();
        let tutor = TutorId::new();
        svc.add_time_off(&tutor, day("2024-12-09"), now()).await.unwrap();
        svc.remove_time_off(&tutor, day("2024-12-09"), now()).await.unwrap();

        assert!(svc.fetch_time_off(&tutor).await.unwrap().is_empty());
        assert_eq!(svc.events.types(), ["time_off.added", "time_off.removed"]);
    }

    #[tokio::test]
    async fn removing_missing_time_off_is_not_found() {
        let svc = make_service();
        let result = svc
            .remove_time_off(&TutorId::new(), day("2024-12-09"), now())
            .await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn removal_failure_propagates() {
        let svc = make_service();
        svc.time_off.outage.start();
        let result = svc
            .remove_time_off(&TutorId::new(), day("2024-12-09"), now())
            .await;
        assert!(matches!(
            result,
            Err(AppError::Port(PortError::Connection(_)))
        ));
    }
}
