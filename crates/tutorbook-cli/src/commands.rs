use std::collections::BTreeSet;

use anyhow::Result;
use chrono::Utc;
use chrono_tz::Tz;
use serde_json::{json, Value};

use tutorbook_adapters::{SqliteDb, TracingDiagnostics};
use tutorbook_app::{AvailabilityService, BookingService, MatchingService};
use tutorbook_core::availability::{DayAvailability, DaySet};
use tutorbook_core::ids::{StudentId, TutorId};
use tutorbook_core::matching::{StudentProfile, TutorCandidate};
use tutorbook_core::session::SessionRequest;
use tutorbook_core::time::{parse_clock, TimeSpan};
use tutorbook_ports::types::SessionFilter;

use crate::cli::{BookingArgs, Command, TimeOffArgs};

type Availability = AvailabilityService<SqliteDb, SqliteDb, SqliteDb, TracingDiagnostics>;
type Booking = BookingService<SqliteDb, SqliteDb, SqliteDb, SqliteDb, TracingDiagnostics>;
type Matching = MatchingService<SqliteDb, SqliteDb, TracingDiagnostics>;

/// The three services wired over one SQLite pool.
pub struct Services {
    availability: Availability,
    booking: Booking,
    matching: Matching,
}

impl Services {
    pub fn new(db: SqliteDb, timezone: Tz) -> Self {
        Self {
            availability: AvailabilityService::new(
                db.clone(),
                db.clone(),
                db.clone(),
                TracingDiagnostics,
            ),
            booking: BookingService::new(
                db.clone(),
                db.clone(),
                db.clone(),
                db.clone(),
                TracingDiagnostics,
                timezone,
            ),
            matching: MatchingService::new(db.clone(), db, TracingDiagnostics),
        }
    }
}

fn topic_set(topics: Vec<String>) -> BTreeSet<String> {
    topics
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

fn request(args: BookingArgs, subject: String) -> Result<SessionRequest> {
    Ok(SessionRequest {
        student_id: args.student,
        tutor_id: args.tutor,
        span: TimeSpan::parse(args.date, &args.start, &args.end)?,
        subject,
    })
}

/// Runs one command and returns the JSON document to print.
pub async fn run(command: Command, services: &Services) -> Result<Value> {
    let now = Utc::now();

    let output = match command {
        Command::CheckBooking(args) => {
            let verdict = services
                .booking
                .validate(&args.student, &args.tutor, args.date, &args.start, &args.end)
                .await;
            serde_json::to_value(&verdict)?
        }
        Command::Book { booking, subject } => {
            let session = services.booking.book(request(booking, subject)?, now).await?;
            tracing::info!(session_id = %session.id(), "session booked");
            serde_json::to_value(&session)?
        }
        Command::Sessions {
            student,
            tutor,
            open_only,
        } => {
            let filter = SessionFilter {
                student_id: student,
                tutor_id: tutor,
                exclude_completed: open_only,
            };
            serde_json::to_value(services.booking.sessions_for(&filter).await?)?
        }
        Command::CompleteSession { id } => {
            serde_json::to_value(services.booking.complete_session(&id, now).await?)?
        }
        Command::DeleteSession { id } => {
            services.booking.delete_session(&id, now).await?;
            json!({ "deleted": id })
        }
        Command::Overdue => {
            serde_json::to_value(services.booking.most_overdue_session(now).await?)?
        }
        Command::SetAvailability {
            tutor,
            days,
            start,
            end,
        } => {
            let days = DaySet::from_indices(&days)?;
            let (start, end) = (parse_clock(&start)?, parse_clock(&end)?);
            let window = services
                .availability
                .update_availability(&tutor, days, start, end, now)
                .await?;
            serde_json::to_value(DayAvailability::from(&window))?
        }
        Command::ShowAvailability { tutor } => {
            serde_json::to_value(services.availability.fetch_day_availability(&tutor).await?)?
        }
        Command::AddTimeOff(TimeOffArgs { tutor, date }) => {
            services.availability.add_time_off(&tutor, date, now).await?;
            json!({ "tutor_id": tutor, "date": date })
        }
        Command::RemoveTimeOff(TimeOffArgs { tutor, date }) => {
            services.availability.remove_time_off(&tutor, date, now).await?;
            json!({ "tutor_id": tutor, "removed": date })
        }
        Command::ListTimeOff { tutor } => {
            serde_json::to_value(services.availability.fetch_time_off(&tutor).await?)?
        }
        Command::RegisterStudent { id, topics, grade } => {
            let id = id.unwrap_or_else(StudentId::new);
            let profile = StudentProfile {
                topics: topic_set(topics),
                grade_level: grade,
            };
            services.matching.register_student(&id, &profile).await?;
            json!({ "student_id": id, "profile": profile })
        }
        Command::RegisterTutor {
            id,
            name,
            topics,
            grade,
        } => {
            let tutor = TutorCandidate {
                tutor_id: id.unwrap_or_else(TutorId::new),
                name,
                topics: topic_set(topics),
                grade_level: grade,
            };
            services.matching.register_tutor(&tutor).await?;
            serde_json::to_value(&tutor)?
        }
        Command::MatchTutors { student } => {
            serde_json::to_value(services.matching.find_matching_tutors(&student).await)?
        }
    };

    Ok(output)
}
