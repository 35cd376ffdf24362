use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use tutorbook_core::ids::{SessionId, StudentId, TutorId};

#[derive(Debug, Parser)]
#[command(name = "tutorbook", version, about = "Tutor availability, booking and matching")]
pub struct Cli {
    /// Settings file; replaces config/default.toml and config/local.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check whether a session could be booked, without booking it
    CheckBooking(BookingArgs),
    /// Book a session after validating it
    Book {
        #[command(flatten)]
        booking: BookingArgs,
        #[arg(long)]
        subject: String,
    },
    /// List sessions of a student or tutor
    Sessions {
        #[arg(long, value_parser = student_id)]
        student: Option<StudentId>,
        #[arg(long, value_parser = tutor_id)]
        tutor: Option<TutorId>,
        /// Hide completed sessions
        #[arg(long)]
        open_only: bool,
    },
    CompleteSession {
        #[arg(value_parser = session_id)]
        id: SessionId,
    },
    DeleteSession {
        #[arg(value_parser = session_id)]
        id: SessionId,
    },
    /// Show the open session that ended the longest time ago
    Overdue,
    /// Replace a tutor's weekly window
    SetAvailability {
        #[arg(long, value_parser = tutor_id)]
        tutor: TutorId,
        /// Weekday indices, 0 = Sunday
        #[arg(long, value_delimiter = ',', required = true)]
        days: Vec<u8>,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    ShowAvailability {
        #[arg(long, value_parser = tutor_id)]
        tutor: TutorId,
    },
    AddTimeOff(TimeOffArgs),
    RemoveTimeOff(TimeOffArgs),
    ListTimeOff {
        #[arg(long, value_parser = tutor_id)]
        tutor: TutorId,
    },
    RegisterStudent {
        /// Generated when omitted
        #[arg(long, value_parser = student_id)]
        id: Option<StudentId>,
        #[arg(long, value_delimiter = ',', required = true)]
        topics: Vec<String>,
        #[arg(long)]
        grade: String,
    },
    RegisterTutor {
        /// Generated when omitted
        #[arg(long, value_parser = tutor_id)]
        id: Option<TutorId>,
        #[arg(long)]
        name: String,
        #[arg(long, value_delimiter = ',', required = true)]
        topics: Vec<String>,
        #[arg(long)]
        grade: String,
    },
    /// Rank tutors for a student by shared topics
    MatchTutors {
        #[arg(long, value_parser = student_id)]
        student: StudentId,
    },
}

#[derive(Debug, Clone, Args)]
pub struct BookingArgs {
    #[arg(long, value_parser = student_id)]
    pub student: StudentId,
    #[arg(long, value_parser = tutor_id)]
    pub tutor: TutorId,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date: NaiveDate,
    /// Clock time such as "10:00 AM" or "14:30"
    #[arg(long)]
    pub start: String,
    #[arg(long)]
    pub end: String,
}

#[derive(Debug, Clone, Args)]
pub struct TimeOffArgs {
    #[arg(long, value_parser = tutor_id)]
    pub tutor: TutorId,
    #[arg(long)]
    pub date: NaiveDate,
}

fn student_id(s: &str) -> Result<StudentId, String> {
    StudentId::parse(s).map_err(|e| e.to_string())
}

fn tutor_id(s: &str) -> Result<TutorId, String> {
    TutorId::parse(s).map_err(|e| e.to_string())
}

fn session_id(s: &str) -> Result<SessionId, String> {
    SessionId::parse(s).map_err(|e| e.to_string())
}
