use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("end time must be after start time")]
    InvalidTimeSpan,
    #[error("invalid clock time: {0}")]
    InvalidClockTime(String),
    #[error("invalid weekday index: {0}")]
    InvalidWeekday(u8),
    #[error("availability window requires at least one day")]
    AvailabilityRequiresDay,
    #[error("time-off already booked for {0}")]
    TimeOffAlreadyBooked(chrono::NaiveDate),
    #[error("session is already completed")]
    SessionAlreadyCompleted,
    #[error("invalid id: {0}")]
    InvalidId(String),
}
