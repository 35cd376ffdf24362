use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::TutorId;

/// A whole calendar date on which a tutor takes no bookings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeOff {
    pub tutor_id: TutorId,
    pub date: NaiveDate,
}

impl TimeOff {
    pub fn new(tutor_id: TutorId, date: NaiveDate) -> Self {
        Self { tutor_id, date }
    }
}

/// True when no time-off is already recorded for `date`.
pub fn can_take_time_off(booked: &BTreeSet<NaiveDate>, date: NaiveDate) -> bool {
    !booked.contains(&date)
}
