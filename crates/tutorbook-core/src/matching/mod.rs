pub mod scoring;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::TutorId;

pub use scoring::{by_rank, evaluate, match_tutors, rank, score};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub topics: BTreeSet<String>,
    pub grade_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorCandidate {
    pub tutor_id: TutorId,
    pub name: String,
    pub topics: BTreeSet<String>,
    pub grade_level: String,
}

/// A candidate that shares the student's grade level and at least one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredTutor {
    #[serde(flatten)]
    pub candidate: TutorCandidate,
    pub matching_score: usize,
    pub common_topics: BTreeSet<String>,
}

impl ScoredTutor {
    pub fn name(&self) -> &str {
        &self.candidate.name
    }

    pub fn tutor_id(&self) -> &TutorId {
        &self.candidate.tutor_id
    }
}
