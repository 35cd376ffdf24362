use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::{ScoredTutor, StudentProfile, TutorCandidate};

fn common_topics(student: &StudentProfile, candidate: &TutorCandidate) -> BTreeSet<String> {
    student
        .topics
        .intersection(&candidate.topics)
        .cloned()
        .collect()
}

/// Number of shared topics, or `None` when the grade levels differ.
pub fn score(student: &StudentProfile, candidate: &TutorCandidate) -> Option<usize> {
    (candidate.grade_level == student.grade_level)
        .then(|| student.topics.intersection(&candidate.topics).count())
}

/// Scores a candidate, dropping grade mismatches and zero-overlap tutors alike.
pub fn evaluate(student: &StudentProfile, candidate: TutorCandidate) -> Option<ScoredTutor> {
    if candidate.grade_level != student.grade_level {
        return None;
    }
    let common_topics = common_topics(student, &candidate);
    if common_topics.is_empty() {
        return None;
    }
    Some(ScoredTutor {
        matching_score: common_topics.len(),
        common_topics,
        candidate,
    })
}

/// Score descending, then name ascending (byte-wise, case-sensitive).
pub fn by_rank(a: &ScoredTutor, b: &ScoredTutor) -> Ordering {
    b.matching_score
        .cmp(&a.matching_score)
        .then_with(|| a.name().cmp(b.name()))
}

/// Stable sort, so tutors with equal score and name keep their input order.
pub fn rank(mut tutors: Vec<ScoredTutor>) -> Vec<ScoredTutor> {
    tutors.sort_by(by_rank);
    tutors
}

pub fn match_tutors(
    student: &StudentProfile,
    candidates: impl IntoIterator<Item = TutorCandidate>,
) -> Vec<ScoredTutor> {
    let scored = candidates
        .into_iter()
        .filter_map(|candidate| evaluate(student, candidate))
        .collect();
    rank(scored)
}
