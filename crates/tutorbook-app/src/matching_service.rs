use tutorbook_core::ids::StudentId;
use tutorbook_core::matching::{match_tutors, ScoredTutor, StudentProfile, TutorCandidate};
use tutorbook_ports::outbound::{DiagnosticSink, StudentRepository, TutorRepository};
use tutorbook_ports::types::Diagnostic;

use crate::error::AppError;

const OPERATION: &str = "find_matching_tutors";

pub struct MatchingService<ST, TU, D>
where
    ST: StudentRepository,
    TU: TutorRepository,
    D: DiagnosticSink,
{
    students: ST,
    tutors: TU,
    diagnostics: D,
}

impl<ST, TU, D> MatchingService<ST, TU, D>
where
    ST: StudentRepository,
    TU: TutorRepository,
    D: DiagnosticSink,
{
    pub fn new(students: ST, tutors: TU, diagnostics: D) -> Self {
        Self {
            students,
            tutors,
            diagnostics,
        }
    }

    pub async fn register_student(
        &self,
        id: &StudentId,
        profile: &StudentProfile,
    ) -> Result<(), AppError> {
        Ok(self.students.save(id, profile).await?)
    }

    pub async fn register_tutor(&self, tutor: &TutorCandidate) -> Result<(), AppError> {
        Ok(self.tutors.save(tutor).await?)
    }

    /// Ranked tutors sharing the student's grade level and at least one topic.
    ///
    /// Lookup failures and "nothing matched" both yield an empty list; the
    /// difference is only visible through the diagnostic sink.
    pub async fn find_matching_tutors(&self, student_id: &StudentId) -> Vec<ScoredTutor> {
        let profile = match self.students.find_profile(student_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                self.diagnostics.report(Diagnostic::error(
                    OPERATION,
                    format!("student {student_id} not found"),
                ));
                return vec![];
            }
            Err(e) => {
                self.diagnostics.report(Diagnostic::error(
                    OPERATION,
                    format!("error fetching student topics: {e}"),
                ));
                return vec![];
            }
        };

        let candidates = match self.tutors.find_by_grade(&profile.grade_level).await {
            Ok(candidates) => candidates,
            Err(e) => {
                self.diagnostics.report(Diagnostic::error(
                    OPERATION,
                    format!("error fetching tutors: {e}"),
                ));
                return vec![];
            }
        };

        let ranked = match_tutors(&profile, candidates);
        if ranked.is_empty() {
            self.diagnostics.report(Diagnostic::warning(
                OPERATION,
                "no tutors found with matching topics and grade level",
            ));
        }
        ranked
    }
}
