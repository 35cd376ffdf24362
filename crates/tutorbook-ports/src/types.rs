use serde::Serialize;

use tutorbook_core::ids::{StudentId, TutorId};
use tutorbook_core::session::Session;

/// Which sessions to read. Student and tutor combine with OR.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    pub student_id: Option<StudentId>,
    pub tutor_id: Option<TutorId>,
    pub exclude_completed: bool,
}

impl SessionFilter {
    pub fn for_student(student_id: StudentId) -> Self {
        Self {
            student_id: Some(student_id),
            ..Self::default()
        }
    }

    pub fn for_tutor(tutor_id: TutorId) -> Self {
        Self {
            tutor_id: Some(tutor_id),
            ..Self::default()
        }
    }

    pub fn open_only(mut self) -> Self {
        self.exclude_completed = true;
        self
    }

    /// No participant given: matches nothing.
    pub fn is_empty(&self) -> bool {
        self.student_id.is_none() && self.tutor_id.is_none()
    }

    pub fn matches(&self, session: &Session) -> bool {
        if self.exclude_completed && session.is_completed() {
            return false;
        }
        let by_student = self.student_id.as_ref() == Some(session.student_id());
        let by_tutor = self.tutor_id.as_ref() == Some(session.tutor_id());
        by_student || by_tutor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Warning,
    Error,
}

/// A report that an operation degraded instead of failing outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub operation: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            operation,
            message: message.into(),
        }
    }

    pub fn error(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            operation,
            message: message.into(),
        }
    }
}
