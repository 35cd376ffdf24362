mod availability;
mod event;
mod session;
mod student;
mod time_off;
mod tutor;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use tutorbook_ports::error::PortError;

const SCHEMA: [&str; 9] = [
    "CREATE TABLE IF NOT EXISTS availability (
        tutor_id TEXT PRIMARY KEY,
        data TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS time_off (
        tutor_id TEXT NOT NULL,
        date TEXT NOT NULL,
        PRIMARY KEY (tutor_id, date)
    )",
    "CREATE TABLE IF NOT EXISTS sessions (
        id TEXT PRIMARY KEY,
        student_id TEXT NOT NULL,
        tutor_id TEXT NOT NULL,
        session_date TEXT NOT NULL,
        start_time TEXT NOT NULL,
        status TEXT NOT NULL,
        data TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_sessions_student ON sessions(student_id, session_date)",
    "CREATE INDEX IF NOT EXISTS idx_sessions_tutor ON sessions(tutor_id, session_date)",
    "CREATE TABLE IF NOT EXISTS students (
        id TEXT PRIMARY KEY,
        data TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS tutors (
        id TEXT PRIMARY KEY,
        grade_level TEXT NOT NULL,
        data TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_tutors_grade ON tutors(grade_level)",
    "CREATE TABLE IF NOT EXISTS events (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        event_type TEXT NOT NULL,
        data TEXT NOT NULL,
        occurred_at TEXT NOT NULL
    )",
];

#[derive(Clone)]
pub struct SqliteDb {
    pool: SqlitePool,
}

impl SqliteDb {
    pub async fn new(url: &str) -> Result<Self, PortError> {
        Self::connect(url, 5).await
    }

    /// In-memory databases need `max_connections = 1`: every connection
    /// would otherwise see its own empty database.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, PortError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| PortError::Connection(e.to_string()))?;

        let db = Self { pool };
        db.init_schema().await?;
        tracing::debug!(url, max_connections, "sqlite schema ready");
        Ok(db)
    }

    async fn init_schema(&self) -> Result<(), PortError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(persistence)?;
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

pub(crate) fn persistence(e: impl std::fmt::Display) -> PortError {
    PortError::Persistence(e.to_string())
}

#[cfg(test)]
pub(crate) async fn memory_db() -> SqliteDb {
    SqliteDb::connect("sqlite::memory:", 1).await.unwrap()
}
