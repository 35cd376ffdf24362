use async_trait::async_trait;
use chrono::NaiveDate;

use tutorbook_core::ids::SessionId;
use tutorbook_core::session::{Scheduled, Session, SessionRequest, SessionStatus};
use tutorbook_core::time::canonical;
use tutorbook_ports::error::PortError;
use tutorbook_ports::outbound::SessionRepository;
use tutorbook_ports::types::SessionFilter;

use super::{persistence, SqliteDb};

fn status_label(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Scheduled => "scheduled",
        SessionStatus::Completed => "completed",
    }
}

fn decode(rows: Vec<(String,)>) -> Result<Vec<Session>, PortError> {
    rows.into_iter()
        .map(|(data,)| serde_json::from_str(&data).map_err(persistence))
        .collect()
}

#[async_trait]
impl SessionRepository for SqliteDb {
    async fn create(&self, request: SessionRequest) -> Result<Session, PortError> {
        let session = Session::booked(SessionId::new(), request);
        self.save(&session).await?;
        tracing::debug!(session_id = %session.id(), "session stored");
        Ok(session)
    }

    async fn save(&self, session: &Session) -> Result<(), PortError> {
        let data = serde_json::to_string(session).map_err(persistence)?;
        let span = session.span();

        sqlx::query(
            "INSERT INTO sessions (id, student_id, tutor_id, session_date, start_time, status, data)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                session_date = excluded.session_date,
                start_time = excluded.start_time,
                status = excluded.status,
                data = excluded.data",
        )
        .bind(session.id().to_string())
        .bind(session.student_id().to_string())
        .bind(session.tutor_id().to_string())
        .bind(span.date().to_string())
        .bind(canonical(span.start_time()))
        .bind(status_label(session.status()))
        .bind(&data)
        .execute(&self.pool)
        .await
        .map_err(persistence)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, PortError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT data FROM sessions WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence)?;

        match row {
            Some((data,)) => Ok(Some(serde_json::from_str(&data).map_err(persistence)?)),
            None => Ok(None),
        }
    }

    async fn find(&self, filter: &SessionFilter) -> Result<Vec<Session>, PortError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT data FROM sessions
             WHERE (student_id = ? OR tutor_id = ?)
               AND (? = 0 OR status != 'completed')
             ORDER BY session_date, start_time",
        )
        .bind(filter.student_id.as_ref().map(ToString::to_string))
        .bind(filter.tutor_id.as_ref().map(ToString::to_string))
        .bind(filter.exclude_completed)
        .fetch_all(&self.pool)
        .await
        .map_err(persistence)?;

        decode(rows)
    }

    async fn find_open_until(&self, date: NaiveDate) -> Result<Vec<Session>, PortError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT data FROM sessions
             WHERE status != 'completed' AND session_date <= ?
             ORDER BY session_date, start_time",
        )
        .bind(date.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(persistence)?;

        decode(rows)
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, PortError> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(persistence)?;
        Ok(result.rows_affected() > 0)
    }
}
