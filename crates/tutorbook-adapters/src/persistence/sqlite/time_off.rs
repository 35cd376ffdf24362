use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::NaiveDate;

use tutorbook_core::availability::TimeOff;
use tutorbook_core::ids::TutorId;
use tutorbook_ports::error::PortError;
use tutorbook_ports::outbound::TimeOffRepository;

use super::{persistence, SqliteDb};

#[async_trait]
impl TimeOffRepository for SqliteDb {
    async fn find_dates(&self, tutor_id: &TutorId) -> Result<BTreeSet<NaiveDate>, PortError> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT date FROM time_off WHERE tutor_id = ?")
            .bind(tutor_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(persistence)?;

        rows.into_iter()
            .map(|(date,)| date.parse::<NaiveDate>().map_err(persistence))
            .collect()
    }

    async fn exists(&self, tutor_id: &TutorId, date: NaiveDate) -> Result<bool, PortError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM time_off WHERE tutor_id = ? AND date = ?")
                .bind(tutor_id.to_string())
                .bind(date.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(persistence)?;
        Ok(count > 0)
    }

    async fn insert(&self, time_off: &TimeOff) -> Result<(), PortError> {
        sqlx::query("INSERT OR IGNORE INTO time_off (tutor_id, date) VALUES (?, ?)")
            .bind(time_off.tutor_id.to_string())
            .bind(time_off.date.to_string())
            .execute(&self.pool)
            .await
            .map_err(persistence)?;
        Ok(())
    }

    async fn remove(&self, tutor_id: &TutorId, date: NaiveDate) -> Result<bool, PortError> {
        let result = sqlx::query("DELETE FROM time_off WHERE tutor_id = ? AND date = ?")
            .bind(tutor_id.to_string())
            .bind(date.to_string())
            .execute(&self.pool)
            .await
            .map_err(persistence)?;

        tracing::debug!(%tutor_id, %date, removed = result.rows_affected(), "time-off removal");
        Ok(result.rows_affected() > 0)
    }
}
