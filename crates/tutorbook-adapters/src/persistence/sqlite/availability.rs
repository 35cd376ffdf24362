use async_trait::async_trait;

use tutorbook_core::availability::RecurringAvailability;
use tutorbook_core::ids::TutorId;
use tutorbook_ports::error::PortError;
use tutorbook_ports::outbound::AvailabilityRepository;

use super::{persistence, SqliteDb};

#[async_trait]
impl AvailabilityRepository for SqliteDb {
    async fn find_for_tutor(
        &self,
        tutor_id: &TutorId,
    ) -> Result<Vec<RecurringAvailability>, PortError> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT data FROM availability WHERE tutor_id = ?")
            .bind(tutor_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(persistence)?;

        rows.into_iter()
            .map(|(data,)| serde_json::from_str(&data).map_err(persistence))
            .collect()
    }

    async fn replace(
        &self,
        tutor_id: &TutorId,
        window: &RecurringAvailability,
    ) -> Result<(), PortError> {
        let data = serde_json::to_string(window).map_err(persistence)?;

        sqlx::query(
            "INSERT INTO availability (tutor_id, data) VALUES (?, ?)
             ON CONFLICT(tutor_id) DO UPDATE SET data = excluded.data",
        )
        .bind(tutor_id.to_string())
        .bind(&data)
        .execute(&self.pool)
        .await
        .map_err(persistence)?;

        Ok(())
    }
}
