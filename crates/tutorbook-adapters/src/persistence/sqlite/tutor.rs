use async_trait::async_trait;

use tutorbook_core::matching::TutorCandidate;
use tutorbook_ports::error::PortError;
use tutorbook_ports::outbound::TutorRepository;

use super::{persistence, SqliteDb};

#[async_trait]
impl TutorRepository for SqliteDb {
    async fn save(&self, tutor: &TutorCandidate) -> Result<(), PortError> {
        let data = serde_json::to_string(tutor).map_err(persistence)?;

        sqlx::query(
            "INSERT INTO tutors (id, grade_level, data) VALUES (?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET
                grade_level = excluded.grade_level,
                data = excluded.data",
        )
        .bind(tutor.tutor_id.to_string())
        .bind(&tutor.grade_level)
        .bind(&data)
        .execute(&self.pool)
        .await
        .map_err(persistence)?;

        Ok(())
    }

    async fn find_by_grade(&self, grade_level: &str) -> Result<Vec<TutorCandidate>, PortError> {
        let rows: Vec<(String,)> = sqlx::query_as("SELECT data FROM tutors WHERE grade_level = ?")
            .bind(grade_level)
            .fetch_all(&self.pool)
            .await
            .map_err(persistence)?;

        tracing::debug!(grade_level, candidates = rows.len(), "tutor candidates loaded");
        rows.into_iter()
            .map(|(data,)| serde_json::from_str(&data).map_err(persistence))
            .collect()
    }
}
