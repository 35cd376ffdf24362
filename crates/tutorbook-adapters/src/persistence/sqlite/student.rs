use async_trait::async_trait;

use tutorbook_core::ids::StudentId;
use tutorbook_core::matching::StudentProfile;
use tutorbook_ports::error::PortError;
use tutorbook_ports::outbound::StudentRepository;

use super::{persistence, SqliteDb};

#[async_trait]
impl StudentRepository for SqliteDb {
    async fn save(&self, id: &StudentId, profile: &StudentProfile) -> Result<(), PortError> {
        let data = serde_json::to_string(profile).map_err(persistence)?;

        sqlx::query(
            "INSERT INTO students (id, data) VALUES (?, ?)
             ON CONFLICT(id) DO UPDATE SET data = excluded.data",
        )
        .bind(id.to_string())
        .bind(&data)
        .execute(&self.pool)
        .await
        .map_err(persistence)?;

        Ok(())
    }

    async fn find_profile(&self, id: &StudentId) -> Result<Option<StudentProfile>, PortError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT data FROM students WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(persistence)?;

        match row {
            Some((data,)) => Ok(Some(serde_json::from_str(&data).map_err(persistence)?)),
            None => Ok(None),
        }
    }
}
