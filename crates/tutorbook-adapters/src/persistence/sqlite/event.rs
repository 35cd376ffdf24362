use async_trait::async_trait;

use tutorbook_core::events::DomainEvent;
use tutorbook_ports::error::PortError;
use tutorbook_ports::outbound::EventPublisher;

use super::{persistence, SqliteDb};

#[async_trait]
impl EventPublisher for SqliteDb {
    async fn publish(&self, events: Vec<DomainEvent>) -> Result<(), PortError> {
        for event in &events {
            let data = serde_json::to_string(event).map_err(persistence)?;

            sqlx::query("INSERT INTO events (event_type, data, occurred_at) VALUES (?, ?, ?)")
                .bind(event.event_type())
                .bind(&data)
                .bind(event.occurred_at().to_rfc3339())
                .execute(&self.pool)
                .await
                .map_err(persistence)?;
        }
        Ok(())
    }
}
