use event_core::model::RegistrationId;

use super::SqliteRepository;
use super::mapping::{conn, id_i64, registration_id_from_i64};
use crate::repository::{AttendeeSessionRepository, StorageError};

#[async_trait::async_trait]
impl AttendeeSessionRepository for SqliteRepository {
    async fn load_signed_in(&self) -> Result<Option<RegistrationId>, StorageError> {
        let value: Option<Option<i64>> =
            sqlx::query_scalar("SELECT registration_id FROM signed_in WHERE slot = 1")
                .fetch_optional(&self.pool)
                .await
                .map_err(conn)?;

        value.flatten().map(registration_id_from_i64).transpose()
    }

    async fn save_signed_in(&self, id: Option<RegistrationId>) -> Result<(), StorageError> {
        let id = id
            .map(|id| id_i64("registration_id", id.value()))
            .transpose()?;

        sqlx::query(
            r"
            INSERT INTO signed_in (slot, registration_id)
            VALUES (1, ?1)
            ON CONFLICT(slot) DO UPDATE SET registration_id = excluded.registration_id
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }
}
