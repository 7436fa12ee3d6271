use event_core::model::{Registration, RegistrationId};

use super::SqliteRepository;
use super::mapping::{conn, id_i64, map_registration_row, registration_id_from_i64};
use crate::repository::{
    NewRegistrationRecord, RegistrationRepository, StorageError, normalize_email,
};

const SELECT_REGISTRATION: &str = r"
    SELECT id, name, email, phone, branch_region, tshirt_size, dietary_preference,
           registered_at, event_start_time
    FROM registrations
";

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait::async_trait]
impl RegistrationRepository for SqliteRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Registration>, StorageError> {
        let row = sqlx::query(&format!("{SELECT_REGISTRATION} WHERE email_key = ?1"))
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.as_ref().map(map_registration_row).transpose()
    }

    async fn get_registration(&self, id: RegistrationId) -> Result<Registration, StorageError> {
        let row = sqlx::query(&format!("{SELECT_REGISTRATION} WHERE id = ?1"))
            .bind(id_i64("registration_id", id.value())?)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?
            .ok_or(StorageError::NotFound)?;

        map_registration_row(&row)
    }

    async fn insert_registration(
        &self,
        record: NewRegistrationRecord,
    ) -> Result<Registration, StorageError> {
        let email_key = normalize_email(&record.email);
        let res = sqlx::query(
            r"
            INSERT INTO registrations (
                name, email, email_key, phone, branch_region, tshirt_size,
                dietary_preference, registered_at, event_start_time
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ",
        )
        .bind(&record.name)
        .bind(&record.email)
        .bind(email_key)
        .bind(&record.phone)
        .bind(&record.branch_region)
        .bind(record.tshirt_size.as_str())
        .bind(record.dietary_preference.as_str())
        .bind(record.registered_at)
        .bind(&record.event_start_time)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StorageError::Conflict
            } else {
                conn(e)
            }
        })?;

        let id = registration_id_from_i64(res.last_insert_rowid())?;
        Ok(Registration {
            id,
            name: record.name,
            email: record.email,
            phone: record.phone,
            branch_region: record.branch_region,
            tshirt_size: record.tshirt_size,
            dietary_preference: record.dietary_preference,
            registered_at: record.registered_at,
            event_start_time: record.event_start_time,
        })
    }

    async fn count_registrations(&self) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM registrations")
            .fetch_one(&self.pool)
            .await
            .map_err(conn)?;
        u64::try_from(count).map_err(|_| StorageError::Serialization("negative count".into()))
    }
}
