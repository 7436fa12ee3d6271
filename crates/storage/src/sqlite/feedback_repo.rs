use chrono::{DateTime, Utc};
use event_core::model::{FeedbackDraft, FeedbackId, SessionFeedback};

use super::SqliteRepository;
use super::mapping::{conn, id_i64, map_feedback_row};
use crate::repository::{FeedbackRepository, StorageError};

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}

#[async_trait::async_trait]
impl FeedbackRepository for SqliteRepository {
    async fn insert_feedback(
        &self,
        draft: &FeedbackDraft,
        submitted_at: DateTime<Utc>,
    ) -> Result<SessionFeedback, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO session_feedback (registration_id, session_name, rating, comment, submitted_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(id_i64("registration_id", draft.registration_id().value())?)
        .bind(draft.session_name())
        .bind(i64::from(draft.rating().value()))
        .bind(draft.comment())
        .bind(submitted_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                StorageError::NotFound
            } else {
                conn(e)
            }
        })?;

        let id = u64::try_from(res.last_insert_rowid())
            .map_err(|_| StorageError::Serialization("feedback_id sign overflow".into()))?;
        Ok(draft.clone().into_feedback(FeedbackId::new(id), submitted_at))
    }

    async fn list_feedback(&self) -> Result<Vec<SessionFeedback>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, registration_id, session_name, rating, comment, submitted_at
            FROM session_feedback
            ORDER BY submitted_at ASC, id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_feedback_row(&row)?);
        }
        Ok(out)
    }
}
