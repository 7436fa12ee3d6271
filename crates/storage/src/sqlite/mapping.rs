use event_core::model::{
    DietaryPreference, FeedbackId, Rating, Registration, RegistrationId, SessionFeedback,
    TShirtSize,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn id_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn registration_id_from_i64(v: i64) -> Result<RegistrationId, StorageError> {
    Ok(RegistrationId::new(i64_to_u64("registration_id", v)?))
}

pub(crate) fn map_registration_row(row: &SqliteRow) -> Result<Registration, StorageError> {
    let tshirt: String = row.try_get("tshirt_size").map_err(ser)?;
    let dietary: String = row.try_get("dietary_preference").map_err(ser)?;

    Ok(Registration {
        id: registration_id_from_i64(row.try_get("id").map_err(ser)?)?,
        name: row.try_get("name").map_err(ser)?,
        email: row.try_get("email").map_err(ser)?,
        phone: row.try_get("phone").map_err(ser)?,
        branch_region: row.try_get("branch_region").map_err(ser)?,
        tshirt_size: tshirt.parse::<TShirtSize>().map_err(ser)?,
        dietary_preference: dietary.parse::<DietaryPreference>().map_err(ser)?,
        registered_at: row.try_get("registered_at").map_err(ser)?,
        event_start_time: row.try_get("event_start_time").map_err(ser)?,
    })
}

pub(crate) fn map_feedback_row(row: &SqliteRow) -> Result<SessionFeedback, StorageError> {
    let rating_i64: i64 = row.try_get("rating").map_err(ser)?;
    let rating = u8::try_from(rating_i64)
        .map_err(|_| StorageError::Serialization(format!("invalid rating: {rating_i64}")))
        .and_then(|v| Rating::new(v).map_err(ser))?;

    Ok(SessionFeedback {
        id: FeedbackId::new(i64_to_u64("feedback_id", row.try_get("id").map_err(ser)?)?),
        registration_id: registration_id_from_i64(row.try_get("registration_id").map_err(ser)?)?,
        session_name: row.try_get("session_name").map_err(ser)?,
        rating,
        comment: row.try_get("comment").map_err(ser)?,
        submitted_at: row.try_get("submitted_at").map_err(ser)?,
    })
}
