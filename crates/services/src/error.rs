//! Shared error types for the services crate.

use thiserror::Error;

use event_core::model::{FeedbackError, FieldErrors};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `FeedbackWebhook`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WebhookError {
    #[error("feedback webhook is not configured")]
    Disabled,
    #[error("feedback webhook responded with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `RegistrationService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistrationServiceError {
    #[error(transparent)]
    Invalid(#[from] FieldErrors),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AttendeeState`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AttendeeStateError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `FeedbackService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FeedbackServiceError {
    #[error("unknown session: {0}")]
    UnknownSession(String),
    #[error("session cannot be rated: {0}")]
    NotRateable(String),
    #[error(transparent)]
    Feedback(#[from] FeedbackError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AnalyticsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalyticsError {
    #[error("invalid password")]
    InvalidPassword,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Attendee(#[from] AttendeeStateError),
}
