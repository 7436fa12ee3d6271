use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{FeedbackId, RegistrationId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FeedbackError {
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("session name cannot be empty")]
    EmptySessionName,
}

/// Star rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// # Errors
    ///
    /// Returns `FeedbackError::InvalidRating` outside `1..=5`.
    pub fn new(value: u8) -> Result<Self, FeedbackError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(FeedbackError::InvalidRating(value))
        }
    }

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = FeedbackError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Feedback as submitted, before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackDraft {
    registration_id: RegistrationId,
    session_name: String,
    rating: Rating,
    comment: String,
}

impl FeedbackDraft {
    /// # Errors
    ///
    /// Returns `FeedbackError::EmptySessionName` when the session name is blank.
    pub fn new(
        registration_id: RegistrationId,
        session_name: impl Into<String>,
        rating: Rating,
        comment: impl Into<String>,
    ) -> Result<Self, FeedbackError> {
        let session_name = session_name.into().trim().to_owned();
        if session_name.is_empty() {
            return Err(FeedbackError::EmptySessionName);
        }
        Ok(Self {
            registration_id,
            session_name,
            rating,
            comment: comment.into().trim().to_owned(),
        })
    }

    #[must_use]
    pub fn registration_id(&self) -> RegistrationId {
        self.registration_id
    }

    #[must_use]
    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    #[must_use]
    pub fn rating(&self) -> Rating {
        self.rating
    }

    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    #[must_use]
    pub fn into_feedback(self, id: FeedbackId, submitted_at: DateTime<Utc>) -> SessionFeedback {
        SessionFeedback {
            id,
            registration_id: self.registration_id,
            session_name: self.session_name,
            rating: self.rating,
            comment: self.comment,
            submitted_at,
        }
    }
}

/// A persisted feedback entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFeedback {
    pub id: FeedbackId,
    pub registration_id: RegistrationId,
    pub session_name: String,
    pub rating: Rating,
    pub comment: String,
    pub submitted_at: DateTime<Utc>,
}
