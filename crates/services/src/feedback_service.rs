use std::sync::Arc;

use event_core::model::{FeedbackDraft, Rating, Registration, Schedule, SessionFeedback};
use storage::repository::FeedbackRepository;
use tracing::{debug, info, warn};

use crate::Clock;
use crate::error::FeedbackServiceError;
use crate::feedback_webhook::{FeedbackPayload, FeedbackWebhook};

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackReceipt {
    pub feedback: SessionFeedback,
    /// Whether the webhook accepted the entry. Storage is authoritative either way.
    pub forwarded: bool,
}

/// Stores session ratings and forwards them to the configured webhook.
#[derive(Clone)]
pub struct FeedbackService {
    clock: Clock,
    schedule: Arc<Schedule>,
    feedback: Arc<dyn FeedbackRepository>,
    webhook: FeedbackWebhook,
}

impl FeedbackService {
    #[must_use]
    pub fn new(
        clock: Clock,
        schedule: Arc<Schedule>,
        feedback: Arc<dyn FeedbackRepository>,
        webhook: FeedbackWebhook,
    ) -> Self {
        Self {
            clock,
            schedule,
            feedback,
            webhook,
        }
    }

    /// Rate a speaker session on behalf of `attendee`.
    ///
    /// # Errors
    ///
    /// Returns `FeedbackServiceError::UnknownSession` if the name is not on the agenda,
    /// `FeedbackServiceError::NotRateable` for breaks and meals,
    /// `FeedbackServiceError::Feedback` for an out-of-range rating, and
    /// `FeedbackServiceError::Storage` if persistence fails.
    pub async fn submit(
        &self,
        attendee: &Registration,
        session_name: &str,
        rating: u8,
        comment: &str,
    ) -> Result<FeedbackReceipt, FeedbackServiceError> {
        let session = self
            .schedule
            .find(session_name)
            .ok_or_else(|| FeedbackServiceError::UnknownSession(session_name.trim().to_owned()))?;
        if !session.has_speaker() {
            return Err(FeedbackServiceError::NotRateable(session.name().to_owned()));
        }

        let draft = FeedbackDraft::new(attendee.id, session.name(), Rating::new(rating)?, comment)?;
        let feedback = self
            .feedback
            .insert_feedback(&draft, self.clock.now())
            .await?;
        info!(
            registration_id = %attendee.id,
            session = %feedback.session_name,
            rating = feedback.rating.value(),
            "feedback stored"
        );

        let forwarded = self.forward(attendee, &feedback).await;
        Ok(FeedbackReceipt {
            feedback,
            forwarded,
        })
    }

    async fn forward(&self, attendee: &Registration, feedback: &SessionFeedback) -> bool {
        if !self.webhook.enabled() {
            debug!("feedback webhook disabled; skipping forward");
            return false;
        }
        match self
            .webhook
            .send(&FeedbackPayload::new(attendee, feedback))
            .await
        {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, feedback_id = %feedback.id, "feedback webhook failed");
                false
            }
        }
    }
}
