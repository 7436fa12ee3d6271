use chrono::SecondsFormat;
use reqwest::Client;
use serde::Serialize;

use event_core::model::{Registration, SessionFeedback};

use crate::error::WebhookError;

/// Conference label attached to every forwarded feedback entry.
pub const CONFERENCE_NAME: &str = "Shree Cauvery Refreshments Sales Conference 2025";

/// JSON body posted to the feedback webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackPayload {
    pub email: String,
    pub session_name: String,
    pub rating: u8,
    pub feedback: String,
    pub timestamp: String,
    pub user_name: String,
    pub user_phone: String,
    pub branch_region: String,
    pub conference: &'static str,
}

impl FeedbackPayload {
    #[must_use]
    pub fn new(attendee: &Registration, feedback: &SessionFeedback) -> Self {
        Self {
            email: attendee.email.clone(),
            session_name: feedback.session_name.clone(),
            rating: feedback.rating.value(),
            feedback: feedback.comment.clone(),
            timestamp: feedback
                .submitted_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            user_name: attendee.name.clone(),
            user_phone: attendee.phone.clone(),
            branch_region: attendee.branch_region.clone(),
            conference: CONFERENCE_NAME,
        }
    }
}

/// Forwards submitted feedback to an external collector.
#[derive(Clone)]
pub struct FeedbackWebhook {
    client: Client,
    url: Option<String>,
}

impl FeedbackWebhook {
    #[must_use]
    pub fn new(url: Option<String>) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self::new(None)
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.url.is_some()
    }

    /// Post one payload.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError` when no URL is configured, the request fails,
    /// or the collector answers with a non-success status.
    pub async fn send(&self, payload: &FeedbackPayload) -> Result<(), WebhookError> {
        let url = self.url.as_deref().ok_or(WebhookError::Disabled)?;

        let response = self.client.post(url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(WebhookError::HttpStatus(response.status()));
        }
        Ok(())
    }
}
