#![forbid(unsafe_code)]

pub mod analytics_service;
pub mod app_services;
pub mod attendee;
pub mod config;
pub mod error;
pub mod feedback_service;
pub mod feedback_webhook;
pub mod registration_service;
pub mod timeline;

pub use event_core::Clock;

pub use analytics_service::{AnalyticsAccess, AnalyticsOverview, AnalyticsService, SessionStats};
pub use app_services::AppServices;
pub use attendee::AttendeeState;
pub use config::ServicesConfig;
pub use error::{
    AnalyticsError, AppServicesError, AttendeeStateError, FeedbackServiceError,
    RegistrationServiceError, WebhookError,
};
pub use feedback_service::{FeedbackReceipt, FeedbackService};
pub use feedback_webhook::{FeedbackPayload, FeedbackWebhook};
pub use registration_service::{RegistrationOutcome, RegistrationService};
pub use timeline::{TimelineTracker, TrackerHandle};
