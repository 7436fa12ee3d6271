use std::sync::Arc;

use event_core::model::Schedule;
use storage::repository::Storage;

use crate::Clock;
use crate::analytics_service::AnalyticsService;
use crate::attendee::AttendeeState;
use crate::config::ServicesConfig;
use crate::error::AppServicesError;
use crate::feedback_service::FeedbackService;
use crate::feedback_webhook::FeedbackWebhook;
use crate::registration_service::RegistrationService;
use crate::timeline::TimelineTracker;

/// Assembles app-facing services around one storage backend and the agenda.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    schedule: Arc<Schedule>,
    registration: Arc<RegistrationService>,
    attendee: Arc<AttendeeState>,
    feedback: Arc<FeedbackService>,
    analytics: Arc<AnalyticsService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and restore the signed-in attendee.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or attendee restore fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        config: ServicesConfig,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let services = Self::from_storage(&storage, clock, config);
        services.attendee.load().await?;
        Ok(services)
    }

    /// Build services over fresh in-memory storage.
    #[must_use]
    pub fn in_memory(clock: Clock, config: ServicesConfig) -> Self {
        Self::from_storage(&Storage::in_memory(), clock, config)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, config: ServicesConfig) -> Self {
        let schedule = Arc::new(Schedule::conference());
        let registration = Arc::new(RegistrationService::new(
            clock,
            Arc::clone(&storage.registrations),
        ));
        let attendee = Arc::new(AttendeeState::new(
            Arc::clone(&storage.registrations),
            Arc::clone(&storage.attendee_session),
        ));
        let feedback = Arc::new(FeedbackService::new(
            clock,
            Arc::clone(&schedule),
            Arc::clone(&storage.feedback),
            FeedbackWebhook::new(config.feedback_webhook_url),
        ));
        let analytics = Arc::new(AnalyticsService::new(
            Arc::clone(&schedule),
            Arc::clone(&storage.feedback),
            config.admin_password,
        ));

        Self {
            clock,
            schedule,
            registration,
            attendee,
            feedback,
            analytics,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn schedule(&self) -> Arc<Schedule> {
        Arc::clone(&self.schedule)
    }

    #[must_use]
    pub fn registration(&self) -> Arc<RegistrationService> {
        Arc::clone(&self.registration)
    }

    #[must_use]
    pub fn attendee(&self) -> Arc<AttendeeState> {
        Arc::clone(&self.attendee)
    }

    #[must_use]
    pub fn feedback(&self) -> Arc<FeedbackService> {
        Arc::clone(&self.feedback)
    }

    #[must_use]
    pub fn analytics(&self) -> Arc<AnalyticsService> {
        Arc::clone(&self.analytics)
    }

    /// Tracker for the signed-in attendee, if any.
    #[must_use]
    pub fn tracker(&self) -> Option<TimelineTracker> {
        self.attendee.current().map(|attendee| {
            TimelineTracker::for_attendee(self.clock, Arc::clone(&self.schedule), &attendee)
        })
    }
}
