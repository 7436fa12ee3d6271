use std::sync::Arc;

use dioxus::prelude::*;
use event_core::model::{Registration, Schedule};
use services::{
    AnalyticsService, AppServices, AttendeeState, Clock, FeedbackService, RegistrationService,
};

pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;
    fn schedule(&self) -> Arc<Schedule>;

    fn registration(&self) -> Arc<RegistrationService>;
    fn attendee(&self) -> Arc<AttendeeState>;
    fn feedback(&self) -> Arc<FeedbackService>;
    fn analytics(&self) -> Arc<AnalyticsService>;
}

impl UiApp for AppServices {
    fn clock(&self) -> Clock {
        AppServices::clock(self)
    }

    fn schedule(&self) -> Arc<Schedule> {
        AppServices::schedule(self)
    }

    fn registration(&self) -> Arc<RegistrationService> {
        AppServices::registration(self)
    }

    fn attendee(&self) -> Arc<AttendeeState> {
        AppServices::attendee(self)
    }

    fn feedback(&self) -> Arc<FeedbackService> {
        AppServices::feedback(self)
    }

    fn analytics(&self) -> Arc<AnalyticsService> {
        AppServices::analytics(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    schedule: Arc<Schedule>,

    registration: Arc<RegistrationService>,
    attendee: Arc<AttendeeState>,
    feedback: Arc<FeedbackService>,
    analytics: Arc<AnalyticsService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            schedule: app.schedule(),
            registration: app.registration(),
            attendee: app.attendee(),
            feedback: app.feedback(),
            analytics: app.analytics(),
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
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// The signed-in attendee as reactive UI state, mirrored from `AttendeeState`.
#[derive(Clone, Copy)]
pub struct SignedIn(pub Signal<Option<Registration>>);

/// Provide `SignedIn` to the subtree, seeded from the restored attendee.
pub fn use_signed_in_provider(ctx: &AppContext) -> SignedIn {
    let attendee = ctx.attendee();
    use_context_provider(move || SignedIn(Signal::new(attendee.current())))
}
