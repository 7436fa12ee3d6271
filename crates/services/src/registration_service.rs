use std::sync::Arc;

use event_core::model::{Registration, RegistrationDraft};
use event_core::time::format_event_start;
use storage::repository::{NewRegistrationRecord, RegistrationRepository, StorageError};
use tracing::info;

use crate::Clock;
use crate::error::RegistrationServiceError;

/// What happened when an attendee submitted the registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// A new registration was stored.
    Registered(Registration),
    /// The email was already registered; the stored record is returned.
    Login(Registration),
}

impl RegistrationOutcome {
    #[must_use]
    pub fn registration(&self) -> &Registration {
        match self {
            Self::Registered(reg) | Self::Login(reg) => reg,
        }
    }

    #[must_use]
    pub fn into_registration(self) -> Registration {
        match self {
            Self::Registered(reg) | Self::Login(reg) => reg,
        }
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        matches!(self, Self::Registered(_))
    }
}

/// Registers attendees and stamps their personal conference start.
#[derive(Clone)]
pub struct RegistrationService {
    clock: Clock,
    registrations: Arc<dyn RegistrationRepository>,
}

impl RegistrationService {
    #[must_use]
    pub fn new(clock: Clock, registrations: Arc<dyn RegistrationRepository>) -> Self {
        Self {
            clock,
            registrations,
        }
    }

    /// Validate the form, then log in an existing attendee or register a new one.
    ///
    /// A new attendee's conference starts at the moment of registration.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationServiceError::Invalid` with per-field messages.
    /// Returns `RegistrationServiceError::Storage` if persistence fails.
    pub async fn register_or_login(
        &self,
        draft: RegistrationDraft,
    ) -> Result<RegistrationOutcome, RegistrationServiceError> {
        let valid = draft.validate()?;

        if let Some(existing) = self.registrations.find_by_email(valid.email()).await? {
            info!(registration_id = %existing.id, "existing attendee logged in");
            return Ok(RegistrationOutcome::Login(existing));
        }

        let now = self.clock.now();
        let record = NewRegistrationRecord::from_valid(&valid, now, format_event_start(now));
        match self.registrations.insert_registration(record).await {
            Ok(registration) => {
                info!(
                    registration_id = %registration.id,
                    event_start = %registration.event_start_time,
                    "attendee registered"
                );
                Ok(RegistrationOutcome::Registered(registration))
            }
            // Another submission for the same email won the race.
            Err(StorageError::Conflict) => self
                .registrations
                .find_by_email(valid.email())
                .await?
                .map(RegistrationOutcome::Login)
                .ok_or(RegistrationServiceError::Storage(StorageError::Conflict)),
            Err(err) => Err(err.into()),
        }
    }

    /// # Errors
    ///
    /// Returns `RegistrationServiceError::Storage` if repository access fails.
    pub async fn count(&self) -> Result<u64, RegistrationServiceError> {
        Ok(self.registrations.count_registrations().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_core::model::RegistrationField;
    use event_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    fn service() -> RegistrationService {
        RegistrationService::new(fixed_clock(), Arc::new(InMemoryRepository::new()))
    }

    fn draft(email: &str) -> RegistrationDraft {
        RegistrationDraft {
            name: "Deepa".into(),
            email: email.into(),
            phone: "080 4123 4567".into(),
            ..RegistrationDraft::default()
        }
    }

    #[tokio::test]
    async fn new_attendee_starts_at_registration_time() {
        let outcome = service()
            .register_or_login(draft("deepa@example.com"))
            .await
            .unwrap();
        assert!(outcome.is_new());
        let reg = outcome.registration();
        assert_eq!(reg.event_start_time, "2023-11-15 03:43:20");
        assert_eq!(reg.event_start(), Some(fixed_clock().now()));
    }

    #[tokio::test]
    async fn known_email_logs_in_without_overwriting() {
        let service = service();
        let first = service
            .register_or_login(draft("deepa@example.com"))
            .await
            .unwrap()
            .into_registration();

        let mut again = draft("DEEPA@example.com");
        again.name = "Someone Else".into();
        let outcome = service.register_or_login(again).await.unwrap();
        assert_eq!(outcome, RegistrationOutcome::Login(first));
        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn invalid_form_is_reported_per_field() {
        let err = service()
            .register_or_login(draft("not-an-email"))
            .await
            .unwrap_err();
        let RegistrationServiceError::Invalid(fields) = err else {
            panic!("expected field errors, got {err:?}");
        };
        assert_eq!(fields.get(RegistrationField::Email), Some("Email is invalid"));
    }
}
