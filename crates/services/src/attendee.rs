use std::sync::{Arc, PoisonError, RwLock};

use event_core::model::Registration;
use storage::repository::{AttendeeSessionRepository, RegistrationRepository, StorageError};
use tracing::{info, warn};

use crate::error::AttendeeStateError;

/// The attendee signed in on this device, persisted across restarts.
pub struct AttendeeState {
    registrations: Arc<dyn RegistrationRepository>,
    sessions: Arc<dyn AttendeeSessionRepository>,
    current: RwLock<Option<Registration>>,
}

impl AttendeeState {
    #[must_use]
    pub fn new(
        registrations: Arc<dyn RegistrationRepository>,
        sessions: Arc<dyn AttendeeSessionRepository>,
    ) -> Self {
        Self {
            registrations,
            sessions,
            current: RwLock::new(None),
        }
    }

    /// Restore the remembered attendee.
    ///
    /// A remembered id whose registration no longer exists is cleared.
    ///
    /// # Errors
    ///
    /// Returns `AttendeeStateError::Storage` if repository access fails.
    pub async fn load(&self) -> Result<Option<Registration>, AttendeeStateError> {
        let Some(id) = self.sessions.load_signed_in().await? else {
            self.set(None);
            return Ok(None);
        };

        match self.registrations.get_registration(id).await {
            Ok(registration) => {
                info!(registration_id = %id, "restored signed-in attendee");
                self.set(Some(registration.clone()));
                Ok(Some(registration))
            }
            Err(StorageError::NotFound) => {
                warn!(registration_id = %id, "remembered attendee no longer exists; clearing");
                self.sessions.save_signed_in(None).await?;
                self.set(None);
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// # Errors
    ///
    /// Returns `AttendeeStateError::Storage` if the sign-in cannot be persisted.
    pub async fn sign_in(&self, registration: Registration) -> Result<(), AttendeeStateError> {
        self.sessions.save_signed_in(Some(registration.id)).await?;
        self.set(Some(registration));
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `AttendeeStateError::Storage` if the sign-out cannot be persisted.
    pub async fn sign_out(&self) -> Result<(), AttendeeStateError> {
        self.sessions.save_signed_in(None).await?;
        self.set(None);
        Ok(())
    }

    #[must_use]
    pub fn current(&self) -> Option<Registration> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, registration: Option<Registration>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = registration;
    }
}
