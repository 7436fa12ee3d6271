use async_trait::async_trait;
use chrono::{DateTime, Utc};
use event_core::model::{
    DietaryPreference, FeedbackDraft, FeedbackId, Registration, RegistrationId, SessionFeedback,
    TShirtSize, ValidRegistration,
};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Insert shape for a registration; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewRegistrationRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub branch_region: String,
    pub tshirt_size: TShirtSize,
    pub dietary_preference: DietaryPreference,
    pub registered_at: DateTime<Utc>,
    pub event_start_time: String,
}

impl NewRegistrationRecord {
    #[must_use]
    pub fn from_valid(
        valid: &ValidRegistration,
        registered_at: DateTime<Utc>,
        event_start_time: String,
    ) -> Self {
        Self {
            name: valid.name().to_owned(),
            email: valid.email().to_owned(),
            phone: valid.phone().to_owned(),
            branch_region: valid.branch_region().to_owned(),
            tshirt_size: valid.tshirt_size(),
            dietary_preference: valid.dietary_preference(),
            registered_at,
            event_start_time,
        }
    }

    fn into_registration(self, id: RegistrationId) -> Registration {
        Registration {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            branch_region: self.branch_region,
            tshirt_size: self.tshirt_size,
            dietary_preference: self.dietary_preference,
            registered_at: self.registered_at,
            event_start_time: self.event_start_time,
        }
    }
}

/// Emails are unique per attendee regardless of case.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Repository contract for attendee registrations.
#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Look up an attendee by email (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn find_by_email(&self, email: &str) -> Result<Option<Registration>, StorageError>;

    /// Fetch a registration by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn get_registration(&self, id: RegistrationId) -> Result<Registration, StorageError>;

    /// Insert a new registration and return it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the email is already registered.
    async fn insert_registration(
        &self,
        record: NewRegistrationRecord,
    ) -> Result<Registration, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn count_registrations(&self) -> Result<u64, StorageError>;
}

/// Repository contract for session feedback.
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Persist a feedback entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the registration does not exist.
    async fn insert_feedback(
        &self,
        draft: &FeedbackDraft,
        submitted_at: DateTime<Utc>,
    ) -> Result<SessionFeedback, StorageError>;

    /// All feedback, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_feedback(&self) -> Result<Vec<SessionFeedback>, StorageError>;
}

/// Remembers which attendee is signed in on this device.
#[async_trait]
pub trait AttendeeSessionRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn load_signed_in(&self) -> Result<Option<RegistrationId>, StorageError>;

    /// Persist the signed-in attendee, or clear it with `None`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn save_signed_in(&self, id: Option<RegistrationId>) -> Result<(), StorageError>;
}

#[derive(Default)]
struct InMemoryState {
    registrations: Vec<Registration>,
    feedback: Vec<SessionFeedback>,
    signed_in: Option<RegistrationId>,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, InMemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Registration>, StorageError> {
        let wanted = normalize_email(email);
        let guard = self.lock()?;
        Ok(guard
            .registrations
            .iter()
            .find(|r| normalize_email(&r.email) == wanted)
            .cloned())
    }

    async fn get_registration(&self, id: RegistrationId) -> Result<Registration, StorageError> {
        let guard = self.lock()?;
        guard
            .registrations
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn insert_registration(
        &self,
        record: NewRegistrationRecord,
    ) -> Result<Registration, StorageError> {
        let mut guard = self.lock()?;
        let wanted = normalize_email(&record.email);
        if guard
            .registrations
            .iter()
            .any(|r| normalize_email(&r.email) == wanted)
        {
            return Err(StorageError::Conflict);
        }
        let next_id = guard
            .registrations
            .iter()
            .map(|r| r.id.value())
            .max()
            .unwrap_or(0)
            + 1;
        let registration = record.into_registration(RegistrationId::new(next_id));
        guard.registrations.push(registration.clone());
        Ok(registration)
    }

    async fn count_registrations(&self) -> Result<u64, StorageError> {
        let guard = self.lock()?;
        Ok(guard.registrations.len() as u64)
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryRepository {
    async fn insert_feedback(
        &self,
        draft: &FeedbackDraft,
        submitted_at: DateTime<Utc>,
    ) -> Result<SessionFeedback, StorageError> {
        let mut guard = self.lock()?;
        if !guard
            .registrations
            .iter()
            .any(|r| r.id == draft.registration_id())
        {
            return Err(StorageError::NotFound);
        }
        let id = FeedbackId::new(guard.feedback.len() as u64 + 1);
        let feedback = draft.clone().into_feedback(id, submitted_at);
        guard.feedback.push(feedback.clone());
        Ok(feedback)
    }

    async fn list_feedback(&self) -> Result<Vec<SessionFeedback>, StorageError> {
        let guard = self.lock()?;
        let mut out = guard.feedback.clone();
        out.sort_by_key(|f| (f.submitted_at, f.id));
        Ok(out)
    }
}

#[async_trait]
impl AttendeeSessionRepository for InMemoryRepository {
    async fn load_signed_in(&self) -> Result<Option<RegistrationId>, StorageError> {
        Ok(self.lock()?.signed_in)
    }

    async fn save_signed_in(&self, id: Option<RegistrationId>) -> Result<(), StorageError> {
        self.lock()?.signed_in = id;
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub registrations: Arc<dyn RegistrationRepository>,
    pub feedback: Arc<dyn FeedbackRepository>,
    pub attendee_session: Arc<dyn AttendeeSessionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self::from_repository(repo)
    }

    pub(crate) fn from_repository<R>(repo: R) -> Self
    where
        R: RegistrationRepository
            + FeedbackRepository
            + AttendeeSessionRepository
            + Clone
            + 'static,
    {
        let registrations: Arc<dyn RegistrationRepository> = Arc::new(repo.clone());
        let feedback: Arc<dyn FeedbackRepository> = Arc::new(repo.clone());
        let attendee_session: Arc<dyn AttendeeSessionRepository> = Arc::new(repo);
        Self {
            registrations,
            feedback,
            attendee_session,
        }
    }
}
