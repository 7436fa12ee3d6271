mod feedback;
mod ids;
mod registration;
mod session;

pub use ids::{FeedbackId, RegistrationId};

pub use feedback::{FeedbackDraft, FeedbackError, Rating, SessionFeedback};
pub use registration::{
    BRANCH_REGIONS, DietaryPreference, FieldErrors, Registration, RegistrationDraft,
    RegistrationField, TShirtSize, UnknownVariant, ValidRegistration,
};
pub use session::{Schedule, Session, SessionError};
