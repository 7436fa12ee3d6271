use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::RegistrationId;
use crate::time::parse_event_start;

/// Branch regions an attendee can register under.
pub const BRANCH_REGIONS: [&str; 5] = [
    "North America",
    "South America",
    "Europe",
    "Asia-Pacific",
    "Middle East & Africa",
];

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,}$").expect("phone pattern compiles"));

//
// ─── ENUMS ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TShirtSize {
    S,
    #[default]
    M,
    L,
    XL,
    XXL,
}

impl TShirtSize {
    pub const ALL: [TShirtSize; 5] = [Self::S, Self::M, Self::L, Self::XL, Self::XXL];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TShirtSize::S => "S",
            TShirtSize::M => "M",
            TShirtSize::L => "L",
            TShirtSize::XL => "XL",
            TShirtSize::XXL => "XXL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DietaryPreference {
    Vegetarian,
    #[default]
    NonVegetarian,
    Vegan,
    GlutenFree,
}

impl DietaryPreference {
    pub const ALL: [DietaryPreference; 4] = [
        Self::Vegetarian,
        Self::NonVegetarian,
        Self::Vegan,
        Self::GlutenFree,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DietaryPreference::Vegetarian => "Vegetarian",
            DietaryPreference::NonVegetarian => "Non-Vegetarian",
            DietaryPreference::Vegan => "Vegan",
            DietaryPreference::GlutenFree => "Gluten-Free",
        }
    }
}

/// Returned when a stored or submitted enum label is not recognised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for TShirtSize {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "t-shirt size",
                value: s.to_owned(),
            })
    }
}

impl FromStr for DietaryPreference {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pref| pref.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "dietary preference",
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for TShirtSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for DietaryPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── VALIDATION ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegistrationField {
    Name,
    Email,
    Phone,
    BranchRegion,
}

impl RegistrationField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RegistrationField::Name => "name",
            RegistrationField::Email => "email",
            RegistrationField::Phone => "phone",
            RegistrationField::BranchRegion => "branch_region",
        }
    }
}

/// Per-field validation messages for a registration form.
#[derive(Debug, Error, Clone, Default, PartialEq, Eq)]
#[error("registration is invalid: {}", self.summary())]
pub struct FieldErrors(BTreeMap<RegistrationField, &'static str>);

impl FieldErrors {
    fn insert(&mut self, field: RegistrationField, message: &'static str) {
        self.0.insert(field, message);
    }

    #[must_use]
    pub fn get(&self, field: RegistrationField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegistrationField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn summary(&self) -> String {
        self.0
            .values()
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Raw registration form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub branch_region: String,
    pub tshirt_size: TShirtSize,
    pub dietary_preference: DietaryPreference,
}

impl Default for RegistrationDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            branch_region: BRANCH_REGIONS[0].to_owned(),
            tshirt_size: TShirtSize::M,
            dietary_preference: DietaryPreference::NonVegetarian,
        }
    }
}

impl RegistrationDraft {
    /// Validate every field, collecting all problems at once.
    ///
    /// # Errors
    ///
    /// Returns `FieldErrors` listing each invalid field.
    pub fn validate(self) -> Result<ValidRegistration, FieldErrors> {
        let mut errors = FieldErrors::default();
        let name = self.name.trim().to_owned();
        let email = self.email.trim().to_owned();
        let phone = self.phone.trim().to_owned();
        let branch_region = self.branch_region.trim().to_owned();

        if name.is_empty() {
            errors.insert(RegistrationField::Name, "Name is required");
        }
        if email.is_empty() {
            errors.insert(RegistrationField::Email, "Email is required");
        } else if !EMAIL_RE.is_match(&email) {
            errors.insert(RegistrationField::Email, "Email is invalid");
        }
        if phone.is_empty() {
            errors.insert(RegistrationField::Phone, "Phone number is required");
        } else if !PHONE_RE.is_match(&phone) {
            errors.insert(RegistrationField::Phone, "Phone number is invalid");
        }
        if !BRANCH_REGIONS.contains(&branch_region.as_str()) {
            errors.insert(RegistrationField::BranchRegion, "Branch / region is invalid");
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ValidRegistration {
            name,
            email,
            phone,
            branch_region,
            tshirt_size: self.tshirt_size,
            dietary_preference: self.dietary_preference,
        })
    }
}

/// Registration input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    name: String,
    email: String,
    phone: String,
    branch_region: String,
    tshirt_size: TShirtSize,
    dietary_preference: DietaryPreference,
}

impl ValidRegistration {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    #[must_use]
    pub fn branch_region(&self) -> &str {
        &self.branch_region
    }

    #[must_use]
    pub fn tshirt_size(&self) -> TShirtSize {
        self.tshirt_size
    }

    #[must_use]
    pub fn dietary_preference(&self) -> DietaryPreference {
        self.dietary_preference
    }
}

//
// ─── REGISTRATION ──────────────────────────────────────────────────────────────
//

/// A persisted attendee registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub branch_region: String,
    pub tshirt_size: TShirtSize,
    pub dietary_preference: DietaryPreference,
    pub registered_at: DateTime<Utc>,
    /// Personal conference start as stored (conference-local, no designator).
    pub event_start_time: String,
}

impl Registration {
    /// The attendee's reference instant, if the stored value parses.
    #[must_use]
    pub fn event_start(&self) -> Option<DateTime<Utc>> {
        parse_event_start(&self.event_start_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RegistrationDraft {
        RegistrationDraft {
            name: " Asha Rao ".into(),
            email: "asha@example.com".into(),
            phone: "+91 98765 43210".into(),
            ..RegistrationDraft::default()
        }
    }

    #[test]
    fn valid_draft_is_trimmed() {
        let valid = draft().validate().unwrap();
        assert_eq!(valid.name(), "Asha Rao");
        assert_eq!(valid.branch_region(), "North America");
        assert_eq!(valid.tshirt_size(), TShirtSize::M);
    }

    #[test]
    fn empty_draft_reports_required_fields() {
        let errors = RegistrationDraft::default().validate().unwrap_err();
        assert_eq!(errors.get(RegistrationField::Name), Some("Name is required"));
        assert_eq!(errors.get(RegistrationField::Email), Some("Email is required"));
        assert_eq!(
            errors.get(RegistrationField::Phone),
            Some("Phone number is required")
        );
        assert_eq!(errors.get(RegistrationField::BranchRegion), None);
    }

    #[test]
    fn malformed_email_and_phone_are_rejected() {
        let errors = RegistrationDraft {
            email: "asha@example".into(),
            phone: "12345".into(),
            ..draft()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.get(RegistrationField::Email), Some("Email is invalid"));
        assert_eq!(errors.get(RegistrationField::Phone), Some("Phone number is invalid"));
    }

    #[test]
    fn phone_accepts_separators() {
        let valid = RegistrationDraft {
            phone: "(080) 2345-6789".into(),
            ..draft()
        }
        .validate();
        assert!(valid.is_ok());
    }

    #[test]
    fn unknown_region_is_rejected() {
        let errors = RegistrationDraft {
            branch_region: "Antarctica".into(),
            ..draft()
        }
        .validate()
        .unwrap_err();
        assert!(errors.get(RegistrationField::BranchRegion).is_some());
    }

    #[test]
    fn enum_labels_parse_back() {
        for size in TShirtSize::ALL {
            assert_eq!(size.as_str().parse::<TShirtSize>(), Ok(size));
        }
        for pref in DietaryPreference::ALL {
            assert_eq!(pref.as_str().parse::<DietaryPreference>(), Ok(pref));
        }
        assert!("XXXL".parse::<TShirtSize>().is_err());
    }
}
