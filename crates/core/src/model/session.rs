use chrono::Duration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session name cannot be empty")]
    EmptyName,

    #[error("session duration must be at least one minute")]
    ZeroDuration,
}

/// One entry of the conference agenda.
///
/// Speakerless entries (breaks, meals) still occupy their slot in the
/// timeline but are never highlighted as the upcoming session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionFields")]
pub struct Session {
    name: String,
    speaker: String,
    description: String,
    duration_minutes: u32,
}

/// Wire shape of [`Session`]; deserialization goes through [`Session::new`].
#[derive(Deserialize)]
struct SessionFields {
    name: String,
    #[serde(default)]
    speaker: String,
    #[serde(default)]
    description: String,
    duration_minutes: u32,
}

impl TryFrom<SessionFields> for Session {
    type Error = SessionError;

    fn try_from(fields: SessionFields) -> Result<Self, Self::Error> {
        Session::new(
            fields.name,
            fields.speaker,
            fields.description,
            fields.duration_minutes,
        )
    }
}

impl Session {
    /// Create a validated session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyName` for a blank name and
    /// `SessionError::ZeroDuration` when `duration_minutes` is zero.
    pub fn new(
        name: impl Into<String>,
        speaker: impl Into<String>,
        description: impl Into<String>,
        duration_minutes: u32,
    ) -> Result<Self, SessionError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if duration_minutes == 0 {
            return Err(SessionError::ZeroDuration);
        }
        Ok(Self {
            name,
            speaker: speaker.into().trim().to_owned(),
            description: description.into(),
            duration_minutes,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::minutes(i64::from(self.duration_minutes))
    }

    #[must_use]
    pub fn has_speaker(&self) -> bool {
        !self.speaker.is_empty()
    }
}

/// Ordered conference agenda. Offsets are derived from the order of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    sessions: Vec<Session>,
}

impl Schedule {
    #[must_use]
    pub fn new(sessions: Vec<Session>) -> Self {
        Self { sessions }
    }

    /// The built-in agenda of the sales conference.
    #[must_use]
    pub fn conference() -> Self {
        const AGENDA: [(&str, &str, &str, u32); 7] = [
            (
                "Keynote: Winning the Market in 2025",
                "Rajesh Krishnamurthy",
                "Transform your sales approach with cutting-edge strategies for the Indian market.",
                5,
            ),
            (
                "Workshop: Digital Tools for Smarter Selling",
                "Priya Raghavan",
                "Master CRM systems and AI-powered sales tools.",
                1,
            ),
            ("Tea Break", "", "Networking and refreshments.", 1),
            (
                "Panel: Customer-Centric Sales Strategies",
                "Arjun Mehta, Sneha Patel, Vikram Singh, Anjali Desai",
                "Industry leaders discuss building lasting customer relationships.",
                2,
            ),
            ("Lunch", "", "Enjoy a delicious meal.", 2),
            (
                "Session: Data-Driven Prospecting",
                "Karthik Subramanian",
                "Leverage analytics to identify and convert high-value prospects.",
                1,
            ),
            (
                "Closing: Celebrating Success",
                "Meera Iyer",
                "Recognize top performers and share inspiring success stories.",
                1,
            ),
        ];

        // Every entry has a name and a non-zero duration, so nothing is dropped.
        let sessions = AGENDA
            .iter()
            .filter_map(|(name, speaker, description, minutes)| {
                Session::new(*name, *speaker, *description, *minutes).ok()
            })
            .collect();
        Self { sessions }
    }

    #[must_use]
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Session> {
        self.sessions.get(index)
    }

    /// Look up a session by name, ignoring surrounding whitespace.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Session> {
        let wanted = name.trim();
        self.sessions.iter().find(|s| s.name() == wanted)
    }

    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.sessions
            .iter()
            .fold(Duration::zero(), |acc, s| acc + s.duration())
    }

    /// Offset of the start of the session at `index` from the reference instant.
    #[must_use]
    pub fn start_offset(&self, index: usize) -> Duration {
        self.sessions
            .iter()
            .take(index)
            .fold(Duration::zero(), |acc, s| acc + s.duration())
    }

    /// Offset of the end of the session at `index` from the reference instant.
    #[must_use]
    pub fn end_offset(&self, index: usize) -> Duration {
        self.sessions
            .iter()
            .take(index.saturating_add(1))
            .fold(Duration::zero(), |acc, s| acc + s.duration())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_names_and_zero_durations() {
        assert_eq!(Session::new("  ", "x", "", 1), Err(SessionError::EmptyName));
        assert_eq!(Session::new("Talk", "x", "", 0), Err(SessionError::ZeroDuration));
    }

    #[test]
    fn deserialization_applies_session_validation() {
        let session: Session =
            serde_json::from_str(r#"{"name":" Lunch ","duration_minutes":2}"#).unwrap();
        assert_eq!(session.name(), "Lunch");
        assert!(!session.has_speaker());

        let zero = serde_json::from_str::<Session>(r#"{"name":"Talk","duration_minutes":0}"#);
        assert!(zero.is_err());
        let blank = serde_json::from_str::<Session>(r#"{"name":"  ","duration_minutes":5}"#);
        assert!(blank.is_err());

        let schedule = Schedule::conference();
        let json = serde_json::to_string(&schedule).unwrap();
        assert_eq!(serde_json::from_str::<Schedule>(&json).unwrap(), schedule);
    }

    #[test]
    fn speaker_is_trimmed() {
        let session = Session::new("Break", "   ", "", 1).unwrap();
        assert!(!session.has_speaker());
    }

    #[test]
    fn conference_agenda_matches_published_durations() {
        let schedule = Schedule::conference();
        let minutes: Vec<u32> = schedule
            .sessions()
            .iter()
            .map(Session::duration_minutes)
            .collect();
        assert_eq!(minutes, vec![5, 1, 1, 2, 2, 1, 1]);
        assert_eq!(schedule.total_duration(), Duration::minutes(13));
        assert!(!schedule.sessions()[2].has_speaker());
        assert!(!schedule.sessions()[4].has_speaker());
    }

    #[test]
    fn offsets_accumulate_in_order() {
        let schedule = Schedule::conference();
        assert_eq!(schedule.start_offset(0), Duration::zero());
        assert_eq!(schedule.start_offset(1), Duration::minutes(5));
        assert_eq!(schedule.end_offset(1), Duration::minutes(6));
        assert_eq!(schedule.end_offset(6), schedule.total_duration());
    }

    #[test]
    fn find_ignores_surrounding_whitespace() {
        let schedule = Schedule::conference();
        assert!(schedule.find("  Lunch ").is_some());
        assert!(schedule.find("Dinner").is_none());
    }
}
