//! Live position of an attendee within the conference agenda.
//!
//! Every attendee gets a personalized reference instant (their event start).
//! Given that instant, the agenda, and "now", [`evaluate`] derives which
//! session is live, which speaker session comes next, and how far along the
//! conference is. The function is pure and total: every input, including an
//! unparseable reference or an empty agenda, has a defined result.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Schedule, Session};
use crate::time::parse_event_start;

/// Where the attendee is relative to their personal conference timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConferenceState {
    Before,
    Running,
    After,
}

impl ConferenceState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ConferenceState::Before => "before",
            ConferenceState::Running => "running",
            ConferenceState::After => "after",
        }
    }
}

/// Result of one timeline evaluation.
///
/// Sessions are referenced by index into the evaluated [`Schedule`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineStatus {
    pub state: ConferenceState,
    pub current: Option<usize>,
    pub next: Option<usize>,
    pub countdown_to_next: Duration,
    pub remaining_in_current: Duration,
    pub progress: f64,
}

impl TimelineStatus {
    fn before(schedule: &Schedule, countdown: Duration) -> Self {
        Self {
            state: ConferenceState::Before,
            current: None,
            next: (!schedule.is_empty()).then_some(0),
            countdown_to_next: countdown,
            remaining_in_current: Duration::zero(),
            progress: 0.0,
        }
    }

    fn after() -> Self {
        Self {
            state: ConferenceState::After,
            current: None,
            next: None,
            countdown_to_next: Duration::zero(),
            remaining_in_current: Duration::zero(),
            progress: 100.0,
        }
    }

    #[must_use]
    pub fn current_session<'a>(&self, schedule: &'a Schedule) -> Option<&'a Session> {
        self.current.and_then(|index| schedule.get(index))
    }

    #[must_use]
    pub fn next_session<'a>(&self, schedule: &'a Schedule) -> Option<&'a Session> {
        self.next.and_then(|index| schedule.get(index))
    }
}

/// Evaluate against a raw stored timestamp.
///
/// Malformed or empty timestamps degrade to the `Before` state with a zero
/// countdown.
#[must_use]
pub fn evaluate_str(now: DateTime<Utc>, reference: &str, schedule: &Schedule) -> TimelineStatus {
    evaluate(now, parse_event_start(reference), schedule)
}

/// Evaluate the attendee's position at `now`.
#[must_use]
pub fn evaluate(
    now: DateTime<Utc>,
    reference: Option<DateTime<Utc>>,
    schedule: &Schedule,
) -> TimelineStatus {
    let Some(reference) = reference else {
        return TimelineStatus::before(schedule, Duration::zero());
    };

    if now < reference {
        return TimelineStatus::before(schedule, reference - now);
    }

    let elapsed = now - reference;
    let total = schedule.total_duration();
    if elapsed >= total {
        return TimelineStatus::after();
    }

    let mut offset = Duration::zero();
    let mut current = None;
    for (index, session) in schedule.sessions().iter().enumerate() {
        let end = offset + session.duration();
        if elapsed >= offset && elapsed < end {
            current = Some((index, end));
            break;
        }
        offset = end;
    }

    // Intervals are contiguous and elapsed < total, so a match always exists.
    let Some((current_index, current_end)) = current else {
        return TimelineStatus::after();
    };

    let next = schedule
        .sessions()
        .iter()
        .enumerate()
        .skip(current_index + 1)
        .find(|(_, session)| session.has_speaker())
        .map(|(index, _)| index);

    let countdown_to_next = next
        .map(|index| reference + schedule.start_offset(index) - now)
        .unwrap_or_else(Duration::zero);

    TimelineStatus {
        state: ConferenceState::Running,
        current: Some(current_index),
        next,
        countdown_to_next,
        remaining_in_current: reference + current_end - now,
        progress: progress_percent(elapsed, total),
    }
}

fn progress_percent(elapsed: Duration, total: Duration) -> f64 {
    let total_ms = total.num_milliseconds();
    if total_ms <= 0 {
        return 100.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = elapsed.num_milliseconds() as f64 / total_ms as f64;
    (ratio * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn session(name: &str, speaker: &str, minutes: u32) -> Session {
        Session::new(name, speaker, "", minutes).unwrap()
    }

    fn agenda(durations: &[u32]) -> Schedule {
        Schedule::new(
            durations
                .iter()
                .enumerate()
                .map(|(i, minutes)| session(&format!("S{i}"), "Speaker", *minutes))
                .collect(),
        )
    }

    #[test]
    fn future_reference_is_before_with_first_session_next() {
        let schedule = Schedule::conference();
        let now = fixed_now();
        let status = evaluate(now, Some(now + Duration::minutes(3)), &schedule);

        assert_eq!(status.state, ConferenceState::Before);
        assert_eq!(status.current, None);
        assert_eq!(status.next, Some(0));
        assert_eq!(status.countdown_to_next, Duration::minutes(3));
        assert_eq!(status.progress, 0.0);
    }

    #[test]
    fn missing_or_malformed_reference_degrades_to_before() {
        let schedule = Schedule::conference();
        for raw in ["", "not a date", "2025-02-30 10:00:00"] {
            let status = evaluate_str(fixed_now(), raw, &schedule);
            assert_eq!(status.state, ConferenceState::Before, "input {raw:?}");
            assert_eq!(status.countdown_to_next, Duration::zero());
            assert_eq!(status.next, Some(0));
            assert_eq!(status.current, None);
        }
    }

    #[test]
    fn elapsed_past_total_is_after() {
        let schedule = agenda(&[5, 1, 1, 2, 2, 1, 1]);
        let reference = fixed_now();
        for minutes in [13, 14, 600] {
            let status = evaluate(reference + Duration::minutes(minutes), Some(reference), &schedule);
            assert_eq!(status.state, ConferenceState::After);
            assert_eq!(status.progress, 100.0);
            assert_eq!(status.current, None);
            assert_eq!(status.next, None);
        }
    }

    #[test]
    fn six_minutes_in_is_the_second_session() {
        let schedule = agenda(&[5, 1, 1, 2, 2, 1, 1]);
        let reference = fixed_now();
        let status = evaluate(reference + Duration::minutes(6) - Duration::seconds(1), Some(reference), &schedule);
        assert_eq!(status.current, Some(1));

        // At exactly 6 minutes the second session [5, 6) has ended.
        let status = evaluate(reference + Duration::minutes(6), Some(reference), &schedule);
        assert_eq!(status.current, Some(2));

        let status = evaluate(reference + Duration::minutes(5), Some(reference), &schedule);
        assert_eq!(status.current, Some(1));
        assert_eq!(status.state, ConferenceState::Running);
    }

    #[test]
    fn every_running_instant_has_exactly_the_containing_session() {
        let schedule = agenda(&[5, 1, 1, 2, 2, 1, 1]);
        let reference = fixed_now();
        let total_secs = schedule.total_duration().num_seconds();
        for second in (0..total_secs).step_by(15) {
            let now = reference + Duration::seconds(second);
            let status = evaluate(now, Some(reference), &schedule);
            let index = status.current.expect("running has a current session");
            let elapsed = Duration::seconds(second);
            assert!(schedule.start_offset(index) <= elapsed);
            assert!(elapsed < schedule.end_offset(index));
            assert_eq!(status.remaining_in_current, schedule.end_offset(index) - elapsed);
        }
    }

    #[test]
    fn progress_is_monotonic_and_bounded() {
        let schedule = Schedule::conference();
        let reference = fixed_now();
        let mut last = -1.0;
        for second in (-120..1_000).step_by(7) {
            let status = evaluate(reference + Duration::seconds(second), Some(reference), &schedule);
            assert!((0.0..=100.0).contains(&status.progress));
            assert!(status.progress >= last, "progress went backwards at {second}s");
            last = status.progress;
        }
    }

    #[test]
    fn displayable_next_skips_speakerless_entries() {
        let schedule = Schedule::new(vec![
            session("A", "Ann", 2),
            session("Break", "", 2),
            session("B", "Bob", 2),
        ]);
        let reference = fixed_now();
        let now = reference + Duration::minutes(3);
        let status = evaluate(now, Some(reference), &schedule);

        assert_eq!(status.current_session(&schedule).map(Session::name), Some("Break"));
        assert_eq!(status.next_session(&schedule).map(Session::name), Some("B"));
        assert_eq!(status.countdown_to_next, Duration::minutes(1));
        assert_eq!(status.remaining_in_current, Duration::minutes(1));
    }

    #[test]
    fn next_from_a_speaker_session_skips_the_following_break() {
        let schedule = Schedule::new(vec![
            session("A", "Ann", 2),
            session("Break", "", 2),
            session("B", "Bob", 2),
        ]);
        let reference = fixed_now();
        let status = evaluate(reference + Duration::minutes(1), Some(reference), &schedule);
        assert_eq!(status.current, Some(0));
        assert_eq!(status.next, Some(2));
        assert_eq!(status.countdown_to_next, Duration::minutes(3));
    }

    #[test]
    fn last_speaker_session_has_no_next_even_with_breaks_left() {
        let schedule = Schedule::new(vec![session("A", "Ann", 2), session("Lunch", "", 2)]);
        let reference = fixed_now();
        let status = evaluate(reference + Duration::minutes(1), Some(reference), &schedule);
        assert_eq!(status.current, Some(0));
        assert_eq!(status.next, None);
        assert_eq!(status.countdown_to_next, Duration::zero());
    }

    #[test]
    fn empty_schedule_is_total() {
        let schedule = Schedule::default();
        let reference = fixed_now();

        let before = evaluate(reference - Duration::minutes(1), Some(reference), &schedule);
        assert_eq!(before.state, ConferenceState::Before);
        assert_eq!(before.next, None);

        let after = evaluate(reference, Some(reference), &schedule);
        assert_eq!(after.state, ConferenceState::After);
        assert_eq!(after.progress, 100.0);

        let unparsed = evaluate(reference, None, &schedule);
        assert_eq!(unparsed.state, ConferenceState::Before);
    }

    #[test]
    fn naive_reference_is_read_as_conference_local() {
        let schedule = Schedule::conference();
        // 09:06 at UTC+05:30 is 03:36 UTC; one minute later the keynote is live.
        let now = DateTime::parse_from_rfc3339("2025-10-15T03:37:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let status = evaluate_str(now, "2025-10-15 09:06:00", &schedule);
        assert_eq!(status.state, ConferenceState::Running);
        assert_eq!(status.current, Some(0));
        assert_eq!(status.remaining_in_current, Duration::minutes(4));
    }
}
