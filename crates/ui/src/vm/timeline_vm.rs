use event_core::model::{Schedule, Session};
use event_core::time::format_countdown;
use event_core::{ConferenceState, TimelineStatus};

use crate::vm::time_fmt::{format_duration_label, format_percent};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NextSessionVm {
    pub name: String,
    pub speaker: Option<String>,
    pub description: String,
    pub duration_label: String,
    pub starts_in: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NowPlayingVm {
    pub name: String,
    pub speaker: String,
    pub description: String,
    pub ends_in: String,
}

/// Display strings for the home dashboard at one instant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimelineVm {
    pub state: ConferenceState,
    /// `None` once nothing rateable is left.
    pub next: Option<NextSessionVm>,
    /// Live speaker session; `None` during breaks and outside the conference.
    pub now_playing: Option<NowPlayingVm>,
    pub idle_message: &'static str,
    pub progress: String,
}

impl TimelineVm {
    #[must_use]
    pub fn from_status(status: &TimelineStatus, schedule: &Schedule) -> Self {
        let next = match status.state {
            ConferenceState::After => None,
            _ => status
                .next_session(schedule)
                .map(|session| next_vm(session, status)),
        };

        let now_playing = status
            .current_session(schedule)
            .filter(|session| session.has_speaker())
            .map(|session| NowPlayingVm {
                name: session.name().to_owned(),
                speaker: session.speaker().to_owned(),
                description: session.description().to_owned(),
                ends_in: format_countdown(status.remaining_in_current),
            });

        let idle_message = match status.state {
            ConferenceState::Before => "Conference has not started yet.",
            ConferenceState::Running => "Enjoy your break! The next session is coming up.",
            ConferenceState::After => "Conference has ended. Thank you!",
        };

        Self {
            state: status.state,
            next,
            now_playing,
            idle_message,
            progress: format_percent(status.progress),
        }
    }

    /// Name of the session that can be rated right now.
    #[must_use]
    pub fn rateable_session(&self) -> Option<&str> {
        self.now_playing.as_ref().map(|now| now.name.as_str())
    }
}

fn next_vm(session: &Session, status: &TimelineStatus) -> NextSessionVm {
    NextSessionVm {
        name: session.name().to_owned(),
        speaker: session
            .has_speaker()
            .then(|| session.speaker().to_owned()),
        description: session.description().to_owned(),
        duration_label: format_duration_label(session.duration_minutes()),
        starts_in: format_countdown(status.countdown_to_next),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use event_core::evaluate;
    use event_core::time::fixed_now;

    fn vm_at(elapsed: Duration) -> TimelineVm {
        let schedule = Schedule::conference();
        let reference = fixed_now();
        let status = evaluate(reference + elapsed, Some(reference), &schedule);
        TimelineVm::from_status(&status, &schedule)
    }

    #[test]
    fn keynote_is_playing_at_the_start() {
        let vm = vm_at(Duration::seconds(30));
        let now = vm.now_playing.as_ref().expect("keynote");
        assert_eq!(now.ends_in, "04:30");
        let next = vm.next.as_ref().expect("workshop");
        assert_eq!(next.name, "Workshop: Digital Tools for Smarter Selling");
        assert_eq!(next.starts_in, "04:30");
        assert_eq!(next.duration_label, "1 min session");
        assert_eq!(vm.rateable_session(), Some("Keynote: Winning the Market in 2025"));
    }

    #[test]
    fn breaks_show_the_idle_message() {
        // Tea break runs from minute 6 to 7.
        let vm = vm_at(Duration::minutes(6) + Duration::seconds(10));
        assert!(vm.now_playing.is_none());
        assert_eq!(vm.rateable_session(), None);
        assert_eq!(vm.idle_message, "Enjoy your break! The next session is coming up.");
        assert_eq!(vm.next.map(|n| n.starts_in), Some("00:50".to_string()));
    }

    #[test]
    fn before_and_after_states() {
        let before = vm_at(-Duration::minutes(2));
        assert_eq!(before.idle_message, "Conference has not started yet.");
        assert_eq!(before.next.map(|n| n.starts_in), Some("02:00".to_string()));
        assert_eq!(before.progress, "0.0");

        let after = vm_at(Duration::minutes(20));
        assert!(after.next.is_none());
        assert_eq!(after.progress, "100.0");
        assert_eq!(after.idle_message, "Conference has ended. Thank you!");
    }
}
