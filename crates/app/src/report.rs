use event_core::model::Schedule;
use event_core::time::format_countdown;
use event_core::{ConferenceState, TimelineStatus};
use services::{AnalyticsOverview, SessionStats};

/// Terminal rendering of one timeline evaluation.
#[must_use]
pub fn describe_status(status: &TimelineStatus, schedule: &Schedule) -> String {
    let mut lines = vec![format!("state: {}", status.state.as_str())];

    match status.current_session(schedule) {
        Some(current) => lines.push(format!(
            "now: {} (ends in {})",
            current.name(),
            format_countdown(status.remaining_in_current)
        )),
        None if status.state == ConferenceState::After => {
            lines.push("now: conference has ended".to_string());
        }
        None => lines.push("now: -".to_string()),
    }

    match status.next_session(schedule) {
        Some(next) if next.has_speaker() => lines.push(format!(
            "next: {} with {} (starts in {})",
            next.name(),
            next.speaker(),
            format_countdown(status.countdown_to_next)
        )),
        Some(next) => lines.push(format!(
            "next: {} (starts in {})",
            next.name(),
            format_countdown(status.countdown_to_next)
        )),
        None => lines.push("next: -".to_string()),
    }

    lines.push(format!("progress: {:.1}%", status.progress));
    lines.join("\n")
}

#[must_use]
pub fn describe_analytics(stats: &[SessionStats]) -> String {
    let overview = AnalyticsOverview::from_stats(stats);
    let mut lines = vec![
        format!("sessions with feedback: {}", overview.sessions_with_feedback),
        format!("total responses: {}", overview.total_responses),
        format!("overall rating: {:.1}", overview.overall_rating),
        format!("overall sentiment: {}", overview.overall_sentiment.as_str()),
    ];

    for session in stats.iter().filter(|s| s.total_responses > 0) {
        lines.push(String::new());
        lines.push(session.session_name.clone());
        lines.push(format!(
            "  responses: {}  average: {}/5.0  sentiment: {}",
            session.total_responses,
            session.average_rating,
            session.sentiment.overall.as_str()
        ));
        let distribution: Vec<String> = session
            .distribution
            .iter()
            .enumerate()
            .rev()
            .map(|(index, count)| format!("{}★ {count}", index + 1))
            .collect();
        lines.push(format!("  ratings: {}", distribution.join("  ")));
        for comment in &session.comments {
            lines.push(format!("  - {comment}"));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use event_core::evaluate;
    use event_core::time::fixed_now;

    #[test]
    fn running_status_names_current_and_next() {
        let schedule = Schedule::conference();
        let reference = fixed_now();
        let status = evaluate(reference + Duration::seconds(30), Some(reference), &schedule);
        let text = describe_status(&status, &schedule);

        assert!(text.contains("state: running"), "{text}");
        assert!(
            text.contains("now: Keynote: Winning the Market in 2025 (ends in 04:30)"),
            "{text}"
        );
        assert!(
            text.contains("next: Workshop: Digital Tools for Smarter Selling with Priya Raghavan (starts in 04:30)"),
            "{text}"
        );
        assert!(text.contains("progress: 3.8%"), "{text}");
    }

    #[test]
    fn after_status_reports_the_end() {
        let schedule = Schedule::conference();
        let reference = fixed_now();
        let status = evaluate(reference + Duration::hours(1), Some(reference), &schedule);
        let text = describe_status(&status, &schedule);
        assert!(text.contains("conference has ended"), "{text}");
        assert!(text.contains("next: -"), "{text}");
        assert!(text.contains("progress: 100.0%"), "{text}");
    }
}
