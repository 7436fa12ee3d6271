use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};

/// A simple clock abstraction for deterministic time in services and tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    /// Returns the current time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// If this is a fixed clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}

/// Offset applied to event timestamps that carry no zone designator (UTC+05:30).
pub const EVENT_UTC_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

// `%#z` accepts `+05:30`, `+0530` and the hour-only `+00`.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// The fixed offset used for the conference's local wall-clock.
#[must_use]
pub fn event_offset() -> FixedOffset {
    FixedOffset::east_opt(EVENT_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Parse an attendee's event start timestamp.
///
/// Strings with an explicit offset (`Z`, `+05:30`, `+0530`, `+00`) are honoured.
/// Strings without one are read as conference-local time (UTC+05:30), never
/// as the host's local zone. Returns `None` for empty or malformed input.
#[must_use]
pub fn parse_event_start(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Some(parsed) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(trimmed, format).ok())
    {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS.iter().find_map(|format| {
        let naive = NaiveDateTime::parse_from_str(trimmed, format).ok()?;
        event_offset()
            .from_local_datetime(&naive)
            .single()
            .map(|local| local.with_timezone(&Utc))
    })
}

/// Render an instant the way event start times are stored
/// (`YYYY-MM-DD HH:MM:SS`, conference-local, no designator).
#[must_use]
pub fn format_event_start(at: DateTime<Utc>) -> String {
    at.with_timezone(&event_offset())
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Format a duration as `MM:SS`. Non-positive durations render as `00:00`.
///
/// Minutes are not wrapped into hours, so 75 minutes renders as `75:00`.
#[must_use]
pub fn format_countdown(remaining: Duration) -> String {
    let total_seconds = remaining.num_seconds();
    if total_seconds <= 0 {
        return "00:00".to_string();
    }
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn naive_timestamp_is_read_as_conference_local() {
        let parsed = parse_event_start("2025-10-15 09:06:00").unwrap();
        assert_eq!(parsed, utc("2025-10-15T03:36:00Z"));
    }

    #[test]
    fn t_separated_naive_timestamp_is_read_as_conference_local() {
        let parsed = parse_event_start("2025-10-15T09:06:00").unwrap();
        assert_eq!(parsed, utc("2025-10-15T03:36:00Z"));
    }

    #[test]
    fn explicit_offsets_are_honoured() {
        assert_eq!(
            parse_event_start("2025-10-15T09:06:00Z").unwrap(),
            utc("2025-10-15T09:06:00Z")
        );
        assert_eq!(
            parse_event_start("2025-10-15T09:06:00-04:00").unwrap(),
            utc("2025-10-15T13:06:00Z")
        );
        assert_eq!(
            parse_event_start("2025-10-15 09:06:00+05:30").unwrap(),
            utc("2025-10-15T03:36:00Z")
        );
        // Postgres `timestamptz` text output uses an hour-only offset.
        assert_eq!(
            parse_event_start("2025-10-15 09:06:00+00").unwrap(),
            utc("2025-10-15T09:06:00Z")
        );
        assert_eq!(
            parse_event_start("2025-10-15T09:06:00+0530").unwrap(),
            utc("2025-10-15T03:36:00Z")
        );
        assert_eq!(
            parse_event_start("2025-10-15 09:06:00.250-04").unwrap(),
            utc("2025-10-15T13:06:00.250Z")
        );
    }

    #[test]
    fn malformed_or_empty_timestamps_are_rejected() {
        assert!(parse_event_start("").is_none());
        assert!(parse_event_start("   ").is_none());
        assert!(parse_event_start("tomorrow morning").is_none());
        assert!(parse_event_start("2025-13-45 99:00:00").is_none());
    }

    #[test]
    fn format_event_start_round_trips_through_parse() {
        let at = utc("2025-10-15T03:36:00Z");
        let stored = format_event_start(at);
        assert_eq!(stored, "2025-10-15 09:06:00");
        assert_eq!(parse_event_start(&stored), Some(at));
    }

    #[test]
    fn countdown_formats_minutes_and_seconds() {
        assert_eq!(format_countdown(Duration::seconds(0)), "00:00");
        assert_eq!(format_countdown(Duration::seconds(-5)), "00:00");
        assert_eq!(format_countdown(Duration::seconds(59)), "00:59");
        assert_eq!(format_countdown(Duration::seconds(61)), "01:01");
        assert_eq!(format_countdown(Duration::minutes(75)), "75:00");
        assert_eq!(format_countdown(Duration::milliseconds(1_999)), "00:01");
    }

    #[test]
    fn fixed_clock_advances() {
        let mut clock = fixed_clock();
        clock.advance(Duration::minutes(3));
        assert_eq!(clock.now(), fixed_now() + Duration::minutes(3));
        assert!(clock.is_fixed());
    }
}
