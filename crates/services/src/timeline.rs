//! Periodic re-evaluation of an attendee's conference timeline.
//!
//! A [`TimelineTracker`] evaluates the agenda against its clock once per
//! period and publishes the result on a watch channel. The returned
//! [`TrackerHandle`] owns the background task: stopping or dropping the
//! handle cancels it.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use event_core::model::{Registration, Schedule};
use event_core::{ConferenceState, TimelineStatus, evaluate};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::debug;

use crate::Clock;

/// How often a running tracker re-evaluates.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

#[derive(Clone)]
pub struct TimelineTracker {
    clock: Clock,
    schedule: Arc<Schedule>,
    reference: Option<DateTime<Utc>>,
    period: Duration,
}

impl TimelineTracker {
    #[must_use]
    pub fn new(clock: Clock, schedule: Arc<Schedule>, reference: Option<DateTime<Utc>>) -> Self {
        Self {
            clock,
            schedule,
            reference,
            period: DEFAULT_TICK,
        }
    }

    /// Track the attendee's personal start; an unparseable start tracks as "not started".
    #[must_use]
    pub fn for_attendee(clock: Clock, schedule: Arc<Schedule>, attendee: &Registration) -> Self {
        Self::new(clock, schedule, attendee.event_start())
    }

    #[must_use]
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    #[must_use]
    pub fn schedule(&self) -> &Arc<Schedule> {
        &self.schedule
    }

    #[must_use]
    pub fn reference(&self) -> Option<DateTime<Utc>> {
        self.reference
    }

    /// Evaluate once at the clock's current time.
    #[must_use]
    pub fn snapshot(&self) -> TimelineStatus {
        evaluate(self.clock.now(), self.reference, &self.schedule)
    }

    /// Start re-evaluating in the background.
    ///
    /// The current status is available immediately; later values follow every
    /// period until the conference is over.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn spawn(&self) -> TrackerHandle {
        let (tx, rx) = watch::channel(self.snapshot());
        let tracker = self.clone();
        let task = tokio::spawn(tracker.run(tx));
        TrackerHandle { rx, task }
    }

    async fn run(self, tx: watch::Sender<TimelineStatus>) {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; its value was published by `spawn`.
        ticker.tick().await;

        loop {
            if tx.borrow().state == ConferenceState::After {
                debug!("conference over; timeline tracker finished");
                break;
            }
            ticker.tick().await;
            if tx.send(self.snapshot()).is_err() {
                break;
            }
        }
    }
}

/// Owner of a running tracker task.
pub struct TrackerHandle {
    rx: watch::Receiver<TimelineStatus>,
    task: JoinHandle<()>,
}

impl TrackerHandle {
    /// A receiver that observes every later status.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TimelineStatus> {
        self.rx.clone()
    }

    #[must_use]
    pub fn latest(&self) -> TimelineStatus {
        *self.rx.borrow()
    }

    pub fn stop(&self) {
        self.task.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for TrackerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
