#![forbid(unsafe_code)]

pub mod model;
pub mod sentiment;
pub mod time;
pub mod timeline;

pub use time::Clock;
pub use timeline::{ConferenceState, TimelineStatus, evaluate, evaluate_str};
