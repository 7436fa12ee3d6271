mod analytics_vm;
mod time_fmt;
mod timeline_vm;

pub use analytics_vm::{
    AnalyticsVm, CommentVm, DistributionRowVm, OverviewVm, SessionStatsCardVm, sentiment_label,
};
pub use time_fmt::{format_duration_label, format_percent};
pub use timeline_vm::{NextSessionVm, NowPlayingVm, TimelineVm};
