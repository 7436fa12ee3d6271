mod analytics;
mod home;
mod register;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use analytics::{AnalyticsDashboard, AnalyticsView};
pub use home::HomeView;
pub use register::RegisterView;
pub use state::{ViewError, ViewState, view_state_from_resource};
