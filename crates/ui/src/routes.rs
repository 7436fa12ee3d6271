use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use services::AttendeeState;

use crate::context::{AppContext, SignedIn};
use crate::views::{AnalyticsView, HomeView, RegisterView, ViewError};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/register", RegisterView)] Register {},
        #[route("/analytics", AnalyticsView)] Analytics {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Header {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Header() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let attendee = ctx.attendee();
    let SignedIn(signed_in) = use_context::<SignedIn>();
    let mut sign_out_error = use_signal(|| None::<ViewError>);

    rsx! {
        header { class: "header",
            h1 { "Sales Conference 2025" }
            nav {
                Link { to: Route::Home {}, "Home" }
                Link { to: Route::Analytics {}, "Analytics" }
                if let Some(reg) = signed_in() {
                    span { class: "header-user", "{reg.name}" }
                    button {
                        class: "btn header-signout",
                        r#type: "button",
                        onclick: move |_| {
                            let attendee = attendee.clone();
                            let mut signed_in = signed_in;
                            spawn(async move {
                                match sign_out_attendee(&attendee).await {
                                    Ok(()) => {
                                        sign_out_error.set(None);
                                        signed_in.set(None);
                                        navigator.replace(Route::Register {});
                                    }
                                    Err(err) => sign_out_error.set(Some(err)),
                                }
                            });
                        },
                        "Sign out"
                    }
                }
                if let Some(err) = sign_out_error() {
                    span { class: "error header-error", "{err.message()}" }
                }
            }
        }
    }
}

async fn sign_out_attendee(attendee: &AttendeeState) -> Result<(), ViewError> {
    attendee.sign_out().await.map_err(|_| ViewError::Unknown)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use event_core::model::RegistrationId;
    use storage::repository::{AttendeeSessionRepository, InMemoryRepository, StorageError};

    use super::*;

    struct ReadOnlySessions;

    #[async_trait::async_trait]
    impl AttendeeSessionRepository for ReadOnlySessions {
        async fn load_signed_in(&self) -> Result<Option<RegistrationId>, StorageError> {
            Ok(None)
        }

        async fn save_signed_in(&self, _id: Option<RegistrationId>) -> Result<(), StorageError> {
            Err(StorageError::Connection("read-only".to_string()))
        }
    }

    #[tokio::test]
    async fn failed_sign_out_surfaces_a_view_error() {
        let attendee = AttendeeState::new(
            Arc::new(InMemoryRepository::new()),
            Arc::new(ReadOnlySessions),
        );
        assert_eq!(
            sign_out_attendee(&attendee).await,
            Err(ViewError::Unknown)
        );
    }

    #[tokio::test]
    async fn sign_out_succeeds_against_working_storage() {
        let repo = Arc::new(InMemoryRepository::new());
        let attendee = AttendeeState::new(repo.clone(), repo);
        assert_eq!(sign_out_attendee(&attendee).await, Ok(()));
        assert!(attendee.current().is_none());
    }
}
