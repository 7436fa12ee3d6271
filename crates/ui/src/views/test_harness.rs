use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use event_core::model::{Registration, RegistrationDraft};
use event_core::time::fixed_now;
use services::{AppServices, Clock, ServicesConfig};

use crate::context::{AppContext, UiApp, build_app_context, use_signed_in_provider};
use crate::views::{AnalyticsDashboard, AnalyticsView, HomeView, RegisterView};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Register,
    Analytics,
    /// The stats page behind the password gate, unlocked with the default password.
    AnalyticsUnlocked,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    use_signed_in_provider(&ctx);
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Register => rsx! { RegisterView {} },
        ViewKind::Analytics => rsx! { AnalyticsView {} },
        ViewKind::AnalyticsUnlocked => {
            let ctx = use_context::<AppContext>();
            match ctx.analytics().unlock(&ServicesConfig::default().admin_password) {
                Ok(access) => rsx! { AnalyticsDashboard { access } },
                Err(err) => rsx! { "unlock failed: {err}" },
            }
        }
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub app: Arc<AppServices>,
    pub attendee: Option<Registration>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn attendee_draft() -> RegistrationDraft {
    RegistrationDraft {
        name: "Lakshmi Narayan".into(),
        email: "lakshmi@example.com".into(),
        phone: "+91 98450 12345".into(),
        ..RegistrationDraft::default()
    }
}

/// Build a view over in-memory services at a fixed instant.
///
/// With `signed_in`, an attendee is registered at that instant, so their
/// conference starts right away.
pub async fn setup_view_harness(view: ViewKind, signed_in: bool) -> ViewHarness {
    let app = Arc::new(AppServices::in_memory(
        Clock::fixed(fixed_now()),
        ServicesConfig::default(),
    ));

    let attendee = if signed_in {
        let registration = app
            .registration()
            .register_or_login(attendee_draft())
            .await
            .expect("register attendee")
            .into_registration();
        app.attendee()
            .sign_in(registration.clone())
            .await
            .expect("sign in");
        Some(registration)
    } else {
        None
    };

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::clone(&app),
            view,
        },
    );

    ViewHarness {
        dom,
        app,
        attendee,
    }
}
