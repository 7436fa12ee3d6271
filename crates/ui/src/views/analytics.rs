use dioxus::prelude::*;
use services::AnalyticsAccess;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AnalyticsVm, OverviewVm, SessionStatsCardVm};

#[component]
pub fn AnalyticsView() -> Element {
    let ctx = use_context::<AppContext>();
    let analytics = ctx.analytics();

    let mut access = use_signal(|| None::<AnalyticsAccess>);
    let mut password = use_signal(String::new);
    let mut unlock_error = use_signal(|| None::<ViewError>);

    let on_unlock = move |evt: FormEvent| {
        evt.prevent_default();
        match analytics.unlock(&password()) {
            Ok(granted) => {
                unlock_error.set(None);
                password.set(String::new());
                access.set(Some(granted));
            }
            Err(_) => unlock_error.set(Some(ViewError::InvalidPassword)),
        }
    };

    let Some(granted) = access() else {
        return rsx! {
            div { class: "page analytics-gate",
                h2 { "Backend Analytics" }
                p { class: "muted", "Enter the admin password to view session feedback." }
                form { onsubmit: on_unlock,
                    input {
                        r#type: "password",
                        placeholder: "Password",
                        value: "{password}",
                        oninput: move |evt| password.set(evt.value()),
                    }
                    button { class: "btn btn-primary", r#type: "submit", "Unlock" }
                }
                if let Some(err) = unlock_error() {
                    p { class: "error", "{err.message()}" }
                }
            }
        };
    };

    rsx! { AnalyticsDashboard { access: granted } }
}

/// Stats for an unlocked session.
#[component]
pub fn AnalyticsDashboard(access: AnalyticsAccess) -> Element {
    let ctx = use_context::<AppContext>();
    let analytics = ctx.analytics();

    let stats = use_resource(move || {
        let analytics = analytics.clone();
        async move {
            let stats = analytics
                .session_stats(&access)
                .await
                .map_err(|_| ViewError::Unknown)?;
            Ok::<_, ViewError>(AnalyticsVm::from_stats(&stats))
        }
    });

    let body = match view_state_from_resource(&stats) {
        ViewState::Idle | ViewState::Loading => rsx! {
            p { class: "muted", "Loading feedback..." }
        },
        ViewState::Error(err) => rsx! {
            p { class: "error", "{err.message()}" }
            button {
                class: "btn",
                r#type: "button",
                onclick: move |_| {
                    let mut stats = stats;
                    stats.restart();
                },
                "Retry"
            }
        },
        ViewState::Ready(vm) => rsx! {
            Overview { overview: vm.overview.clone() }
            if vm.cards.is_empty() {
                p { class: "muted", "No feedback has been submitted yet." }
            }
            for card in vm.cards {
                SessionCard { key: "{card.session_name}", card: card.clone() }
            }
        },
    };

    rsx! {
        div { class: "page analytics",
            h2 { "Backend Analytics" }
            {body}
        }
    }
}

#[component]
fn Overview(overview: OverviewVm) -> Element {
    rsx! {
        div { class: "overview",
            div { class: "overview-card",
                p { class: "label", "Total Sessions" }
                p { class: "value", "{overview.sessions_with_feedback}" }
            }
            div { class: "overview-card",
                p { class: "label", "Total Responses" }
                p { class: "value", "{overview.total_responses}" }
            }
            div { class: "overview-card",
                p { class: "label", "Overall Rating" }
                p { class: "value", "{overview.overall_rating}" }
            }
            div { class: "overview-card",
                p { class: "label", "Overall Sentiment" }
                p { class: "value", "{overview.overall_sentiment}" }
            }
        }
    }
}

#[component]
fn SessionCard(card: SessionStatsCardVm) -> Element {
    rsx! {
        div { class: "session-card",
            h3 { "{card.session_name}" }
            if !card.speaker.is_empty() {
                p { class: "speaker", "{card.speaker}" }
            }
            p { "{card.total_responses} responses · Average {card.average_label}" }
            p { "Sentiment: {card.overall_sentiment}" }

            div { class: "distribution",
                for row in card.distribution {
                    div { key: "{row.rating}", class: "distribution-row",
                        span { "{row.rating}★" }
                        div { class: "distribution-track",
                            div { class: "distribution-bar", style: "width: {row.width}%" }
                        }
                        span { "{row.count}" }
                    }
                }
            }

            if !card.emotions.is_empty() {
                div { class: "emotions",
                    for (emotion, count) in card.emotions {
                        span { key: "{emotion}", class: "chip", "{emotion}: {count}" }
                    }
                }
            }

            if !card.keywords.is_empty() {
                div { class: "keywords",
                    for keyword in card.keywords {
                        span { key: "{keyword}", class: "chip", "{keyword}" }
                    }
                }
            }

            if !card.comments.is_empty() {
                ul { class: "comments",
                    for (index, comment) in card.comments.into_iter().enumerate() {
                        li { key: "{index}",
                            p { "\"{comment.text}\"" }
                            span { class: "muted", "{comment.sentiment} · {comment.emotion}" }
                        }
                    }
                }
            }
        }
    }
}
