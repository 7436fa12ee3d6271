use std::rc::Rc;

use dioxus::prelude::*;
use event_core::model::Registration;
use services::TimelineTracker;

use crate::context::{AppContext, SignedIn};
use crate::views::{RegisterView, ViewError};
use crate::vm::{NextSessionVm, NowPlayingVm, TimelineVm};

#[component]
pub fn HomeView() -> Element {
    let SignedIn(signed_in) = use_context::<SignedIn>();

    // Signed-out attendees land on the registration form.
    match signed_in() {
        Some(attendee) => rsx! { Dashboard { attendee } },
        None => rsx! { RegisterView {} },
    }
}

#[component]
fn Dashboard(attendee: Registration) -> Element {
    let ctx = use_context::<AppContext>();
    let schedule = ctx.schedule();

    // Dropping the handle on unmount stops the tracker task.
    let handle = use_hook(|| {
        Rc::new(TimelineTracker::for_attendee(ctx.clock(), ctx.schedule(), &attendee).spawn())
    });
    let mut status = use_signal(|| handle.latest());
    use_future(move || {
        let mut rx = handle.subscribe();
        async move {
            while rx.changed().await.is_ok() {
                let latest = *rx.borrow_and_update();
                status.set(latest);
            }
        }
    });

    let vm = TimelineVm::from_status(&status(), &schedule);
    let rateable = vm.rateable_session().map(str::to_owned);

    rsx! {
        div { class: "page home",
            h2 { "Welcome, {attendee.name}" }
            div { class: "tiles",
                NextSessionTile { next: vm.next.clone(), progress: vm.progress.clone() }
                div { class: "tile now-playing",
                    h3 { "Now Playing" }
                    NowPlaying { now: vm.now_playing.clone(), idle_message: vm.idle_message }
                    for session_name in rateable {
                        RatingForm {
                            key: "{session_name}",
                            session_name: session_name.clone(),
                            attendee: attendee.clone(),
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn NextSessionTile(next: Option<NextSessionVm>, progress: String) -> Element {
    rsx! {
        div { class: "tile next-session",
            h3 { "Next Session" }
            match next {
                Some(next) => rsx! {
                    p { class: "countdown", "Starts in: " span { "{next.starts_in}" } }
                    h4 { "{next.name}" }
                    if let Some(speaker) = next.speaker {
                        p { class: "speaker", "{speaker}" }
                    }
                    p { class: "description", "{next.description}" }
                    p { class: "duration", "{next.duration_label}" }
                },
                None => rsx! {
                    p { class: "ended", "Conference has ended." }
                    p { "Thank you for attending!" }
                },
            }
            div { class: "progress",
                p { "Conference Progress" }
                div { class: "progress-track",
                    div { class: "progress-bar", style: "width: {progress}%" }
                }
            }
        }
    }
}

#[component]
fn NowPlaying(now: Option<NowPlayingVm>, idle_message: &'static str) -> Element {
    match now {
        Some(now) => rsx! {
            h4 { "{now.name}" }
            p { class: "speaker", "{now.speaker}" }
            p { class: "description", "{now.description}" }
            p { class: "ends-in", "Ends in: {now.ends_in}" }
        },
        None => rsx! {
            p { class: "idle", "{idle_message}" }
        },
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SubmitState {
    Editing,
    Submitting,
    Submitted,
    Failed(ViewError),
}

#[component]
fn RatingForm(session_name: String, attendee: Registration) -> Element {
    let ctx = use_context::<AppContext>();
    let feedback = ctx.feedback();
    let mut rating = use_signal(|| 0_u8);
    let mut comment = use_signal(String::new);
    let mut submit_state = use_signal(|| SubmitState::Editing);

    if submit_state() == SubmitState::Submitted {
        return rsx! {
            p { class: "thanks", "Thank you for your feedback!" }
        };
    }

    rsx! {
        div { class: "rating-form",
            p { "Rate this session" }
            div { class: "stars",
                for star in 1..=5_u8 {
                    button {
                        key: "{star}",
                        class: if rating() >= star { "star filled" } else { "star" },
                        r#type: "button",
                        onclick: move |_| rating.set(star),
                        if rating() >= star { "★" } else { "☆" }
                    }
                }
            }
            if rating() > 0 {
                textarea {
                    value: "{comment}",
                    placeholder: "Share Feedback (optional)...",
                    rows: "2",
                    oninput: move |evt| comment.set(evt.value()),
                }
                button {
                    class: "btn submit-feedback",
                    r#type: "button",
                    disabled: submit_state() == SubmitState::Submitting,
                    onclick: move |_| {
                        let feedback = feedback.clone();
                        let attendee = attendee.clone();
                        let session_name = session_name.clone();
                        let mut submit_state = submit_state;
                        spawn(async move {
                            submit_state.set(SubmitState::Submitting);
                            match feedback
                                .submit(&attendee, &session_name, rating(), &comment())
                                .await
                            {
                                Ok(_) => submit_state.set(SubmitState::Submitted),
                                Err(_) => submit_state.set(SubmitState::Failed(ViewError::Unknown)),
                            }
                        });
                    },
                    if submit_state() == SubmitState::Submitting { "Submitting..." } else { "Submit Feedback" }
                }
            }
            if let SubmitState::Failed(err) = submit_state() {
                p { class: "error", "{err.message()}" }
            }
        }
    }
}
