use dioxus::prelude::*;
use dioxus_router::use_navigator;
use event_core::model::{
    BRANCH_REGIONS, DietaryPreference, FieldErrors, RegistrationDraft, RegistrationField,
    TShirtSize,
};
use services::RegistrationServiceError;

use crate::context::{AppContext, SignedIn};
use crate::routes::Route;

#[derive(Clone, Debug, PartialEq)]
enum SaveState {
    Idle,
    Saving,
    Error(String),
}

#[component]
pub fn RegisterView() -> Element {
    let ctx = use_context::<AppContext>();
    let SignedIn(signed_in) = use_context::<SignedIn>();
    let navigator = use_navigator();
    let registration = ctx.registration();
    let attendee = ctx.attendee();

    let mut form = use_signal(RegistrationDraft::default);
    let mut field_errors = use_signal(FieldErrors::default);
    let mut save_state = use_signal(|| SaveState::Idle);

    let field_error = move |field: RegistrationField| field_errors.read().get(field);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if save_state() == SaveState::Saving {
            return;
        }
        let draft = form();
        let registration = registration.clone();
        let attendee = attendee.clone();
        let mut signed_in = signed_in;
        spawn(async move {
            save_state.set(SaveState::Saving);
            match registration.register_or_login(draft).await {
                Ok(outcome) => {
                    let reg = outcome.into_registration();
                    if let Err(err) = attendee.sign_in(reg.clone()).await {
                        save_state.set(SaveState::Error(err.to_string()));
                        return;
                    }
                    field_errors.set(FieldErrors::default());
                    save_state.set(SaveState::Idle);
                    signed_in.set(Some(reg));
                    navigator.replace(Route::Home {});
                }
                Err(RegistrationServiceError::Invalid(errors)) => {
                    field_errors.set(errors);
                    save_state.set(SaveState::Idle);
                }
                Err(err) => save_state.set(SaveState::Error(err.to_string())),
            }
        });
    };

    rsx! {
        div { class: "page register",
            h2 { "Conference Registration" }
            p { class: "muted", "Already registered? Enter the same email to log back in." }
            if let SaveState::Error(message) = save_state() {
                p { class: "error banner", "Operation failed: {message}" }
            }
            form { class: "register-form", onsubmit: on_submit,
                label { r#for: "reg-name", "Full Name" }
                input {
                    id: "reg-name",
                    r#type: "text",
                    value: "{form.read().name}",
                    oninput: move |evt| form.write().name = evt.value(),
                }
                if let Some(message) = field_error(RegistrationField::Name) {
                    p { class: "field-error", "{message}" }
                }

                label { r#for: "reg-email", "Email Address" }
                input {
                    id: "reg-email",
                    r#type: "email",
                    value: "{form.read().email}",
                    oninput: move |evt| form.write().email = evt.value(),
                }
                if let Some(message) = field_error(RegistrationField::Email) {
                    p { class: "field-error", "{message}" }
                }

                label { r#for: "reg-phone", "Phone Number" }
                input {
                    id: "reg-phone",
                    r#type: "tel",
                    value: "{form.read().phone}",
                    oninput: move |evt| form.write().phone = evt.value(),
                }
                if let Some(message) = field_error(RegistrationField::Phone) {
                    p { class: "field-error", "{message}" }
                }

                label { r#for: "reg-region", "Branch / Region" }
                select {
                    id: "reg-region",
                    value: "{form.read().branch_region}",
                    onchange: move |evt| form.write().branch_region = evt.value(),
                    for region in BRANCH_REGIONS {
                        option { key: "{region}", value: "{region}", "{region}" }
                    }
                }
                if let Some(message) = field_error(RegistrationField::BranchRegion) {
                    p { class: "field-error", "{message}" }
                }

                label { r#for: "reg-size", "T-Shirt Size" }
                select {
                    id: "reg-size",
                    value: "{form.read().tshirt_size}",
                    onchange: move |evt| {
                        if let Ok(size) = evt.value().parse::<TShirtSize>() {
                            form.write().tshirt_size = size;
                        }
                    },
                    for size in TShirtSize::ALL {
                        option { key: "{size}", value: "{size}", "{size}" }
                    }
                }

                label { r#for: "reg-diet", "Dietary Preference" }
                select {
                    id: "reg-diet",
                    value: "{form.read().dietary_preference}",
                    onchange: move |evt| {
                        if let Ok(pref) = evt.value().parse::<DietaryPreference>() {
                            form.write().dietary_preference = pref;
                        }
                    },
                    for pref in DietaryPreference::ALL {
                        option { key: "{pref}", value: "{pref}", "{pref}" }
                    }
                }

                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: save_state() == SaveState::Saving,
                    if save_state() == SaveState::Saving { "Please wait..." } else { "Register or Login" }
                }
            }
        }
    }
}
