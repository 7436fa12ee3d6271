use event_core::model::RegistrationDraft;
use event_core::time::fixed_now;
use event_core::ConferenceState;
use services::{AppServices, Clock, RegistrationOutcome, ServicesConfig};

fn config() -> ServicesConfig {
    ServicesConfig {
        feedback_webhook_url: None,
        admin_password: "namma cauvery".into(),
    }
}

fn draft(email: &str) -> RegistrationDraft {
    RegistrationDraft {
        name: "Suresh Babu".into(),
        email: email.into(),
        phone: "+91 99000 11223".into(),
        branch_region: "Europe".into(),
        ..RegistrationDraft::default()
    }
}

#[tokio::test]
async fn register_rate_and_review_analytics() {
    let services = AppServices::in_memory(Clock::fixed(fixed_now()), config());
    assert!(services.tracker().is_none());

    let outcome = services
        .registration()
        .register_or_login(draft("suresh@example.com"))
        .await
        .unwrap();
    assert!(matches!(outcome, RegistrationOutcome::Registered(_)));
    let attendee = outcome.into_registration();
    services.attendee().sign_in(attendee.clone()).await.unwrap();

    // The conference starts at registration, so the keynote is live right away.
    let status = services.tracker().expect("signed in").snapshot();
    assert_eq!(status.state, ConferenceState::Running);
    let schedule = services.schedule();
    let current = status.current_session(&schedule).expect("keynote");
    assert!(current.has_speaker());

    services
        .feedback()
        .submit(&attendee, current.name(), 5, "Excellent, very useful")
        .await
        .unwrap();

    let analytics = services.analytics();
    assert!(analytics.unlock("wrong").is_err());
    let access = analytics.unlock("namma cauvery").unwrap();
    let stats = analytics.session_stats(&access).await.unwrap();
    assert_eq!(stats[0].total_responses, 1);
    assert_eq!(stats[0].average_rating, 5.0);
    assert_eq!(stats[0].distribution, [0, 0, 0, 0, 1]);
}

#[tokio::test]
async fn returning_attendee_logs_in_with_original_start() {
    let services = AppServices::in_memory(Clock::fixed(fixed_now()), config());
    let first = services
        .registration()
        .register_or_login(draft("suresh@example.com"))
        .await
        .unwrap()
        .into_registration();

    let again = services
        .registration()
        .register_or_login(draft(" Suresh@Example.com "))
        .await
        .unwrap();
    assert_eq!(again, RegistrationOutcome::Login(first.clone()));
    assert_eq!(again.registration().event_start_time, first.event_start_time);
}
