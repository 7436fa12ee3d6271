use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_next_session_countdown() {
    let mut harness = setup_view_harness(ViewKind::Home, true).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    let attendee = harness.attendee.as_ref().expect("signed in");
    let greeting = format!("Welcome, {}", attendee.name);
    assert!(html.contains(&greeting), "missing {greeting} in {html}");
    assert!(html.contains("Next Session"), "missing tile in {html}");
    assert!(
        html.contains("Workshop: Digital Tools for Smarter Selling"),
        "missing next session in {html}"
    );
    assert!(html.contains("05:00"), "missing countdown in {html}");
    assert!(
        html.contains("Keynote: Winning the Market in 2025"),
        "missing now playing in {html}"
    );
    assert!(html.contains("Rate this session"), "missing rating form in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_shows_registration_when_signed_out() {
    let mut harness = setup_view_harness(ViewKind::Home, false).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Conference Registration"), "missing form in {html}");
    assert!(!html.contains("Next Session"), "unexpected dashboard in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn register_view_smoke_renders_form_fields() {
    let mut harness = setup_view_harness(ViewKind::Register, false).await;
    harness.rebuild();
    let html = harness.render();
    for label in [
        "Full Name",
        "Email Address",
        "Phone Number",
        "Branch / Region",
        "T-Shirt Size",
        "Dietary Preference",
        "Register or Login",
    ] {
        assert!(html.contains(label), "missing {label} in {html}");
    }
    assert!(html.contains("Asia-Pacific"), "missing region option in {html}");
    assert!(html.contains("Gluten-Free"), "missing diet option in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn analytics_view_smoke_starts_locked() {
    let mut harness = setup_view_harness(ViewKind::Analytics, false).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Backend Analytics"), "missing title in {html}");
    assert!(html.contains("Unlock"), "missing unlock button in {html}");
    assert!(!html.contains("Total Responses"), "stats leaked in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn analytics_view_smoke_renders_stats_once_unlocked() {
    let mut harness = setup_view_harness(ViewKind::AnalyticsUnlocked, true).await;
    let attendee = harness.attendee.clone().expect("signed in");
    harness
        .app
        .feedback()
        .submit(
            &attendee,
            "Keynote: Winning the Market in 2025",
            5,
            "Great session, really helpful",
        )
        .await
        .expect("submit feedback");

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Total Responses"), "missing overview in {html}");
    assert!(
        html.contains("Keynote: Winning the Market in 2025"),
        "missing session card in {html}"
    );
    assert!(html.contains("5/5.0"), "missing average in {html}");
    assert!(html.contains("Great session, really helpful"), "missing comment in {html}");
}
