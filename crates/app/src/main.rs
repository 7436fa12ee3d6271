use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use event_core::model::{RegistrationDraft, Schedule};
use event_core::time::parse_event_start;
use event_core::{ConferenceState, evaluate};
use services::{AppServices, Clock, ServicesConfig, TimelineTracker};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

mod cli;
mod report;

use cli::{Cli, Command};

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<()> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let Some(path) = db_url.strip_prefix("sqlite://") else {
        bail!("invalid --db value: {db_url}");
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        bail!("invalid --db value: {db_url}");
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .with_context(|| format!("creating {}", path.display()))?;
    }

    Ok(())
}

async fn open_services(db: &str, config: ServicesConfig) -> Result<AppServices> {
    let db_url = normalize_sqlite_url(db);
    prepare_sqlite_file(&db_url)?;
    let services = AppServices::new_sqlite(&db_url, Clock::default_clock(), config)
        .await
        .with_context(|| format!("opening {db_url}"))?;
    info!(db = %db_url, "storage ready");
    Ok(services)
}

fn parse_start(raw: &str) -> Option<DateTime<Utc>> {
    let parsed = parse_event_start(raw);
    if parsed.is_none() {
        warn!(start = raw, "unparseable event start; treating the conference as not started");
    }
    parsed
}

async fn run_ui(db: &str) -> Result<()> {
    let services = open_services(db, ServicesConfig::from_env()).await?;
    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Sales Conference 2025")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn run_status(start: &str, now: Option<&str>) -> Result<()> {
    let now = match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("invalid --now value: {raw}"))?
            .with_timezone(&Utc),
        None => Clock::default_clock().now(),
    };
    let schedule = Schedule::conference();
    let status = evaluate(now, parse_start(start), &schedule);
    println!("{}", report::describe_status(&status, &schedule));
    Ok(())
}

async fn run_watch(start: &str) -> Result<()> {
    let schedule = Arc::new(Schedule::conference());
    let tracker = TimelineTracker::new(
        Clock::default_clock(),
        Arc::clone(&schedule),
        parse_start(start),
    );
    let handle = tracker.spawn();
    let mut rx = handle.subscribe();

    loop {
        let status = *rx.borrow_and_update();
        println!("{}\n", report::describe_status(&status, &schedule));
        if status.state == ConferenceState::After {
            break;
        }

        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    handle.stop();
    Ok(())
}

const DEMO_ATTENDEES: [(&str, &str); 6] = [
    ("Ananya Iyer", "Asia-Pacific"),
    ("Daniel Okafor", "Middle East & Africa"),
    ("Lucia Fernandez", "South America"),
    ("Markus Vogel", "Europe"),
    ("Olivia Chen", "North America"),
    ("Ravi Shankar", "Asia-Pacific"),
];

const DEMO_FEEDBACK: [(u8, &str); 6] = [
    (5, "Great session, really helpful and informative!"),
    (4, "Good examples, clear slides"),
    (3, "It was okay"),
    (5, "Amazing energy, loved the stories"),
    (2, "A bit confusing and hard to follow"),
    (4, ""),
];

async fn run_seed(db: &str, attendees: usize) -> Result<()> {
    let config = ServicesConfig {
        feedback_webhook_url: None,
        ..ServicesConfig::from_env()
    };
    let services = open_services(db, config).await?;
    let schedule = services.schedule();
    let rateable: Vec<&str> = schedule
        .sessions()
        .iter()
        .filter(|s| s.has_speaker())
        .map(|s| s.name())
        .collect();

    let mut feedback_count = 0_usize;
    for index in 0..attendees {
        let (name, region) = DEMO_ATTENDEES[index % DEMO_ATTENDEES.len()];
        let draft = RegistrationDraft {
            name: name.to_string(),
            email: format!("demo{}@example.com", index + 1),
            phone: format!("+91 90000 {:05}", index + 1),
            branch_region: region.to_string(),
            ..RegistrationDraft::default()
        };
        let attendee = services
            .registration()
            .register_or_login(draft)
            .await
            .with_context(|| format!("registering demo attendee {}", index + 1))?
            .into_registration();

        for (offset, session_name) in rateable.iter().enumerate() {
            let (rating, comment) = DEMO_FEEDBACK[(index + offset) % DEMO_FEEDBACK.len()];
            services
                .feedback()
                .submit(&attendee, session_name, rating, comment)
                .await
                .with_context(|| format!("rating {session_name}"))?;
            feedback_count += 1;
        }
    }

    let registered = services.registration().count().await?;
    info!(registered, feedback = feedback_count, "seed complete");
    println!("seeded {attendees} attendees and {feedback_count} feedback entries ({registered} registrations total)");
    Ok(())
}

async fn run_analytics(password: &str, db: &str) -> Result<()> {
    let services = open_services(db, ServicesConfig::from_env()).await?;
    let analytics = services.analytics();
    let access = analytics.unlock(password)?;
    let stats = analytics.session_stats(&access).await?;
    println!("{}", report::describe_analytics(&stats));
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command_or_default() {
        Command::Ui { db } => run_ui(&db).await,
        Command::Status { start, now } => run_status(&start, now.as_deref()),
        Command::Watch { start } => run_watch(&start).await,
        Command::Seed { db, attendees } => run_seed(&db, attendees).await,
        Command::Analytics { password, db } => run_analytics(&password, &db).await,
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("app=info,services=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_urls_are_normalized_to_absolute_paths() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(normalize_sqlite_url("sqlite:///tmp/x.db"), "sqlite:///tmp/x.db");
        assert_eq!(normalize_sqlite_url("/tmp/x.db"), "sqlite:///tmp/x.db");
        assert!(normalize_sqlite_url("conf.sqlite3").ends_with("/conf.sqlite3"));
        assert!(normalize_sqlite_url("sqlite:conf.sqlite3").starts_with("sqlite:///"));
    }

    #[test]
    fn prepare_rejects_empty_paths() {
        assert!(prepare_sqlite_file("sqlite://").is_err());
        assert!(prepare_sqlite_file("postgres://db").is_err());
        assert!(prepare_sqlite_file("sqlite::memory:").is_ok());
    }

    #[tokio::test]
    async fn seed_then_analytics_against_a_temp_file() {
        let dir = std::env::temp_dir().join(format!("conf-seed-{}", std::process::id()));
        let db = dir.join("seed.sqlite3");
        let db = db.to_string_lossy().to_string();
        let _ = std::fs::remove_dir_all(&dir);

        run_seed(&db, 3).await.unwrap();
        let services = open_services(&db, ServicesConfig::default()).await.unwrap();
        assert_eq!(services.registration().count().await.unwrap(), 3);

        let analytics = services.analytics();
        let access = analytics.unlock("namma cauvery").unwrap();
        let stats = analytics.session_stats(&access).await.unwrap();
        let rated: usize = stats.iter().map(|s| s.total_responses).sum();
        assert_eq!(rated, 3 * 5);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
