use clap::{Parser, Subcommand};

pub const DEFAULT_DB_URL: &str = "sqlite://dev.sqlite3";

/// Sales Conference 2025 companion.
///
/// Runs the attendee desktop app by default; the other commands work on the
/// same database from a terminal.
#[derive(Parser, Debug, Clone)]
#[command(name = "app")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Launch the desktop UI
    Ui {
        /// SQLite database URL or file path
        #[arg(long, env = "CONF_DB_URL", default_value = DEFAULT_DB_URL)]
        db: String,
    },

    /// Print one timeline evaluation
    Status {
        /// Attendee event start, e.g. "2025-10-15 09:06:00" (UTC+05:30) or RFC 3339
        #[arg(long)]
        start: String,

        /// Evaluate at this RFC 3339 instant instead of the current time
        #[arg(long)]
        now: Option<String>,
    },

    /// Print the timeline every second until the conference ends
    Watch {
        /// Attendee event start, e.g. "2025-10-15 09:06:00" (UTC+05:30) or RFC 3339
        #[arg(long)]
        start: String,
    },

    /// Insert demo registrations and feedback
    Seed {
        #[arg(long, env = "CONF_DB_URL", default_value = DEFAULT_DB_URL)]
        db: String,

        /// Number of demo attendees to register
        #[arg(long, default_value_t = 5)]
        attendees: usize,
    },

    /// Print per-session feedback statistics
    Analytics {
        /// Admin password
        #[arg(long)]
        password: String,

        #[arg(long, env = "CONF_DB_URL", default_value = DEFAULT_DB_URL)]
        db: String,
    },
}

impl Cli {
    /// The desktop UI is the default command.
    #[must_use]
    pub fn command_or_default(self) -> Command {
        self.command.unwrap_or_else(|| Command::Ui {
            db: std::env::var("CONF_DB_URL").unwrap_or_else(|_| DEFAULT_DB_URL.to_string()),
        })
    }
}
