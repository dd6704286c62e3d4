//! Command-line definitions

use bookings_domain::{ClientConfig, Credentials, LogFormat, PageRequest};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "bookings")]
#[command(about = "Command-line client for the Bookings API", long_about = None)]
pub struct Cli {
    /// Base URL of the API (overrides config files and BOOKINGS_API_URL)
    #[arg(short = 'u', long, global = true)]
    pub base_url: Option<String>,

    /// Log output format
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Sign in with these credentials before running the command
    #[command(flatten)]
    pub session: SessionArgs,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&self, config: &mut ClientConfig) {
        if let Some(base_url) = &self.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
    }
}

/// Credentials used to open a session for the current invocation.
///
/// Session cookies only live as long as the process.
#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    #[arg(long, env = "BOOKINGS_EMAIL", global = true)]
    pub email: Option<String>,

    #[arg(long, env = "BOOKINGS_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,
}

impl SessionArgs {
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.email, &self.password) {
            (Some(email), Some(password)) => Some(Credentials::new(email, password)),
            _ => None,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the API is up
    Health,
    /// Create an account with --email and --password
    Register,
    /// Verify --email and --password against the API
    Login,
    /// Show the signed-in account
    Me,
    /// Sign in, then end the session
    Logout,
    /// Manage bookings
    #[command(subcommand)]
    Bookings(BookingsCommand),
    /// Browse and manage services
    #[command(subcommand)]
    Services(ServicesCommand),
}

impl Command {
    /// Stable name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Register => "register",
            Self::Login => "login",
            Self::Me => "me",
            Self::Logout => "logout",
            Self::Bookings(command) => match command {
                BookingsCommand::List(_) => "bookings::list",
                BookingsCommand::Get { .. } => "bookings::get",
                BookingsCommand::Create(_) => "bookings::create",
                BookingsCommand::Cancel { .. } => "bookings::cancel",
            },
            Self::Services(command) => match command {
                ServicesCommand::List(_) => "services::list",
                ServicesCommand::Get { .. } => "services::get",
                ServicesCommand::Create(_) => "services::create",
            },
        }
    }

    /// Whether the command needs a session opened first.
    pub fn requires_session(&self) -> bool {
        !matches!(self, Self::Health | Self::Register | Self::Login)
    }
}

#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    #[arg(long, default_value_t = 20)]
    pub limit: u32,
}

impl From<PageArgs> for PageRequest {
    fn from(args: PageArgs) -> Self {
        Self::new(args.page, args.limit)
    }
}

#[derive(Debug, Subcommand)]
pub enum BookingsCommand {
    /// List bookings
    List(PageArgs),
    /// Show one booking
    Get { id: Uuid },
    /// Book a service slot
    Create(CreateBookingArgs),
    /// Cancel a booking
    Cancel { id: Uuid },
}

#[derive(Debug, Args)]
pub struct CreateBookingArgs {
    #[arg(long)]
    pub service_id: Uuid,

    /// Start time (RFC 3339, e.g. 2025-10-20T09:00:00Z)
    #[arg(long)]
    pub start: DateTime<Utc>,

    /// End time (RFC 3339)
    #[arg(long)]
    pub end: DateTime<Utc>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    /// List services
    List(PageArgs),
    /// Show one service
    Get { id: Uuid },
    /// Create a service
    Create(CreateServiceArgs),
}

#[derive(Debug, Args)]
pub struct CreateServiceArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Duration in minutes
    #[arg(long)]
    pub duration: u32,

    #[arg(long)]
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_booking_creation() {
        let cli = Cli::try_parse_from([
            "bookings",
            "--base-url",
            "http://127.0.0.1:9000",
            "bookings",
            "create",
            "--service-id",
            "0192a3b4-0000-7000-8000-000000000001",
            "--start",
            "2025-10-20T09:00:00Z",
            "--end",
            "2025-10-20T10:00:00Z",
        ])
        .unwrap();

        assert_eq!(cli.command.name(), "bookings::create");
        assert!(cli.command.requires_session());
        let Command::Bookings(BookingsCommand::Create(args)) = cli.command else {
            panic!("expected bookings create");
        };
        assert!(args.end > args.start);
        assert_eq!(args.notes, None);
    }

    #[test]
    fn overrides_replace_loaded_values() {
        let cli = Cli::try_parse_from([
            "bookings",
            "health",
            "--base-url",
            "http://api.internal:8000",
            "--log-format",
            "json",
        ])
        .unwrap();
        let mut config = ClientConfig::default();

        cli.apply_overrides(&mut config);

        assert_eq!(config.base_url, "http://api.internal:8000");
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(!cli.command.requires_session());
    }

    #[test]
    fn credentials_need_both_fields() {
        let only_email = SessionArgs { email: Some("ada@example.com".into()), password: None };
        assert!(only_email.credentials().is_none());

        let both = SessionArgs {
            email: Some("ada@example.com".into()),
            password: Some("correct-horse".into()),
        };
        assert_eq!(both.credentials().unwrap().email, "ada@example.com");
    }

    #[test]
    fn page_args_default_to_first_page() {
        let cli = Cli::try_parse_from(["bookings", "services", "list"]).unwrap();
        let Command::Services(ServicesCommand::List(page)) = cli.command else {
            panic!("expected services list");
        };
        assert_eq!(PageRequest::from(page), PageRequest::new(1, 20));
    }
}
