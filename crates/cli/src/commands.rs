//! Command dispatch

use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use bookings_domain::{BookingError, CreateBooking, CreateService};
use bookings_infra::BookingsApi;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::{BookingsCommand, Cli, Command, ServicesCommand};

/// Run the parsed command against `api` and print its JSON result.
pub async fn run(api: &BookingsApi, cli: &Cli) -> Result<()> {
    let command = cli.command.name();
    let started = Instant::now();

    let result = dispatch(api, cli).await;
    log_command_execution(command, started.elapsed(), result.as_ref().err());

    print_json(&result?)
}

async fn dispatch(api: &BookingsApi, cli: &Cli) -> Result<serde_json::Value> {
    let credentials = cli.session.credentials();

    if cli.command.requires_session() {
        if let Some(credentials) = &credentials {
            api.login(credentials).await.context("sign-in failed")?;
        }
    }

    let value = match &cli.command {
        Command::Health => to_value(api.health().await?)?,
        Command::Register => {
            let Some(credentials) = credentials else {
                bail!("register needs --email and --password");
            };
            to_value(api.register(&credentials).await?)?
        }
        Command::Login => {
            let Some(credentials) = credentials else {
                bail!("login needs --email and --password");
            };
            to_value(api.login(&credentials).await?)?
        }
        Command::Me => to_value(api.me().await?)?,
        Command::Logout => {
            api.logout().await?;
            serde_json::json!({ "ok": true })
        }
        Command::Bookings(command) => run_bookings(api, command).await?,
        Command::Services(command) => run_services(api, command).await?,
    };

    Ok(value)
}

async fn run_bookings(api: &BookingsApi, command: &BookingsCommand) -> Result<serde_json::Value> {
    match command {
        BookingsCommand::List(page) => to_value(api.list_bookings((*page).into()).await?),
        BookingsCommand::Get { id } => to_value(api.get_booking(*id).await?),
        BookingsCommand::Create(args) => {
            let booking = CreateBooking {
                service_id: args.service_id,
                start_time: args.start,
                end_time: args.end,
                notes: args.notes.clone(),
            };
            to_value(api.create_booking(&booking).await?)
        }
        BookingsCommand::Cancel { id } => to_value(api.cancel_booking(*id).await?),
    }
}

async fn run_services(api: &BookingsApi, command: &ServicesCommand) -> Result<serde_json::Value> {
    match command {
        ServicesCommand::List(page) => to_value(api.list_services((*page).into()).await?),
        ServicesCommand::Get { id } => to_value(api.get_service(*id).await?),
        ServicesCommand::Create(args) => {
            let service = CreateService {
                name: args.name.clone(),
                description: args.description.clone(),
                duration: args.duration,
                price: args.price,
            };
            to_value(api.create_service(&service).await?)
        }
    }
}

fn to_value<T: Serialize>(value: T) -> Result<serde_json::Value> {
    serde_json::to_value(value).context("failed to encode command output")
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Log the outcome of a command with structured fields.
fn log_command_execution(command: &str, elapsed: Duration, error: Option<&anyhow::Error>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(err) => {
            let error_type = err.downcast_ref::<BookingError>().map_or("cli", BookingError::label);
            warn!(command, duration_ms, error_type, "command_execution_failure");
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[tokio::test]
    async fn register_without_credentials_fails_before_any_request() {
        // Nothing listens on this port; the error must come from argument checks.
        let config = bookings_domain::ClientConfig {
            base_url: "http://127.0.0.1:9".into(),
            ..bookings_domain::ClientConfig::default()
        };
        let api = BookingsApi::from_config(&config).unwrap();
        let cli = Cli::try_parse_from(["bookings", "register"]).unwrap();

        let err = dispatch(&api, &cli).await.unwrap_err();

        assert!(err.to_string().contains("--email"));
    }

    #[test]
    fn to_value_serializes_payloads() {
        let value = to_value(bookings_domain::AuthAck { ok: true }).unwrap();
        assert_eq!(value, serde_json::json!({"ok": true}));
    }
}
