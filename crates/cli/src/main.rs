//! `bookings` command-line client
//!
//! Configuration comes from `.env`, the environment, config files and finally
//! the command line, in increasing order of precedence.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;
mod commands;

use anyhow::{Context, Result};
use bookings_infra::{config, init_tracing, BookingsApi};
use clap::Parser;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = config::load().context("failed to load configuration")?;
    cli.apply_overrides(&mut config);
    config.validate().context("invalid configuration")?;

    init_tracing(config.log_format)?;
    tracing::debug!(base_url = %config.base_url, command = cli.command.name(), "starting");

    let api = BookingsApi::from_config(&config)?;
    commands::run(&api, &cli).await
}
