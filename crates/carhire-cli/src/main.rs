//! Car hire CLI - Command-line tool for the car hire booking API
//!
//! Looks up suppliers and locations, runs airport searches across every
//! supplier, and fetches or cancels bookings.

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use carhire_client::CarHireClient;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::commands::search::SearchArgs;
use crate::config::{Config, MergedConfig};
use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "carhire-cli")]
#[command(author, version, about = "Car hire booking CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// API domain, e.g. https://api.example.com
    #[arg(short, long, env = "CARHIRE_DOMAIN")]
    domain: Option<String>,

    /// SDK key
    #[arg(short, long, env = "CARHIRE_SDK_KEY", hide_env_values = true)]
    key: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "CARHIRE_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect and show the account alias
    Status,

    /// List suppliers
    Suppliers,

    /// List popular locations, or search locations by name
    Locations {
        /// Free text to search for
        query: Option<String>,
    },

    /// Search every supplier for vehicles at an airport
    Search(SearchArgs),

    /// Fetch or cancel a booking
    Booking {
        #[command(subcommand)]
        action: BookingAction,
    },

    /// Show the terms and conditions of a booking
    Terms {
        /// Supplier confirmation number
        #[arg(long)]
        confirmation: String,

        /// Driver's last name
        #[arg(long)]
        last_name: String,
    },
}

#[derive(Subcommand)]
enum BookingAction {
    /// Show a booking
    Fetch {
        /// Supplier confirmation number
        #[arg(long)]
        confirmation: String,

        /// Driver's last name
        #[arg(long)]
        last_name: String,
    },

    /// Cancel a booking
    Cancel {
        /// Supplier confirmation number
        #[arg(long)]
        confirmation: String,

        /// Driver's last name
        #[arg(long)]
        last_name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    // Load config file
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load().unwrap_or_default()
    };

    // Merge CLI args with config
    let merged = config.merge_with_args(
        cli.domain.as_deref(),
        cli.key.as_deref(),
        cli.output,
        cli.no_color,
    );

    let ctx = OutputContext::new(merged.output, merged.no_color, cli.quiet);
    let client = connect(&merged).await?;

    match &cli.command {
        Commands::Status => commands::status(&client, &ctx)?,

        Commands::Suppliers => commands::suppliers(&client, &ctx).await?,

        Commands::Locations { query } => {
            commands::locations(&client, query.as_deref(), &ctx).await?
        }

        Commands::Search(args) => commands::search(&client, args, &ctx).await?,

        Commands::Booking { action } => match action {
            BookingAction::Fetch {
                confirmation,
                last_name,
            } => commands::fetch_booking(&client, confirmation, last_name, &ctx).await?,
            BookingAction::Cancel {
                confirmation,
                last_name,
            } => commands::cancel_booking(&client, confirmation, last_name, &ctx).await?,
        },

        Commands::Terms {
            confirmation,
            last_name,
        } => commands::terms(&client, confirmation, last_name, &ctx).await?,
    }

    Ok(())
}

/// Create a client and run the bootstrap
async fn connect(merged: &MergedConfig) -> Result<CarHireClient> {
    let config = merged.client_config();
    tracing::debug!(domain = ?config.connection.domain, "Connecting");
    let client = CarHireClient::from_config(&config).context("Failed to create car hire client")?;
    client
        .setup_from_config(&config)
        .await
        .context("Failed to connect to the car hire API")?;
    Ok(client)
}
