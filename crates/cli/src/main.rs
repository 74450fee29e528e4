//! DryFruto CLI - Database migrations and catalog management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the site schema and tables
//! dryfruto-cli migrate
//!
//! # Load products from a YAML file (create or replace by slug)
//! dryfruto-cli seed products catalog.yaml
//!
//! # Print the effective site settings as JSON
//! dryfruto-cli settings show
//!
//! # Resolve the price of one pack size
//! dryfruto-cli price california-almonds 500g
//! ```
//!
//! All commands read `ADMIN_DATABASE_URL` (or `DATABASE_URL`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dryfruto-cli")]
#[command(author, version, about = "DryFruto CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database from files
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Inspect site settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Resolve the price of a product pack size
    Price {
        /// Product slug
        slug: String,

        /// Size key (100g, 250g, 500g, 1kg, 2kg, 5kg)
        size: String,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Create or replace products listed in a YAML file
    Products {
        /// Path to the YAML file
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the effective settings the storefront would serve
    Show,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { target } => match target {
            SeedTarget::Products { file } => commands::seed::products(&file).await?,
        },
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show().await?,
        },
        Commands::Price { slug, size } => commands::price::show(&slug, &size).await?,
    }
    Ok(())
}
