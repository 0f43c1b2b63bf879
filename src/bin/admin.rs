//! CLI administration tool for shorty.
//!
//! Works directly against the configured PostgreSQL store, without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Register a URL (prompts when the URL is omitted)
//! cargo run --bin admin -- shorten example.com/some/page
//!
//! # Look up a code
//! cargo run --bin admin -- resolve aB3dE
//!
//! # Count mappings
//! cargo run --bin admin -- stats
//!
//! # Check the store connection
//! cargo run --bin admin -- db check
//! ```
//!
//! Reads the same environment variables as the server (see `shorty::config`).

use shorty::application::services::{RegistrationService, ResolutionService};
use shorty::config::{self, StoreBackend};
use shorty::infrastructure::cache::NullCache;
use shorty::server::{StoreHandle, connect_store};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::sync::Arc;

/// CLI tool for managing shorty.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a destination URL and print its short code
    Shorten {
        /// URL to shorten (prompted for when omitted)
        url: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Print the destination of a short code
    Resolve {
        /// Short code to look up
        code: String,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check store connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    if config.store_backend == StoreBackend::Memory {
        bail!("The admin tool needs a persistent store; set STORE_BACKEND=postgres");
    }

    let handle = connect_store(&config).await?;

    let result = match cli.command {
        Commands::Shorten { url, yes } => {
            let service = RegistrationService::new(
                handle.store.clone(),
                config.short_code_length,
                config.code_insert_attempts,
            );
            shorten(&service, url, yes).await
        }
        Commands::Resolve { code } => {
            let service = ResolutionService::new(
                handle.store.clone(),
                Arc::new(NullCache::new()),
                config.fallback_url.clone(),
            );
            resolve(&service, &code).await
        }
        Commands::Stats => stats(&handle).await,
        Commands::Db {
            action: DbAction::Check,
        } => db_check(&handle).await,
    };

    handle.close().await;
    result
}

/// Registers a URL after an optional confirmation.
async fn shorten(service: &RegistrationService, url: Option<String>, yes: bool) -> Result<()> {
    println!("{}", "Shorten URL".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new().with_prompt("URL").interact_text()?,
    };

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Register {}?", url))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let mapping = service
        .register(&url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to register URL: {}", e))?;

    println!();
    println!("{}", "Registered".green().bold());
    println!("  Code:        {}", mapping.code.bright_yellow().bold());
    println!("  Destination: {}", mapping.destination.cyan());
    println!();

    Ok(())
}

async fn resolve(service: &ResolutionService, code: &str) -> Result<()> {
    let mapping = service
        .lookup(code)
        .await
        .map_err(|e| anyhow::anyhow!("Lookup failed: {}", e))?;

    match mapping {
        Some(mapping) => {
            println!("  {} -> {}", code.bright_yellow(), mapping.destination.cyan());
            println!(
                "  Created: {}",
                mapping
                    .created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
        }
        None => {
            println!("  {} {}", code.bright_yellow(), "not found".red());
            println!(
                "  Visitors are redirected to {}",
                service.fallback_url().bright_black()
            );
        }
    }

    Ok(())
}

async fn stats(handle: &StoreHandle) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let count = handle
        .store
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count mappings: {}", e))?;

    println!(
        "  Mappings: {}",
        count.to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn db_check(handle: &StoreHandle) -> Result<()> {
    match handle.store.ping().await {
        Ok(()) => {
            println!("{}", "Store connection OK".green().bold());
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "Store connection failed:".red().bold(), e);
            bail!("store check failed")
        }
    }
}
