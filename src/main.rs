//! Configuration Check - Main Entry Point
//!
//! Loads the bot configuration from the environment, validates it, and
//! prints a redacted summary. Any missing or malformed key aborts with a
//! nonzero exit code so a misconfigured bot never starts.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use storage_bot_config::config::{EnvSnapshot, FileStoreConfig, WasabiConfig};

/// Which deployment schema to load.
#[derive(ValueEnum, Clone, Copy, Debug)]
enum Deployment {
    /// File-store bot backed by a Telegram storage chat.
    FileStore,
    /// Wasabi upload bot with subscription gating.
    Wasabi,
}

/// Configuration checker for the storage bots.
#[derive(Parser, Debug)]
#[command(name = "config_check")]
#[command(about = "Load, validate, and summarize the bot configuration")]
#[command(version)]
struct Args {
    /// Deployment schema to check.
    #[arg(short, long, value_enum, default_value = "file-store")]
    deployment: Deployment,

    /// Path to the .env file for environment variables.
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Print the summary as JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Write an annotated .env template to the given path and exit.
    #[arg(long)]
    generate_env: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(&args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    if let Some(path) = &args.generate_env {
        return generate_env_template(path);
    }

    // Load environment variables
    if let Err(e) = dotenvy::from_filename(&args.env_file) {
        debug!("Could not load .env file ({}): {}", args.env_file, e);
    }

    let env = EnvSnapshot::from_process();

    let summary = match args.deployment {
        Deployment::FileStore => {
            let config = FileStoreConfig::from_env(&env)
                .context("File-store configuration is invalid")?;
            info!(
                "Configuration validated ({} admins, storage chat {})",
                config.core.admin_ids.len(),
                config.storage_chat_id
            );
            config.summary()
        }
        Deployment::Wasabi => {
            let config =
                WasabiConfig::from_env(&env).context("Wasabi configuration is invalid")?;
            info!("Configuration validated (endpoint: {})", config.endpoint_url());
            config.summary()
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{summary}");
    }

    Ok(())
}

/// Initializes the logging subsystem.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Writes an annotated .env template covering both deployments.
fn generate_env_template(path: &str) -> Result<()> {
    const TEMPLATE: &str = "\
# Telegram credentials (https://my.telegram.org)
API_ID=
API_HASH=
BOT_TOKEN=

# Comma-separated or JSON array of admin user ids
ADMIN_IDS=

# --- file-store deployment ---
# Chat id used as the file backing store (defaults to the first admin id)
#STORAGE_CHAT_ID=
# Maximum upload size in megabytes (default 2000)
#MAX_FILE_SIZE=2000
# Accepted media kinds (default document,video,audio)
#ALLOWED_FILE_TYPES=document,video,audio

# --- wasabi deployment ---
#WASABI_ACCESS_KEY=
#WASABI_SECRET_KEY=
#WASABI_BUCKET=wasabi-upload-bot
#WASABI_REGION=us-east-1
# Maximum upload size in bytes (default 4294967296)
#MAX_FILE_SIZE=4294967296
# Multipart chunk size in bytes (default 104857600)
#CHUNK_SIZE=104857600
#SUBSCRIPTION_PRICE=100
#SUBSCRIPTION_DAYS=30
#UPI_ID=
#UPI_NAME=

# --- shared options ---
#GPLINKS_API_KEY=
#AUTO_SHORTEN=true
#RENDER_URL=http://localhost:8000
";

    std::fs::write(path, TEMPLATE)
        .with_context(|| format!("Failed to write env template to {path}"))?;

    println!("✓ Env template written to: {path}");
    println!("\nTo use this checker:");
    println!("1. Copy the template to .env and fill in the required keys");
    println!("2. Run: config_check --deployment file-store (or wasabi)");

    Ok(())
}
