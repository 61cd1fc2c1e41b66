use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use skyroutes_cli::config::Config;
use skyroutes_cli::output;
use skyroutes_sdk::schedule::{ScheduleClient, ScheduleConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Forward a schedule configuration to the generation service", long_about = None)]
struct Args {
    /// Schedule service URL (overrides SKYROUTES_SCHEDULE_API_URL)
    #[arg(long)]
    url: Option<String>,

    /// Path to a schedule configuration JSON file
    #[arg(long)]
    config: PathBuf,

    /// Validate the configuration without generating
    #[arg(long)]
    validate_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let env = Config::from_env();
    let base_url = args.url.clone().unwrap_or(env.schedule_api_url);

    let raw = std::fs::read_to_string(&args.config)
        .with_context(|| format!("reading {}", args.config.display()))?;
    let config: ScheduleConfig =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", args.config.display()))?;

    let client = ScheduleClient::new(base_url);

    let report = client.validate(&config).await?;
    println!("Validation report:");
    println!("{}", serde_json::to_string_pretty(&report)?);
    if args.validate_only {
        return Ok(());
    }

    println!(
        "Generating {}-day schedule for {} from {}...",
        config.days, config.airline_name, config.start_airport
    );
    let schedule = client.generate(&config).await?;
    output::print_schedule(&schedule);

    Ok(())
}
