use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use skyroutes_cli::config::Config;
use skyroutes_cli::output;
use skyroutes_core::{
    query_codec, CircularFilterState, DurationRange, PatternFilter, MAX_CIRCULAR_DURATION,
    MIN_DURATION,
};
use skyroutes_sdk::{CircularBrowser, ListingClient, QueryStatus};

#[derive(Parser, Debug)]
#[command(version, about = "Search circular (multi-leg) routes", long_about = None)]
struct Args {
    /// Listing API URL (overrides SKYROUTES_API_URL)
    #[arg(long)]
    url: Option<String>,

    /// Airline name (required unless --airline-id or --query is given)
    #[arg(long)]
    airline: Option<String>,

    /// Numeric airline ID; wins over --airline when both are set
    #[arg(long)]
    airline_id: Option<i64>,

    /// Restrict to patterns starting at this airport
    #[arg(long)]
    start_airport: Option<String>,

    /// Restrict to patterns passing through this airport
    #[arg(long)]
    contains: Option<String>,

    /// Pattern shape: triangle or arrow (default: both)
    #[arg(long)]
    pattern: Option<String>,

    #[arg(long)]
    min_duration: Option<u32>,

    #[arg(long)]
    max_duration: Option<u32>,

    /// Server-side result cap when not fetching everything
    #[arg(long, default_value_t = 20)]
    limit: u32,

    /// Fetch the complete result set and page it locally
    #[arg(long)]
    all: bool,

    /// Decode all filters from a saved query string instead of flags
    #[arg(long)]
    query: Option<String>,

    /// 1-based page of results to display (clamped to the last page)
    #[arg(long, default_value_t = 1)]
    page: usize,

    #[arg(long, default_value_t = 20)]
    page_size: usize,
}

fn build_filters(args: &Args) -> Result<CircularFilterState> {
    if let Some(query) = &args.query {
        return Ok(query_codec::decode_circular(query));
    }

    let pattern = match args.pattern.as_deref() {
        None | Some("both") => PatternFilter::Both,
        Some("triangle") => PatternFilter::Triangle,
        Some("arrow") => PatternFilter::Arrow,
        Some(other) => bail!("unknown pattern type {other:?} (expected triangle or arrow)"),
    };
    let duration = if args.min_duration.is_some() || args.max_duration.is_some() {
        Some(DurationRange::new(
            args.min_duration.unwrap_or(MIN_DURATION),
            args.max_duration.unwrap_or(MAX_CIRCULAR_DURATION),
        )?)
    } else {
        None
    };

    Ok(CircularFilterState {
        airline_name: args.airline.clone(),
        airline_id: args.airline_id,
        start_airport: args.start_airport.clone(),
        contains_airport: args.contains.clone(),
        pattern,
        duration,
        limit: args.limit,
        fetch_all: args.all,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    let base_url = args.url.clone().unwrap_or(config.api_url);

    let filters = build_filters(&args)?;
    let shareable = query_codec::encode_circular(&filters);
    if !shareable.is_empty() {
        println!("Query: ?{shareable}");
    }

    let mut browser = CircularBrowser::new(ListingClient::new(base_url));
    browser.set_page_size(args.page_size);
    browser.submit(filters).await?;
    browser.page().go_to(args.page);

    match browser.status() {
        QueryStatus::Failed(message) => {
            eprintln!("Failed to load circular routes: {message}");
            std::process::exit(1);
        }
        _ => {
            if browser.total() == 0 {
                println!("No circular routes found.");
                return Ok(());
            }
            output::print_circular_routes(browser.visible());
            println!(
                "Page {} of {} ({} circular routes)",
                browser.window().page(),
                browser.window().total_pages(),
                browser.total(),
            );
        }
    }

    Ok(())
}
