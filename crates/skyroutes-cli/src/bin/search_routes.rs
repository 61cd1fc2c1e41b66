use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use skyroutes_cli::config::Config;
use skyroutes_cli::output;
use skyroutes_core::{
    query_codec, AggregateKey, DurationRange, EndpointFilters, FilterState, MAX_DURATION,
    MIN_DURATION,
};
use skyroutes_sdk::{ListingClient, QueryStatus, RouteBrowser};

#[derive(Parser, Debug)]
#[command(version, about = "Search flight routes", long_about = None)]
struct Args {
    /// Listing API URL (overrides SKYROUTES_API_URL)
    #[arg(long)]
    url: Option<String>,

    /// Airport IATA code matched as either origin or destination.
    /// Takes precedence over the directional filters below.
    #[arg(long)]
    airport: Option<String>,

    /// Country matched as either origin or destination
    #[arg(long)]
    any_country: Option<String>,

    /// Departure airport IATA code
    #[arg(long)]
    departure: Option<String>,

    /// Arrival airport IATA code
    #[arg(long)]
    arrival: Option<String>,

    #[arg(long)]
    departure_country: Option<String>,

    #[arg(long)]
    arrival_country: Option<String>,

    /// Airline name substring
    #[arg(long)]
    airline: Option<String>,

    /// Minimum route duration in minutes
    #[arg(long)]
    min_duration: Option<u32>,

    /// Maximum route duration in minutes
    #[arg(long)]
    max_duration: Option<u32>,

    /// Decode all filters from a saved query string instead of flags
    #[arg(long)]
    query: Option<String>,

    /// 1-based page of results to display
    #[arg(long, default_value_t = 1)]
    page: usize,

    #[arg(long, default_value_t = 20)]
    page_size: usize,
}

fn build_filters(args: &Args) -> Result<FilterState> {
    if let Some(query) = &args.query {
        return Ok(query_codec::decode(query));
    }

    let aggregate = match (&args.airport, &args.any_country) {
        (Some(iata), _) => Some(AggregateKey::Airport(iata.clone())),
        (None, Some(country)) => Some(AggregateKey::Country(country.clone())),
        (None, None) => None,
    };
    let duration = if args.min_duration.is_some() || args.max_duration.is_some() {
        Some(DurationRange::new(
            args.min_duration.unwrap_or(MIN_DURATION),
            args.max_duration.unwrap_or(MAX_DURATION),
        )?)
    } else {
        None
    };

    Ok(FilterState {
        aggregate,
        endpoints: EndpointFilters {
            departure_iata: args.departure.clone(),
            arrival_iata: args.arrival.clone(),
            departure_country: args.departure_country.clone(),
            arrival_country: args.arrival_country.clone(),
        },
        airline_name: args.airline.clone(),
        duration,
        auto_apply: false,
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
    let shareable = query_codec::encode(&filters);
    if !shareable.is_empty() {
        println!("Query: ?{shareable}");
    }

    let mut browser = RouteBrowser::new(ListingClient::new(base_url));
    browser.set_page_size(args.page_size);
    browser.submit(filters).await?;
    if args.page > 1 {
        browser.go_to_page(args.page).await;
    }

    match browser.status() {
        QueryStatus::Failed(message) => {
            eprintln!("Failed to load routes: {message}");
            std::process::exit(1);
        }
        _ => {
            if browser.visible().is_empty() {
                println!("No routes found matching your criteria.");
                return Ok(());
            }
            output::print_routes(browser.visible());
            println!("{}", output::page_summary(browser.window(), browser.visible().len()));
            if browser.truncated() {
                println!(
                    "Note: one of the directional fetches hit its page cap; \
                     the merged set may be incomplete."
                );
            }
        }
    }

    Ok(())
}
