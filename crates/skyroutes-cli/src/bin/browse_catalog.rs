use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use skyroutes_cli::config::Config;
use skyroutes_core::{query_codec, AggregateKey, FilterState};
use skyroutes_sdk::ListingClient;

#[derive(Parser, Debug)]
#[command(version, about = "Browse the airport, airline and country catalogs", long_about = None)]
struct Args {
    /// Listing API URL (overrides SKYROUTES_API_URL)
    #[arg(long)]
    url: Option<String>,

    /// Catalog to list: airports, airlines or countries
    #[arg(long, default_value = "airports")]
    kind: String,

    /// Also print a shareable route query for each row
    #[arg(long)]
    with_links: bool,
}

/// The query a catalog row links to: the row's key as an omni filter,
/// marked to run immediately on load.
fn route_link(filters: &FilterState) -> String {
    format!("?{}&auto_apply=true", query_codec::encode(filters))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    let base_url = args.url.clone().unwrap_or(config.api_url);
    let client = ListingClient::new(base_url);

    match args.kind.as_str() {
        "airports" => {
            for airport in client.fetch_airports().await? {
                println!(
                    "{}  {} ({}, {})",
                    airport.iata, airport.name, airport.city_name, airport.country
                );
                if args.with_links {
                    let filters = FilterState {
                        aggregate: Some(AggregateKey::Airport(airport.iata.clone())),
                        ..FilterState::default()
                    };
                    println!("    routes: {}", route_link(&filters));
                }
            }
        }
        "airlines" => {
            for airline in client.fetch_airlines().await? {
                match &airline.iata {
                    Some(iata) => println!("{}  [{}]", airline.name, iata),
                    None => println!("{}", airline.name),
                }
                if args.with_links {
                    let filters = FilterState {
                        airline_name: Some(airline.name.clone()),
                        ..FilterState::default()
                    };
                    println!("    routes: {}", route_link(&filters));
                }
            }
        }
        "countries" => {
            for country in client.fetch_countries().await? {
                println!(
                    "{}  {}",
                    country.country,
                    country.continent.as_deref().unwrap_or("-")
                );
                if args.with_links {
                    let filters = FilterState {
                        aggregate: Some(AggregateKey::Country(country.country.clone())),
                        ..FilterState::default()
                    };
                    println!("    routes: {}", route_link(&filters));
                }
            }
        }
        other => bail!("unknown catalog {other:?} (expected airports, airlines or countries)"),
    }

    Ok(())
}
