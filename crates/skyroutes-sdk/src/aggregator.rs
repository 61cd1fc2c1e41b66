//! Bi-directional route aggregation.
//!
//! The listing API only supports single-direction predicates ("departure
//! is X" or "arrival is X"), so an "either endpoint" query fans out one
//! departure-bound and one arrival-bound request, merges the two result
//! sets and removes duplicates.

use std::collections::HashSet;

use skyroutes_core::{AggregateKey, RouteRecord};

use crate::error::ApiError;
use crate::source::{RouteQuery, RouteSource};

/// Page size requested from each directional call. The listing API has
/// no unbounded fetch, so sides with more matches than this are
/// truncated; see [`AggregateSet::truncated`].
pub const DIRECTIONAL_PAGE_CAP: u32 = 100;

/// Merged result of one aggregate query.
#[derive(Debug, Clone)]
pub struct AggregateSet {
    pub routes: Vec<RouteRecord>,
    /// Set when either directional call reported more matches than the
    /// page cap, i.e. the merged set is incomplete.
    pub truncated: bool,
}

#[derive(Clone, Copy)]
enum Direction {
    Departure,
    Arrival,
}

fn directional_query(key: &AggregateKey, direction: Direction) -> RouteQuery {
    let mut query = RouteQuery {
        limit: Some(DIRECTIONAL_PAGE_CAP),
        offset: Some(0),
        ..RouteQuery::default()
    };
    match (key, direction) {
        (AggregateKey::Airport(iata), Direction::Departure) => {
            query.departure_iata = Some(iata.clone());
        }
        (AggregateKey::Airport(iata), Direction::Arrival) => {
            query.arrival_iata = Some(iata.clone());
        }
        (AggregateKey::Country(name), Direction::Departure) => {
            query.departure_country = Some(name.clone());
        }
        (AggregateKey::Country(name), Direction::Arrival) => {
            query.arrival_country = Some(name.clone());
        }
    }
    query
}

/// Fetch every route touching `key` as either endpoint (up to the page
/// cap per side).
///
/// The two directional calls run concurrently and the merge starts only
/// once both have resolved. If either call fails the other is dropped
/// mid-flight and the whole query fails; there is no partial-result
/// mode.
pub async fn fetch_bidirectional<S: RouteSource>(
    source: &S,
    key: &AggregateKey,
) -> Result<AggregateSet, ApiError> {
    let departure_query = directional_query(key, Direction::Departure);
    let arrival_query = directional_query(key, Direction::Arrival);
    let (departure, arrival) = tokio::try_join!(
        source.fetch_routes(&departure_query),
        source.fetch_routes(&arrival_query),
    )?;

    let cap = u64::from(DIRECTIONAL_PAGE_CAP);
    let truncated = departure.pagination.total > cap || arrival.pagination.total > cap;
    if truncated {
        tracing::warn!(
            departure_total = departure.pagination.total,
            arrival_total = arrival.pagination.total,
            cap,
            "directional page cap exceeded; merged set is truncated"
        );
    }

    Ok(AggregateSet {
        routes: merge_dedup(departure.routes, arrival.routes),
        truncated,
    })
}

/// Concatenate the two directional result sets, keeping the first
/// occurrence of each identity key. Departure-bound results come first
/// and therefore win ties.
pub fn merge_dedup(departure: Vec<RouteRecord>, arrival: Vec<RouteRecord>) -> Vec<RouteRecord> {
    let mut seen = HashSet::with_capacity(departure.len() + arrival.len());
    let mut merged = Vec::with_capacity(departure.len() + arrival.len());
    for route in departure.into_iter().chain(arrival) {
        if seen.insert(route.key()) {
            merged.push(route);
        }
    }
    merged
}
