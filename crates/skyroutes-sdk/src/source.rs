//! Trait seam over the route listing collaborator.
//!
//! The HTTP client implements [`RouteSource`]; tests substitute an
//! in-memory source so the aggregation and session logic can be driven
//! without a network.

use serde::Serialize;
use skyroutes_core::{
    AirlineSelector, CircularFilterState, CircularRoutesResponse, FilterState, PatternFilter,
    PatternType, QueryError, QueryMode, RoutesResponse, MAX_CIRCULAR_DURATION, MIN_DURATION,
};

use crate::error::ApiError;

/// Query parameters for `GET /routes`. Fields map one-to-one onto the
/// listing API's query string; `None` omits the key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_iata: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_iata: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airline_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl RouteQuery {
    /// Build the single direct-mode request: every filter the form set
    /// is delegated to the API, plus the pagination window.
    pub fn from_filters(filters: &FilterState, offset: u32, limit: u32) -> Self {
        let endpoints = match filters.mode() {
            QueryMode::Direct(endpoints) => endpoints.clone(),
            // Aggregate mode never builds a direct query; the aggregator
            // owns its own directional requests.
            QueryMode::Aggregate(_) => Default::default(),
        };
        Self {
            departure_iata: endpoints.departure_iata,
            arrival_iata: endpoints.arrival_iata,
            departure_country: endpoints.departure_country,
            arrival_country: endpoints.arrival_country,
            airline_name: filters.airline_name.clone(),
            min_duration: filters.duration.map(|r| r.min),
            max_duration: filters.duration.map(|r| r.max),
            limit: Some(limit),
            offset: Some(offset),
        }
    }
}

/// Query parameters for `GET /circular-routes`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CircularRouteQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airline_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airline_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_airport: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_type: Option<PatternType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains_airport: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all: Option<bool>,
}

impl CircularRouteQuery {
    /// Build the circular-route request, enforcing the airline
    /// precondition locally. Duration bounds are only forwarded when
    /// they actually narrow the range.
    pub fn from_filters(filters: &CircularFilterState) -> Result<Self, QueryError> {
        let (airline_id, airline_name) = match filters.airline()? {
            AirlineSelector::Id(id) => (Some(id), None),
            AirlineSelector::Name(name) => (None, Some(name)),
        };
        let min_duration = filters
            .duration
            .map(|r| r.min)
            .filter(|min| *min > MIN_DURATION);
        let max_duration = filters
            .duration
            .map(|r| r.max)
            .filter(|max| *max < MAX_CIRCULAR_DURATION);
        Ok(Self {
            airline_id,
            airline_name,
            start_airport: filters.start_airport.clone(),
            pattern_type: match filters.pattern {
                PatternFilter::Both => None,
                PatternFilter::Triangle => Some(PatternType::Triangle),
                PatternFilter::Arrow => Some(PatternType::Arrow),
            },
            min_duration,
            max_duration,
            contains_airport: filters.contains_airport.clone(),
            limit: (!filters.fetch_all).then_some(filters.limit),
            all: filters.fetch_all.then_some(true),
        })
    }
}

/// Read-only access to the route listing collaborator.
#[allow(async_fn_in_trait)]
pub trait RouteSource {
    async fn fetch_routes(&self, query: &RouteQuery) -> Result<RoutesResponse, ApiError>;

    async fn fetch_circular_routes(
        &self,
        query: &CircularRouteQuery,
    ) -> Result<CircularRoutesResponse, ApiError>;
}
