//! Filter state for route and circular-route queries.
//!
//! A `FilterState` is an immutable snapshot of the search form. Its mode
//! classification decides the whole query shape: direct filters are
//! delegated to the listing API in one call, while an aggregate (omni)
//! key fans out into two directional calls merged client-side.

use thiserror::Error;

/// Duration slider bounds for the plain route search, in minutes.
pub const MIN_DURATION: u32 = 0;
pub const MAX_DURATION: u32 = 1440; // 24 hours

/// Upper duration bound for the circular-route search, in minutes.
pub const MAX_CIRCULAR_DURATION: u32 = 4320; // 3 days

/// Default result cap requested from the circular-route endpoint.
pub const DEFAULT_CIRCULAR_LIMIT: u32 = 20;

/// Inclusive duration range in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationRange {
    pub min: u32,
    pub max: u32,
}

impl DurationRange {
    /// Build a range, rejecting an inverted pair. This is the form-layer
    /// guard; the filter stage itself assumes a well-formed range.
    pub fn new(min: u32, max: u32) -> Result<Self, QueryError> {
        if min > max {
            return Err(QueryError::InvalidDurationRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, minutes: u32) -> bool {
        minutes >= self.min && minutes <= self.max
    }
}

/// The omni filter value: one airport or country matched as either
/// endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregateKey {
    Airport(String),
    Country(String),
}

/// Direct-mode endpoint filters, each delegated to the API as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointFilters {
    pub departure_iata: Option<String>,
    pub arrival_iata: Option<String>,
    pub departure_country: Option<String>,
    pub arrival_country: Option<String>,
}

/// Snapshot of the route-search form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Present when the query came from an omni link ("all routes for
    /// this airport/country"). Takes precedence over `endpoints`.
    pub aggregate: Option<AggregateKey>,
    pub endpoints: EndpointFilters,
    pub airline_name: Option<String>,
    /// `None` until the range control has been touched; once set, both
    /// bounds travel together through the URL.
    pub duration: Option<DurationRange>,
    /// One-shot "run the query on load" marker. Consumed at decode and
    /// never re-encoded, so a refresh does not re-trigger the query.
    pub auto_apply: bool,
}

/// How a query is executed against the listing API.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryMode<'a> {
    Direct(&'a EndpointFilters),
    Aggregate(&'a AggregateKey),
}

impl FilterState {
    pub fn mode(&self) -> QueryMode<'_> {
        match &self.aggregate {
            Some(key) => QueryMode::Aggregate(key),
            None => QueryMode::Direct(&self.endpoints),
        }
    }

    pub fn is_aggregate(&self) -> bool {
        self.aggregate.is_some()
    }
}

/// Shape filter for the circular-route search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PatternFilter {
    #[default]
    Both,
    Triangle,
    Arrow,
}

/// Snapshot of the circular-route search form. The airline is required;
/// name and numeric ID are kept side by side because a suggestion fills
/// both while a hand-typed value only fills the name.
#[derive(Debug, Clone, PartialEq)]
pub struct CircularFilterState {
    pub airline_name: Option<String>,
    pub airline_id: Option<i64>,
    pub start_airport: Option<String>,
    pub contains_airport: Option<String>,
    pub pattern: PatternFilter,
    pub duration: Option<DurationRange>,
    pub limit: u32,
    pub fetch_all: bool,
}

impl Default for CircularFilterState {
    fn default() -> Self {
        Self {
            airline_name: None,
            airline_id: None,
            start_airport: None,
            contains_airport: None,
            pattern: PatternFilter::default(),
            duration: None,
            limit: DEFAULT_CIRCULAR_LIMIT,
            fetch_all: false,
        }
    }
}

/// Resolved airline selector: the numeric ID wins when both are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AirlineSelector {
    Id(i64),
    Name(String),
}

impl CircularFilterState {
    /// The airline precondition: circular-route search requires an
    /// airline. Checked locally, before any network call.
    pub fn airline(&self) -> Result<AirlineSelector, QueryError> {
        if let Some(id) = self.airline_id {
            return Ok(AirlineSelector::Id(id));
        }
        match self.airline_name.as_deref() {
            Some(name) if !name.is_empty() => Ok(AirlineSelector::Name(name.to_string())),
            _ => Err(QueryError::AirlineRequired),
        }
    }
}

/// Local validation failures; these block submission and never reach the
/// network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("airline selection is required")]
    AirlineRequired,
    #[error("invalid duration range: min {min} exceeds max {max}")]
    InvalidDurationRange { min: u32, max: u32 },
}
