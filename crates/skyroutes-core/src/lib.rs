//! Core query, filter and pagination logic for the skyroutes route
//! browser. Everything here is pure: the network boundary lives in
//! `skyroutes-sdk`.

pub mod filter_stage;
pub mod filters;
pub mod models;
pub mod pagination;
pub mod query_codec;

pub use filter_stage::Filterable;
pub use filters::{
    AggregateKey, AirlineSelector, CircularFilterState, DurationRange, EndpointFilters,
    FilterState, PatternFilter, QueryError, QueryMode, DEFAULT_CIRCULAR_LIMIT,
    MAX_CIRCULAR_DURATION, MAX_DURATION, MIN_DURATION,
};
pub use models::{
    Airline, AirlineKey, AirlinesResponse, Airport, AirportsResponse, CircularRouteRecord,
    CircularRoutesResponse, CountriesResponse, Country, PaginationMeta, PatternType, RecordError,
    RouteKey, RouteRecord, RoutesResponse, Segment,
};
pub use pagination::{MaterializedPage, PageWindow, ServerPage, DEFAULT_PAGE_LIMIT};
