//! In-memory listing source and fixtures shared by the engine tests.
#![allow(dead_code)]

use std::sync::Mutex;

use skyroutes_core::{
    CircularRouteRecord, CircularRoutesResponse, PaginationMeta, PatternType, RouteRecord,
    RoutesResponse,
};
use skyroutes_sdk::{ApiError, CircularRouteQuery, RouteQuery, RouteSource};

type RoutesHandler = Box<dyn Fn(&RouteQuery) -> Result<RoutesResponse, ApiError> + Send + Sync>;
type CircularHandler =
    Box<dyn Fn(&CircularRouteQuery) -> Result<CircularRoutesResponse, ApiError> + Send + Sync>;

/// Scriptable `RouteSource` that records every request it sees.
pub struct FakeSource {
    routes_handler: RoutesHandler,
    circular_handler: CircularHandler,
    pub route_calls: Mutex<Vec<RouteQuery>>,
    pub circular_calls: Mutex<Vec<CircularRouteQuery>>,
}

impl FakeSource {
    pub fn new(
        routes: impl Fn(&RouteQuery) -> Result<RoutesResponse, ApiError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            routes_handler: Box::new(routes),
            circular_handler: Box::new(|_| Ok(CircularRoutesResponse { results: Vec::new() })),
            route_calls: Mutex::new(Vec::new()),
            circular_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_circular(
        circular: impl Fn(&CircularRouteQuery) -> Result<CircularRoutesResponse, ApiError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        Self {
            routes_handler: Box::new(|_| Ok(routes_response(Vec::new(), 0))),
            circular_handler: Box::new(circular),
            route_calls: Mutex::new(Vec::new()),
            circular_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_route_calls(&self) -> Vec<RouteQuery> {
        self.route_calls.lock().unwrap().clone()
    }

    pub fn recorded_circular_calls(&self) -> Vec<CircularRouteQuery> {
        self.circular_calls.lock().unwrap().clone()
    }
}

impl RouteSource for FakeSource {
    async fn fetch_routes(&self, query: &RouteQuery) -> Result<RoutesResponse, ApiError> {
        self.route_calls.lock().unwrap().push(query.clone());
        (self.routes_handler)(query)
    }

    async fn fetch_circular_routes(
        &self,
        query: &CircularRouteQuery,
    ) -> Result<CircularRoutesResponse, ApiError> {
        self.circular_calls.lock().unwrap().push(query.clone());
        (self.circular_handler)(query)
    }
}

pub fn route(route_id: i64, departure: &str, arrival: &str) -> RouteRecord {
    RouteRecord {
        route_id,
        airline_id: Some(1),
        airline_iata: None,
        airline_name: "Test Air".to_string(),
        departure_iata: departure.to_string(),
        departure_city: format!("{departure} City"),
        departure_country: "Testland".to_string(),
        arrival_iata: arrival.to_string(),
        arrival_city: format!("{arrival} City"),
        arrival_country: "Testland".to_string(),
        duration_min: 90,
        distance_km: 700.0,
    }
}

pub fn named_route(route_id: i64, airline: &str, duration_min: u32) -> RouteRecord {
    RouteRecord {
        airline_name: airline.to_string(),
        duration_min,
        ..route(route_id, "LHR", "AMS")
    }
}

pub fn routes_response(routes: Vec<RouteRecord>, total: u64) -> RoutesResponse {
    RoutesResponse {
        routes,
        pagination: PaginationMeta { total },
    }
}

pub fn circular(total_duration_min: u32) -> CircularRouteRecord {
    CircularRouteRecord {
        airline_id: Some(1),
        pattern_type: PatternType::Triangle,
        route_pattern: "AMS-CDG-FRA-AMS".to_string(),
        start_airport: "AMS".to_string(),
        airports: vec!["AMS".into(), "CDG".into(), "FRA".into()],
        route_ids: vec![1, 2, 3],
        total_distance_km: 1500.0,
        total_duration_min,
        stops_count: 2,
        segments: Vec::new(),
    }
}

/// The collaborator-unavailable error used across failure tests.
pub fn unavailable() -> ApiError {
    ApiError::Status {
        status: 503,
        message: "service unavailable".to_string(),
    }
}
