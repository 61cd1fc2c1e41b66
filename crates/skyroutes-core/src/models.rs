//! Wire-level data models for the flight-route listing API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single directed flight route as returned by the listing API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRecord {
    pub route_id: i64,
    /// Numeric airline ID; older dataset rows carry only the name.
    #[serde(default)]
    pub airline_id: Option<i64>,
    #[serde(default)]
    pub airline_iata: Option<String>,
    pub airline_name: String,
    pub departure_iata: String,
    pub departure_city: String,
    pub departure_country: String,
    pub arrival_iata: String,
    pub arrival_city: String,
    pub arrival_country: String,
    pub duration_min: u32,
    pub distance_km: f64,
}

/// Airline component of a route's identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AirlineKey {
    Id(i64),
    Name(String),
}

/// Identity key used for deduplication across the two directional result
/// sets. `route_id` is not guaranteed globally unique across airlines in
/// the source data, so identity is the (route, airline) pair; the numeric
/// airline ID is preferred and the name is the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub route_id: i64,
    pub airline: AirlineKey,
}

impl RouteRecord {
    pub fn key(&self) -> RouteKey {
        let airline = match self.airline_id {
            Some(id) => AirlineKey::Id(id),
            None => AirlineKey::Name(self.airline_name.clone()),
        };
        RouteKey {
            route_id: self.route_id,
            airline,
        }
    }

    /// Validate a record at the ingestion boundary. Records that fail are
    /// quarantined by the client and never reach the merge or filter
    /// stages.
    pub fn validate(&self) -> Result<(), RecordError> {
        validate_iata(&self.departure_iata)?;
        validate_iata(&self.arrival_iata)?;
        if !self.distance_km.is_finite() || self.distance_km < 0.0 {
            return Err(RecordError::Distance(self.distance_km));
        }
        Ok(())
    }
}

fn validate_iata(code: &str) -> Result<(), RecordError> {
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(RecordError::Iata(code.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("invalid IATA code {0:?}")]
    Iata(String),
    #[error("invalid distance {0}")]
    Distance(f64),
}

/// Shape of a closed multi-leg pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    /// A-B-C-A
    Triangle,
    /// A-B-C-B-A
    Arrow,
}

/// One directed leg of a circular route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// 1-based traversal order; assumed contiguous, not validated here.
    pub segment_order: u32,
    pub route_id: i64,
    pub departure_iata: String,
    pub departure_name: String,
    pub departure_city: String,
    pub departure_country: String,
    pub arrival_iata: String,
    pub arrival_name: String,
    pub arrival_city: String,
    pub arrival_country: String,
    pub distance_km: f64,
    pub duration_min: u32,
}

/// A closed multi-leg pattern flown by one airline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircularRouteRecord {
    #[serde(default)]
    pub airline_id: Option<i64>,
    pub pattern_type: PatternType,
    pub route_pattern: String,
    pub start_airport: String,
    pub airports: Vec<String>,
    pub route_ids: Vec<i64>,
    pub total_distance_km: f64,
    pub total_duration_min: u32,
    pub stops_count: u32,
    pub segments: Vec<Segment>,
}

/// Pagination metadata attached to a `/routes` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteRecord>,
    pub pagination: PaginationMeta,
}

/// `/circular-routes` carries no pagination metadata; callers paginate
/// the result set locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircularRoutesResponse {
    pub results: Vec<CircularRouteRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airport {
    pub iata: String,
    pub name: String,
    pub city_name: String,
    pub country: String,
    #[serde(default)]
    pub continent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Airline {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub iata: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    pub country: String,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub continent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportsResponse {
    pub airports: Vec<Airport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirlinesResponse {
    pub airlines: Vec<Airline>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountriesResponse {
    pub countries: Vec<Country>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(route_id: i64, airline_id: Option<i64>, airline_name: &str) -> RouteRecord {
        RouteRecord {
            route_id,
            airline_id,
            airline_iata: None,
            airline_name: airline_name.to_string(),
            departure_iata: "LHR".to_string(),
            departure_city: "London".to_string(),
            departure_country: "United Kingdom".to_string(),
            arrival_iata: "JFK".to_string(),
            arrival_city: "New York".to_string(),
            arrival_country: "United States".to_string(),
            duration_min: 420,
            distance_km: 5541.0,
        }
    }

    #[test]
    fn key_prefers_airline_id() {
        let by_id = record(7, Some(42), "British Airways");
        assert_eq!(
            by_id.key(),
            RouteKey {
                route_id: 7,
                airline: AirlineKey::Id(42)
            }
        );

        let by_name = record(7, None, "British Airways");
        assert_eq!(
            by_name.key(),
            RouteKey {
                route_id: 7,
                airline: AirlineKey::Name("British Airways".to_string())
            }
        );
    }

    #[test]
    fn same_route_id_different_airline_is_distinct() {
        let a = record(7, Some(1), "A");
        let b = record(7, Some(2), "B");
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn validate_rejects_bad_iata() {
        let mut bad = record(1, None, "X");
        bad.departure_iata = "LHRX".to_string();
        assert_eq!(
            bad.validate(),
            Err(RecordError::Iata("LHRX".to_string()))
        );

        let mut empty = record(1, None, "X");
        empty.arrival_iata = String::new();
        assert!(empty.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_distance() {
        let mut bad = record(1, None, "X");
        bad.distance_km = -1.0;
        assert!(matches!(bad.validate(), Err(RecordError::Distance(_))));
    }

    #[test]
    fn routes_response_parses_api_payload() {
        let payload = r#"{
            "routes": [{
                "route_id": 101,
                "airline_iata": "BA",
                "airline_name": "British Airways",
                "departure_iata": "LHR",
                "departure_city": "London",
                "departure_country": "United Kingdom",
                "arrival_iata": "AMS",
                "arrival_city": "Amsterdam",
                "arrival_country": "Netherlands",
                "duration_min": 80,
                "distance_km": 371.2
            }],
            "pagination": { "total": 1 }
        }"#;
        let parsed: RoutesResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.routes.len(), 1);
        assert_eq!(parsed.routes[0].airline_id, None);
        assert_eq!(parsed.pagination.total, 1);
        assert!(parsed.routes[0].validate().is_ok());
    }

    #[test]
    fn pattern_type_uses_lowercase_wire_names() {
        let parsed: PatternType = serde_json::from_str("\"triangle\"").unwrap();
        assert_eq!(parsed, PatternType::Triangle);
        assert_eq!(serde_json::to_string(&PatternType::Arrow).unwrap(), "\"arrow\"");
    }
}
