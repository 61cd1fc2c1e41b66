//! HTTP client for the flight-route listing API.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use skyroutes_core::{
    Airline, AirlinesResponse, Airport, AirportsResponse, CircularRoutesResponse,
    CountriesResponse, Country, RoutesResponse,
};

use crate::error::ApiError;
use crate::source::{CircularRouteQuery, RouteQuery, RouteSource};

/// Client for the route listing service.
pub struct ListingClient {
    base_url: String,
    client: Client,
}

impl ListingClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).query(query).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, message });
        }
        response.json::<T>().await.map_err(ApiError::Decode)
    }

    /// Full airport collection.
    pub async fn fetch_airports(&self) -> Result<Vec<Airport>, ApiError> {
        let response: AirportsResponse = self.get_json("/airports", &[] as &[(&str, &str)]).await?;
        Ok(response.airports)
    }

    /// Full airline collection.
    pub async fn fetch_airlines(&self) -> Result<Vec<Airline>, ApiError> {
        let response: AirlinesResponse = self.get_json("/airlines", &[] as &[(&str, &str)]).await?;
        Ok(response.airlines)
    }

    /// Full country collection.
    pub async fn fetch_countries(&self) -> Result<Vec<Country>, ApiError> {
        let response: CountriesResponse =
            self.get_json("/countries", &[] as &[(&str, &str)]).await?;
        Ok(response.countries)
    }
}

impl RouteSource for ListingClient {
    async fn fetch_routes(&self, query: &RouteQuery) -> Result<RoutesResponse, ApiError> {
        let mut response: RoutesResponse = self.get_json("/routes", query).await?;
        // Parse-don't-trust: quarantine malformed rows here so nothing
        // untyped reaches the merge and filter stages.
        response.routes.retain(|route| match route.validate() {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(route_id = route.route_id, %err, "discarding malformed route record");
                false
            }
        });
        Ok(response)
    }

    async fn fetch_circular_routes(
        &self,
        query: &CircularRouteQuery,
    ) -> Result<CircularRoutesResponse, ApiError> {
        self.get_json("/circular-routes", query).await
    }
}
