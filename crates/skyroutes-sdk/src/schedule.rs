//! Pass-through client for the external schedule-generation service.
//!
//! The service owns the generation algorithm; this side only forwards a
//! configuration object and decodes the returned schedule.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HaulPreferences {
    pub short: bool,
    pub medium: bool,
    pub long: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HaulWeighting {
    pub short: f64,
    pub medium: f64,
    pub long: f64,
}

/// Daily operating window, "HH:MM" local times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperatingHours {
    pub start: String,
    pub end: String,
}

/// Configuration object forwarded verbatim to the generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub airline_id: i64,
    pub airline_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline_iata: Option<String>,
    pub start_airport: String,
    pub days: u32,
    pub haul_preferences: HaulPreferences,
    pub haul_weighting: HaulWeighting,
    pub prefer_single_leg_day_ratio: f64,
    pub operating_hours: OperatingHours,
    pub minimum_rest_hours_between_long_haul: u32,
    pub repetition_mode: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HaulType {
    Short,
    Medium,
    Long,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightLeg {
    pub departure_airport: String,
    pub arrival_airport: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub haul_type: HaulType,
    pub duration_min: u32,
    pub route_id: i64,
    #[serde(default)]
    pub departure_city: Option<String>,
    #[serde(default)]
    pub departure_country: Option<String>,
    #[serde(default)]
    pub arrival_city: Option<String>,
    #[serde(default)]
    pub arrival_country: Option<String>,
    #[serde(default)]
    pub airline_iata: Option<String>,
    #[serde(default)]
    pub airline_name: Option<String>,
    #[serde(default)]
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: u32,
    pub date: String,
    pub legs: Vec<FlightLeg>,
    pub overnight_location: String,
    #[serde(default)]
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSchedule {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub config: ScheduleConfig,
    pub days: Vec<DaySchedule>,
}

/// HTTP client for the schedule-generation service.
pub struct ScheduleClient {
    base_url: String,
    client: Client,
}

impl ScheduleClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            // Generation walks the whole route graph; give it more room
            // than a listing call.
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Ask the service to validate a configuration without generating.
    /// The report shape is owned by the service and passed through
    /// untyped.
    pub async fn validate(&self, config: &ScheduleConfig) -> Result<Value, ApiError> {
        self.post_json("/validate", config).await
    }

    /// Generate a schedule from the configuration.
    pub async fn generate(&self, config: &ScheduleConfig) -> Result<GeneratedSchedule, ApiError> {
        self.post_json("/generate", config).await
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        config: &ScheduleConfig,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(&url).json(config).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, message });
        }
        response.json::<T>().await.map_err(ApiError::Decode)
    }
}
