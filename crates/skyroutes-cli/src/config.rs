//! CLI configuration from environment.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub schedule_api_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("SKYROUTES_API_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            schedule_api_url: env::var("SKYROUTES_SCHEDULE_API_URL")
                .unwrap_or_else(|_| "http://localhost:3001/api/schedule".to_string()),
        }
    }
}
