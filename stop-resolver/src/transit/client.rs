//! Transit open-data HTTP client.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use crate::domain::{Stop, Vehicle};

use super::TransitSource;
use super::convert::{convert_stops, convert_vehicles};
use super::error::FetchError;
use super::types::{StopsResponse, VehiclesResponse};

/// Default base URL for the transit open-data API.
const DEFAULT_BASE_URL: &str = "https://tfe-opendata.com/api/v1";

/// Configuration for the transit client.
#[derive(Debug, Clone)]
pub struct TransitConfig {
    /// API key sent as `Authorization: Token <key>`, if the deployment needs one
    pub api_key: Option<String>,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TransitConfig {
    /// Create a config for the public API with no key.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing or mirrors).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the transit open-data API.
#[derive(Debug, Clone)]
pub struct TransitClient {
    http: reqwest::Client,
    base_url: String,
}

impl TransitClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TransitConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();

        if let Some(key) = &config.api_key {
            let value =
                HeaderValue::from_str(&format!("Token {key}")).map_err(|_| FetchError::Api {
                    status: 0,
                    message: "Invalid API key format".to_string(),
                })?;
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the full stop catalog.
    pub async fn fetch_stops(&self) -> Result<Vec<Stop>, FetchError> {
        let response: StopsResponse = self.get_json("stops").await?;
        Ok(convert_stops(response.stops))
    }

    /// Fetch current vehicle positions.
    pub async fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, FetchError> {
        let response: VehiclesResponse = self.get_json("vehicle_locations").await?;
        Ok(convert_vehicles(response.vehicles))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, path);

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(FetchError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| FetchError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl TransitSource for TransitClient {
    async fn stops(&self) -> Result<Vec<Stop>, FetchError> {
        self.fetch_stops().await
    }

    async fn vehicles(&self) -> Result<Vec<Vehicle>, FetchError> {
        self.fetch_vehicles().await
    }
}
