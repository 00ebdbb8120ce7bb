use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Where the caller appears to be, as reported by an IP lookup service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerLocation {
    #[serde(default)]
    pub ip: Option<String>,
    /// ISO 3166-1 alpha-2 code
    #[serde(rename = "country")]
    pub country_code: String,
}

#[async_trait]
pub trait LocationResolver: Send + Sync {
    /// Resolve the caller's country
    async fn resolve_caller_location(&self) -> CoreResult<CallerLocation>;
}

/// Resolves the caller through a JSON endpoint answering `{"ip": .., "country": ..}`
pub struct HttpLocationResolver {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpLocationResolver {
    pub const DEFAULT_ENDPOINT: &'static str = "https://api.country.is/";

    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> CoreResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CoreError::InternalError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl LocationResolver for HttpLocationResolver {
    async fn resolve_caller_location(&self) -> CoreResult<CallerLocation> {
        tracing::debug!(endpoint = %self.endpoint, "Resolving caller location");

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| CoreError::LocationUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CoreError::LocationUnavailable(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| CoreError::LocationUnavailable(e.to_string()))?;
        parse_location(&body)
    }
}

/// Fixed answer, for offline runs and tests. `None` behaves like an
/// unreachable service.
pub struct StaticLocationResolver {
    country_code: Option<String>,
}

impl StaticLocationResolver {
    pub fn new(country_code: Option<String>) -> Self {
        Self { country_code }
    }

    pub fn country(code: &str) -> Self {
        Self::new(Some(code.to_string()))
    }

    pub fn unavailable() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl LocationResolver for StaticLocationResolver {
    async fn resolve_caller_location(&self) -> CoreResult<CallerLocation> {
        match &self.country_code {
            Some(code) => Ok(CallerLocation {
                ip: None,
                country_code: code.clone(),
            }),
            None => Err(CoreError::LocationUnavailable("no location configured".to_string())),
        }
    }
}

pub(crate) fn parse_location(body: &str) -> CoreResult<CallerLocation> {
    let location: CallerLocation =
        serde_json::from_str(body).map_err(|e| CoreError::MalformedLocation(e.to_string()))?;

    if location.country_code.trim().is_empty() {
        return Err(CoreError::MalformedLocation("empty country code".to_string()));
    }
    Ok(location)
}
