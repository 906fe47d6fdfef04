use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use super::query::HistoryQuery;
use crate::api::error::{error_from_response, ApiError};
use crate::models::{Market, Snapshot};

/// Client for the price-history HTTP API
pub struct HistoryApiClient {
    http_client: HttpClient,
    base_url: String,
}

impl HistoryApiClient {
    /// Create a client; a trailing `/` on `base_url` is ignored
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /api/markets/{id}
    ///
    /// # Returns
    /// * `Ok(Market)` - Market details
    /// * `Err(ApiError::NotFound)` - Unknown market id
    pub async fn get_market(&self, id: Uuid) -> Result<Market, ApiError> {
        let url = format!("{}/api/markets/{}", self.base_url, id);
        self.get_json(&url, &[]).await
    }

    /// GET /api/markets/{id}/history
    ///
    /// Snapshots come back newest first.
    ///
    /// # Arguments
    /// * `id` - Market UUID
    /// * `query` - Page size and optional trailing window in hours
    pub async fn get_history(&self, id: Uuid, query: HistoryQuery) -> Result<Vec<Snapshot>, ApiError> {
        let url = format!("{}/api/markets/{}/history", self.base_url, id);
        self.get_json(&url, &query.to_params()).await
    }

    /// GET /api/markets?limit=&sort=
    pub async fn list_markets(&self, limit: i64, sort: &str) -> Result<Vec<Market>, ApiError> {
        let url = format!("{}/api/markets", self.base_url);
        let params = [("limit", limit.to_string()), ("sort", sort.to_string())];
        self.get_json(&url, &params).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        debug!("GET {} {:?}", url, params);

        let response = self
            .http_client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}
