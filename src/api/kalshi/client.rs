use std::time::Duration;

use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Client as HttpClient;
use tracing::debug;

use super::models::{KalshiMarket, KalshiMarketResponse};
use crate::api::error::{error_from_response, ApiError};

/// Client for Kalshi's public market endpoint
pub struct KalshiClient {
    http_client: HttpClient,
    base_url: String,
}

impl KalshiClient {
    /// Create a client with a custom base URL
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
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

    /// GET /markets/{ticker}
    ///
    /// # Returns
    /// * `Ok(Some(KalshiMarket))` - Market data
    /// * `Ok(None)` - Response carried no `market` object
    /// * `Err(ApiError)` - Transport failure or non-success status
    pub async fn fetch_market(&self, ticker: &str) -> Result<Option<KalshiMarket>, ApiError> {
        let url = format!("{}/markets/{}", self.base_url, ticker);
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body = response
            .json::<KalshiMarketResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))?;

        Ok(body.market)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client =
            KalshiClient::with_base_url("http://localhost:9000/trade-api/v2/", Duration::from_secs(10))
                .unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000/trade-api/v2");
    }
}
