use reqwest::header::RETRY_AFTER;
use thiserror::Error;
use tracing::warn;

/// Errors returned by the HTTP clients
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// 400 Bad Request
    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),

    /// 429 Too Many Requests
    #[error("Rate Limited. Retry after {retry_after} s")]
    RateLimited { retry_after: u64 },

    /// 5xx
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),

    /// Any other non-success status
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),

    /// Connection, timeout or client construction failure
    #[error("Request Error: {0}")]
    RequestError(String),

    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

/// Turn a non-success response into an `ApiError`, consuming the body
pub(crate) async fn error_from_response(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok());
    let body = response.text().await.unwrap_or_default();

    classify_status(status, &body, retry_after)
}

/// Map a status code and body to an `ApiError`
pub fn classify_status(status: u16, body: &str, retry_after: Option<u64>) -> ApiError {
    let message = error_message(body);

    match status {
        400 => ApiError::BadRequest(message),
        404 => ApiError::NotFound(message),
        429 => {
            let retry_after = retry_after.unwrap_or(1);
            warn!("Rate limited, retry after {} s", retry_after);
            ApiError::RateLimited { retry_after }
        }
        500..=599 => {
            warn!("Server error {}: {}", status, message);
            ApiError::ServerError(status, message)
        }
        _ => ApiError::HttpError(status, message),
    }
}

/// Prefer `message` or `error` from a JSON body, else the raw text
fn error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = json
            .get("message")
            .or_else(|| json.get("error"))
            .and_then(|v| v.as_str())
        {
            return msg.to_string();
        }
    }
    body.trim().to_string()
}
