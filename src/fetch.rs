use std::time::Duration;

use serde_json::Value;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::TARGET_WEB_REQUEST;

/// A JSON payload as it arrives off the wire. Some endpoints return a bare
/// array, others wrap it as `{"$id": "...", "$values": [...]}`; downstream
/// code only ever sees the plain sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    Raw(Vec<Value>),
    Enveloped { values: Vec<Value> },
}

impl Payload {
    /// Classifies a parsed body as raw or enveloped.
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        match value {
            Value::Array(items) => Ok(Payload::Raw(items)),
            Value::Object(mut map) => match map.remove("$values") {
                Some(Value::Array(values)) => Ok(Payload::Enveloped { values }),
                Some(other) => Err(ApiError::MalformedPayload(format!(
                    "$values is not an array: {}",
                    other
                ))),
                None => Err(ApiError::MalformedPayload(
                    "expected an array or a $values envelope".to_string(),
                )),
            },
            other => Err(ApiError::MalformedPayload(format!(
                "expected an array, got: {}",
                other
            ))),
        }
    }

    pub fn into_items(self) -> Vec<Value> {
        match self {
            Payload::Raw(items) => items,
            Payload::Enveloped { values } => values,
        }
    }

    /// Unwraps either envelope shape into the same ordered sequence.
    pub fn items(value: Value) -> Result<Vec<Value>, ApiError> {
        Ok(Self::from_value(value)?.into_items())
    }
}

/// The one timeout-guarded, retrying GET-JSON utility every reader goes
/// through. Transport failures (connection errors, elapsed deadlines) are
/// retried with exponential backoff; HTTP status errors are returned on the
/// first attempt so callers can branch on the status.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: reqwest::Client,
    request_timeout: Duration,
    max_attempts: usize,
    retry_backoff: Duration,
}

impl Fetcher {
    pub fn new(request_timeout: Duration, max_attempts: usize, retry_backoff: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            request_timeout,
            max_attempts: max_attempts.max(1),
            retry_backoff,
        }
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// GETs `url` and parses the body as JSON.
    ///
    /// Returns `Ok(None)` on a 404, treating "resource not found" as "empty
    /// result" for collection-shaped reads and "absent" for detail reads.
    pub async fn get_json(&self, url: &str) -> Result<Option<Value>, ApiError> {
        let mut backoff = self.retry_backoff;
        let mut last_error = ApiError::Network("no attempts made".to_string());

        for attempt in 0..self.max_attempts {
            debug!(target: TARGET_WEB_REQUEST, "GET {} (attempt {}/{})", url, attempt + 1, self.max_attempts);

            match self.attempt_get(url).await {
                Ok(body) => return Ok(body),
                Err(err) if err.is_transient() => {
                    warn!(target: TARGET_WEB_REQUEST, "Request to {} failed: {}", url, err);
                    last_error = err;
                }
                Err(err) => return Err(err),
            }

            if attempt < self.max_attempts - 1 {
                info!(target: TARGET_WEB_REQUEST, "Retrying {} in {:?}", url, backoff);
                sleep(backoff).await;
                backoff *= 2;
            }
        }

        Err(last_error)
    }

    async fn attempt_get(&self, url: &str) -> Result<Option<Value>, ApiError> {
        let request = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send();

        let response = match timeout(self.request_timeout, request).await {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => return Err(ApiError::Network(err.to_string())),
            Err(_) => return Err(ApiError::Timeout(self.request_timeout.as_millis() as u64)),
        };

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            debug!(target: TARGET_WEB_REQUEST, "404 from {}, treating as empty", url);
            return Ok(None);
        }

        let body = response.text().await.map_err(ApiError::from)?;
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let value = serde_json::from_str(&body)
            .map_err(|err| ApiError::MalformedPayload(err.to_string()))?;
        Ok(Some(value))
    }
}
