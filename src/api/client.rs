use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::ApiError;
use crate::config::Config;

/// Minimal surface of the REST backend used by the screens
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET {base}{path}` and return the decoded JSON body
    async fn get_json(&self, path: &str) -> Result<Value, ApiError>;

    /// `POST {base}{path}` with a JSON body. Success is any 2xx status; the
    /// response body is ignored.
    async fn post_json(&self, path: &str, body: &Value) -> Result<(), ApiError>;
}

/// Error body shape returned by the backend on failure
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// reqwest-backed [`Backend`]
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(config.http.user_agent.clone());
        if let Some(timeout) = config.http_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Wrap an already configured reqwest client
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(ApiError::Decode)
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<(), ApiError> {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Turn a non-success response into [`ApiError::Status`], keeping the
/// backend's `error` message when the body has one.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let response_text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&response_text)
        .ok()
        .map(|body| body.error);

    warn!("Backend responded with {}: {}", status, response_text);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}
