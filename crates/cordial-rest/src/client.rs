//! HTTP implementation of the REST port

use async_trait::async_trait;
use cordial::{HttpMethod, RestClient, RestError};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, StatusCode};
use tracing::{debug, warn};

use crate::config::RestConfig;

/// REST client backed by `reqwest`
///
/// Sends JSON bodies, decodes JSON responses and maps non-2xx statuses to
/// `RestError::Http`. No retries are attempted.
pub struct HttpRestClient {
    client: Client,
    config: RestConfig,
}

impl HttpRestClient {
    pub fn new(config: RestConfig) -> Result<Self, RestError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| RestError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RestConfig {
        &self.config
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl RestClient for HttpRestClient {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, RestError> {
        let url = self.config.url(path);
        debug!(method = %method, url = %url, "Sending REST request");

        let mut request = self
            .client
            .request(to_reqwest_method(method), &url)
            .header(AUTHORIZATION, self.config.authorization());

        if let Some(data) = body {
            request = request.json(&data);
        }

        let response = request
            .send()
            .await
            .map_err(|e| RestError::Transport(e.to_string()))?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            warn!(method = %method, path = %path, status = %status, "REST request failed");
            return Err(RestError::Http {
                status: status.as_u16(),
                method: method.to_string(),
                path: path.to_string(),
                body,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(serde_json::Value::Null);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RestError::Transport(e.to_string()))?;
        if bytes.is_empty() {
            return Ok(serde_json::Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| RestError::Decode(e.to_string()))
    }
}
