// GitHub API HTTP client.
// Handles default headers, passive rate limit tracking, and status mapping.

use std::sync::Mutex;

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::debug;

use crate::config::LensConfig;
use crate::error::{LensError, Result};

use super::types::{MessageBody, RateLimit};

const GITHUB_API_VERSION: &str = "2022-11-28";

/// Unauthenticated GitHub API client with rate limit observation.
pub struct GitHubClient {
    client: Client,
    api_base: String,
    rate_limit: Mutex<RateLimit>,
}

impl GitHubClient {
    /// Create a client from configuration.
    pub fn new(config: &LensConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| LensError::Config(e.to_string()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            rate_limit: Mutex::new(RateLimit::default()),
        })
    }

    /// Rate limit as of the last response.
    pub fn rate_limit(&self) -> RateLimit {
        *self.rate_limit.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.api_base, endpoint);
        debug!(%url, "GET");
        let response = self.client.get(&url).query(params).send().await?;

        self.update_rate_limit(response.headers());
        self.check_response(response).await
    }

    /// Make a GET request to the GitHub API.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        self.get_with_params(endpoint, &[] as &[(&str, &str)]).await
    }

    fn update_rate_limit(&self, headers: &HeaderMap) {
        let mut rate_limit = self.rate_limit.lock().unwrap_or_else(|e| e.into_inner());
        *rate_limit = parse_rate_limit(headers, *rate_limit);
    }

    /// Check response status and convert errors.
    async fn check_response(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<MessageBody>(&body)
            .map(|b| b.message)
            .unwrap_or(body);

        match status {
            StatusCode::NOT_FOUND => Err(LensError::NotFound(url)),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
                if self.rate_limit().remaining == 0 =>
            {
                let reset = self.rate_limit().reset;
                let reset_at = chrono::DateTime::from_timestamp(reset as i64, 0)
                    .map(|dt| dt.format("%H:%M:%S").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                Err(LensError::RateLimited { reset_at })
            }
            status => Err(LensError::Status {
                status: status.as_u16(),
                body: message,
            }),
        }
    }
}

/// Read `x-ratelimit-*` headers, keeping previous values for missing ones.
fn parse_rate_limit(headers: &HeaderMap, current: RateLimit) -> RateLimit {
    let read = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
    };

    RateLimit {
        limit: read("x-ratelimit-limit").unwrap_or(current.limit),
        remaining: read("x-ratelimit-remaining").unwrap_or(current.remaining),
        reset: read("x-ratelimit-reset").unwrap_or(current.reset),
    }
}
