use crate::{
    config::Config,
    constants::{CHAT_PATH, HEALTH_PATH, STATS_PATH},
    errors::{CopilotoError, CopilotoResult},
    logging::log_api_call,
    models::{ApiCallLog, ChatReply, ChatRequest, ErrorBody, HealthStatus, Stats},
};
use chrono::Utc;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

/// HTTP client for the assistant backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> CopilotoResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> CopilotoResult<Self> {
        Self::new(&config.base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Posts a user message to the chat endpoint.
    pub async fn send_chat(&self, message: &str) -> CopilotoResult<ChatReply> {
        let started = Instant::now();
        let response = self
            .client
            .post(self.url(CHAT_PATH))
            .json(&ChatRequest { message })
            .send()
            .await?;

        let summary = format!("POST message ({} chars)", message.chars().count());
        let (status, body) = read_body(response, CHAT_PATH, &summary, started).await?;
        if !status.is_success() {
            return Err(status_error(status, body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Fetches the aggregate usage counters.
    pub async fn fetch_stats(&self) -> CopilotoResult<Stats> {
        self.get_json(STATS_PATH, "GET stats").await
    }

    /// Checks backend health. An unhealthy backend answers 500 with a
    /// status body, which is returned as `Ok` so callers can show it.
    pub async fn check_health(&self) -> CopilotoResult<HealthStatus> {
        let started = Instant::now();
        let response = self.client.get(self.url(HEALTH_PATH)).send().await?;
        let (status, body) = read_body(response, HEALTH_PATH, "GET health", started).await?;

        match serde_json::from_str::<HealthStatus>(&body) {
            Ok(health) => Ok(health),
            Err(_) if !status.is_success() => Err(status_error(status, body)),
            Err(e) => Err(e.into()),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, summary: &str) -> CopilotoResult<T> {
        let started = Instant::now();
        let response = self.client.get(self.url(path)).send().await?;
        let (status, body) = read_body(response, path, summary, started).await?;
        if !status.is_success() {
            return Err(status_error(status, body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

async fn read_body(
    response: Response,
    endpoint: &str,
    summary: &str,
    started: Instant,
) -> CopilotoResult<(StatusCode, String)> {
    let status = response.status();
    let body = response.text().await?;

    log_api_call(&ApiCallLog {
        timestamp: Utc::now(),
        endpoint: endpoint.to_string(),
        request_summary: summary.to_string(),
        response_status: status.as_u16(),
        response_time_ms: started.elapsed().as_millis(),
    });

    Ok((status, body))
}

/// Prefers the backend's `{"error": ...}` message over the raw body.
fn status_error(status: StatusCode, body: String) -> CopilotoError {
    let body = match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => parsed.error,
        Err(_) => body,
    };
    CopilotoError::Status { status, body }
}
