//! Model gateway implementations and abstractions.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::AgentConfig;

/// Fixed sentinel reply substituted when the endpoint cannot be reached.
///
/// It carries no tool-call syntax, so a transport failure ends the round.
pub const TRANSPORT_FAILURE_REPLY: &str = "LLM request error";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request to model endpoint timed out")]
    Timeout,

    #[error("could not connect to model endpoint: {0}")]
    Connect(String),

    #[error("model endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model request failed: {0}")]
    Request(String),

    #[error("http client error: {0}")]
    Client(String),

    #[error("stub gateway ran out of scripted replies")]
    Exhausted,
}

/// Minimal abstraction around a synchronous text-completion round trip.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;
}

/// Client for Ollama-style generate endpoints.
///
/// Sends `{"model": …, "prompt": …, "stream": false}` and reads the reply
/// from the response body's `response` field.
#[derive(Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    model: String,
    endpoint: String,
}

impl HttpGateway {
    pub fn from_config(cfg: &AgentConfig) -> crate::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .map_err(|err| GatewayError::Client(err.to_string()))?;
        Ok(Self {
            http,
            model: cfg.model.clone(),
            endpoint: cfg.endpoint.clone(),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl ModelGateway for HttpGateway {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        let payload = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });

        let resp = self
            .http
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    GatewayError::Timeout
                } else if err.is_connect() {
                    GatewayError::Connect(err.to_string())
                } else {
                    GatewayError::Request(err.to_string())
                }
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Status { status, body });
        }

        let body = resp
            .text()
            .await
            .map_err(|err| GatewayError::Request(err.to_string()))?;

        Ok(extract_reply(&body))
    }
}

/// An Ollama-style body carries the reply in a `response` field; any other
/// body is passed through verbatim.
fn extract_reply(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(parsed) => match parsed.get("response") {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        Err(_) => body.to_string(),
    }
}

/// A deterministic gateway used for tests and demos.
pub struct StubGateway {
    replies: Mutex<VecDeque<String>>,
}

impl StubGateway {
    pub fn new(replies: Vec<String>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
        })
    }
}

#[async_trait]
impl ModelGateway for StubGateway {
    async fn complete(&self, _prompt: &str) -> Result<String, GatewayError> {
        let mut locked = self.replies.lock().expect("stub gateway poisoned");
        locked.pop_front().ok_or(GatewayError::Exhausted)
    }
}
