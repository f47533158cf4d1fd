//! Thin client for the Plunk HTTP API.
//!
//! Replies are passed back untouched so the gateway can relay them to the
//! dashboard with the provider's own status code.

use std::time::Duration;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use hyper::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::email::{EmailLog, Recipients};

pub const DEFAULT_API_URL: &str = "https://api.useplunk.com/v1";

const VERIFY_PATH: &str = "contacts/count";
const SEND_PATH: &str = "send";
const TRACK_PATH: &str = "track";
const LOG_PATH: &str = "emails";

#[derive(Error, Debug)]
pub enum PlunkError {
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider rejected request with {status}")]
    Rejected { status: StatusCode, body: Value },

    #[error("unexpected provider payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// A successful provider reply, relayed as-is.
#[derive(Debug)]
pub struct ProviderReply {
    pub status: StatusCode,
    pub body: Value,
}

impl IntoResponse for ProviderReply {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendBody {
    pub to: Recipients,
    pub subject: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackBody {
    pub event: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

#[derive(Clone)]
pub struct PlunkClient {
    http: reqwest::Client,
    base_url: String,
}

impl PlunkClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PlunkError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Probes an authenticated endpoint to confirm the key is accepted.
    pub async fn verify_key(&self, secret_key: &str) -> Result<ProviderReply, PlunkError> {
        let response = self
            .http
            .get(self.url(VERIFY_PATH))
            .bearer_auth(secret_key)
            .send()
            .await?;
        read_reply(response).await
    }

    pub async fn send(&self, secret_key: &str, body: &SendBody) -> Result<ProviderReply, PlunkError> {
        let response = self
            .http
            .post(self.url(SEND_PATH))
            .bearer_auth(secret_key)
            .json(body)
            .send()
            .await?;
        read_reply(response).await
    }

    pub async fn track(&self, secret_key: &str, body: &TrackBody) -> Result<ProviderReply, PlunkError> {
        let response = self
            .http
            .post(self.url(TRACK_PATH))
            .bearer_auth(secret_key)
            .json(body)
            .send()
            .await?;
        read_reply(response).await
    }

    pub async fn email_logs(&self, secret_key: &str) -> Result<Vec<EmailLog>, PlunkError> {
        let response = self
            .http
            .get(self.url(LOG_PATH))
            .bearer_auth(secret_key)
            .send()
            .await?;
        let reply = read_reply(response).await?;
        Ok(serde_json::from_value(reply.body)?)
    }
}

async fn read_reply(response: reqwest::Response) -> Result<ProviderReply, PlunkError> {
    let status = response.status();
    let raw = response.bytes().await?;

    let body = if raw.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&raw)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&raw).into_owned()))
    };

    if status.is_success() {
        Ok(ProviderReply { status, body })
    } else {
        Err(PlunkError::Rejected { status, body })
    }
}
