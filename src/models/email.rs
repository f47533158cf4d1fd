use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    Delivered,
    Failed,
    Pending,
}

impl EmailStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EmailStatus::Delivered => "delivered",
            EmailStatus::Failed => "failed",
            EmailStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmailStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delivered" => Ok(EmailStatus::Delivered),
            "failed" => Ok(EmailStatus::Failed),
            "pending" => Ok(EmailStatus::Pending),
            other => Err(format!("unknown email status `{other}`")),
        }
    }
}

/// One delivery record as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailLog {
    pub id: String,
    pub batch_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    pub to: String,
    pub from: String,
    pub subject: String,
    pub status: EmailStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub opened: bool,
    #[serde(default)]
    pub open_count: u32,
    pub sent_at: DateTime<Utc>,
}

/// A single address or a list of them, as the provider accepts both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    One(String),
    Many(Vec<String>),
}

impl Recipients {
    /// True when there is no recipient or any listed address is blank.
    pub fn has_blank(&self) -> bool {
        match self {
            Recipients::One(to) => to.trim().is_empty(),
            Recipients::Many(to) => to.is_empty() || to.iter().any(|t| t.trim().is_empty()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckStatusRequest {
    pub secret_key: Option<String>,
    pub account_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub account_id: Option<String>,
    pub to: Option<Recipients>,
    pub subject: Option<String>,
    pub content: Option<String>,
    pub subscribed: Option<bool>,
    pub name: Option<String>,
    pub from: Option<String>,
    pub reply: Option<String>,
    pub headers: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackEventRequest {
    pub account_id: Option<String>,
    pub event: Option<String>,
    pub email: Option<String>,
    pub subscribed: Option<bool>,
    pub data: Option<Map<String, Value>>,
}
