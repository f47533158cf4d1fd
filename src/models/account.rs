use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A stored credential set for the email provider.
///
/// Fields the dashboard doesn't know about are kept verbatim in `metadata`
/// so that display data written by the front end survives a round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub secret_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub id: Option<String>,
    pub secret_key: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl NewAccount {
    /// Builds the account to store, or names the missing field.
    pub fn into_account(self, now: DateTime<Utc>) -> Result<Account, &'static str> {
        let secret_key = self
            .secret_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or("secretKey is required")?;

        let id = self
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Account {
            id,
            secret_key,
            name: self.name,
            email: self.email,
            created_at: Some(now),
            metadata: self.metadata,
        })
    }
}

impl Account {
    /// Shallow merge: each top-level field of `patch` replaces the stored one.
    /// The id is never overwritten.
    pub fn merged(&self, patch: Map<String, Value>) -> Result<Account, serde_json::Error> {
        let mut fields = match serde_json::to_value(self)? {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };

        for (key, value) in patch {
            if key == "id" {
                continue;
            }
            fields.insert(key, value);
        }

        let mut merged: Account = serde_json::from_value(Value::Object(fields))?;
        merged.secret_key = merged.secret_key.trim().to_string();
        if merged.secret_key.is_empty() {
            return Err(serde::de::Error::custom("secretKey must not be empty"));
        }

        Ok(merged)
    }
}
