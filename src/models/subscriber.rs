use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: String,
    pub email: String,
    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewSubscriber {
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
}

impl NewSubscriber {
    /// Trims and lower-cases the address used for storage and uniqueness
    /// checks. A blank address becomes `None`.
    pub fn normalized(self) -> Self {
        Self {
            email: self
                .email
                .map(|e| e.trim().to_lowercase())
                .filter(|e| !e.is_empty()),
        }
    }

    pub fn into_subscriber(self, now: DateTime<Utc>) -> Option<Subscriber> {
        let email = self.normalized().email?;
        Some(Subscriber {
            id: Uuid::new_v4().to_string(),
            email,
            joined_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new(email: Option<&str>) -> NewSubscriber {
        NewSubscriber {
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn rejects_malformed_address() {
        assert!(new(Some("not-an-email")).validate().is_err());
        assert!(new(Some(" Ada@Example.com ")).normalized().validate().is_ok());
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        let sub = new(Some("  Ada@Example.COM ")).into_subscriber(Utc::now()).unwrap();
        assert_eq!(sub.email, "ada@example.com");
    }

    #[test]
    fn missing_email_builds_nothing() {
        assert!(new(None).into_subscriber(Utc::now()).is_none());
        assert!(new(Some("   ")).into_subscriber(Utc::now()).is_none());
    }
}
