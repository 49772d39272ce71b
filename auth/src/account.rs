use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Account identity snapshot.
///
/// Mirrors the persisted account record. Tokens embed this value as of
/// issuance; it is never re-fetched on validation. The stored password hash is
/// skipped by serde so it never reaches a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub uuid: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub created: DateTime<Utc>,
    pub created_by: i64,
    pub modified: Option<DateTime<Utc>>,
    pub modified_by: Option<i64>,

    /// Encoded password hash; None for accounts without local credentials
    #[serde(skip)]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            id: 7,
            uuid: Uuid::new_v4(),
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            email: "alice@example.com".to_string(),
            username: "alice".to_string(),
            created: Utc::now(),
            created_by: 1,
            modified: None,
            modified_by: None,
            password: Some("$argon2id$secret".to_string()),
        }
    }

    #[test]
    fn test_serializes_camel_case_without_password() {
        let value = serde_json::to_value(account()).expect("Failed to serialize");

        assert_eq!(value["firstName"], "Alice");
        assert_eq!(value["createdBy"], 1);
        assert!(value["modifiedBy"].is_null());
        assert!(value.get("password").is_none());
    }

    #[test]
    fn test_password_is_never_deserialized() {
        let mut value = serde_json::to_value(account()).expect("Failed to serialize");
        value["password"] = serde_json::json!("$argon2id$forged");

        let decoded: Account = serde_json::from_value(value).expect("Failed to deserialize");
        assert!(decoded.password.is_none());
    }
}
