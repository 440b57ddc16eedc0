/// User domain types
use crate::error::{AdminError, Result};
use crate::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Review status of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Approved,
    Pending,
    Denied,
}

impl Status {
    /// Every valid status, in the order the form offers them
    pub const ALL: [Status; 3] = [Status::Approved, Status::Pending, Status::Denied];

    /// Wire and display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Approved => "Approved",
            Status::Pending => "Pending",
            Status::Denied => "Denied",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AdminError::InvalidStatus(s.to_string()))
    }
}

/// User account as returned by the list endpoint.
///
/// The password is write-only and never kept here; a server that echoes it
/// back has the field ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub status: Status,
    #[serde(deserialize_with = "deserialize_age")]
    pub age: u32,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields the client may send on create or update, as typed into the form.
///
/// `age` stays a string until [`UserInput::into_payload`] coerces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInput {
    pub first_name: String,
    pub last_name: String,
    pub username: Option<String>,
    pub status: Status,
    pub age: String,
    pub address: String,
    pub password: Option<String>,
}

impl UserInput {
    /// Coerce the input into its wire form.
    ///
    /// Fails with [`AdminError::InvalidAge`] instead of sending a bogus number.
    pub fn into_payload(self) -> Result<UserPayload> {
        let age = parse_age(&self.age)?;

        Ok(UserPayload {
            first_name: self.first_name,
            last_name: self.last_name,
            username: self.username,
            status: self.status,
            age,
            address: self.address,
            password: self.password,
        })
    }
}

/// Request body for the create and update endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub status: Status,
    pub age: u32,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Parse an age typed into the form.
///
/// Surrounding whitespace is ignored. The rest must be plain decimal
/// digits: signs, decimals and trailing text are rejected.
pub fn parse_age(raw: &str) -> Result<u32> {
    let digits = raw.trim();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AdminError::InvalidAge(raw.to_string()));
    }

    digits
        .parse::<u32>()
        .map_err(|_| AdminError::InvalidAge(raw.to_string()))
}

// Some server builds send age as a number, others as a numeric string.
fn deserialize_age<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAge {
        Number(u32),
        Text(String),
    }

    match RawAge::deserialize(deserializer)? {
        RawAge::Number(age) => Ok(age),
        RawAge::Text(text) => parse_age(&text).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn server_user(age: serde_json::Value) -> serde_json::Value {
        json!({
            "id": 7,
            "firstName": "Ann",
            "lastName": "Lee",
            "username": "ann",
            "status": "Approved",
            "age": age,
            "address": "1 Main St",
            "password": "should-be-ignored",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00.000Z"
        })
    }

    #[test]
    fn test_user_decodes_numeric_age() {
        let user: User = serde_json::from_value(server_user(json!(30))).unwrap();

        assert_eq!(user.id, UserId::new(7));
        assert_eq!(user.age, 30);
        assert_eq!(user.status, Status::Approved);
        assert_eq!(user.username.as_deref(), Some("ann"));
    }

    #[test]
    fn test_user_decodes_string_age() {
        let user: User = serde_json::from_value(server_user(json!("41"))).unwrap();
        assert_eq!(user.age, 41);
    }

    #[test]
    fn test_user_rejects_garbage_age() {
        let result: serde_json::Result<User> = serde_json::from_value(server_user(json!("old")));
        assert!(result.is_err());
    }

    #[test]
    fn test_user_without_username() {
        let mut raw = server_user(json!(30));
        raw.as_object_mut().unwrap().remove("username");

        let user: User = serde_json::from_value(raw).unwrap();
        assert!(user.username.is_none());
    }

    #[test]
    fn test_unknown_status_rejected() {
        let mut raw = server_user(json!(30));
        raw["status"] = json!("Banned");

        let result: serde_json::Result<User> = serde_json::from_value(raw);
        assert!(result.is_err());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Pending".parse::<Status>().unwrap(), Status::Pending);
        assert_eq!(
            "pending".parse::<Status>(),
            Err(AdminError::InvalidStatus("pending".to_string()))
        );
    }

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age("25").unwrap(), 25);
        assert_eq!(parse_age(" 0 ").unwrap(), 0);
        assert!(matches!(parse_age("-1"), Err(AdminError::InvalidAge(_))));
        assert!(matches!(parse_age(""), Err(AdminError::InvalidAge(_))));
        assert!(matches!(parse_age("2.5"), Err(AdminError::InvalidAge(_))));
        assert!(matches!(parse_age("25abc"), Err(AdminError::InvalidAge(_))));
        assert!(matches!(parse_age("+25"), Err(AdminError::InvalidAge(_))));
        assert!(matches!(parse_age("+"), Err(AdminError::InvalidAge(_))));
    }

    #[test]
    fn test_payload_sends_integer_age() {
        let input = UserInput {
            first_name: "Bo".into(),
            last_name: "X".into(),
            username: None,
            status: Status::Pending,
            age: "25".into(),
            address: "Y".into(),
            password: Some("p".into()),
        };

        let body = serde_json::to_value(input.into_payload().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({
                "firstName": "Bo",
                "lastName": "X",
                "status": "Pending",
                "age": 25,
                "address": "Y",
                "password": "p"
            })
        );
    }

    #[test]
    fn test_payload_omits_absent_password() {
        let input = UserInput {
            first_name: "Bo".into(),
            last_name: "X".into(),
            username: Some("bo".into()),
            status: Status::Denied,
            age: "3".into(),
            address: "Y".into(),
            password: None,
        };

        let body = serde_json::to_value(input.into_payload().unwrap()).unwrap();
        assert!(body.get("password").is_none());
        assert_eq!(body["username"], "bo");
    }

    #[test]
    fn test_invalid_age_blocks_payload() {
        let input = UserInput {
            first_name: "Bo".into(),
            last_name: "X".into(),
            username: None,
            status: Status::Pending,
            age: "twenty".into(),
            address: "Y".into(),
            password: Some("p".into()),
        };

        assert_eq!(
            input.into_payload(),
            Err(AdminError::InvalidAge("twenty".to_string()))
        );
    }
}
