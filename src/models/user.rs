//! User transfer shape and request bodies.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::UserRow;

/// `{id, username}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 120, message = "username must be 1-120 characters"))]
    pub username: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 120, message = "username must be 1-120 characters"))]
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_id_and_username() {
        let user = User::from(UserRow {
            id: 1,
            username: "alice".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            json!({ "id": 1, "username": "alice" })
        );
    }

    #[test]
    fn absent_username_is_none() {
        let body: CreateUserRequest = serde_json::from_value(json!({})).unwrap();
        assert!(body.username.is_none());
        assert!(body.validate().is_ok());
    }

    #[test]
    fn overlong_username_fails_validation() {
        let body = UpdateUserRequest {
            username: Some("x".repeat(121)),
        };
        assert!(body.validate().is_err());
        let body = UpdateUserRequest {
            username: Some(String::new()),
        };
        assert!(body.validate().is_err());
    }
}
