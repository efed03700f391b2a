//! Transfer representations and request bodies for users and posts.

pub mod post;
pub mod user;

pub use post::*;
pub use user::*;

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Confirmation or informational message body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Take a required body field, treating absent and blank values alike.
pub fn require(field: &'static str, value: Option<&str>) -> AppResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .ok_or(AppError::MissingField(field))
}

/// An optional field may be left out, but not sent blank.
pub fn reject_blank(field: &'static str, value: Option<&str>) -> AppResult<()> {
    match value {
        Some(v) if v.trim().is_empty() => {
            Err(AppError::Validation(format!("{field} must not be blank")))
        }
        _ => Ok(()),
    }
}

/// Run the body's validator rules, reporting each failing field's message.
pub fn validate_body<T: Validate>(body: &T) -> AppResult<()> {
    body.validate().map_err(|errors| {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect();
        messages.sort();
        messages.dedup();
        AppError::Validation(messages.join("; "))
    })
}

/// Deserialize a present key as `Some`, keeping explicit `null` as `Some(None)`.
/// Pair with `#[serde(default)]` so an absent key stays `None`.
pub(crate) fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
