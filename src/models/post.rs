//! Post transfer shape and request bodies.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::PostRow;

/// `{id, title, content, user_id, author}`; `author` is the owning user's name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub user_id: i64,
    pub author: Option<String>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            user_id: row.user_id,
            author: row.author,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Name of the authoring user.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdatePostRequest {
    /// Reassign to this user when it resolves; ignored otherwise.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: Option<String>,
    /// `None`: key absent, keep. `Some(None)`: explicit null, clear.
    #[serde(default, deserialize_with = "super::present")]
    pub content: Option<Option<String>>,
}
