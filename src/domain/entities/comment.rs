use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{timestamp, validate_not_blank};

/// A comment left on an inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub inspection_id: String,
    pub comment_text: String,
    pub author: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub inspection_id: String,
    pub comment_text: String,
    pub author: String,
}

/// Form state of the "add comment" box.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct CommentDraft {
    #[validate(custom(function = "validate_not_blank", message = "Please enter your name"))]
    pub author: String,

    #[validate(custom(function = "validate_not_blank", message = "Please enter a comment"))]
    pub comment_text: String,
}

impl CommentDraft {
    pub fn new(author: impl Into<String>, comment_text: impl Into<String>) -> Self {
        CommentDraft {
            author: author.into(),
            comment_text: comment_text.into(),
        }
    }

    /// An empty comment pre-filled with the signed-in author.
    pub fn for_author(author: impl Into<String>) -> Self {
        CommentDraft::new(author, "")
    }

    pub fn into_request(self, inspection_id: &str) -> CreateCommentRequest {
        CreateCommentRequest {
            inspection_id: inspection_id.to_string(),
            comment_text: self.comment_text.trim().to_string(),
            author: self.author.trim().to_string(),
        }
    }
}
