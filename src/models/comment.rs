//! Comment models matching the frontend contract.

use serde::{Deserialize, Serialize};

/// Comment representation in responses. The stored password is never
/// included.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i64,
    pub nickname: String,
    pub content: String,
    pub created_at: String,
}

/// Request body for creating or updating a comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Query parameters for comment listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentListQuery {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub page_size: Option<String>,
}
