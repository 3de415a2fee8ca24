//! Memory (post) models matching the frontend contract.

use serde::{Deserialize, Serialize};

/// Full memory representation returned by create and detail reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryDetail {
    pub id: i64,
    pub group_id: i64,
    pub nickname: String,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub moment: Option<String>,
    pub is_public: bool,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: String,
}

/// Memory representation in list responses; omits the body content and the
/// owning group id, as the original list payload did.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryListItem {
    pub id: i64,
    pub nickname: String,
    pub title: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub moment: Option<String>,
    pub is_public: bool,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: String,
}

/// Request body for creating a memory. Creation requires both the new
/// post's password and the owning group's password.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemoryRequest {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub post_password: Option<String>,
    #[serde(default)]
    pub group_password: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub moment: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

/// Request body for updating a memory. Full-replace semantics.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemoryRequest {
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub post_password: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub moment: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

/// Request body carrying only the post password (delete).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPasswordRequest {
    #[serde(default)]
    pub post_password: Option<String>,
}

/// Query parameters for memory listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryListQuery {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub page_size: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub is_public: Option<String>,
}
