//! Group models matching the frontend contract.

use serde::{Deserialize, Serialize};

/// Full group representation returned by create and detail reads.
///
/// `badges` is always an empty list for now; the column behind `badgeCount`
/// exists for the `mostBadge` sort but no badge-awarding flow is wired up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDetail {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub is_public: bool,
    pub like_count: i64,
    pub badges: Vec<String>,
    pub post_count: i64,
    pub created_at: String,
    pub introduction: Option<String>,
}

/// Group representation in list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupListItem {
    pub id: i64,
    pub name: String,
    pub image_url: Option<String>,
    pub is_public: bool,
    pub like_count: i64,
    pub badge_count: i64,
    pub post_count: i64,
    pub created_at: String,
    pub introduction: Option<String>,
}

/// Public-visibility probe response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPublicStatus {
    pub id: i64,
    pub is_public: bool,
}

/// Request body for creating a group.
///
/// Required fields are modeled as options so a missing field surfaces as a
/// 400 validation failure instead of a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub introduction: Option<String>,
}

/// Request body for updating a group. Full-replace semantics: every mutable
/// field is overwritten with what is sent here.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub introduction: Option<String>,
}

/// Request body carrying only a password (delete, verify-password).
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordRequest {
    #[serde(default)]
    pub password: Option<String>,
}

/// Query parameters for group listing. Raw strings are parsed by the
/// listing engine so malformed values coerce to defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupListQuery {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub page_size: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub is_public: Option<String>,
}
