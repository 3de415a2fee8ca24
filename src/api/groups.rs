//! Group API endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::{require, ApiResult};
use crate::errors::AppError;
use crate::guard::{self, Access};
use crate::listing::{GroupSort, Page, PageParams};
use crate::models::{
    Ack, CreateGroupRequest, GroupDetail, GroupListItem, GroupListQuery, GroupPublicStatus,
    PasswordRequest, UpdateGroupRequest,
};
use crate::secret;
use crate::AppState;

/// POST /api/groups - Create a group.
pub async fn create_group(
    State(state): State<AppState>,
    Json(request): Json<CreateGroupRequest>,
) -> ApiResult<(StatusCode, Json<GroupDetail>)> {
    let name = require(&request.name)?;
    let password = require(&request.password)?;

    let password_hash = secret::hash_secret(password, state.config.bcrypt_cost)?;
    let group = state
        .groups
        .create(
            name,
            &password_hash,
            request.image_url.as_deref(),
            request.is_public,
            request.introduction.as_deref(),
        )
        .await?;

    tracing::info!(group_id = group.id, "group created");
    Ok((StatusCode::CREATED, Json(group.detail())))
}

/// GET /api/groups - List groups with pagination, sort, and visibility filter.
pub async fn list_groups(
    State(state): State<AppState>,
    Query(query): Query<GroupListQuery>,
) -> ApiResult<Json<Page<GroupListItem>>> {
    let params = PageParams::from_query(query.page.as_deref(), query.page_size.as_deref());
    let sort = GroupSort::from_query(query.sort_by.as_deref());
    let is_public = query.is_public.as_deref().map(|v| v == "true");

    let (total, groups) = state.groups.list(is_public, sort, params).await?;
    let data = groups.iter().map(|g| g.list_item()).collect();

    Ok(Json(Page::new(params, total, data)))
}

/// GET /api/groups/:groupId - Get a single group.
pub async fn get_group(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
) -> ApiResult<Json<GroupDetail>> {
    let group = state
        .groups
        .find(group_id)
        .await?
        .ok_or_else(AppError::not_found)?;

    Ok(Json(group.detail()))
}

/// PUT /api/groups/:groupId - Update a group (full replace, password-gated).
pub async fn update_group(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
    Json(request): Json<UpdateGroupRequest>,
) -> ApiResult<Json<Ack>> {
    let name = require(&request.name)?;
    let password = require(&request.password)?;

    let loaded = state.groups.find(group_id).await?;
    guard::authorize(loaded, password)?.require()?;

    state
        .groups
        .update(
            group_id,
            name,
            request.image_url.as_deref(),
            request.is_public,
            request.introduction.as_deref(),
        )
        .await?;

    Ok(Json(Ack::new("Group updated")))
}

/// DELETE /api/groups/:groupId - Delete a group (password-gated).
pub async fn delete_group(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
    Json(request): Json<PasswordRequest>,
) -> ApiResult<Json<Ack>> {
    let password = require(&request.password)?;

    let loaded = state.groups.find(group_id).await?;
    guard::authorize(loaded, password)?.require()?;

    state.groups.delete(group_id).await?;

    tracing::info!(group_id, "group deleted");
    Ok(Json(Ack::new("Group deleted")))
}

/// POST /api/groups/:groupId/verify-password - Check the group password.
///
/// A mismatch here maps to 401 rather than the 403 used by update/delete.
pub async fn verify_group_password(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
    Json(request): Json<PasswordRequest>,
) -> ApiResult<Json<Ack>> {
    let password = require(&request.password)?;

    let loaded = state.groups.find(group_id).await?;
    match guard::authorize(loaded, password)? {
        Access::Authorized(_) => Ok(Json(Ack::new("Password verified"))),
        Access::NotFound => Err(AppError::not_found()),
        Access::Forbidden => Err(AppError::Unauthorized("Wrong password".to_string())),
    }
}

/// POST /api/groups/:groupId/like - Increment the like counter. No secret.
pub async fn like_group(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
) -> ApiResult<Json<Ack>> {
    state
        .groups
        .find(group_id)
        .await?
        .ok_or_else(AppError::not_found)?;

    state.groups.like(group_id).await?;

    Ok(Json(Ack::new("Group liked")))
}

/// GET /api/groups/:groupId/is-public - Visibility probe. No secret.
pub async fn group_public_status(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
) -> ApiResult<Json<GroupPublicStatus>> {
    let group = state
        .groups
        .find(group_id)
        .await?
        .ok_or_else(AppError::not_found)?;

    Ok(Json(GroupPublicStatus {
        id: group.id,
        is_public: group.is_public,
    }))
}
