//! Memory (post) API endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::{require, ApiResult};
use crate::db::{MemoryChanges, MemoryFilter, NewMemory};
use crate::errors::AppError;
use crate::guard;
use crate::listing::{MemorySort, Page, PageParams};
use crate::models::{
    Ack, CreateMemoryRequest, MemoryDetail, MemoryListItem, MemoryListQuery, PostPasswordRequest,
    UpdateMemoryRequest,
};
use crate::secret;
use crate::AppState;

/// POST /api/groups/:groupId/posts - Create a memory in a group.
///
/// Creation requires both the new post's password and the group's password;
/// both are hashed before storage.
pub async fn create_memory(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
    Json(request): Json<CreateMemoryRequest>,
) -> ApiResult<(StatusCode, Json<MemoryDetail>)> {
    let nickname = require(&request.nickname)?;
    let title = require(&request.title)?;
    let content = require(&request.content)?;
    let post_password = require(&request.post_password)?;
    let group_password = require(&request.group_password)?;

    state
        .groups
        .find(group_id)
        .await?
        .ok_or_else(AppError::not_found)?;

    let post_password_hash = secret::hash_secret(post_password, state.config.bcrypt_cost)?;
    let group_password_hash = secret::hash_secret(group_password, state.config.bcrypt_cost)?;

    let memory = state
        .memories
        .create(&NewMemory {
            group_id,
            nickname,
            title,
            content,
            post_password_hash: &post_password_hash,
            group_password_hash: &group_password_hash,
            image_url: request.image_url.as_deref(),
            tags: &request.tags,
            location: request.location.as_deref(),
            moment: request.moment.as_deref(),
            is_public: request.is_public,
        })
        .await?;

    state.groups.adjust_post_count(group_id, 1).await?;

    tracing::info!(group_id, post_id = memory.id, "memory created");
    Ok((StatusCode::CREATED, Json(memory.detail())))
}

/// GET /api/groups/:groupId/posts - List memories of a group.
pub async fn list_memories(
    State(state): State<AppState>,
    Path(group_id): Path<i64>,
    Query(query): Query<MemoryListQuery>,
) -> ApiResult<Json<Page<MemoryListItem>>> {
    let params = PageParams::from_query(query.page.as_deref(), query.page_size.as_deref());
    let sort = MemorySort::from_query(query.sort_by.as_deref());
    let filter = MemoryFilter {
        is_public: query.is_public.as_deref().map(|v| v == "true"),
        keyword: query.keyword.as_deref().filter(|kw| !kw.is_empty()),
    };

    let (total, memories) = state.memories.list(group_id, &filter, sort, params).await?;
    let data = memories.iter().map(|m| m.list_item()).collect();

    Ok(Json(Page::new(params, total, data)))
}

/// GET /api/posts/:postId - Get a single memory.
pub async fn get_memory(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> ApiResult<Json<MemoryDetail>> {
    let memory = state
        .memories
        .find(post_id)
        .await?
        .ok_or_else(AppError::not_found)?;

    Ok(Json(memory.detail()))
}

/// PUT /api/posts/:postId - Update a memory (full replace, password-gated).
pub async fn update_memory(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Json(request): Json<UpdateMemoryRequest>,
) -> ApiResult<Json<Ack>> {
    let nickname = require(&request.nickname)?;
    let title = require(&request.title)?;
    let content = require(&request.content)?;
    let post_password = require(&request.post_password)?;

    let loaded = state.memories.find(post_id).await?;
    guard::authorize(loaded, post_password)?.require()?;

    state
        .memories
        .update(
            post_id,
            &MemoryChanges {
                nickname,
                title,
                content,
                image_url: request.image_url.as_deref(),
                tags: &request.tags,
                location: request.location.as_deref(),
                moment: request.moment.as_deref(),
                is_public: request.is_public,
            },
        )
        .await?;

    Ok(Json(Ack::new("Post updated")))
}

/// DELETE /api/posts/:postId - Delete a memory (password-gated).
pub async fn delete_memory(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Json(request): Json<PostPasswordRequest>,
) -> ApiResult<Json<Ack>> {
    let post_password = require(&request.post_password)?;

    let loaded = state.memories.find(post_id).await?;
    let memory = guard::authorize(loaded, post_password)?.require()?;

    state.memories.delete(post_id).await?;
    state.groups.adjust_post_count(memory.group_id, -1).await?;

    tracing::info!(post_id, "memory deleted");
    Ok(Json(Ack::new("Post deleted")))
}
