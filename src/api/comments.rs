//! Comment API endpoints.
//!
//! Comment update returns the updated entity, unlike group/memory updates
//! which return an acknowledgment. That asymmetry is part of the contract.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{require, ApiResult};
use crate::errors::AppError;
use crate::guard;
use crate::listing::{Page, PageParams};
use crate::models::{Ack, CommentListQuery, CommentRequest, CommentView};
use crate::AppState;

/// POST /api/posts/:postId/comments - Create a comment on a memory.
pub async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Json(request): Json<CommentRequest>,
) -> ApiResult<Json<CommentView>> {
    let nickname = require(&request.nickname)?;
    let content = require(&request.content)?;
    let password = require(&request.password)?;

    state
        .memories
        .find(post_id)
        .await?
        .ok_or_else(AppError::not_found)?;

    let comment = state
        .comments
        .create(post_id, nickname, content, password)
        .await?;

    state.memories.adjust_comment_count(post_id, 1).await?;

    Ok(Json(comment.view()))
}

/// GET /api/posts/:postId/comments - List comments of a memory, newest first.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Query(query): Query<CommentListQuery>,
) -> ApiResult<Json<Page<CommentView>>> {
    let params = PageParams::from_query(query.page.as_deref(), query.page_size.as_deref());

    let (total, comments) = state.comments.list(post_id, params).await?;
    let data = comments.iter().map(|c| c.view()).collect();

    Ok(Json(Page::new(params, total, data)))
}

/// PUT /api/comments/:commentId - Update a comment (password-gated).
pub async fn update_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
    Json(request): Json<CommentRequest>,
) -> ApiResult<Json<CommentView>> {
    let nickname = require(&request.nickname)?;
    let content = require(&request.content)?;
    let password = require(&request.password)?;

    let loaded = state.comments.find(comment_id).await?;
    guard::authorize(loaded, password)?.require()?;

    state.comments.update(comment_id, nickname, content).await?;

    let updated = state
        .comments
        .find(comment_id)
        .await?
        .ok_or_else(AppError::not_found)?;

    Ok(Json(updated.view()))
}

/// DELETE /api/comments/:commentId - Delete a comment (password-gated).
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
    Json(request): Json<CommentRequest>,
) -> ApiResult<Json<Ack>> {
    let password = require(&request.password)?;

    let loaded = state.comments.find(comment_id).await?;
    let comment = guard::authorize(loaded, password)?.require()?;

    state.comments.delete(comment_id).await?;
    state
        .memories
        .adjust_comment_count(comment.memory_id, -1)
        .await?;

    Ok(Json(Ack::new("Comment deleted")))
}
