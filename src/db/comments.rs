//! Comment repository.
//!
//! Comment passwords are stored as plain values and compared in constant
//! time by the guard; they never use the bcrypt scheme.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::guard::Secured;
use crate::listing::PageParams;
use crate::models::CommentView;
use crate::secret::SecretScheme;

/// A comment row as stored, including the plain password.
#[derive(Debug, Clone)]
pub struct CommentRecord {
    pub id: i64,
    pub memory_id: i64,
    pub nickname: String,
    pub content: String,
    pub password: String,
    pub created_at: String,
}

impl CommentRecord {
    /// Response shape; the stored password is stripped here.
    pub fn view(&self) -> CommentView {
        CommentView {
            id: self.id,
            nickname: self.nickname.clone(),
            content: self.content.clone(),
            created_at: self.created_at.clone(),
        }
    }
}

impl Secured for CommentRecord {
    fn stored_secret(&self) -> &str {
        &self.password
    }

    fn scheme(&self) -> SecretScheme {
        SecretScheme::Plain
    }
}

/// Repository for comment rows.
#[derive(Clone)]
pub struct CommentRepository {
    pool: SqlitePool,
}

impl CommentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new comment and return the stored row.
    pub async fn create(
        &self,
        memory_id: i64,
        nickname: &str,
        content: &str,
        password: &str,
    ) -> Result<CommentRecord, AppError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO comments (memory_id, nickname, content, password, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(memory_id)
        .bind(nickname)
        .bind(content)
        .bind(password)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(CommentRecord {
            id: result.last_insert_rowid(),
            memory_id,
            nickname: nickname.to_string(),
            content: content.to_string(),
            password: password.to_string(),
            created_at: now,
        })
    }

    /// Load a comment by id.
    pub async fn find(&self, id: i64) -> Result<Option<CommentRecord>, AppError> {
        let row = sqlx::query(
            "SELECT id, memory_id, nickname, content, password, created_at \
             FROM comments WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(comment_from_row))
    }

    /// List comments of a memory, newest first, with pagination.
    pub async fn list(
        &self,
        memory_id: i64,
        params: PageParams,
    ) -> Result<(i64, Vec<CommentRecord>), AppError> {
        let total: i64 = sqlx::query("SELECT COUNT(*) AS count FROM comments WHERE memory_id = ?")
            .bind(memory_id)
            .fetch_one(&self.pool)
            .await?
            .get("count");

        let rows = sqlx::query(
            "SELECT id, memory_id, nickname, content, password, created_at \
             FROM comments WHERE memory_id = ? \
             ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(memory_id)
        .bind(params.page_size)
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok((total, rows.iter().map(comment_from_row).collect()))
    }

    /// Overwrite nickname and content of a comment.
    pub async fn update(&self, id: i64, nickname: &str, content: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE comments SET nickname = ?, content = ? WHERE id = ?")
            .bind(nickname)
            .bind(content)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Delete a comment.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn comment_from_row(row: &sqlx::sqlite::SqliteRow) -> CommentRecord {
    CommentRecord {
        id: row.get("id"),
        memory_id: row.get("memory_id"),
        nickname: row.get("nickname"),
        content: row.get("content"),
        password: row.get("password"),
        created_at: row.get("created_at"),
    }
}
