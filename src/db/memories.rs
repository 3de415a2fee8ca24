//! Memory (post) repository.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::guard::Secured;
use crate::listing::{MemorySort, PageParams};
use crate::models::{MemoryDetail, MemoryListItem};
use crate::secret::SecretScheme;

const MEMORY_COLUMNS: &str = "id, group_id, nickname, title, content, post_password_hash, \
     group_password_hash, image_url, tags, location, moment, is_public, \
     like_count, comment_count, created_at";

/// A memory row as stored, including both password hashes. The group hash
/// is kept redundantly for group-scoped actions on the post.
#[derive(Debug, Clone)]
pub struct MemoryRecord {
    pub id: i64,
    pub group_id: i64,
    pub nickname: String,
    pub title: String,
    pub content: String,
    pub post_password_hash: String,
    pub group_password_hash: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub location: Option<String>,
    pub moment: Option<String>,
    pub is_public: bool,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: String,
}

impl MemoryRecord {
    /// Detail/create response shape; both hashes are stripped here.
    pub fn detail(&self) -> MemoryDetail {
        MemoryDetail {
            id: self.id,
            group_id: self.group_id,
            nickname: self.nickname.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
            image_url: self.image_url.clone(),
            tags: self.tags.clone(),
            location: self.location.clone(),
            moment: self.moment.clone(),
            is_public: self.is_public,
            like_count: self.like_count,
            comment_count: self.comment_count,
            created_at: self.created_at.clone(),
        }
    }

    /// List-item response shape; omits content and group id.
    pub fn list_item(&self) -> MemoryListItem {
        MemoryListItem {
            id: self.id,
            nickname: self.nickname.clone(),
            title: self.title.clone(),
            image_url: self.image_url.clone(),
            tags: self.tags.clone(),
            location: self.location.clone(),
            moment: self.moment.clone(),
            is_public: self.is_public,
            like_count: self.like_count,
            comment_count: self.comment_count,
            created_at: self.created_at.clone(),
        }
    }
}

impl Secured for MemoryRecord {
    fn stored_secret(&self) -> &str {
        &self.post_password_hash
    }

    fn scheme(&self) -> SecretScheme {
        SecretScheme::Hashed
    }
}

/// Fields written on memory create.
pub struct NewMemory<'a> {
    pub group_id: i64,
    pub nickname: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub post_password_hash: &'a str,
    pub group_password_hash: &'a str,
    pub image_url: Option<&'a str>,
    pub tags: &'a [String],
    pub location: Option<&'a str>,
    pub moment: Option<&'a str>,
    pub is_public: bool,
}

/// Fields overwritten on memory update (full replace of mutable fields).
pub struct MemoryChanges<'a> {
    pub nickname: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub image_url: Option<&'a str>,
    pub tags: &'a [String],
    pub location: Option<&'a str>,
    pub moment: Option<&'a str>,
    pub is_public: bool,
}

/// Filters applied to the memory list, besides the owning group.
#[derive(Debug, Default)]
pub struct MemoryFilter<'a> {
    pub is_public: Option<bool>,
    pub keyword: Option<&'a str>,
}

/// Repository for memory rows.
#[derive(Clone)]
pub struct MemoryRepository {
    pool: SqlitePool,
}

impl MemoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new memory and return the stored row.
    pub async fn create(&self, new: &NewMemory<'_>) -> Result<MemoryRecord, AppError> {
        let now = Utc::now().to_rfc3339();
        let tags_json = serde_json::to_string(new.tags).unwrap_or_else(|_| "[]".to_string());

        let result = sqlx::query(
            "INSERT INTO memories (group_id, nickname, title, content, post_password_hash, \
             group_password_hash, image_url, tags, location, moment, is_public, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(new.group_id)
        .bind(new.nickname)
        .bind(new.title)
        .bind(new.content)
        .bind(new.post_password_hash)
        .bind(new.group_password_hash)
        .bind(new.image_url)
        .bind(&tags_json)
        .bind(new.location)
        .bind(new.moment)
        .bind(new.is_public as i64)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(MemoryRecord {
            id: result.last_insert_rowid(),
            group_id: new.group_id,
            nickname: new.nickname.to_string(),
            title: new.title.to_string(),
            content: new.content.to_string(),
            post_password_hash: new.post_password_hash.to_string(),
            group_password_hash: new.group_password_hash.to_string(),
            image_url: new.image_url.map(str::to_string),
            tags: new.tags.to_vec(),
            location: new.location.map(str::to_string),
            moment: new.moment.map(str::to_string),
            is_public: new.is_public,
            like_count: 0,
            comment_count: 0,
            created_at: now,
        })
    }

    /// Load a memory by id.
    pub async fn find(&self, id: i64) -> Result<Option<MemoryRecord>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {MEMORY_COLUMNS} FROM memories WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(memory_from_row))
    }

    /// List memories of a group with optional visibility and keyword
    /// filters, allow-listed sort, and pagination. The keyword matches as a
    /// substring of title or content under the database's default collation.
    pub async fn list(
        &self,
        group_id: i64,
        filter: &MemoryFilter<'_>,
        sort: MemorySort,
        params: PageParams,
    ) -> Result<(i64, Vec<MemoryRecord>), AppError> {
        let mut where_sql = String::from(" WHERE group_id = ?");
        if filter.is_public.is_some() {
            where_sql.push_str(" AND is_public = ?");
        }
        if filter.keyword.is_some() {
            where_sql.push_str(" AND (title LIKE ? OR content LIKE ?)");
        }
        let pattern = filter.keyword.map(|kw| format!("%{}%", kw));

        let count_sql = format!("SELECT COUNT(*) AS count FROM memories{where_sql}");
        let mut count_query = sqlx::query(&count_sql).bind(group_id);
        if let Some(flag) = filter.is_public {
            count_query = count_query.bind(flag as i64);
        }
        if let Some(ref pattern) = pattern {
            count_query = count_query.bind(pattern).bind(pattern);
        }
        let total: i64 = count_query.fetch_one(&self.pool).await?.get("count");

        let page_sql = format!(
            "SELECT {MEMORY_COLUMNS} FROM memories{where_sql} \
             ORDER BY {} DESC, id DESC LIMIT ? OFFSET ?",
            sort.column()
        );
        let mut page_query = sqlx::query(&page_sql).bind(group_id);
        if let Some(flag) = filter.is_public {
            page_query = page_query.bind(flag as i64);
        }
        if let Some(ref pattern) = pattern {
            page_query = page_query.bind(pattern).bind(pattern);
        }
        let rows = page_query
            .bind(params.page_size)
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((total, rows.iter().map(memory_from_row).collect()))
    }

    /// Overwrite all mutable fields of a memory.
    pub async fn update(&self, id: i64, changes: &MemoryChanges<'_>) -> Result<(), AppError> {
        let tags_json = serde_json::to_string(changes.tags).unwrap_or_else(|_| "[]".to_string());

        sqlx::query(
            "UPDATE memories SET nickname = ?, title = ?, content = ?, image_url = ?, \
             tags = ?, location = ?, moment = ?, is_public = ? WHERE id = ?",
        )
        .bind(changes.nickname)
        .bind(changes.title)
        .bind(changes.content)
        .bind(changes.image_url)
        .bind(&tags_json)
        .bind(changes.location)
        .bind(changes.moment)
        .bind(changes.is_public as i64)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a memory. Its comments cascade.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM memories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Adjust the comment counter after a comment create or delete.
    pub async fn adjust_comment_count(&self, id: i64, delta: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE memories SET comment_count = comment_count + ? WHERE id = ?")
            .bind(delta)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn memory_from_row(row: &sqlx::sqlite::SqliteRow) -> MemoryRecord {
    let is_public: i64 = row.get("is_public");
    let tags_str: Option<String> = row.get("tags");
    MemoryRecord {
        id: row.get("id"),
        group_id: row.get("group_id"),
        nickname: row.get("nickname"),
        title: row.get("title"),
        content: row.get("content"),
        post_password_hash: row.get("post_password_hash"),
        group_password_hash: row.get("group_password_hash"),
        image_url: row.get("image_url"),
        tags: tags_str.map(|s| parse_json_array(&s)).unwrap_or_default(),
        location: row.get("location"),
        moment: row.get("moment"),
        is_public: is_public != 0,
        like_count: row.get("like_count"),
        comment_count: row.get("comment_count"),
        created_at: row.get("created_at"),
    }
}

fn parse_json_array(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}
