//! Group repository.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::guard::Secured;
use crate::listing::{GroupSort, PageParams};
use crate::models::{GroupDetail, GroupListItem};
use crate::secret::SecretScheme;

const GROUP_COLUMNS: &str = "id, name, password_hash, image_url, is_public, introduction, \
     like_count, post_count, badge_count, created_at";

/// A group row as stored, including the password hash.
#[derive(Debug, Clone)]
pub struct GroupRecord {
    pub id: i64,
    pub name: String,
    pub password_hash: String,
    pub image_url: Option<String>,
    pub is_public: bool,
    pub introduction: Option<String>,
    pub like_count: i64,
    pub post_count: i64,
    pub badge_count: i64,
    pub created_at: String,
}

impl GroupRecord {
    /// Detail/create response shape; the password hash is stripped here.
    pub fn detail(&self) -> GroupDetail {
        GroupDetail {
            id: self.id,
            name: self.name.clone(),
            image_url: self.image_url.clone(),
            is_public: self.is_public,
            like_count: self.like_count,
            badges: Vec::new(),
            post_count: self.post_count,
            created_at: self.created_at.clone(),
            introduction: self.introduction.clone(),
        }
    }

    /// List-item response shape.
    pub fn list_item(&self) -> GroupListItem {
        GroupListItem {
            id: self.id,
            name: self.name.clone(),
            image_url: self.image_url.clone(),
            is_public: self.is_public,
            like_count: self.like_count,
            badge_count: self.badge_count,
            post_count: self.post_count,
            created_at: self.created_at.clone(),
            introduction: self.introduction.clone(),
        }
    }
}

impl Secured for GroupRecord {
    fn stored_secret(&self) -> &str {
        &self.password_hash
    }

    fn scheme(&self) -> SecretScheme {
        SecretScheme::Hashed
    }
}

/// Repository for group rows.
#[derive(Clone)]
pub struct GroupRepository {
    pool: SqlitePool,
}

impl GroupRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new group and return the stored row.
    pub async fn create(
        &self,
        name: &str,
        password_hash: &str,
        image_url: Option<&str>,
        is_public: bool,
        introduction: Option<&str>,
    ) -> Result<GroupRecord, AppError> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO groups (name, password_hash, image_url, is_public, introduction, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(name)
        .bind(password_hash)
        .bind(image_url)
        .bind(is_public as i64)
        .bind(introduction)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(GroupRecord {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            password_hash: password_hash.to_string(),
            image_url: image_url.map(str::to_string),
            is_public,
            introduction: introduction.map(str::to_string),
            like_count: 0,
            post_count: 0,
            badge_count: 0,
            created_at: now,
        })
    }

    /// Load a group by id.
    pub async fn find(&self, id: i64) -> Result<Option<GroupRecord>, AppError> {
        let row = sqlx::query(&format!("SELECT {GROUP_COLUMNS} FROM groups WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(group_from_row))
    }

    /// List groups with an optional visibility filter, allow-listed sort,
    /// and pagination. Returns the filtered total and the current page.
    ///
    /// The count and the page are two independent reads.
    pub async fn list(
        &self,
        is_public: Option<bool>,
        sort: GroupSort,
        params: PageParams,
    ) -> Result<(i64, Vec<GroupRecord>), AppError> {
        let where_sql = match is_public {
            Some(_) => " WHERE is_public = ?",
            None => "",
        };

        let count_sql = format!("SELECT COUNT(*) AS count FROM groups{where_sql}");
        let mut count_query = sqlx::query(&count_sql);
        if let Some(flag) = is_public {
            count_query = count_query.bind(flag as i64);
        }
        let total: i64 = count_query.fetch_one(&self.pool).await?.get("count");

        // Sort column comes from the allow-list, never from the caller.
        let page_sql = format!(
            "SELECT {GROUP_COLUMNS} FROM groups{where_sql} \
             ORDER BY {} DESC, id DESC LIMIT ? OFFSET ?",
            sort.column()
        );
        let mut page_query = sqlx::query(&page_sql);
        if let Some(flag) = is_public {
            page_query = page_query.bind(flag as i64);
        }
        let rows = page_query
            .bind(params.page_size)
            .bind(params.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((total, rows.iter().map(group_from_row).collect()))
    }

    /// Overwrite all mutable fields of a group.
    pub async fn update(
        &self,
        id: i64,
        name: &str,
        image_url: Option<&str>,
        is_public: bool,
        introduction: Option<&str>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE groups SET name = ?, image_url = ?, is_public = ?, introduction = ? WHERE id = ?",
        )
        .bind(name)
        .bind(image_url)
        .bind(is_public as i64)
        .bind(introduction)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a group. Memories (and their comments) cascade.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM groups WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Increment the like counter in place. Anyone can like; no secret.
    pub async fn like(&self, id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE groups SET like_count = like_count + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Adjust the post counter after a memory create or delete.
    pub async fn adjust_post_count(&self, id: i64, delta: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE groups SET post_count = post_count + ? WHERE id = ?")
            .bind(delta)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn group_from_row(row: &sqlx::sqlite::SqliteRow) -> GroupRecord {
    let is_public: i64 = row.get("is_public");
    GroupRecord {
        id: row.get("id"),
        name: row.get("name"),
        password_hash: row.get("password_hash"),
        image_url: row.get("image_url"),
        is_public: is_public != 0,
        introduction: row.get("introduction"),
        like_count: row.get("like_count"),
        post_count: row.get("post_count"),
        badge_count: row.get("badge_count"),
        created_at: row.get("created_at"),
    }
}
