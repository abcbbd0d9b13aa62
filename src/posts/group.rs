//! Group model and repository.
//!
//! Groups are named collections of posts, addressed by slug.

use sqlx::SqlitePool;

use crate::{PlumaError, Result};

/// Group entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Group {
    /// Unique group ID.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// URL slug (unique).
    pub slug: String,
    /// Group description.
    pub description: String,
}

/// Data for creating a new group.
#[derive(Debug, Clone)]
pub struct NewGroup {
    /// Display title.
    pub title: String,
    /// URL slug.
    pub slug: String,
    /// Group description.
    pub description: String,
}

impl NewGroup {
    /// Create a new group with required fields.
    pub fn new(title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slug: slug.into(),
            description: String::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Repository for group operations.
pub struct GroupRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> GroupRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new group.
    pub async fn create(&self, new_group: &NewGroup) -> Result<Group> {
        let result = sqlx::query("INSERT INTO groups (title, slug, description) VALUES (?, ?, ?)")
            .bind(&new_group.title)
            .bind(&new_group.slug)
            .bind(&new_group.description)
            .execute(self.pool)
            .await?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| PlumaError::NotFound("group".to_string()))
    }

    /// Get a group by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Group>> {
        let group = sqlx::query_as::<_, Group>(
            "SELECT id, title, slug, description FROM groups WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(group)
    }

    /// Get a group by slug.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Group>> {
        let group = sqlx::query_as::<_, Group>(
            "SELECT id, title, slug, description FROM groups WHERE slug = ?",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(group)
    }

    /// List all groups, ordered by title.
    pub async fn list_all(&self) -> Result<Vec<Group>> {
        let groups = sqlx::query_as::<_, Group>(
            "SELECT id, title, slug, description FROM groups ORDER BY title",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(groups)
    }
}
