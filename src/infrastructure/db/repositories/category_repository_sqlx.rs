use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::application::ports::category_repository::{
    CategoryPatch, CategoryRepository, NewCategory,
};
use crate::domain::tree::node::Category;
use crate::infrastructure::db::PgPool;

pub struct SqlxCategoryRepository {
    pub pool: PgPool,
}

impl SqlxCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CATEGORY_COLUMNS: &str = r#"id, name, slug, description, is_visible, "order",
    created_at, updated_at, created_by, updated_by"#;

fn map_category(r: &PgRow) -> Category {
    Category {
        id: r.get("id"),
        name: r.get("name"),
        slug: r.get("slug"),
        description: r.try_get("description").ok(),
        is_visible: r.get("is_visible"),
        order: r.get("order"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
        created_by: r.get("created_by"),
        updated_by: r.get("updated_by"),
    }
}

#[async_trait]
impl CategoryRepository for SqlxCategoryRepository {
    async fn insert(&self, new: NewCategory) -> anyhow::Result<Category> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO categories
                   (name, slug, description, is_visible, "order", created_by, updated_by)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING {CATEGORY_COLUMNS}"#
        ))
        .bind(&new.name)
        .bind(&new.slug)
        .bind(&new.description)
        .bind(new.is_visible)
        .bind(new.order)
        .bind(new.created_by)
        .bind(new.updated_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_category(&row))
    }

    async fn get_by_id(&self, id: i32) -> anyhow::Result<Option<Category>> {
        let row = sqlx::query(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_category))
    }

    async fn list(&self) -> anyhow::Result<Vec<Category>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY "order" ASC, id ASC"#
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_category).collect())
    }

    async fn slug_in_use(&self, slug: &str, exclude_id: Option<i32>) -> anyhow::Result<bool> {
        let row = match exclude_id {
            Some(id) => {
                sqlx::query("SELECT 1 AS hit FROM categories WHERE slug = $1 AND id <> $2 LIMIT 1")
                    .bind(slug)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("SELECT 1 AS hit FROM categories WHERE slug = $1 LIMIT 1")
                    .bind(slug)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };
        Ok(row.is_some())
    }

    async fn apply_patch(&self, id: i32, patch: CategoryPatch) -> anyhow::Result<Option<Category>> {
        let row = sqlx::query(&format!(
            r#"UPDATE categories SET
                   name = COALESCE($1, name),
                   slug = COALESCE($2, slug),
                   description = COALESCE($3, description),
                   is_visible = COALESCE($4, is_visible),
                   "order" = COALESCE($5, "order"),
                   updated_by = $6,
                   updated_at = now()
               WHERE id = $7
               RETURNING {CATEGORY_COLUMNS}"#
        ))
        .bind(&patch.name)
        .bind(&patch.slug)
        .bind(&patch.description)
        .bind(patch.is_visible)
        .bind(patch.order)
        .bind(patch.updated_by)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_category))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
