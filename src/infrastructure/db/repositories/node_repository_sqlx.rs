use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::application::ports::node_repository::{NewNode, NodePatch, NodeRepository};
use crate::domain::tree::node::Node;
use crate::infrastructure::db::PgPool;

pub struct SqlxNodeRepository {
    pub pool: PgPool,
}

impl SqlxNodeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const NODE_COLUMNS: &str = r#"id, title, slug, excerpt, content, category_id, parent_id,
    is_published, published_at, is_open, is_selected, "order", metadata,
    created_at, updated_at, created_by, updated_by"#;

fn map_node(r: &PgRow) -> Node {
    Node {
        id: r.get("id"),
        title: r.get("title"),
        slug: r.get("slug"),
        excerpt: r.try_get("excerpt").ok(),
        content: r.try_get("content").ok(),
        category_id: r.get("category_id"),
        parent_id: r.get("parent_id"),
        is_published: r.get("is_published"),
        published_at: r.try_get("published_at").ok(),
        is_open: r.get("is_open"),
        is_selected: r.get("is_selected"),
        order: r.get("order"),
        metadata: r.try_get("metadata").ok(),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
        created_by: r.get("created_by"),
        updated_by: r.get("updated_by"),
    }
}

#[async_trait]
impl NodeRepository for SqlxNodeRepository {
    async fn insert(&self, new: NewNode) -> anyhow::Result<Node> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO posts
                   (title, slug, excerpt, content, category_id, parent_id,
                    is_published, "order", metadata, created_by, updated_by)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
               RETURNING {NODE_COLUMNS}"#
        ))
        .bind(&new.title)
        .bind(&new.slug)
        .bind(&new.excerpt)
        .bind(&new.content)
        .bind(new.category_id)
        .bind(new.parent_id)
        .bind(new.is_published)
        .bind(new.order)
        .bind(&new.metadata)
        .bind(new.created_by)
        .bind(new.updated_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_node(&row))
    }

    async fn get_by_id(&self, id: i32) -> anyhow::Result<Option<Node>> {
        let row = sqlx::query(&format!("SELECT {NODE_COLUMNS} FROM posts WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_node))
    }

    async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<Node>> {
        let row = sqlx::query(&format!(
            "SELECT {NODE_COLUMNS} FROM posts WHERE slug = $1 LIMIT 1"
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_node))
    }

    async fn slug_in_use(&self, slug: &str, exclude_id: Option<i32>) -> anyhow::Result<bool> {
        let row = match exclude_id {
            Some(id) => {
                sqlx::query("SELECT 1 AS hit FROM posts WHERE slug = $1 AND id <> $2 LIMIT 1")
                    .bind(slug)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("SELECT 1 AS hit FROM posts WHERE slug = $1 LIMIT 1")
                    .bind(slug)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };
        Ok(row.is_some())
    }

    async fn list_roots(&self, category_id: i32) -> anyhow::Result<Vec<Node>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {NODE_COLUMNS} FROM posts
               WHERE category_id = $1 AND parent_id IS NULL
               ORDER BY "order" ASC, id ASC"#
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_node).collect())
    }

    async fn list_children(&self, parent_id: i32) -> anyhow::Result<Vec<Node>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {NODE_COLUMNS} FROM posts
               WHERE parent_id = $1
               ORDER BY "order" ASC, id ASC"#
        ))
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_node).collect())
    }

    async fn child_ids(&self, parent_id: i32) -> anyhow::Result<Vec<i32>> {
        let rows = sqlx::query("SELECT id FROM posts WHERE parent_id = $1")
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|r| r.get("id")).collect())
    }

    async fn list_by_ids(&self, ids: &[i32]) -> anyhow::Result<Vec<Node>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = sqlx::query(&format!(
            "SELECT {NODE_COLUMNS} FROM posts WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_node).collect())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Node>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {NODE_COLUMNS} FROM posts ORDER BY id ASC"#
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_node).collect())
    }

    async fn apply_patch(&self, id: i32, patch: NodePatch) -> anyhow::Result<Option<Node>> {
        // parent_id distinguishes "leave alone" from "set NULL", so it gets
        // its own statement instead of a COALESCE slot.
        let row = match patch.parent_id {
            None => {
                sqlx::query(&format!(
                    r#"UPDATE posts SET
                           title = COALESCE($1, title),
                           slug = COALESCE($2, slug),
                           excerpt = COALESCE($3, excerpt),
                           content = COALESCE($4, content),
                           category_id = COALESCE($5, category_id),
                           is_published = COALESCE($6, is_published),
                           published_at = COALESCE($7, published_at),
                           is_open = COALESCE($8, is_open),
                           is_selected = COALESCE($9, is_selected),
                           "order" = COALESCE($10, "order"),
                           metadata = COALESCE($11, metadata),
                           updated_by = $12,
                           updated_at = now()
                       WHERE id = $13
                       RETURNING {NODE_COLUMNS}"#
                ))
                .bind(&patch.title)
                .bind(&patch.slug)
                .bind(&patch.excerpt)
                .bind(&patch.content)
                .bind(patch.category_id)
                .bind(patch.is_published)
                .bind(patch.published_at)
                .bind(patch.is_open)
                .bind(patch.is_selected)
                .bind(patch.order)
                .bind(&patch.metadata)
                .bind(patch.updated_by)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
            Some(newp) => {
                sqlx::query(&format!(
                    r#"UPDATE posts SET
                           title = COALESCE($1, title),
                           slug = COALESCE($2, slug),
                           excerpt = COALESCE($3, excerpt),
                           content = COALESCE($4, content),
                           category_id = COALESCE($5, category_id),
                           is_published = COALESCE($6, is_published),
                           published_at = COALESCE($7, published_at),
                           is_open = COALESCE($8, is_open),
                           is_selected = COALESCE($9, is_selected),
                           "order" = COALESCE($10, "order"),
                           metadata = COALESCE($11, metadata),
                           parent_id = $12,
                           updated_by = $13,
                           updated_at = now()
                       WHERE id = $14
                       RETURNING {NODE_COLUMNS}"#
                ))
                .bind(&patch.title)
                .bind(&patch.slug)
                .bind(&patch.excerpt)
                .bind(&patch.content)
                .bind(patch.category_id)
                .bind(patch.is_published)
                .bind(patch.published_at)
                .bind(patch.is_open)
                .bind(patch.is_selected)
                .bind(patch.order)
                .bind(&patch.metadata)
                .bind(newp)
                .bind(patch.updated_by)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
            }
        };
        Ok(row.as_ref().map(map_node))
    }

    async fn set_open(&self, id: i32, open: bool) -> anyhow::Result<Option<Node>> {
        let row = sqlx::query(&format!(
            r#"UPDATE posts SET is_open = $1, updated_at = now()
               WHERE id = $2
               RETURNING {NODE_COLUMNS}"#
        ))
        .bind(open)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_node))
    }

    async fn clear_selection(&self) -> anyhow::Result<()> {
        sqlx::query("UPDATE posts SET is_selected = FALSE WHERE is_selected = TRUE")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn set_selected(&self, id: i32) -> anyhow::Result<Option<Node>> {
        let row = sqlx::query(&format!(
            r#"UPDATE posts SET is_selected = TRUE, updated_at = now()
               WHERE id = $1
               RETURNING {NODE_COLUMNS}"#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_node))
    }

    async fn update_content(
        &self,
        id: i32,
        content: &str,
        updated_by: i32,
    ) -> anyhow::Result<Option<Node>> {
        let row = sqlx::query(&format!(
            r#"UPDATE posts SET content = $1, updated_by = $2, updated_at = now()
               WHERE id = $3
               RETURNING {NODE_COLUMNS}"#
        ))
        .bind(content)
        .bind(updated_by)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_node))
    }

    async fn delete_many(&self, ids: &[i32]) -> anyhow::Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let res = sqlx::query("DELETE FROM posts WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    async fn delete_by_category(&self, category_id: i32) -> anyhow::Result<Vec<i32>> {
        let rows = sqlx::query("DELETE FROM posts WHERE category_id = $1 RETURNING id")
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|r| r.get("id")).collect())
    }
}
