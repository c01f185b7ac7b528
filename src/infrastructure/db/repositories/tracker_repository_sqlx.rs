use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::Row;

use crate::application::ports::tracker_repository::TrackerRepository;
use crate::domain::tree::node::{Favorite, RecentEntry};
use crate::infrastructure::db::PgPool;

pub struct SqlxTrackerRepository {
    pub pool: PgPool,
}

impl SqlxTrackerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_favorite(r: &PgRow) -> Favorite {
    Favorite {
        id: r.get("id"),
        post_id: r.get("post_id"),
        user_id: r.get("user_id"),
        created_at: r.get("created_at"),
    }
}

fn map_recent(r: &PgRow) -> RecentEntry {
    RecentEntry {
        id: r.get("id"),
        post_id: r.get("post_id"),
        user_id: r.get("user_id"),
        accessed_at: r.get("accessed_at"),
    }
}

#[async_trait]
impl TrackerRepository for SqlxTrackerRepository {
    async fn find_favorite(&self, post_id: i32, user_id: i32) -> anyhow::Result<Option<Favorite>> {
        let row = sqlx::query(
            r#"SELECT id, post_id, user_id, created_at
               FROM favorites WHERE post_id = $1 AND user_id = $2"#,
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_favorite))
    }

    async fn insert_favorite(&self, post_id: i32, user_id: i32) -> anyhow::Result<Favorite> {
        let row = sqlx::query(
            r#"INSERT INTO favorites (post_id, user_id)
               VALUES ($1, $2)
               RETURNING id, post_id, user_id, created_at"#,
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_favorite(&row))
    }

    async fn delete_favorite(&self, post_id: i32, user_id: i32) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM favorites WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_favorites(&self, user_id: i32) -> anyhow::Result<Vec<Favorite>> {
        let rows = sqlx::query(
            r#"SELECT id, post_id, user_id, created_at
               FROM favorites WHERE user_id = $1
               ORDER BY created_at DESC, id DESC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_favorite).collect())
    }

    async fn touch_recent(
        &self,
        post_id: i32,
        user_id: i32,
        at: DateTime<Utc>,
    ) -> anyhow::Result<Option<RecentEntry>> {
        let row = sqlx::query(
            r#"UPDATE recent_items SET accessed_at = $1
               WHERE post_id = $2 AND user_id = $3
               RETURNING id, post_id, user_id, accessed_at"#,
        )
        .bind(at)
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_recent))
    }

    async fn insert_recent(
        &self,
        post_id: i32,
        user_id: i32,
        at: DateTime<Utc>,
    ) -> anyhow::Result<RecentEntry> {
        let row = sqlx::query(
            r#"INSERT INTO recent_items (post_id, user_id, accessed_at)
               VALUES ($1, $2, $3)
               RETURNING id, post_id, user_id, accessed_at"#,
        )
        .bind(post_id)
        .bind(user_id)
        .bind(at)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_recent(&row))
    }

    async fn list_recent(&self, user_id: i32) -> anyhow::Result<Vec<RecentEntry>> {
        let rows = sqlx::query(
            r#"SELECT id, post_id, user_id, accessed_at
               FROM recent_items WHERE user_id = $1
               ORDER BY accessed_at DESC, id DESC"#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_recent).collect())
    }

    async fn trim_recent(&self, user_id: i32, keep: usize) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"DELETE FROM recent_items
               WHERE user_id = $1 AND id NOT IN (
                   SELECT id FROM recent_items
                   WHERE user_id = $1
                   ORDER BY accessed_at DESC, id DESC
                   LIMIT $2
               )"#,
        )
        .bind(user_id)
        .bind(keep as i64)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }

    async fn delete_for_posts(&self, post_ids: &[i32]) -> anyhow::Result<()> {
        if post_ids.is_empty() {
            return Ok(());
        }
        sqlx::query("DELETE FROM favorites WHERE post_id = ANY($1)")
            .bind(post_ids)
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM recent_items WHERE post_id = ANY($1)")
            .bind(post_ids)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
