use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::tree::node::{Favorite, RecentEntry};

#[async_trait]
pub trait TrackerRepository: Send + Sync {
    async fn find_favorite(&self, post_id: i32, user_id: i32) -> anyhow::Result<Option<Favorite>>;

    async fn insert_favorite(&self, post_id: i32, user_id: i32) -> anyhow::Result<Favorite>;

    /// Returns false when no row existed.
    async fn delete_favorite(&self, post_id: i32, user_id: i32) -> anyhow::Result<bool>;

    async fn list_favorites(&self, user_id: i32) -> anyhow::Result<Vec<Favorite>>;

    /// Refreshes the timestamp of an existing (post, user) row. Returns None
    /// when there is nothing to refresh.
    async fn touch_recent(
        &self,
        post_id: i32,
        user_id: i32,
        at: DateTime<Utc>,
    ) -> anyhow::Result<Option<RecentEntry>>;

    async fn insert_recent(
        &self,
        post_id: i32,
        user_id: i32,
        at: DateTime<Utc>,
    ) -> anyhow::Result<RecentEntry>;

    /// Most recently accessed first.
    async fn list_recent(&self, user_id: i32) -> anyhow::Result<Vec<RecentEntry>>;

    /// Deletes everything past the `keep` most recent rows for the user,
    /// returning how many went away.
    async fn trim_recent(&self, user_id: i32, keep: usize) -> anyhow::Result<u64>;

    /// Drops favorite and recent rows referencing any of the given posts.
    async fn delete_for_posts(&self, post_ids: &[i32]) -> anyhow::Result<()>;
}
