use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::tree::node::Node;

#[derive(Debug, Clone)]
pub struct NewNode {
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category_id: i32,
    pub parent_id: Option<i32>,
    pub is_published: bool,
    pub order: i32,
    pub metadata: Option<serde_json::Value>,
    pub created_by: i32,
    pub updated_by: i32,
}

/// Partial update. `parent_id`: None => not provided; Some(None) => set NULL;
/// Some(Some(id)) => set to value.
#[derive(Debug, Clone, Default)]
pub struct NodePatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<i32>,
    pub parent_id: Option<Option<i32>>,
    pub is_published: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
    pub is_open: Option<bool>,
    pub is_selected: Option<bool>,
    pub order: Option<i32>,
    pub metadata: Option<serde_json::Value>,
    pub updated_by: i32,
}

#[async_trait]
pub trait NodeRepository: Send + Sync {
    async fn insert(&self, new: NewNode) -> anyhow::Result<Node>;

    async fn get_by_id(&self, id: i32) -> anyhow::Result<Option<Node>>;

    async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<Node>>;

    /// Pre-insert existence check; not a database constraint, so a race
    /// between concurrent identical slugs stays possible.
    async fn slug_in_use(&self, slug: &str, exclude_id: Option<i32>) -> anyhow::Result<bool>;

    /// Nodes with no parent in a category, ordered by their sibling key.
    async fn list_roots(&self, category_id: i32) -> anyhow::Result<Vec<Node>>;

    async fn list_children(&self, parent_id: i32) -> anyhow::Result<Vec<Node>>;

    async fn child_ids(&self, parent_id: i32) -> anyhow::Result<Vec<i32>>;

    async fn list_by_ids(&self, ids: &[i32]) -> anyhow::Result<Vec<Node>>;

    async fn list_all(&self) -> anyhow::Result<Vec<Node>>;

    /// Applies the patch and refreshes `updated_at`. Returns None when the
    /// row is absent.
    async fn apply_patch(&self, id: i32, patch: NodePatch) -> anyhow::Result<Option<Node>>;

    async fn set_open(&self, id: i32, open: bool) -> anyhow::Result<Option<Node>>;

    /// Clears `is_selected` wherever it is set, store-wide.
    async fn clear_selection(&self) -> anyhow::Result<()>;

    async fn set_selected(&self, id: i32) -> anyhow::Result<Option<Node>>;

    async fn update_content(
        &self,
        id: i32,
        content: &str,
        updated_by: i32,
    ) -> anyhow::Result<Option<Node>>;

    async fn delete_many(&self, ids: &[i32]) -> anyhow::Result<u64>;

    /// Deletes every node in a category, returning the removed ids so
    /// auxiliary rows can be cleaned up.
    async fn delete_by_category(&self, category_id: i32) -> anyhow::Result<Vec<i32>>;
}
