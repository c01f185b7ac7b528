use async_trait::async_trait;

use crate::domain::tree::node::Category;

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_visible: bool,
    pub order: i32,
    pub created_by: i32,
    pub updated_by: i32,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub is_visible: Option<bool>,
    pub order: Option<i32>,
    pub updated_by: i32,
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn insert(&self, new: NewCategory) -> anyhow::Result<Category>;

    async fn get_by_id(&self, id: i32) -> anyhow::Result<Option<Category>>;

    async fn list(&self) -> anyhow::Result<Vec<Category>>;

    async fn slug_in_use(&self, slug: &str, exclude_id: Option<i32>) -> anyhow::Result<bool>;

    async fn apply_patch(&self, id: i32, patch: CategoryPatch) -> anyhow::Result<Option<Category>>;

    /// Returns false when the id was absent.
    async fn delete(&self, id: i32) -> anyhow::Result<bool>;
}
