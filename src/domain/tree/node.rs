use chrono::{DateTime, Utc};

/// A tree entity: a post acting as a document or a folder depending on
/// whether anything hangs below it.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    /// Opaque serialized editor document; folders carry none.
    pub content: Option<String>,
    pub category_id: i32,
    pub parent_id: Option<i32>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub is_open: bool,
    pub is_selected: bool,
    pub order: i32,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: i32,
    pub updated_by: i32,
}

/// Top-level grouping root, independent lifecycle from nodes.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_visible: bool,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: i32,
    pub updated_by: i32,
}

#[derive(Debug, Clone)]
pub struct Favorite {
    pub id: i32,
    pub post_id: i32,
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct RecentEntry {
    pub id: i32,
    pub post_id: i32,
    pub user_id: i32,
    pub accessed_at: DateTime<Utc>,
}
