//! In-memory repository implementations for exercising use cases and the
//! tree context without a database.

#![allow(dead_code)]

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use leafpress::application::ports::category_repository::{
    CategoryPatch, CategoryRepository, NewCategory,
};
use leafpress::application::ports::node_repository::{NewNode, NodePatch, NodeRepository};
use leafpress::application::ports::tracker_repository::TrackerRepository;
use leafpress::domain::tree::node::{Category, Favorite, Node, RecentEntry};

#[derive(Default)]
pub struct MemoryNodeRepository {
    nodes: Mutex<Vec<Node>>,
    next_id: AtomicI32,
}

impl MemoryNodeRepository {
    pub fn new() -> Self {
        Self {
            nodes: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.lock().unwrap().len()
    }

    fn sorted(mut items: Vec<Node>) -> Vec<Node> {
        items.sort_by_key(|n| (n.order, n.id));
        items
    }
}

#[async_trait]
impl NodeRepository for MemoryNodeRepository {
    async fn insert(&self, new: NewNode) -> anyhow::Result<Node> {
        let now = Utc::now();
        let node = Node {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            title: new.title,
            slug: new.slug,
            excerpt: new.excerpt,
            content: new.content,
            category_id: new.category_id,
            parent_id: new.parent_id,
            is_published: new.is_published,
            published_at: None,
            is_open: false,
            is_selected: false,
            order: new.order,
            metadata: new.metadata,
            created_at: now,
            updated_at: now,
            created_by: new.created_by,
            updated_by: new.updated_by,
        };
        self.nodes.lock().unwrap().push(node.clone());
        Ok(node)
    }

    async fn get_by_id(&self, id: i32) -> anyhow::Result<Option<Node>> {
        Ok(self.nodes.lock().unwrap().iter().find(|n| n.id == id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> anyhow::Result<Option<Node>> {
        Ok(self
            .nodes
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.slug == slug)
            .cloned())
    }

    async fn slug_in_use(&self, slug: &str, exclude_id: Option<i32>) -> anyhow::Result<bool> {
        Ok(self
            .nodes
            .lock()
            .unwrap()
            .iter()
            .any(|n| n.slug == slug && Some(n.id) != exclude_id))
    }

    async fn list_roots(&self, category_id: i32) -> anyhow::Result<Vec<Node>> {
        let items = self
            .nodes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.category_id == category_id && n.parent_id.is_none())
            .cloned()
            .collect();
        Ok(Self::sorted(items))
    }

    async fn list_children(&self, parent_id: i32) -> anyhow::Result<Vec<Node>> {
        let items = self
            .nodes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.parent_id == Some(parent_id))
            .cloned()
            .collect();
        Ok(Self::sorted(items))
    }

    async fn child_ids(&self, parent_id: i32) -> anyhow::Result<Vec<i32>> {
        Ok(self
            .nodes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.parent_id == Some(parent_id))
            .map(|n| n.id)
            .collect())
    }

    async fn list_by_ids(&self, ids: &[i32]) -> anyhow::Result<Vec<Node>> {
        Ok(self
            .nodes
            .lock()
            .unwrap()
            .iter()
            .filter(|n| ids.contains(&n.id))
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Node>> {
        let mut items = self.nodes.lock().unwrap().clone();
        items.sort_by_key(|n| n.id);
        Ok(items)
    }

    async fn apply_patch(&self, id: i32, patch: NodePatch) -> anyhow::Result<Option<Node>> {
        let mut nodes = self.nodes.lock().unwrap();
        let Some(node) = nodes.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        if let Some(v) = patch.title {
            node.title = v;
        }
        if let Some(v) = patch.slug {
            node.slug = v;
        }
        if let Some(v) = patch.excerpt {
            node.excerpt = Some(v);
        }
        if let Some(v) = patch.content {
            node.content = Some(v);
        }
        if let Some(v) = patch.category_id {
            node.category_id = v;
        }
        if let Some(v) = patch.parent_id {
            node.parent_id = v;
        }
        if let Some(v) = patch.is_published {
            node.is_published = v;
        }
        if let Some(v) = patch.published_at {
            node.published_at = Some(v);
        }
        if let Some(v) = patch.is_open {
            node.is_open = v;
        }
        if let Some(v) = patch.is_selected {
            node.is_selected = v;
        }
        if let Some(v) = patch.order {
            node.order = v;
        }
        if let Some(v) = patch.metadata {
            node.metadata = Some(v);
        }
        node.updated_by = patch.updated_by;
        node.updated_at = Utc::now();
        Ok(Some(node.clone()))
    }

    async fn set_open(&self, id: i32, open: bool) -> anyhow::Result<Option<Node>> {
        let mut nodes = self.nodes.lock().unwrap();
        let Some(node) = nodes.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        node.is_open = open;
        node.updated_at = Utc::now();
        Ok(Some(node.clone()))
    }

    async fn clear_selection(&self) -> anyhow::Result<()> {
        for node in self.nodes.lock().unwrap().iter_mut() {
            node.is_selected = false;
        }
        Ok(())
    }

    async fn set_selected(&self, id: i32) -> anyhow::Result<Option<Node>> {
        let mut nodes = self.nodes.lock().unwrap();
        let Some(node) = nodes.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        node.is_selected = true;
        node.updated_at = Utc::now();
        Ok(Some(node.clone()))
    }

    async fn update_content(
        &self,
        id: i32,
        content: &str,
        updated_by: i32,
    ) -> anyhow::Result<Option<Node>> {
        let mut nodes = self.nodes.lock().unwrap();
        let Some(node) = nodes.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        node.content = Some(content.to_string());
        node.updated_by = updated_by;
        node.updated_at = Utc::now();
        Ok(Some(node.clone()))
    }

    async fn delete_many(&self, ids: &[i32]) -> anyhow::Result<u64> {
        let mut nodes = self.nodes.lock().unwrap();
        let before = nodes.len();
        nodes.retain(|n| !ids.contains(&n.id));
        Ok((before - nodes.len()) as u64)
    }

    async fn delete_by_category(&self, category_id: i32) -> anyhow::Result<Vec<i32>> {
        let mut nodes = self.nodes.lock().unwrap();
        let removed: Vec<i32> = nodes
            .iter()
            .filter(|n| n.category_id == category_id)
            .map(|n| n.id)
            .collect();
        nodes.retain(|n| n.category_id != category_id);
        Ok(removed)
    }
}

#[derive(Default)]
pub struct MemoryCategoryRepository {
    categories: Mutex<Vec<Category>>,
    next_id: AtomicI32,
}

impl MemoryCategoryRepository {
    pub fn new() -> Self {
        Self {
            categories: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn insert(&self, new: NewCategory) -> anyhow::Result<Category> {
        let now = Utc::now();
        let category = Category {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: new.name,
            slug: new.slug,
            description: new.description,
            is_visible: new.is_visible,
            order: new.order,
            created_at: now,
            updated_at: now,
            created_by: new.created_by,
            updated_by: new.updated_by,
        };
        self.categories.lock().unwrap().push(category.clone());
        Ok(category)
    }

    async fn get_by_id(&self, id: i32) -> anyhow::Result<Option<Category>> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<Category>> {
        let mut items = self.categories.lock().unwrap().clone();
        items.sort_by_key(|c| (c.order, c.id));
        Ok(items)
    }

    async fn slug_in_use(&self, slug: &str, exclude_id: Option<i32>) -> anyhow::Result<bool> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.slug == slug && Some(c.id) != exclude_id))
    }

    async fn apply_patch(&self, id: i32, patch: CategoryPatch) -> anyhow::Result<Option<Category>> {
        let mut categories = self.categories.lock().unwrap();
        let Some(category) = categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(v) = patch.name {
            category.name = v;
        }
        if let Some(v) = patch.slug {
            category.slug = v;
        }
        if let Some(v) = patch.description {
            category.description = Some(v);
        }
        if let Some(v) = patch.is_visible {
            category.is_visible = v;
        }
        if let Some(v) = patch.order {
            category.order = v;
        }
        category.updated_by = patch.updated_by;
        category.updated_at = Utc::now();
        Ok(Some(category.clone()))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| c.id != id);
        Ok(categories.len() < before)
    }
}

#[derive(Default)]
pub struct MemoryTrackerRepository {
    favorites: Mutex<Vec<Favorite>>,
    recents: Mutex<Vec<RecentEntry>>,
    next_id: AtomicI32,
}

impl MemoryTrackerRepository {
    pub fn new() -> Self {
        Self {
            favorites: Mutex::new(Vec::new()),
            recents: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }

    pub fn favorite_count(&self) -> usize {
        self.favorites.lock().unwrap().len()
    }

    pub fn recent_count(&self) -> usize {
        self.recents.lock().unwrap().len()
    }
}

#[async_trait]
impl TrackerRepository for MemoryTrackerRepository {
    async fn find_favorite(&self, post_id: i32, user_id: i32) -> anyhow::Result<Option<Favorite>> {
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.post_id == post_id && f.user_id == user_id)
            .cloned())
    }

    async fn insert_favorite(&self, post_id: i32, user_id: i32) -> anyhow::Result<Favorite> {
        let favorite = Favorite {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            post_id,
            user_id,
            created_at: Utc::now(),
        };
        self.favorites.lock().unwrap().push(favorite.clone());
        Ok(favorite)
    }

    async fn delete_favorite(&self, post_id: i32, user_id: i32) -> anyhow::Result<bool> {
        let mut favorites = self.favorites.lock().unwrap();
        let before = favorites.len();
        favorites.retain(|f| !(f.post_id == post_id && f.user_id == user_id));
        Ok(favorites.len() < before)
    }

    async fn list_favorites(&self, user_id: i32) -> anyhow::Result<Vec<Favorite>> {
        let mut items: Vec<Favorite> = self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn touch_recent(
        &self,
        post_id: i32,
        user_id: i32,
        at: DateTime<Utc>,
    ) -> anyhow::Result<Option<RecentEntry>> {
        let mut recents = self.recents.lock().unwrap();
        let Some(entry) = recents
            .iter_mut()
            .find(|r| r.post_id == post_id && r.user_id == user_id)
        else {
            return Ok(None);
        };
        entry.accessed_at = at;
        Ok(Some(entry.clone()))
    }

    async fn insert_recent(
        &self,
        post_id: i32,
        user_id: i32,
        at: DateTime<Utc>,
    ) -> anyhow::Result<RecentEntry> {
        let entry = RecentEntry {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            post_id,
            user_id,
            accessed_at: at,
        };
        self.recents.lock().unwrap().push(entry.clone());
        Ok(entry)
    }

    async fn list_recent(&self, user_id: i32) -> anyhow::Result<Vec<RecentEntry>> {
        let mut items: Vec<RecentEntry> = self
            .recents
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.accessed_at.cmp(&a.accessed_at).then(b.id.cmp(&a.id)));
        Ok(items)
    }

    async fn trim_recent(&self, user_id: i32, keep: usize) -> anyhow::Result<u64> {
        let survivors: Vec<i32> = self
            .list_recent(user_id)
            .await?
            .into_iter()
            .take(keep)
            .map(|r| r.id)
            .collect();
        let mut recents = self.recents.lock().unwrap();
        let before = recents.len();
        recents.retain(|r| r.user_id != user_id || survivors.contains(&r.id));
        Ok((before - recents.len()) as u64)
    }

    async fn delete_for_posts(&self, post_ids: &[i32]) -> anyhow::Result<()> {
        self.favorites
            .lock()
            .unwrap()
            .retain(|f| !post_ids.contains(&f.post_id));
        self.recents
            .lock()
            .unwrap()
            .retain(|r| !post_ids.contains(&r.post_id));
        Ok(())
    }
}

pub fn new_node(category_id: i32, title: &str, slug: &str) -> NewNode {
    NewNode {
        title: title.to_string(),
        slug: slug.to_string(),
        excerpt: None,
        content: None,
        category_id,
        parent_id: None,
        is_published: false,
        order: 0,
        metadata: None,
        created_by: 1,
        updated_by: 1,
    }
}

pub fn new_category(name: &str, slug: &str) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        slug: slug.to_string(),
        description: None,
        is_visible: true,
        order: 0,
        created_by: 1,
        updated_by: 1,
    }
}
