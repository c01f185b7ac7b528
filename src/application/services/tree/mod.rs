//! Client-resident mirror of the content tree: category list, an
//! arena-indexed subset of the node store (roots plus the open folders'
//! descendants), favorites and recency lists.
//!
//! Strict refresh-after-write: local state only changes by reloading from
//! the store after a mutation succeeds, never by prediction. A failed
//! mutation keeps the previous mirror intact and records the error.

pub mod item_id;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::application::errors::ActionError;
use crate::application::ports::category_repository::CategoryRepository;
use crate::application::ports::node_repository::{NewNode, NodePatch, NodeRepository};
use crate::application::ports::tracker_repository::TrackerRepository;
use crate::application::services::autosave::Autosave;
use crate::application::use_cases::categories::delete_category::DeleteCategory;
use crate::application::use_cases::categories::list_categories::ListCategories;
use crate::application::use_cases::categories::update_category::UpdateCategory;
use crate::application::use_cases::nodes::create_node::CreateNode;
use crate::application::use_cases::nodes::delete_node::DeleteNode;
use crate::application::use_cases::nodes::select_node::SelectNode;
use crate::application::use_cases::nodes::toggle_folder::ToggleFolder;
use crate::application::use_cases::nodes::update_node::UpdateNode;
use crate::application::use_cases::tracker::add_favorite::AddFavorite;
use crate::application::use_cases::tracker::list_favorites::ListFavorites;
use crate::application::use_cases::tracker::list_recent::ListRecent;
use crate::application::use_cases::tracker::remove_favorite::RemoveFavorite;
use crate::application::ports::category_repository::CategoryPatch;
use crate::domain::tree::node::{Category, Node};
use item_id::ItemId;

/// Hardcoded single-user id standing in for authentication.
pub const DEFAULT_USER_ID: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreePhase {
    Loading,
    Ready,
    Error,
}

impl Default for TreePhase {
    fn default() -> Self {
        TreePhase::Loading
    }
}

/// One row of the linear render sequence produced by [`TreeContext::flatten`].
#[derive(Debug, Clone)]
pub struct FlatItem {
    pub id: ItemId,
    pub title: String,
    pub level: usize,
    pub is_folder: bool,
    pub is_open: bool,
    pub is_selected: bool,
}

#[derive(Debug, Clone)]
struct TreeRecord {
    node: Node,
    level: usize,
    children: Vec<i32>,
}

#[derive(Debug, Default)]
struct TreeState {
    phase: TreePhase,
    categories: Vec<Category>,
    selected_category: Option<i32>,
    arena: HashMap<i32, TreeRecord>,
    roots: Vec<i32>,
    favorites: Vec<Node>,
    recents: Vec<Node>,
    selected_item: Option<ItemId>,
    last_error: Option<String>,
}

pub struct TreeContext {
    nodes: Arc<dyn NodeRepository>,
    categories: Arc<dyn CategoryRepository>,
    tracker: Arc<dyn TrackerRepository>,
    autosave: Autosave,
    user_id: i32,
    state: RwLock<TreeState>,
}

impl TreeContext {
    pub fn new(
        nodes: Arc<dyn NodeRepository>,
        categories: Arc<dyn CategoryRepository>,
        tracker: Arc<dyn TrackerRepository>,
        user_id: i32,
        autosave_debounce: Duration,
    ) -> Self {
        let autosave = Autosave::spawn(nodes.clone(), user_id, autosave_debounce);
        Self {
            nodes,
            categories,
            tracker,
            autosave,
            user_id,
            state: RwLock::new(TreeState::default()),
        }
    }

    // ---- state accessors ------------------------------------------------

    pub async fn phase(&self) -> TreePhase {
        self.state.read().await.phase
    }

    pub async fn last_error(&self) -> Option<String> {
        self.state.read().await.last_error.clone()
    }

    pub async fn categories(&self) -> Vec<Category> {
        self.state.read().await.categories.clone()
    }

    pub async fn selected_category(&self) -> Option<i32> {
        self.state.read().await.selected_category
    }

    pub async fn selected_item(&self) -> Option<ItemId> {
        self.state.read().await.selected_item
    }

    pub async fn favorites(&self) -> Vec<Node> {
        self.state.read().await.favorites.clone()
    }

    pub async fn recent(&self) -> Vec<Node> {
        self.state.read().await.recents.clone()
    }

    /// Pre-order walk of the mirror: a node is followed by its children
    /// exactly when it is an open folder. Explicit stack, no recursion.
    pub async fn flatten(&self) -> Vec<FlatItem> {
        let st = self.state.read().await;
        let mut out = Vec::with_capacity(st.arena.len());
        let mut stack: Vec<i32> = st.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(rec) = st.arena.get(&id) else {
                continue;
            };
            let is_folder = !rec.children.is_empty();
            out.push(FlatItem {
                id: ItemId::Post(id),
                title: rec.node.title.clone(),
                level: rec.level,
                is_folder,
                is_open: rec.node.is_open,
                is_selected: rec.node.is_selected,
            });
            if is_folder && rec.node.is_open {
                for child in rec.children.iter().rev() {
                    stack.push(*child);
                }
            }
        }
        out
    }

    // ---- loading --------------------------------------------------------

    /// Initial load: Loading → Ready, or Loading → Error on failure.
    pub async fn load(&self) -> Result<(), ActionError> {
        {
            let mut st = self.state.write().await;
            st.phase = TreePhase::Loading;
            st.last_error = None;
        }
        match self.reload_all().await {
            Ok(()) => {
                self.state.write().await.phase = TreePhase::Ready;
                Ok(())
            }
            Err(e) => {
                let mut st = self.state.write().await;
                st.phase = TreePhase::Error;
                st.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn select_category(&self, category_id: i32) -> Result<(), ActionError> {
        self.state.write().await.selected_category = Some(category_id);
        self.load().await
    }

    async fn reload_all(&self) -> Result<(), ActionError> {
        let categories = ListCategories {
            categories: self.categories.as_ref(),
        }
        .execute()
        .await?;

        let selected_category = self
            .state
            .read()
            .await
            .selected_category
            .filter(|id| categories.iter().any(|c| c.id == *id))
            .or_else(|| categories.first().map(|c| c.id));

        let (arena, roots) = match selected_category {
            Some(category_id) => self.build_arena(category_id).await?,
            None => (HashMap::new(), Vec::new()),
        };

        let favorites = ListFavorites {
            tracker: self.tracker.as_ref(),
            nodes: self.nodes.as_ref(),
        }
        .execute(self.user_id)
        .await?;

        let recents = ListRecent {
            tracker: self.tracker.as_ref(),
            nodes: self.nodes.as_ref(),
        }
        .execute(self.user_id)
        .await?;

        let mut st = self.state.write().await;
        st.selected_item = arena
            .values()
            .find(|r| r.node.is_selected)
            .map(|r| ItemId::Post(r.node.id));
        st.categories = categories;
        st.selected_category = selected_category;
        st.arena = arena;
        st.roots = roots;
        st.favorites = favorites;
        st.recents = recents;
        Ok(())
    }

    /// Mirror scope: the category roots plus every currently-open folder's
    /// children, walked with an explicit worklist. Closed folders stop the
    /// descent, so depth is bounded by what the user has opened.
    async fn build_arena(
        &self,
        category_id: i32,
    ) -> Result<(HashMap<i32, TreeRecord>, Vec<i32>), ActionError> {
        let mut arena = HashMap::new();
        let root_nodes = self.nodes.list_roots(category_id).await?;
        let roots: Vec<i32> = root_nodes.iter().map(|n| n.id).collect();

        let mut pending: Vec<(Node, usize)> =
            root_nodes.into_iter().map(|n| (n, 0)).collect();
        while let Some((node, level)) = pending.pop() {
            let mut children = Vec::new();
            if node.is_open {
                let kids = self.nodes.list_children(node.id).await?;
                children = kids.iter().map(|k| k.id).collect();
                for kid in kids {
                    pending.push((kid, level + 1));
                }
            }
            arena.insert(node.id, TreeRecord {
                node,
                level,
                children,
            });
        }
        Ok((arena, roots))
    }

    // ---- mutations (refresh-after-write) --------------------------------

    pub async fn create_folder(
        &self,
        title: &str,
        parent_id: Option<i32>,
    ) -> Result<Node, ActionError> {
        self.create_post(title, None, parent_id).await
    }

    pub async fn create_document(
        &self,
        title: &str,
        content: Option<String>,
        parent_id: Option<i32>,
    ) -> Result<Node, ActionError> {
        self.create_post(title, Some(content.unwrap_or_default()), parent_id)
            .await
    }

    pub async fn rename_item(&self, item: &str, new_title: &str) -> Result<(), ActionError> {
        let item: ItemId = item.parse()?;
        self.begin().await;
        let res = async {
            match item {
                ItemId::Post(id) => {
                    UpdateNode {
                        nodes: self.nodes.as_ref(),
                        categories: self.categories.as_ref(),
                    }
                    .execute(id, NodePatch {
                        title: Some(new_title.to_string()),
                        updated_by: self.user_id,
                        ..Default::default()
                    })
                    .await?;
                }
                ItemId::Category(id) => {
                    UpdateCategory {
                        categories: self.categories.as_ref(),
                    }
                    .execute(id, CategoryPatch {
                        name: Some(new_title.to_string()),
                        updated_by: self.user_id,
                        ..Default::default()
                    })
                    .await?;
                }
            }
            Ok(())
        }
        .await;
        self.finish(res).await
    }

    pub async fn delete_item(&self, item: &str) -> Result<(), ActionError> {
        let item: ItemId = item.parse()?;
        self.begin().await;
        let res = async {
            match item {
                ItemId::Post(id) => {
                    DeleteNode {
                        nodes: self.nodes.as_ref(),
                        tracker: self.tracker.as_ref(),
                    }
                    .execute(id)
                    .await?;
                }
                ItemId::Category(id) => {
                    DeleteCategory {
                        categories: self.categories.as_ref(),
                        nodes: self.nodes.as_ref(),
                        tracker: self.tracker.as_ref(),
                    }
                    .execute(id)
                    .await?;
                }
            }
            Ok(())
        }
        .await;
        self.finish(res).await
    }

    pub async fn toggle_folder(&self, item: &str) -> Result<(), ActionError> {
        let id = item.parse::<ItemId>()?.post_id()?;
        self.begin().await;
        let res = ToggleFolder {
            nodes: self.nodes.as_ref(),
            tracker: self.tracker.as_ref(),
        }
        .execute(id, self.user_id)
        .await
        .map(|_| ());
        self.finish(res).await
    }

    pub async fn select_item(&self, item: &str) -> Result<(), ActionError> {
        let id = item.parse::<ItemId>()?.post_id()?;
        self.begin().await;
        let res = SelectNode {
            nodes: self.nodes.as_ref(),
            tracker: self.tracker.as_ref(),
        }
        .execute(id, self.user_id)
        .await
        .map(|_| ());
        self.finish(res).await
    }

    pub async fn favorite(&self, item: &str) -> Result<(), ActionError> {
        let id = item.parse::<ItemId>()?.post_id()?;
        self.begin().await;
        let res = AddFavorite {
            tracker: self.tracker.as_ref(),
        }
        .execute(id, self.user_id)
        .await
        .map(|_| ());
        self.finish(res).await
    }

    pub async fn unfavorite(&self, item: &str) -> Result<(), ActionError> {
        let id = item.parse::<ItemId>()?.post_id()?;
        self.begin().await;
        let res = RemoveFavorite {
            tracker: self.tracker.as_ref(),
        }
        .execute(id, self.user_id)
        .await
        .map(|_| ());
        self.finish(res).await
    }

    /// Content edits bypass the refresh cycle: they are debounced and
    /// written in the background, and the mirror never holds content.
    pub fn edit_content(&self, item: &str, content: String) -> Result<(), ActionError> {
        let id = item.parse::<ItemId>()?.post_id()?;
        self.autosave.queue(id, content);
        Ok(())
    }

    async fn create_post(
        &self,
        title: &str,
        content: Option<String>,
        parent_id: Option<i32>,
    ) -> Result<Node, ActionError> {
        let category_id = self
            .state
            .read()
            .await
            .selected_category
            .ok_or_else(|| ActionError::validation("no category selected"))?;

        self.begin().await;
        let res = CreateNode {
            nodes: self.nodes.as_ref(),
            categories: self.categories.as_ref(),
        }
        .execute(NewNode {
            title: title.to_string(),
            slug: unique_slug(title),
            excerpt: None,
            content,
            category_id,
            parent_id,
            is_published: false,
            order: 0,
            metadata: None,
            created_by: self.user_id,
            updated_by: self.user_id,
        })
        .await;
        self.finish(res).await
    }

    async fn begin(&self) {
        let mut st = self.state.write().await;
        st.phase = TreePhase::Loading;
        st.last_error = None;
    }

    /// Refresh-after-write epilogue: reload on success; on failure keep the
    /// stale-but-consistent mirror and surface the message.
    async fn finish<V>(&self, res: Result<V, ActionError>) -> Result<V, ActionError> {
        match res {
            Ok(value) => match self.reload_all().await {
                Ok(()) => {
                    self.state.write().await.phase = TreePhase::Ready;
                    Ok(value)
                }
                Err(e) => {
                    let mut st = self.state.write().await;
                    st.phase = TreePhase::Error;
                    st.last_error = Some(e.to_string());
                    Err(e)
                }
            },
            Err(e) => {
                let mut st = self.state.write().await;
                st.phase = TreePhase::Ready;
                st.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

/// Display title → unique slug: slugified title plus a millisecond stamp,
/// the same trick the tree UI uses for implicitly-created nodes.
fn unique_slug(title: &str) -> String {
    let base = crate::application::validation::slugify(title);
    let stamp = Utc::now().timestamp_millis();
    if base.is_empty() {
        format!("untitled-{stamp}")
    } else {
        format!("{base}-{stamp}")
    }
}
