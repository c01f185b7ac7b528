use chrono::Utc;

use crate::application::errors::ActionError;
use crate::application::ports::category_repository::CategoryRepository;
use crate::application::ports::node_repository::{NodePatch, NodeRepository};
use crate::application::validation::{validate_slug, validate_title};
use crate::domain::tree::node::Node;

pub struct UpdateNode<'a, N, C>
where
    N: NodeRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    pub nodes: &'a N,
    pub categories: &'a C,
}

impl<'a, N, C> UpdateNode<'a, N, C>
where
    N: NodeRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    pub async fn execute(&self, id: i32, mut patch: NodePatch) -> Result<Node, ActionError> {
        if let Some(title) = patch.title.as_deref() {
            validate_title(title)?;
        }
        if let Some(slug) = patch.slug.as_deref() {
            validate_slug(slug)?;
            if self.nodes.slug_in_use(slug, Some(id)).await? {
                return Err(ActionError::conflict("slug is already in use"));
            }
        }
        if let Some(category_id) = patch.category_id {
            if self.categories.get_by_id(category_id).await?.is_none() {
                return Err(ActionError::not_found("category not found"));
            }
        }
        if let Some(Some(parent_id)) = patch.parent_id {
            if parent_id == id {
                return Err(ActionError::validation("a node cannot be its own parent"));
            }
            if self.nodes.get_by_id(parent_id).await?.is_none() {
                return Err(ActionError::not_found("parent node not found"));
            }
        }

        // Stamp published_at on the first transition to published, unless the
        // caller supplied one.
        if patch.is_published == Some(true) && patch.published_at.is_none() {
            let current = self
                .nodes
                .get_by_id(id)
                .await?
                .ok_or_else(|| ActionError::not_found("node not found"))?;
            if current.published_at.is_none() {
                patch.published_at = Some(Utc::now());
            }
        }

        self.nodes
            .apply_patch(id, patch)
            .await?
            .ok_or_else(|| ActionError::not_found("node not found"))
    }
}
