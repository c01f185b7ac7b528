use crate::application::errors::ActionError;
use crate::application::ports::category_repository::CategoryRepository;
use crate::application::ports::node_repository::{NewNode, NodeRepository};
use crate::application::validation::{validate_slug, validate_title};
use crate::domain::tree::node::Node;

pub struct CreateNode<'a, N, C>
where
    N: NodeRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    pub nodes: &'a N,
    pub categories: &'a C,
}

impl<'a, N, C> CreateNode<'a, N, C>
where
    N: NodeRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    pub async fn execute(&self, new: NewNode) -> Result<Node, ActionError> {
        validate_title(&new.title)?;
        validate_slug(&new.slug)?;

        if self.nodes.slug_in_use(&new.slug, None).await? {
            return Err(ActionError::conflict("slug is already in use"));
        }
        if self.categories.get_by_id(new.category_id).await?.is_none() {
            return Err(ActionError::not_found("category not found"));
        }
        if let Some(parent_id) = new.parent_id {
            if self.nodes.get_by_id(parent_id).await?.is_none() {
                return Err(ActionError::not_found("parent node not found"));
            }
        }

        Ok(self.nodes.insert(new).await?)
    }
}
