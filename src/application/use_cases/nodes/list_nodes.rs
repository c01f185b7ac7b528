use crate::application::errors::ActionError;
use crate::application::ports::node_repository::NodeRepository;
use crate::domain::tree::node::Node;

/// Root nodes of a category (parent IS NULL), ordered by sibling key.
pub struct ListRootNodes<'a, N: NodeRepository + ?Sized> {
    pub nodes: &'a N,
}

impl<'a, N: NodeRepository + ?Sized> ListRootNodes<'a, N> {
    pub async fn execute(&self, category_id: i32) -> Result<Vec<Node>, ActionError> {
        Ok(self.nodes.list_roots(category_id).await?)
    }
}

pub struct ListChildNodes<'a, N: NodeRepository + ?Sized> {
    pub nodes: &'a N,
}

impl<'a, N: NodeRepository + ?Sized> ListChildNodes<'a, N> {
    pub async fn execute(&self, parent_id: i32) -> Result<Vec<Node>, ActionError> {
        Ok(self.nodes.list_children(parent_id).await?)
    }
}
