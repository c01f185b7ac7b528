use crate::application::errors::ActionError;
use crate::application::ports::node_repository::NodeRepository;
use crate::domain::tree::node::Node;

pub struct GetNode<'a, N: NodeRepository + ?Sized> {
    pub nodes: &'a N,
}

impl<'a, N: NodeRepository + ?Sized> GetNode<'a, N> {
    pub async fn execute(&self, id: i32) -> Result<Node, ActionError> {
        self.nodes
            .get_by_id(id)
            .await?
            .ok_or_else(|| ActionError::not_found("node not found"))
    }
}
