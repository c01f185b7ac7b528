use crate::application::errors::ActionError;
use crate::application::ports::node_repository::NodeRepository;
use crate::application::ports::tracker_repository::TrackerRepository;

#[derive(Debug)]
pub struct DeletedSubtree {
    /// Root id first, then every transitive descendant.
    pub removed: Vec<i32>,
}

pub struct DeleteNode<'a, N, T>
where
    N: NodeRepository + ?Sized,
    T: TrackerRepository + ?Sized,
{
    pub nodes: &'a N,
    pub tracker: &'a T,
}

impl<'a, N, T> DeleteNode<'a, N, T>
where
    N: NodeRepository + ?Sized,
    T: TrackerRepository + ?Sized,
{
    pub async fn execute(&self, id: i32) -> Result<DeletedSubtree, ActionError> {
        if self.nodes.get_by_id(id).await?.is_none() {
            return Err(ActionError::not_found("node not found"));
        }

        // Iterative descendant collection. No cycle guard: self-parenting is
        // rejected at write time, so the parent relation stays acyclic.
        let mut removed = vec![id];
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            let children = self.nodes.child_ids(current).await?;
            pending.extend(&children);
            removed.extend(children);
        }

        self.tracker.delete_for_posts(&removed).await?;
        self.nodes.delete_many(&removed).await?;

        Ok(DeletedSubtree { removed })
    }
}
