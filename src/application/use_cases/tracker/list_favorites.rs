use crate::application::errors::ActionError;
use crate::application::ports::node_repository::NodeRepository;
use crate::application::ports::tracker_repository::TrackerRepository;
use crate::domain::tree::node::Node;

/// Favorite rows hydrated to their nodes; rows whose node has since been
/// deleted are skipped.
pub struct ListFavorites<'a, T, N>
where
    T: TrackerRepository + ?Sized,
    N: NodeRepository + ?Sized,
{
    pub tracker: &'a T,
    pub nodes: &'a N,
}

impl<'a, T, N> ListFavorites<'a, T, N>
where
    T: TrackerRepository + ?Sized,
    N: NodeRepository + ?Sized,
{
    pub async fn execute(&self, user_id: i32) -> Result<Vec<Node>, ActionError> {
        let favorites = self.tracker.list_favorites(user_id).await?;
        if favorites.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i32> = favorites.iter().map(|f| f.post_id).collect();
        Ok(self.nodes.list_by_ids(&ids).await?)
    }
}
