use crate::application::errors::ActionError;
use crate::application::ports::node_repository::NodeRepository;
use crate::application::ports::tracker_repository::TrackerRepository;
use crate::application::use_cases::tracker::track_access::RECENT_KEEP;
use crate::domain::tree::node::Node;

/// The user's recency list hydrated to nodes, most recent first.
pub struct ListRecent<'a, T, N>
where
    T: TrackerRepository + ?Sized,
    N: NodeRepository + ?Sized,
{
    pub tracker: &'a T,
    pub nodes: &'a N,
}

impl<'a, T, N> ListRecent<'a, T, N>
where
    T: TrackerRepository + ?Sized,
    N: NodeRepository + ?Sized,
{
    pub async fn execute(&self, user_id: i32) -> Result<Vec<Node>, ActionError> {
        let entries = self.tracker.list_recent(user_id).await?;
        let ids: Vec<i32> = entries
            .iter()
            .take(RECENT_KEEP)
            .map(|e| e.post_id)
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let fetched = self.nodes.list_by_ids(&ids).await?;
        // Restore access order; hydration does not guarantee it.
        let ordered = ids
            .iter()
            .filter_map(|id| fetched.iter().find(|n| n.id == *id).cloned())
            .collect();
        Ok(ordered)
    }
}
