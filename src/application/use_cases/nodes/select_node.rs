use crate::application::errors::ActionError;
use crate::application::ports::node_repository::NodeRepository;
use crate::application::ports::tracker_repository::TrackerRepository;
use crate::application::use_cases::tracker::track_access::TrackAccess;
use crate::domain::tree::node::Node;

/// Store-wide single selection: clear whichever node holds the flag, then
/// set it on the target. Not scoped per user.
pub struct SelectNode<'a, N, T>
where
    N: NodeRepository + ?Sized,
    T: TrackerRepository + ?Sized,
{
    pub nodes: &'a N,
    pub tracker: &'a T,
}

impl<'a, N, T> SelectNode<'a, N, T>
where
    N: NodeRepository + ?Sized,
    T: TrackerRepository + ?Sized,
{
    pub async fn execute(&self, id: i32, user_id: i32) -> Result<Node, ActionError> {
        self.nodes.clear_selection().await?;

        let selected = self
            .nodes
            .set_selected(id)
            .await?
            .ok_or_else(|| ActionError::not_found("node not found"))?;

        TrackAccess {
            tracker: self.tracker,
        }
        .execute(id, user_id)
        .await?;

        Ok(selected)
    }
}
