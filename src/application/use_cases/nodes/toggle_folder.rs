use crate::application::errors::ActionError;
use crate::application::ports::node_repository::NodeRepository;
use crate::application::ports::tracker_repository::TrackerRepository;
use crate::application::use_cases::tracker::track_access::TrackAccess;
use crate::domain::tree::node::Node;

pub struct ToggleFolder<'a, N, T>
where
    N: NodeRepository + ?Sized,
    T: TrackerRepository + ?Sized,
{
    pub nodes: &'a N,
    pub tracker: &'a T,
}

impl<'a, N, T> ToggleFolder<'a, N, T>
where
    N: NodeRepository + ?Sized,
    T: TrackerRepository + ?Sized,
{
    pub async fn execute(&self, id: i32, user_id: i32) -> Result<Node, ActionError> {
        let current = self
            .nodes
            .get_by_id(id)
            .await?
            .ok_or_else(|| ActionError::not_found("node not found"))?;

        let updated = self
            .nodes
            .set_open(id, !current.is_open)
            .await?
            .ok_or_else(|| ActionError::not_found("node not found"))?;

        // Opening a folder counts as an access; closing does not.
        if !current.is_open {
            TrackAccess {
                tracker: self.tracker,
            }
            .execute(id, user_id)
            .await?;
        }

        Ok(updated)
    }
}
