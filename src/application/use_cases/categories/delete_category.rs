use crate::application::errors::ActionError;
use crate::application::ports::category_repository::CategoryRepository;
use crate::application::ports::node_repository::NodeRepository;
use crate::application::ports::tracker_repository::TrackerRepository;

/// Deleting a category takes every node under it along, plus the favorite
/// and recent rows referencing those nodes.
pub struct DeleteCategory<'a, C, N, T>
where
    C: CategoryRepository + ?Sized,
    N: NodeRepository + ?Sized,
    T: TrackerRepository + ?Sized,
{
    pub categories: &'a C,
    pub nodes: &'a N,
    pub tracker: &'a T,
}

impl<'a, C, N, T> DeleteCategory<'a, C, N, T>
where
    C: CategoryRepository + ?Sized,
    N: NodeRepository + ?Sized,
    T: TrackerRepository + ?Sized,
{
    pub async fn execute(&self, id: i32) -> Result<(), ActionError> {
        let removed = self.nodes.delete_by_category(id).await?;
        if !removed.is_empty() {
            self.tracker.delete_for_posts(&removed).await?;
        }

        if !self.categories.delete(id).await? {
            return Err(ActionError::not_found("category not found"));
        }
        Ok(())
    }
}
