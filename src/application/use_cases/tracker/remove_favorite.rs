use crate::application::errors::ActionError;
use crate::application::ports::tracker_repository::TrackerRepository;

/// Succeeds whether or not a row existed.
pub struct RemoveFavorite<'a, T: TrackerRepository + ?Sized> {
    pub tracker: &'a T,
}

impl<'a, T: TrackerRepository + ?Sized> RemoveFavorite<'a, T> {
    pub async fn execute(&self, post_id: i32, user_id: i32) -> Result<bool, ActionError> {
        Ok(self.tracker.delete_favorite(post_id, user_id).await?)
    }
}
