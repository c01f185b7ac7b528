use crate::application::errors::ActionError;
use crate::application::ports::tracker_repository::TrackerRepository;
use crate::domain::tree::node::Favorite;

/// Idempotent: favoriting an already-favorited node returns the existing
/// row as a success.
pub struct AddFavorite<'a, T: TrackerRepository + ?Sized> {
    pub tracker: &'a T,
}

impl<'a, T: TrackerRepository + ?Sized> AddFavorite<'a, T> {
    pub async fn execute(&self, post_id: i32, user_id: i32) -> Result<Favorite, ActionError> {
        if let Some(existing) = self.tracker.find_favorite(post_id, user_id).await? {
            return Ok(existing);
        }
        Ok(self.tracker.insert_favorite(post_id, user_id).await?)
    }
}
