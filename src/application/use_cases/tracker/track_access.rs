use chrono::Utc;

use crate::application::errors::ActionError;
use crate::application::ports::tracker_repository::TrackerRepository;
use crate::domain::tree::node::RecentEntry;

/// Bounded size of the per-user recency list.
pub const RECENT_KEEP: usize = 10;

/// Upsert into the recency list: a repeated access refreshes the existing
/// row's timestamp, a first access inserts and trims the tail.
pub struct TrackAccess<'a, T: TrackerRepository + ?Sized> {
    pub tracker: &'a T,
}

impl<'a, T: TrackerRepository + ?Sized> TrackAccess<'a, T> {
    pub async fn execute(&self, post_id: i32, user_id: i32) -> Result<RecentEntry, ActionError> {
        let now = Utc::now();
        if let Some(entry) = self.tracker.touch_recent(post_id, user_id, now).await? {
            return Ok(entry);
        }

        let entry = self.tracker.insert_recent(post_id, user_id, now).await?;
        self.tracker.trim_recent(user_id, RECENT_KEEP).await?;
        Ok(entry)
    }
}
