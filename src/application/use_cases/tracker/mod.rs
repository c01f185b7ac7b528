pub mod add_favorite;
pub mod list_favorites;
pub mod list_recent;
pub mod remove_favorite;
pub mod track_access;
