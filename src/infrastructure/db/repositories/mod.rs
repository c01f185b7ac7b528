pub mod category_repository_sqlx;
pub mod node_repository_sqlx;
pub mod tracker_repository_sqlx;
