pub mod category_repository;
pub mod node_repository;
pub mod tracker_repository;
