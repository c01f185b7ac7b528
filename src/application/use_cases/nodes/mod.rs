pub mod create_node;
pub mod delete_node;
pub mod get_node;
pub mod list_nodes;
pub mod select_node;
pub mod toggle_folder;
pub mod update_node;
