pub mod autosave;
pub mod markdown;
pub mod tree;
