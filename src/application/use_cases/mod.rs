pub mod categories;
pub mod nodes;
pub mod sync;
pub mod tracker;
