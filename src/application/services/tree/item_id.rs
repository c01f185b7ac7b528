use std::fmt;
use std::str::FromStr;

use crate::application::errors::ActionError;

/// Composite id used by the tree UI: a string tag plus the store's raw
/// numeric id, e.g. `post-42` or `category-3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemId {
    Post(i32),
    Category(i32),
}

impl ItemId {
    pub fn raw(self) -> i32 {
        match self {
            ItemId::Post(id) | ItemId::Category(id) => id,
        }
    }

    /// The numeric id when the item is a post, a ValidationError otherwise.
    pub fn post_id(self) -> Result<i32, ActionError> {
        match self {
            ItemId::Post(id) => Ok(id),
            ItemId::Category(_) => Err(ActionError::validation("expected a post id")),
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Post(id) => write!(f, "post-{id}"),
            ItemId::Category(id) => write!(f, "category-{id}"),
        }
    }
}

impl FromStr for ItemId {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ActionError::validation(format!("malformed item id: {s}"));
        if let Some(raw) = s.strip_prefix("post-") {
            return raw.parse().map(ItemId::Post).map_err(|_| malformed());
        }
        if let Some(raw) = s.strip_prefix("category-") {
            return raw.parse().map(ItemId::Category).map_err(|_| malformed());
        }
        Err(malformed())
    }
}
