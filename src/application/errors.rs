/// Failure taxonomy for every action boundary. Handlers convert these to the
/// uniform `{success:false, error}` envelope; nothing escapes as a panic.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// Malformed or missing input, caught before persistence.
    #[error("{0}")]
    Validation(String),
    /// Duplicate slug.
    #[error("{0}")]
    Conflict(String),
    /// Referenced id absent: target, parent or category.
    #[error("{0}")]
    NotFound(String),
    /// Underlying persistence failure.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl ActionError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}
