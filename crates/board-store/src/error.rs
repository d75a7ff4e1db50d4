use board_types::{ChatId, Field, TypeError};

/// Coarse classification of store failures.
///
/// Callers map these onto their own responses; the store itself never
/// retries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A field failed validation.
    Validation,
    /// A capacity limit was reached.
    Capacity,
    /// The referenced chat does not exist.
    NotFound,
}

/// Errors from chat store operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    /// A text field is at or above its capacity.
    #[error("{field} too long: {len} bytes (max {max})")]
    FieldTooLong { field: Field, len: usize, max: usize },

    /// The store already holds the maximum number of chats.
    #[error("chat capacity exceeded (max {max})")]
    ChatCapacityExceeded { max: usize },

    /// The target chat already holds the maximum number of reactions.
    #[error("reaction capacity exceeded on chat {chat} (max {max})")]
    ReactionCapacityExceeded { chat: ChatId, max: usize },

    /// No live chat has this id.
    #[error("chat not found: {0}")]
    ChatNotFound(ChatId),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FieldTooLong { .. } => ErrorKind::Validation,
            Self::ChatCapacityExceeded { .. } | Self::ReactionCapacityExceeded { .. } => {
                ErrorKind::Capacity
            }
            Self::ChatNotFound(_) => ErrorKind::NotFound,
        }
    }
}

impl From<TypeError> for StoreError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::FieldTooLong { field, len, max } => Self::FieldTooLong { field, len, max },
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
