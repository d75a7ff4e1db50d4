use std::sync::Arc;

use board_types::{Chat, ChatId};

use crate::error::StoreResult;

/// A point-in-time view of every chat, in posting order.
///
/// Chats are shared with the store; a snapshot stays valid and unchanged no
/// matter what is written afterwards.
pub type ChatSnapshot = Vec<Arc<Chat>>;

/// Bounded store of chats and their reactions.
///
/// All implementations must satisfy these invariants:
/// - Ids are assigned sequentially from 1 and never reused.
/// - A failed operation leaves the store exactly as it was.
/// - Operations are atomic with respect to each other: no reader observes a
///   partially written chat, and no two chats share an id.
pub trait ChatStore: Send + Sync {
    /// Append a chat and return its id.
    ///
    /// Fails with `FieldTooLong` if `author` is 16 bytes or more or `text` is
    /// 256 bytes or more, and with `ChatCapacityExceeded` when the store is
    /// full.
    fn add_chat(&self, author: &str, text: &str) -> StoreResult<ChatId>;

    /// Append a reaction to the chat `chat_id`.
    ///
    /// Fails with `ChatNotFound` if the id is 0, beyond the highest assigned
    /// id, or was cleared by [`reset`](Self::reset); with `FieldTooLong` if
    /// either field is 16 bytes or more; and with `ReactionCapacityExceeded`
    /// if the chat already holds 100 reactions.
    fn add_reaction(&self, author: &str, text: &str, chat_id: ChatId) -> StoreResult<()>;

    /// Remove every chat. Always succeeds.
    fn reset(&self);

    /// All chats in posting order.
    fn list_all(&self) -> ChatSnapshot;

    /// Look up a single live chat.
    fn get(&self, chat_id: ChatId) -> Option<Arc<Chat>>;

    /// Number of live chats.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
