//! Size and capacity limits shared by the store, codec callers, and renderer.
//!
//! Text capacities are exclusive upper bounds on the byte length: a field with
//! capacity 16 holds at most 15 bytes.

/// Capacity of a chat or reaction author name.
pub const AUTHOR_CAPACITY: usize = 16;

/// Capacity of a chat message body.
pub const CHAT_TEXT_CAPACITY: usize = 256;

/// Capacity of a reaction body.
pub const REACTION_TEXT_CAPACITY: usize = 16;

/// Maximum number of reactions attached to one chat.
pub const MAX_REACTIONS_PER_CHAT: usize = 100;

/// Maximum number of chats held by a store.
pub const MAX_CHATS: usize = 100_000;
