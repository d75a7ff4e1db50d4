//! Bounded in-memory chat store for the chat board.
//!
//! The store owns every chat and reaction. It is shared by all request
//! workers and serializes mutations behind a single lock.
//!
//! # Storage Backends
//!
//! All backends implement the [`ChatStore`] trait:
//!
//! - [`InMemoryChatStore`] -- `Vec`-based store held for the process lifetime
//!
//! # Design Rules
//!
//! 1. Ids start at 1, increase by one per accepted chat, and are never reused,
//!    not even after a reset.
//! 2. Every operation validates before it mutates. A failed call changes
//!    nothing: no id is consumed and no record is appended.
//! 3. Capacity limits come from [`board_types::limits`]: 100,000 chats and
//!    100 reactions per chat.
//! 4. Snapshots returned by [`ChatStore::list_all`] are consistent: they
//!    never observe a half-applied write, and later writes do not change them.

pub mod error;
pub mod memory;
pub mod traits;

pub use error::{ErrorKind, StoreError, StoreResult};
pub use memory::InMemoryChatStore;
pub use traits::{ChatSnapshot, ChatStore};
