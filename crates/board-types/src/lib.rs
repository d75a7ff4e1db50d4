//! Foundation types for the chat board.
//!
//! Every other board crate depends on `board-types`. The types here are plain
//! data: validation happens when a value is constructed, so anything that
//! reaches the store already satisfies its size bounds.
//!
//! # Key Types
//!
//! - [`ChatId`] -- Monotonic, never-recycled chat identifier
//! - [`BoundedText`] -- UTF-8 text holding strictly fewer than `N` bytes
//! - [`Chat`] / [`Reaction`] -- A posted message and its short annotations
//! - [`Timestamp`] -- Second-precision local wall-clock time
//! - [`Clock`] -- Source of timestamps (system or fixed)

pub mod chat;
pub mod error;
pub mod limits;
pub mod temporal;
pub mod text;

pub use chat::{Chat, ChatId, Reaction};
pub use error::TypeError;
pub use temporal::{Clock, FixedClock, SystemClock, Timestamp, TIMESTAMP_FORMAT};
pub use text::{Author, BoundedText, ChatText, Field, ReactionText};
