//! Plain-text rendering of the chat history.
//!
//! The history grows without bound, but a response is streamed through a
//! buffer of fixed size. [`ChatRenderer`] formats one line at a time and
//! only ever appends whole lines to its buffer; when the next line does not
//! fit, the buffer is written out and reset. The bytes a client receives are
//! identical to [`render_to_string`] on the same chats, whatever the buffer
//! size.
//!
//! # Format
//!
//! ```text
//! [#1 2024-05-01 10:30:00]                alice: hi
//!                               (bob) lol
//! ```
//!
//! Chat authors are right-aligned in a 20-column field; reaction lines are
//! indented by 30 columns and follow their chat in arrival order.

pub mod error;
pub mod format;
pub mod renderer;

pub use error::{RenderError, RenderResult};
pub use format::{
    format_chat_line, format_reaction_line, AUTHOR_COLUMN_WIDTH, MAX_LINE_LEN, REACTION_INDENT,
};
pub use renderer::{
    render_to_string, ChatRenderer, RenderStats, DEFAULT_BUFFER_SIZE, MIN_BUFFER_SIZE,
};
