use std::fmt::{self, Write};

use board_types::limits::{AUTHOR_CAPACITY, CHAT_TEXT_CAPACITY, REACTION_TEXT_CAPACITY};
use board_types::{Chat, Reaction};

/// Width of the right-aligned author column on chat lines.
pub const AUTHOR_COLUMN_WIDTH: usize = 20;

/// Leading spaces on reaction lines.
pub const REACTION_INDENT: usize = 30;

// "[#" + u64 id + " " + timestamp + "] "
const CHAT_PREFIX_MAX: usize = 2 + 20 + 1 + 19 + 2;

// Padding counts chars, so a multi-byte author can take up to
// `AUTHOR_COLUMN_WIDTH - 1` pad bytes on top of its own bytes.
const AUTHOR_FIELD_MAX: usize = AUTHOR_COLUMN_WIDTH + AUTHOR_CAPACITY - 1;

const CHAT_LINE_MAX: usize = CHAT_PREFIX_MAX + AUTHOR_FIELD_MAX + 2 + (CHAT_TEXT_CAPACITY - 1) + 1;

const REACTION_LINE_MAX: usize =
    REACTION_INDENT + 1 + (AUTHOR_CAPACITY - 1) + 2 + (REACTION_TEXT_CAPACITY - 1) + 1;

/// Upper bound on the byte length of any rendered line, newline included.
pub const MAX_LINE_LEN: usize = if CHAT_LINE_MAX > REACTION_LINE_MAX {
    CHAT_LINE_MAX
} else {
    REACTION_LINE_MAX
};

/// Append `[#<id> <timestamp>] <author>: <text>\n` to `out`.
pub fn format_chat_line(out: &mut impl Write, chat: &Chat) -> fmt::Result {
    writeln!(
        out,
        "[#{} {}] {:>width$}: {}",
        chat.id.get(),
        chat.created_at,
        chat.author,
        chat.text,
        width = AUTHOR_COLUMN_WIDTH
    )
}

/// Append an indented `(<author>) <text>\n` to `out`.
pub fn format_reaction_line(out: &mut impl Write, reaction: &Reaction) -> fmt::Result {
    writeln!(
        out,
        "{:indent$}({}) {}",
        "",
        reaction.author,
        reaction.text,
        indent = REACTION_INDENT
    )
}
