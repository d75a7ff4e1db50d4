use std::io::Write;

use board_types::Chat;

use crate::error::{RenderError, RenderResult};
use crate::format::{format_chat_line, format_reaction_line, MAX_LINE_LEN};

/// Default flush buffer size in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Smallest accepted buffer. Any rendered line fits in one buffer of this size.
pub const MIN_BUFFER_SIZE: usize = 512;

const _: () = assert!(MIN_BUFFER_SIZE >= MAX_LINE_LEN);

/// Counters for one render pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Lines appended (chats plus reactions).
    pub lines: usize,
    /// Writes issued to the output.
    pub flushes: usize,
    /// Total bytes written.
    pub bytes: usize,
}

/// Streams the chat history through a fixed-capacity buffer.
#[derive(Clone, Debug)]
pub struct ChatRenderer {
    capacity: usize,
}

impl ChatRenderer {
    /// Create a renderer whose buffer holds `capacity` bytes.
    ///
    /// Fails if `capacity` is below [`MIN_BUFFER_SIZE`].
    pub fn new(capacity: usize) -> RenderResult<Self> {
        if capacity < MIN_BUFFER_SIZE {
            return Err(RenderError::BufferTooSmall {
                capacity,
                min: MIN_BUFFER_SIZE,
            });
        }
        Ok(Self { capacity })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Render `chats` to `out`.
    ///
    /// Each call to `out.write_all` carries at most `capacity` bytes and ends
    /// on a line boundary. An empty history writes nothing.
    pub fn render<I, W>(&self, chats: I, out: &mut W) -> RenderResult<RenderStats>
    where
        I: IntoIterator,
        I::Item: AsRef<Chat>,
        W: Write + ?Sized,
    {
        let mut buffer = FlushBuffer::new(self.capacity, out);
        let mut line = String::with_capacity(MAX_LINE_LEN);

        for chat in chats {
            let chat = chat.as_ref();
            line.clear();
            format_chat_line(&mut line, chat)?;
            buffer.push_line(line.as_bytes())?;

            for reaction in chat.reactions() {
                line.clear();
                format_reaction_line(&mut line, reaction)?;
                buffer.push_line(line.as_bytes())?;
            }
        }

        buffer.finish()
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Render `chats` in one shot, without a size bound.
pub fn render_to_string<I>(chats: I) -> RenderResult<String>
where
    I: IntoIterator,
    I::Item: AsRef<Chat>,
{
    let mut out = String::new();
    for chat in chats {
        let chat = chat.as_ref();
        format_chat_line(&mut out, chat)?;
        for reaction in chat.reactions() {
            format_reaction_line(&mut out, reaction)?;
        }
    }
    Ok(out)
}

/// Fixed-capacity byte buffer that only accepts whole lines.
struct FlushBuffer<'w, W: Write + ?Sized> {
    buf: Vec<u8>,
    capacity: usize,
    out: &'w mut W,
    stats: RenderStats,
}

impl<'w, W: Write + ?Sized> FlushBuffer<'w, W> {
    fn new(capacity: usize, out: &'w mut W) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
            out,
            stats: RenderStats::default(),
        }
    }

    fn push_line(&mut self, line: &[u8]) -> RenderResult<()> {
        if line.len() > self.capacity {
            return Err(RenderError::LineTooLong {
                len: line.len(),
                capacity: self.capacity,
            });
        }
        if self.buf.len() + line.len() > self.capacity {
            self.flush()?;
        }
        self.buf.extend_from_slice(line);
        self.stats.lines += 1;
        Ok(())
    }

    fn flush(&mut self) -> RenderResult<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.out.write_all(&self.buf)?;
        self.stats.flushes += 1;
        self.stats.bytes += self.buf.len();
        self.buf.clear();
        Ok(())
    }

    fn finish(mut self) -> RenderResult<RenderStats> {
        self.flush()?;
        self.out.flush()?;
        Ok(self.stats)
    }
}
