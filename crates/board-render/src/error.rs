use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("buffer too small: {capacity} bytes (min {min})")]
    BufferTooSmall { capacity: usize, min: usize },

    #[error("line of {len} bytes does not fit a {capacity}-byte buffer")]
    LineTooLong { len: usize, capacity: usize },

    #[error("format error: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
