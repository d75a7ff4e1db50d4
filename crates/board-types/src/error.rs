use thiserror::Error;

use crate::text::Field;

/// Errors produced by type construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("{field} too long: {len} bytes (max {max})")]
    FieldTooLong { field: Field, len: usize, max: usize },
}
