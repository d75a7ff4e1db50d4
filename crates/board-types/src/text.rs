use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;
use crate::limits::{AUTHOR_CAPACITY, CHAT_TEXT_CAPACITY, REACTION_TEXT_CAPACITY};

/// Which text field a value belongs to. Used in validation errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Author,
    ChatText,
    ReactionText,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Author => f.write_str("author"),
            Self::ChatText => f.write_str("chat text"),
            Self::ReactionText => f.write_str("reaction text"),
        }
    }
}

/// UTF-8 text whose byte length is strictly less than `N`.
///
/// `N` is the field's capacity in the classic fixed-buffer sense (one slot is
/// reserved for the terminator), so `BoundedText<16>` holds up to 15 bytes.
/// The bound is checked once, at construction.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoundedText<const N: usize> {
    value: String,
}

/// Author name of a chat or reaction (at most 15 bytes).
pub type Author = BoundedText<AUTHOR_CAPACITY>;

/// Body of a chat (at most 255 bytes).
pub type ChatText = BoundedText<CHAT_TEXT_CAPACITY>;

/// Body of a reaction (at most 15 bytes).
pub type ReactionText = BoundedText<REACTION_TEXT_CAPACITY>;

impl<const N: usize> BoundedText<N> {
    /// Capacity in bytes, exclusive.
    pub const CAPACITY: usize = N;

    /// Largest accepted byte length.
    pub const MAX_LEN: usize = N - 1;

    /// Validate `value` against the bound, tagging failures with `field`.
    pub fn new(field: Field, value: impl Into<String>) -> Result<Self, TypeError> {
        let value = value.into();
        if value.len() >= N {
            return Err(TypeError::FieldTooLong {
                field,
                len: value.len(),
                max: Self::MAX_LEN,
            });
        }
        Ok(Self { value })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<const N: usize> Deref for BoundedText<N> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.value
    }
}

impl<const N: usize> AsRef<str> for BoundedText<N> {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl<const N: usize> PartialEq<str> for BoundedText<N> {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl<const N: usize> PartialEq<&str> for BoundedText<N> {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl<const N: usize> fmt::Debug for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.value, f)
    }
}

// Display forwards to `str` so width/alignment flags apply to the text.
impl<const N: usize> fmt::Display for BoundedText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.value.as_str(), f)
    }
}

impl<const N: usize> Serialize for BoundedText<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, const N: usize> Deserialize<'de> for BoundedText<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        if value.len() >= N {
            return Err(serde::de::Error::custom(format!(
                "text too long: {} bytes (max {})",
                value.len(),
                N - 1
            )));
        }
        Ok(Self { value })
    }
}
