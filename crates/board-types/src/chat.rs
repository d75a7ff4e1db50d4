use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::limits::MAX_REACTIONS_PER_CHAT;
use crate::temporal::Timestamp;
use crate::text::{Author, ChatText, ReactionText};

/// Identifier of a chat.
///
/// Ids start at 1 and increase by one per accepted chat. Zero is never
/// assigned and is rejected wherever an id is looked up.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(u64);

impl ChatId {
    /// The first id a fresh store hands out.
    pub const FIRST: Self = Self(1);

    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// The id following this one.
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Debug for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChatId({})", self.0)
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for ChatId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}

impl From<u64> for ChatId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// A short annotation attached to exactly one chat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub author: Author,
    pub text: ReactionText,
}

impl Reaction {
    pub fn new(author: Author, text: ReactionText) -> Self {
        Self { author, text }
    }
}

/// A posted message and the reactions it has collected, in arrival order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    pub author: Author,
    pub text: ChatText,
    pub created_at: Timestamp,
    reactions: Vec<Reaction>,
}

impl Chat {
    /// Create a chat with no reactions.
    pub fn new(id: ChatId, author: Author, text: ChatText, created_at: Timestamp) -> Self {
        Self {
            id,
            author,
            text,
            created_at,
            reactions: Vec::new(),
        }
    }

    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }

    /// Whether another reaction would exceed [`MAX_REACTIONS_PER_CHAT`].
    pub fn is_full(&self) -> bool {
        self.reactions.len() >= MAX_REACTIONS_PER_CHAT
    }

    /// Append a reaction. Returns the reaction back if the chat is full.
    pub fn push_reaction(&mut self, reaction: Reaction) -> Result<(), Reaction> {
        if self.is_full() {
            return Err(reaction);
        }
        self.reactions.push(reaction);
        Ok(())
    }
}

impl AsRef<Chat> for Chat {
    fn as_ref(&self) -> &Chat {
        self
    }
}
