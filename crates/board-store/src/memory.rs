use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use board_types::limits::{MAX_CHATS, MAX_REACTIONS_PER_CHAT};
use board_types::{
    Author, Chat, ChatId, ChatText, Clock, Field, Reaction, ReactionText, SystemClock,
};

use crate::error::{StoreError, StoreResult};
use crate::traits::{ChatSnapshot, ChatStore};

/// Chats of the current generation. Ids inside a generation are contiguous:
/// `chats[i].id == first_id + i`.
struct Inner {
    chats: Vec<Arc<Chat>>,
    first_id: ChatId,
    next_id: ChatId,
}

impl Inner {
    fn new() -> Self {
        Self {
            chats: Vec::new(),
            first_id: ChatId::FIRST,
            next_id: ChatId::FIRST,
        }
    }

    fn index_of(&self, id: ChatId) -> Option<usize> {
        if id.is_zero() || id < self.first_id || id >= self.next_id {
            return None;
        }
        usize::try_from(id.get() - self.first_id.get()).ok()
    }
}

/// In-memory, `Vec`-based chat store.
///
/// All state sits behind one `RwLock`. Writers hold it for the whole
/// operation; [`list_all`](ChatStore::list_all) holds it only long enough to
/// clone the chat pointers. Chats are copy-on-write, so a reaction added
/// while a snapshot is alive clones that one chat instead of disturbing the
/// snapshot.
pub struct InMemoryChatStore {
    inner: RwLock<Inner>,
    clock: Box<dyn Clock>,
    max_chats: usize,
}

impl InMemoryChatStore {
    /// Create an empty store stamping chats with the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Create an empty store with a custom clock.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            inner: RwLock::new(Inner::new()),
            clock: Box::new(clock),
            max_chats: MAX_CHATS,
        }
    }

    /// Lower the chat ceiling below [`MAX_CHATS`].
    pub fn with_max_chats(mut self, max_chats: usize) -> Self {
        self.max_chats = max_chats.min(MAX_CHATS);
        self
    }

    /// The id the next accepted chat will receive.
    pub fn next_id(&self) -> ChatId {
        self.read().next_id
    }

    // Every operation validates before mutating, so a panic under the lock
    // cannot leave a half-written record behind; poisoned guards are reused.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryChatStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatStore for InMemoryChatStore {
    fn add_chat(&self, author: &str, text: &str) -> StoreResult<ChatId> {
        let author = Author::new(Field::Author, author)?;
        let text = ChatText::new(Field::ChatText, text)?;

        let mut inner = self.write();
        if inner.chats.len() >= self.max_chats {
            return Err(StoreError::ChatCapacityExceeded { max: self.max_chats });
        }
        let id = inner.next_id;
        inner
            .chats
            .push(Arc::new(Chat::new(id, author, text, self.clock.now())));
        inner.next_id = id.next();
        debug!(id = id.get(), count = inner.chats.len(), "chat added");
        Ok(id)
    }

    fn add_reaction(&self, author: &str, text: &str, chat_id: ChatId) -> StoreResult<()> {
        let mut inner = self.write();
        let index = inner
            .index_of(chat_id)
            .ok_or(StoreError::ChatNotFound(chat_id))?;
        let reaction = Reaction::new(
            Author::new(Field::Author, author)?,
            ReactionText::new(Field::ReactionText, text)?,
        );

        let full = StoreError::ReactionCapacityExceeded {
            chat: chat_id,
            max: MAX_REACTIONS_PER_CHAT,
        };
        let slot = &mut inner.chats[index];
        if slot.is_full() {
            return Err(full);
        }
        let chat = Arc::make_mut(slot);
        chat.push_reaction(reaction).map_err(|_| full)?;
        debug!(id = chat_id.get(), reactions = chat.reaction_count(), "reaction added");
        Ok(())
    }

    fn reset(&self) {
        let mut inner = self.write();
        let cleared = inner.chats.len();
        inner.chats.clear();
        inner.first_id = inner.next_id;
        debug!(cleared, next_id = inner.next_id.get(), "store reset");
    }

    fn list_all(&self) -> ChatSnapshot {
        self.read().chats.clone()
    }

    fn get(&self, chat_id: ChatId) -> Option<Arc<Chat>> {
        let inner = self.read();
        inner
            .index_of(chat_id)
            .and_then(|index| inner.chats.get(index))
            .cloned()
    }

    fn len(&self) -> usize {
        self.read().chats.len()
    }
}

impl std::fmt::Debug for InMemoryChatStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.read();
        f.debug_struct("InMemoryChatStore")
            .field("chat_count", &inner.chats.len())
            .field("next_id", &inner.next_id)
            .finish_non_exhaustive()
    }
}
