//! Keyed query cache shared by the feed and the share dialog.
//!
//! DESIGN
//! ======
//! Entries are keyed by [`QueryKey`] and hold typed [`QueryData`]. Every fetch
//! takes a [`FetchTicket`] carrying a per-key epoch; a response is only
//! written if no newer request (or local write) for the same key happened
//! since the ticket was issued, so a slow, superseded response can never
//! overwrite newer data.
//!
//! Local writes that span several keys go through [`QueryCache::transaction`]:
//! the closure edits staged copies and the cache applies them together only
//! when the closure returns `Ok`.
//!
//! Article queries are bounded: once more than [`MAX_ARTICLE_QUERIES`] filter
//! sets are tracked, starting a fetch evicts the one requested longest ago.
//!
//! The cache is provided as `RwSignal<QueryCache>` context; the signal is the
//! single writer path on the UI thread.

#[cfg(test)]
#[path = "query_cache_test.rs"]
mod query_cache_test;

use std::collections::HashMap;
use std::fmt;

use crate::error::CacheError;
use crate::net::types::{Article, ChatId, ChatListItem, ChatMessage, InfiniteData, Page};

/// Article filter sets kept before the least recently requested is evicted.
pub const MAX_ARTICLE_QUERIES: usize = 16;

/// Identity of a cached query.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// `article.getInfinite`, keyed by the canonical filter JSON.
    Articles(String),
    /// `chat.getAllByUser` (no parameters).
    ChatList,
    /// `chat.getInfiniteMessages` for one chat.
    ChatMessages(ChatId),
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Articles(filters) => write!(f, "article.getInfinite{filters}"),
            Self::ChatList => f.write_str("chat.getAllByUser"),
            Self::ChatMessages(chat_id) => write!(f, "chat.getInfiniteMessages#{chat_id}"),
        }
    }
}

/// Data stored for a [`QueryKey`].
#[derive(Clone, Debug, PartialEq)]
pub enum QueryData {
    Articles(InfiniteData<Article>),
    ChatList(Vec<ChatListItem>),
    ChatMessages(InfiniteData<ChatMessage>),
}

/// Proof that a fetch was started; required to write its response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub key: QueryKey,
    pub epoch: u64,
}

/// Shared client-side query cache.
#[derive(Clone, Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, QueryData>,
    latest_epoch: HashMap<QueryKey, u64>,
    next_epoch: u64,
}

impl QueryCache {
    pub fn get(&self, key: &QueryKey) -> Option<&QueryData> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn articles(&self, key: &QueryKey) -> Option<&InfiniteData<Article>> {
        match self.entries.get(key) {
            Some(QueryData::Articles(data)) => Some(data),
            _ => None,
        }
    }

    pub fn chat_list(&self) -> Option<&Vec<ChatListItem>> {
        match self.entries.get(&QueryKey::ChatList) {
            Some(QueryData::ChatList(list)) => Some(list),
            _ => None,
        }
    }

    pub fn chat_messages(&self, chat_id: ChatId) -> Option<&InfiniteData<ChatMessage>> {
        match self.entries.get(&QueryKey::ChatMessages(chat_id)) {
            Some(QueryData::ChatMessages(data)) => Some(data),
            _ => None,
        }
    }

    fn bump(&mut self, key: &QueryKey) -> u64 {
        self.next_epoch += 1;
        self.latest_epoch.insert(key.clone(), self.next_epoch);
        self.next_epoch
    }

    /// Register a new request for `key`, superseding earlier ones.
    pub fn begin_fetch(&mut self, key: QueryKey) -> FetchTicket {
        let epoch = self.bump(&key);
        if matches!(key, QueryKey::Articles(_)) {
            self.evict_article_queries();
        }
        FetchTicket { key, epoch }
    }

    fn evict_article_queries(&mut self) {
        loop {
            let mut tracked = self
                .latest_epoch
                .iter()
                .filter(|(key, _)| matches!(key, QueryKey::Articles(_)));
            if tracked.clone().count() <= MAX_ARTICLE_QUERIES {
                return;
            }
            let Some(oldest) = tracked.min_by_key(|(_, epoch)| **epoch).map(|(key, _)| key.clone()) else {
                return;
            };
            log::debug!("evicting {oldest}");
            self.latest_epoch.remove(&oldest);
            self.entries.remove(&oldest);
        }
    }

    /// Whether `ticket` is still the newest request for its key.
    #[must_use]
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.latest_epoch.get(&ticket.key) == Some(&ticket.epoch)
    }

    /// Replace the entry for `ticket.key` with `data` if the ticket is current.
    ///
    /// Returns `false` when the response was discarded as stale.
    pub fn resolve(&mut self, ticket: &FetchTicket, data: QueryData) -> bool {
        if !self.is_current(ticket) {
            log::debug!("discarding stale response for {} (epoch {})", ticket.key, ticket.epoch);
            return false;
        }
        self.entries.insert(ticket.key.clone(), data);
        true
    }

    /// Store the first page of an article query.
    ///
    /// Later pages already loaded are kept when the first page still ends at
    /// the same cursor; otherwise they are dropped.
    pub fn resolve_first_page(&mut self, ticket: &FetchTicket, page: Page<Article>) -> bool {
        if !self.is_current(ticket) {
            log::debug!("discarding stale response for {} (epoch {})", ticket.key, ticket.epoch);
            return false;
        }
        match self.entries.get_mut(&ticket.key) {
            Some(QueryData::Articles(data))
                if data.pages.len() > 1 && data.pages[0].next_cursor == page.next_cursor =>
            {
                data.pages[0] = page;
            }
            _ => {
                self.entries
                    .insert(ticket.key.clone(), QueryData::Articles(InfiniteData { pages: vec![page] }));
            }
        }
        true
    }

    /// Append a follow-up page to an article query.
    pub fn resolve_next_page(&mut self, ticket: &FetchTicket, page: Page<Article>) -> bool {
        if !self.is_current(ticket) {
            log::debug!("discarding stale page for {} (epoch {})", ticket.key, ticket.epoch);
            return false;
        }
        match self.entries.get_mut(&ticket.key) {
            Some(QueryData::Articles(data)) => data.pages.push(page),
            _ => {
                self.entries
                    .insert(ticket.key.clone(), QueryData::Articles(InfiniteData { pages: vec![page] }));
            }
        }
        true
    }

    /// Overwrite an entry directly, superseding in-flight requests.
    pub fn set(&mut self, key: QueryKey, data: QueryData) {
        self.bump(&key);
        self.entries.insert(key, data);
    }

    /// Drop an entry so the next reader refetches it.
    pub fn invalidate(&mut self, key: &QueryKey) {
        self.entries.remove(key);
    }

    /// Apply several entry updates as one unit.
    ///
    /// The closure works on staged copies; nothing is written unless it
    /// returns `Ok`. Committed keys supersede in-flight requests.
    ///
    /// # Errors
    ///
    /// Returns the closure's error; the cache is left untouched.
    pub fn transaction<R>(
        &mut self,
        f: impl FnOnce(&mut CacheTransaction<'_>) -> Result<R, CacheError>,
    ) -> Result<R, CacheError> {
        let (result, staged) = {
            let mut tx = CacheTransaction { base: self, staged: HashMap::new() };
            let result = f(&mut tx)?;
            (result, tx.staged)
        };
        for (key, data) in staged {
            self.set(key, data);
        }
        Ok(result)
    }
}

/// Staged view of a [`QueryCache`] inside a transaction.
pub struct CacheTransaction<'a> {
    base: &'a QueryCache,
    staged: HashMap<QueryKey, QueryData>,
}

impl CacheTransaction<'_> {
    /// Read an entry, seeing earlier staged writes.
    pub fn get(&self, key: &QueryKey) -> Option<&QueryData> {
        self.staged.get(key).or_else(|| self.base.get(key))
    }

    /// Stage an edit of an existing entry.
    ///
    /// Returns `Ok(false)` without staging anything if the key is not cached.
    ///
    /// # Errors
    ///
    /// Propagates the edit closure's error.
    pub fn update(
        &mut self,
        key: &QueryKey,
        f: impl FnOnce(&mut QueryData) -> Result<(), CacheError>,
    ) -> Result<bool, CacheError> {
        let Some(current) = self.get(key) else {
            return Ok(false);
        };
        let mut next = current.clone();
        f(&mut next)?;
        self.staged.insert(key.clone(), next);
        Ok(true)
    }

    /// Stage an edit of the cached chat list, if present.
    ///
    /// # Errors
    ///
    /// Fails when the entry holds other data, or with the closure's error.
    pub fn update_chat_list(
        &mut self,
        f: impl FnOnce(&mut Vec<ChatListItem>) -> Result<(), CacheError>,
    ) -> Result<bool, CacheError> {
        let key = QueryKey::ChatList;
        self.update(&key, |data| match data {
            QueryData::ChatList(list) => f(list),
            _ => Err(CacheError::TypeMismatch { key: key.to_string() }),
        })
    }

    /// Stage an edit of one chat's cached message pages, if present.
    ///
    /// # Errors
    ///
    /// Fails when the entry holds other data, or with the closure's error.
    pub fn update_chat_messages(
        &mut self,
        chat_id: ChatId,
        f: impl FnOnce(&mut InfiniteData<ChatMessage>) -> Result<(), CacheError>,
    ) -> Result<bool, CacheError> {
        let key = QueryKey::ChatMessages(chat_id);
        self.update(&key, |data| match data {
            QueryData::ChatMessages(pages) => f(pages),
            _ => Err(CacheError::TypeMismatch { key: key.to_string() }),
        })
    }
}
