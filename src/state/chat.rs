//! Chat drawer state: whether it is open and which chat it shows.
//!
//! SYSTEM CONTEXT
//! ==============
//! Written by the share dialog after a successful send so the app switches
//! to the chat that just received the message. The drawer loads that chat's
//! messages into the query cache when they are not cached (never fetched, or
//! invalidated by a send that could not be merged).

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use crate::net::types::ChatId;
use crate::state::query_cache::{QueryCache, QueryKey};

/// State of the chat drawer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatState {
    pub open: bool,
    /// Chat to show when the drawer opens; `None` shows the chat list.
    pub existing_chat_id: Option<ChatId>,
}

impl ChatState {
    /// Open the drawer on `chat_id`.
    pub fn open_chat(&mut self, chat_id: ChatId) {
        self.existing_chat_id = Some(chat_id);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Chat whose messages the open drawer still has to fetch.
    #[must_use]
    pub fn messages_to_load(&self, cache: &QueryCache) -> Option<ChatId> {
        let chat_id = self.existing_chat_id.filter(|_| self.open)?;
        (!cache.contains(&QueryKey::ChatMessages(chat_id))).then_some(chat_id)
    }
}
