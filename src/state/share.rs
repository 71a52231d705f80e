//! Share dialog state and the send-result cache transaction.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ChatShareModal` owns one `ShareState`. On send it asks for a
//! `CreateMessageInput`, performs the RPC, then hands the outcome back to
//! [`ShareState::finish_send`], which updates the caches and tells the
//! component what to do next.
//!
//! DESIGN
//! ======
//! A created message touches two cache entries: the chat's message pages and
//! the chat list preview. [`apply_send_result`] writes both in one
//! transaction. If that cannot be done (the message cache has no page to
//! append to) neither entry is written and both are invalidated so they
//! refetch on next read.

#[cfg(test)]
#[path = "share_test.rs"]
mod share_test;

use crate::error::{ApiError, CacheError};
use crate::net::types::{ChatId, ChatMessage, CreateMessageInput};
use crate::state::notifications::Notification;
use crate::state::query_cache::{QueryCache, QueryKey};

pub const SEND_FAILED_TITLE: &str = "Failed to send message.";

/// Local state of the share dialog.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShareState {
    /// Lowercased username filter.
    pub search: String,
    pub selected_chat: Option<ChatId>,
    pub is_sending: bool,
}

/// What the dialog should do after a send completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Open `chat_id` in the chat drawer and close the dialog.
    Sent { chat_id: ChatId },
    /// Show the notification; the dialog stays open.
    Failed(Notification),
}

impl ShareState {
    /// Update the search text from raw input.
    pub fn set_search(&mut self, raw: &str) {
        self.search = raw.to_lowercase();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    /// Select `chat_id` as the share target. Re-selecting is a no-op.
    pub fn select(&mut self, chat_id: ChatId) {
        self.selected_chat = Some(chat_id);
    }

    #[must_use]
    pub fn is_selected(&self, chat_id: ChatId) -> bool {
        self.selected_chat == Some(chat_id)
    }

    #[must_use]
    pub fn can_send(&self) -> bool {
        self.selected_chat.is_some() && !self.is_sending
    }

    /// Start sending `message` to the selected chat.
    ///
    /// Returns `None` when nothing is selected or a send is already in flight.
    pub fn begin_send(&mut self, message: &str) -> Option<CreateMessageInput> {
        if !self.can_send() {
            return None;
        }
        let chat_id = self.selected_chat?;
        self.is_sending = true;
        Some(CreateMessageInput { chat_id, content: message.to_owned() })
    }

    /// Apply the RPC outcome of a send started with [`Self::begin_send`].
    pub fn finish_send(&mut self, cache: &mut QueryCache, result: Result<ChatMessage, ApiError>) -> SendOutcome {
        self.is_sending = false;
        match result {
            Ok(message) => {
                let chat_id = message.chat_id;
                if let Err(err) = apply_send_result(cache, &message) {
                    log::warn!("could not merge sent message into cache: {err}");
                    cache.invalidate(&QueryKey::ChatMessages(chat_id));
                    cache.invalidate(&QueryKey::ChatList);
                }
                SendOutcome::Sent { chat_id }
            }
            Err(err) => {
                log::warn!("send message failed: {err}");
                SendOutcome::Failed(Notification::error(SEND_FAILED_TITLE, &err, None))
            }
        }
    }
}

/// Merge a created message into the message pages and the chat list preview.
///
/// Entries that are not cached are left alone.
///
/// # Errors
///
/// Returns [`CacheError::MissingPages`] when the chat's message cache exists
/// but holds no page; in that case nothing is written.
pub fn apply_send_result(cache: &mut QueryCache, message: &ChatMessage) -> Result<(), CacheError> {
    let chat_id = message.chat_id;
    cache.transaction(|tx| {
        tx.update_chat_messages(chat_id, |data| {
            let last = data.pages.last_mut().ok_or(CacheError::MissingPages { chat_id })?;
            last.items.push(message.clone());
            Ok(())
        })?;
        tx.update_chat_list(|list| {
            if let Some(chat) = list.iter_mut().find(|c| c.id == chat_id) {
                chat.messages = vec![message.preview()];
            }
            Ok(())
        })?;
        Ok(())
    })
}
