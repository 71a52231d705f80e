//! Share-target selection: which chats can receive a shared message, in what
//! order, and how each row is presented.
//!
//! DESIGN
//! ======
//! Pure functions over the cached chat list so the dialog can recompute the
//! view whenever the list, the current user or the search text changes.
//!
//! The data source promises `messages` newest first. That promise is checked
//! rather than trusted: the latest message is the one with the greatest
//! `created_at` (the earliest such entry on ties), and an out-of-order list is
//! logged.

#[cfg(test)]
#[path = "share_targets_test.rs"]
mod share_targets_test;

use std::cmp::Ordering;

use crate::net::types::{ChatListItem, ChatMemberStatus, ChatUser, MessagePreview, UserId};

/// Most recent message of a chat, validating newest-first ordering.
#[must_use]
pub fn latest_message(chat: &ChatListItem) -> Option<&MessagePreview> {
    let first = chat.messages.first()?;
    let newest = chat
        .messages
        .iter()
        .rev()
        .max_by_key(|m| m.created_at)
        .unwrap_or(first);
    if newest.created_at != first.created_at {
        log::warn!("chat {} messages are not newest-first; using message at {}", chat.id, newest.created_at);
    }
    Some(newest)
}

/// Timestamp used to order chats by recency.
#[must_use]
pub fn last_activity(chat: &ChatListItem) -> i64 {
    latest_message(chat).map_or(chat.created_at, |m| m.created_at)
}

/// Whether `user_id` has joined `chat`.
#[must_use]
pub fn has_joined(chat: &ChatListItem, user_id: Option<UserId>) -> bool {
    user_id
        .and_then(|id| chat.member(id))
        .is_some_and(|m| m.status == ChatMemberStatus::Joined)
}

/// Whether any member other than `user_id` has a username containing `search`
/// (case-insensitive).
#[must_use]
pub fn matches_search(chat: &ChatListItem, user_id: Option<UserId>, search: &str) -> bool {
    let needle = search.to_lowercase();
    chat.other_members(user_id).any(|m| {
        m.user
            .username
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&needle))
    })
}

/// Most recent activity first; equal timestamps put the higher chat id first.
#[must_use]
pub fn compare_by_recency(a: &ChatListItem, b: &ChatListItem) -> Ordering {
    last_activity(b)
        .cmp(&last_activity(a))
        .then_with(|| b.id.cmp(&a.id))
}

/// Chats the current user may share into, filtered by `search` and sorted by
/// recency.
#[must_use]
pub fn visible_share_targets(chats: &[ChatListItem], user_id: Option<UserId>, search: &str) -> Vec<ChatListItem> {
    let mut visible = chats
        .iter()
        .filter(|chat| has_joined(chat, user_id))
        .filter(|chat| search.is_empty() || matches_search(chat, user_id, search))
        .cloned()
        .collect::<Vec<_>>();
    visible.sort_by(compare_by_recency);
    visible
}

/// Leading visual of a share row.
#[derive(Clone, Debug, PartialEq)]
pub enum RowAvatar {
    /// Exactly one other member.
    User(ChatUser),
    /// More than one other member.
    Group,
    /// Nobody else is in the chat.
    Nobody,
}

/// Presentation data for one chat row in the share dialog.
#[derive(Clone, Debug, PartialEq)]
pub struct ShareRow {
    pub chat_id: i64,
    pub avatar: RowAvatar,
    /// Other members' usernames joined with `", "`.
    pub names: String,
    /// Latest message text, shown only to joined members.
    pub preview: Option<String>,
    /// Some other member is a moderator (tints the names).
    pub has_moderator: bool,
    /// Some other member both owns the chat and is a moderator.
    pub is_moderator_chat: bool,
}

impl ShareRow {
    #[must_use]
    pub fn from_chat(chat: &ChatListItem, user_id: Option<UserId>) -> Self {
        let others = chat.other_members(user_id).collect::<Vec<_>>();
        let avatar = match others.as_slice() {
            [] => RowAvatar::Nobody,
            [only] => RowAvatar::User(only.user.clone()),
            _ => RowAvatar::Group,
        };
        let names = others
            .iter()
            .map(|m| m.user.username.clone().unwrap_or_default())
            .collect::<Vec<_>>()
            .join(", ");
        let preview = latest_message(chat)
            .filter(|m| !m.content.is_empty())
            .filter(|_| has_joined(chat, user_id))
            .map(|m| m.content.clone());

        Self {
            chat_id: chat.id,
            avatar,
            names,
            preview,
            has_moderator: others.iter().any(|m| m.user.is_moderator),
            is_moderator_chat: others.iter().any(|m| m.is_owner && m.user.is_moderator),
        }
    }
}
