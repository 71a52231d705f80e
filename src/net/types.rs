//! Shared wire DTOs for the RPC boundary.
//!
//! DESIGN
//! ======
//! These types mirror the RPC payloads field-for-field (`camelCase` on the
//! wire) so the cache can hold exactly what the server returned and the
//! optimistic send path can splice a created message back in without
//! re-fetching.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Chat thread identifier.
pub type ChatId = i64;
/// User identifier.
pub type UserId = i64;

/// The currently authenticated user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: Option<String>,
    #[serde(default)]
    pub is_moderator: bool,
}

// =============================================================
// Articles
// =============================================================

/// An article as returned by `article.getInfinite`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Unique article identifier, also the list render key.
    pub id: i64,
    pub title: String,
    /// Cover image URL, if any.
    pub cover: Option<String>,
    /// Author username, if the author still exists.
    pub username: Option<String>,
    /// Publish time in milliseconds since the Unix epoch.
    pub published_at: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub stats: ArticleStats,
}

/// Engagement counters shown on article cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleStats {
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub view_count: u64,
}

/// One page of a cursor-paginated list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Cursor for the following page; `None` on the last page.
    pub next_cursor: Option<i64>,
}

/// All pages loaded so far for one infinite query, in load order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InfiniteData<T> {
    pub pages: Vec<Page<T>>,
}

impl<T> Default for InfiniteData<T> {
    fn default() -> Self {
        Self { pages: Vec::new() }
    }
}

impl<T: Clone> InfiniteData<T> {
    /// Flatten every loaded page into one list.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        self.pages.iter().flat_map(|p| p.items.iter().cloned()).collect()
    }
}

impl<T> InfiniteData<T> {
    /// Cursor of the next page, if the last loaded page advertised one.
    #[must_use]
    pub fn next_cursor(&self) -> Option<i64> {
        self.pages.last().and_then(|p| p.next_cursor)
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.next_cursor().is_some()
    }
}

// =============================================================
// Chats
// =============================================================

/// Membership status of a user inside a chat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatMemberStatus {
    #[default]
    Invited,
    Joined,
    Ignored,
    Left,
    Kicked,
}

/// Public user fields embedded in chat members.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatUser {
    pub id: UserId,
    pub username: Option<String>,
    #[serde(default)]
    pub is_moderator: bool,
    /// Avatar image URL, if set.
    pub image: Option<String>,
}

/// A member record of a chat thread.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMember {
    pub user_id: UserId,
    pub status: ChatMemberStatus,
    #[serde(default)]
    pub is_owner: bool,
    pub user: ChatUser,
}

/// Latest-message preview attached to a chat list entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePreview {
    pub content: String,
    pub content_type: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

/// A chat thread as returned by `chat.getAllByUser`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatListItem {
    pub id: ChatId,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    pub chat_members: Vec<ChatMember>,
    /// Recent messages, newest first.
    #[serde(default)]
    pub messages: Vec<MessagePreview>,
}

impl ChatListItem {
    /// Membership record for `user_id`, if that user belongs to this chat.
    #[must_use]
    pub fn member(&self, user_id: UserId) -> Option<&ChatMember> {
        self.chat_members.iter().find(|m| m.user_id == user_id)
    }

    /// Every member except `user_id`, in member order.
    pub fn other_members(&self, user_id: Option<UserId>) -> impl Iterator<Item = &ChatMember> {
        self.chat_members
            .iter()
            .filter(move |m| Some(m.user_id) != user_id)
    }
}

/// A persisted chat message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: i64,
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub content: String,
    pub content_type: String,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
}

impl ChatMessage {
    /// Preview form used by the chat list cache.
    #[must_use]
    pub fn preview(&self) -> MessagePreview {
        MessagePreview {
            content: self.content.clone(),
            content_type: self.content_type.clone(),
            created_at: self.created_at,
        }
    }
}

/// Payload for `chat.createMessage`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageInput {
    pub chat_id: ChatId,
    pub content: String,
}
