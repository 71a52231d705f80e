use super::*;
use crate::net::types::{
    ChatListItem, ChatMember, ChatMemberStatus, ChatUser, InfiniteData, MessagePreview, Page,
};
use crate::state::query_cache::QueryData;

// =============================================================
// Helpers
// =============================================================

fn chat(id: ChatId, messages: Vec<MessagePreview>) -> ChatListItem {
    ChatListItem {
        id,
        created_at: 0,
        chat_members: vec![ChatMember {
            user_id: 1,
            status: ChatMemberStatus::Joined,
            is_owner: false,
            user: ChatUser { id: 1, username: Some("me".to_owned()), is_moderator: false, image: None },
        }],
        messages,
    }
}

fn message(id: i64, chat_id: ChatId, content: &str, created_at: i64) -> ChatMessage {
    ChatMessage {
        id,
        chat_id,
        user_id: 1,
        content: content.to_owned(),
        content_type: "text".to_owned(),
        created_at,
    }
}

fn seeded_cache() -> QueryCache {
    let mut cache = QueryCache::default();
    cache.set(QueryKey::ChatList, QueryData::ChatList(vec![chat(1, Vec::new()), chat(2, Vec::new())]));
    cache.set(
        QueryKey::ChatMessages(2),
        QueryData::ChatMessages(InfiniteData {
            pages: vec![
                Page { items: vec![message(1, 2, "older", 10)], next_cursor: Some(5) },
                Page { items: vec![message(2, 2, "old", 20)], next_cursor: None },
            ],
        }),
    );
    cache
}

// =============================================================
// Search and selection
// =============================================================

#[test]
fn search_is_lowercased_and_clearable() {
    let mut state = ShareState::default();
    state.set_search("AnNa");
    assert_eq!(state.search, "anna");
    state.clear_search();
    assert!(state.search.is_empty());
}

#[test]
fn selecting_is_idempotent_and_exclusive() {
    let mut state = ShareState::default();
    state.select(1);
    state.select(2);
    state.select(2);
    assert_eq!(state.selected_chat, Some(2));
    assert!(state.is_selected(2));
    assert!(!state.is_selected(1));
}

// =============================================================
// begin_send
// =============================================================

#[test]
fn begin_send_requires_selection() {
    let mut state = ShareState::default();
    assert!(state.begin_send("hello").is_none());
    assert!(!state.is_sending);
}

#[test]
fn begin_send_marks_busy_and_blocks_double_send() {
    let mut state = ShareState::default();
    state.select(2);
    let input = state.begin_send("hello").unwrap();
    assert_eq!(input, CreateMessageInput { chat_id: 2, content: "hello".to_owned() });
    assert!(state.is_sending);
    assert!(state.begin_send("hello").is_none());
}

// =============================================================
// finish_send
// =============================================================

#[test]
fn successful_send_updates_both_caches() {
    let mut cache = seeded_cache();
    let mut state = ShareState::default();
    state.select(2);
    state.begin_send("hello");

    let outcome = state.finish_send(&mut cache, Ok(message(3, 2, "hello", 99)));
    assert_eq!(outcome, SendOutcome::Sent { chat_id: 2 });
    assert!(!state.is_sending);

    let pages = &cache.chat_messages(2).unwrap().pages;
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].items.len(), 1);
    assert_eq!(pages[1].items.last().unwrap().content, "hello");

    let list = cache.chat_list().unwrap();
    let target = list.iter().find(|c| c.id == 2).unwrap();
    assert_eq!(
        target.messages,
        vec![MessagePreview { content: "hello".to_owned(), content_type: "text".to_owned(), created_at: 99 }]
    );
    assert!(list.iter().find(|c| c.id == 1).unwrap().messages.is_empty());
}

#[test]
fn failed_send_leaves_caches_and_reports_error() {
    let mut cache = seeded_cache();
    let before_list = cache.chat_list().cloned();
    let before_messages = cache.chat_messages(2).cloned();

    let mut state = ShareState::default();
    state.select(2);
    state.begin_send("hello");
    let outcome = state.finish_send(&mut cache, Err(ApiError::Rpc { message: "Chat is closed".to_owned() }));

    assert!(!state.is_sending);
    assert_eq!(state.selected_chat, Some(2));
    match outcome {
        SendOutcome::Failed(n) => {
            assert_eq!(n.title, SEND_FAILED_TITLE);
            assert_eq!(n.message, "Chat is closed");
            assert_eq!(n.auto_close_ms, None);
        }
        SendOutcome::Sent { .. } => panic!("expected failure"),
    }
    assert_eq!(cache.chat_list().cloned(), before_list);
    assert_eq!(cache.chat_messages(2).cloned(), before_messages);
}

// =============================================================
// apply_send_result
// =============================================================

#[test]
fn uncached_message_pages_still_update_preview() {
    let mut cache = QueryCache::default();
    cache.set(QueryKey::ChatList, QueryData::ChatList(vec![chat(5, Vec::new())]));
    apply_send_result(&mut cache, &message(1, 5, "yo", 7)).unwrap();
    assert!(cache.chat_messages(5).is_none());
    assert_eq!(cache.chat_list().unwrap()[0].messages[0].content, "yo");
}

#[test]
fn unknown_chat_in_list_is_ignored() {
    let mut cache = seeded_cache();
    apply_send_result(&mut cache, &message(9, 8, "x", 1)).unwrap();
    assert!(cache.chat_list().unwrap().iter().all(|c| c.messages.is_empty()));
}

#[test]
fn empty_message_pages_abort_both_updates() {
    let mut cache = QueryCache::default();
    cache.set(QueryKey::ChatList, QueryData::ChatList(vec![chat(3, Vec::new())]));
    cache.set(QueryKey::ChatMessages(3), QueryData::ChatMessages(InfiniteData::default()));

    let err = apply_send_result(&mut cache, &message(1, 3, "hi", 5)).unwrap_err();
    assert_eq!(err, CacheError::MissingPages { chat_id: 3 });
    assert!(cache.chat_list().unwrap()[0].messages.is_empty());
}

#[test]
fn finish_send_invalidates_when_merge_fails() {
    let mut cache = QueryCache::default();
    cache.set(QueryKey::ChatList, QueryData::ChatList(vec![chat(3, Vec::new())]));
    cache.set(QueryKey::ChatMessages(3), QueryData::ChatMessages(InfiniteData::default()));

    let mut state = ShareState::default();
    state.select(3);
    state.begin_send("hi");
    let outcome = state.finish_send(&mut cache, Ok(message(1, 3, "hi", 5)));

    assert_eq!(outcome, SendOutcome::Sent { chat_id: 3 });
    assert!(!cache.contains(&QueryKey::ChatList));
    assert!(!cache.contains(&QueryKey::ChatMessages(3)));
}

#[test]
fn scenario_select_send_and_switch_to_chat() {
    use crate::state::chat::ChatState;

    let mut cache = seeded_cache();
    let mut state = ShareState::default();
    let mut chat_state = ChatState::default();

    state.select(2);
    let input = state.begin_send("hello").unwrap();
    let created = ChatMessage {
        id: 77,
        chat_id: input.chat_id,
        user_id: 1,
        content: input.content.clone(),
        content_type: "text".to_owned(),
        created_at: 1_700_000_000_000,
    };
    if let SendOutcome::Sent { chat_id } = state.finish_send(&mut cache, Ok(created)) {
        chat_state.open_chat(chat_id);
    }

    assert_eq!(chat_state, ChatState { open: true, existing_chat_id: Some(2) });
    assert_eq!(cache.chat_messages(2).unwrap().items().last().unwrap().id, 77);
    assert_eq!(cache.chat_list().unwrap()[1].messages[0].created_at, 1_700_000_000_000);
}
