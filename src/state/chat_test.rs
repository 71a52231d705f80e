use super::*;
use crate::net::types::{ChatMessage, InfiniteData, Page};
use crate::state::query_cache::QueryData;
use crate::state::share::apply_send_result;

// =============================================================
// ChatState
// =============================================================

#[test]
fn chat_state_default_closed_without_chat() {
    let state = ChatState::default();
    assert!(!state.open);
    assert!(state.existing_chat_id.is_none());
}

#[test]
fn open_chat_sets_target_and_opens() {
    let mut state = ChatState::default();
    state.open_chat(2);
    assert!(state.open);
    assert_eq!(state.existing_chat_id, Some(2));
}

#[test]
fn close_keeps_last_chat() {
    let mut state = ChatState::default();
    state.open_chat(4);
    state.close();
    assert!(!state.open);
    assert_eq!(state.existing_chat_id, Some(4));
}

// =============================================================
// Message loading
// =============================================================

fn message(id: i64, chat_id: ChatId, content: &str) -> ChatMessage {
    ChatMessage {
        id,
        chat_id,
        user_id: 1,
        content: content.to_owned(),
        content_type: "text".to_owned(),
        created_at: id * 10,
    }
}

#[test]
fn closed_drawer_loads_nothing() {
    let cache = QueryCache::default();
    let mut state = ChatState::default();
    assert_eq!(state.messages_to_load(&cache), None);
    state.open_chat(2);
    state.close();
    assert_eq!(state.messages_to_load(&cache), None);
}

#[test]
fn open_chat_without_cached_messages_needs_load() {
    let mut cache = QueryCache::default();
    let mut state = ChatState::default();
    state.open_chat(2);
    assert_eq!(state.messages_to_load(&cache), Some(2));

    cache.set(QueryKey::ChatMessages(2), QueryData::ChatMessages(InfiniteData::default()));
    assert_eq!(state.messages_to_load(&cache), None);
}

#[test]
fn invalidated_messages_are_loaded_again() {
    let mut cache = QueryCache::default();
    cache.set(QueryKey::ChatMessages(2), QueryData::ChatMessages(InfiniteData::default()));
    cache.invalidate(&QueryKey::ChatMessages(2));

    let mut state = ChatState::default();
    state.open_chat(2);
    assert_eq!(state.messages_to_load(&cache), Some(2));
}

#[test]
fn loaded_messages_receive_sent_message() {
    let mut cache = QueryCache::default();
    let mut state = ChatState::default();
    state.open_chat(2);

    let chat_id = state.messages_to_load(&cache).unwrap();
    let ticket = cache.begin_fetch(QueryKey::ChatMessages(chat_id));
    let page = Page { items: vec![message(1, 2, "earlier")], next_cursor: None };
    assert!(cache.resolve(&ticket, QueryData::ChatMessages(InfiniteData { pages: vec![page] })));
    assert_eq!(state.messages_to_load(&cache), None);

    apply_send_result(&mut cache, &message(2, 2, "hello")).unwrap();
    let contents = cache
        .chat_messages(2)
        .unwrap()
        .items()
        .into_iter()
        .map(|m| m.content)
        .collect::<Vec<_>>();
    assert_eq!(contents, vec!["earlier", "hello"]);
}
