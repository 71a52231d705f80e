//! Side drawer for the active chat.
//!
//! SYSTEM CONTEXT
//! ==============
//! Opened by the share dialog after a send. Shows the messages of
//! `ChatState::existing_chat_id`, fetching the first page through the shared
//! `QueryCache` whenever the chat opens without cached messages.

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::net::types::{ChatId, ChatMessage};
use crate::state::chat::ChatState;
use crate::state::query_cache::QueryCache;

#[component]
pub fn ChatDrawer() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatState>>();
    let cache = expect_context::<RwSignal<QueryCache>>();
    let config = expect_context::<ClientConfig>();

    Effect::new(move || {
        let target = chat.with(|c| cache.with_untracked(|q| c.messages_to_load(q)));
        if let Some(chat_id) = target {
            load_messages(config.clone(), cache, chat_id);
        }
    });

    let is_open = move || chat.with(|c| c.open);
    let messages = move || {
        let Some(chat_id) = chat.with(|c| c.existing_chat_id) else {
            return Vec::new();
        };
        cache.with(|c| c.chat_messages(chat_id).map(|data| data.items()).unwrap_or_default())
    };
    let title = move || {
        chat.with(|c| c.existing_chat_id)
            .map_or_else(|| "Chats".to_owned(), |id| format!("Chat #{id}"))
    };

    view! {
        <Show when=is_open>
            <aside class="chat-drawer">
                <div class="chat-drawer__header">
                    <span class="chat-drawer__title">{title}</span>
                    <button
                        class="chat-drawer__close"
                        on:click=move |_| chat.update(ChatState::close)
                        title="Close"
                        aria-label="Close"
                    >
                        "✕"
                    </button>
                </div>
                <div class="chat-drawer__messages">
                    <For
                        each=messages
                        key=|m: &ChatMessage| m.id
                        children=|m| view! { <p class="chat-drawer__message">{m.content}</p> }
                    />
                </div>
            </aside>
        </Show>
    }
}

fn load_messages(config: ClientConfig, cache: RwSignal<QueryCache>, chat_id: ChatId) {
    #[cfg(feature = "hydrate")]
    {
        use crate::net::types::InfiniteData;
        use crate::state::query_cache::{QueryData, QueryKey};

        let Some(ticket) = cache.try_update(|q| q.begin_fetch(QueryKey::ChatMessages(chat_id))) else {
            return;
        };
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_chat_messages(&config, chat_id, None).await {
                Ok(page) => cache.update(|q| {
                    q.resolve(&ticket, QueryData::ChatMessages(InfiniteData { pages: vec![page] }));
                }),
                Err(e) => leptos::logging::warn!("chat {chat_id} messages load failed: {e}"),
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, cache, chat_id);
    }
}
