//! Dialog for sharing a message into one of the user's chats.
//!
//! SYSTEM CONTEXT
//! ==============
//! Opened from an article card with the article link as `message`. The chat
//! list is loaded into the shared `QueryCache` on mount; a successful send
//! updates both chat caches, opens the target chat and closes the dialog.
//!
//! ERROR HANDLING
//! ==============
//! A failed chat list load is logged, reported with an auto-closing
//! notification and leaves the list empty. A failed send
//! pushes an error notification and keeps the dialog open with the selection
//! intact.

use leptos::prelude::*;

use crate::config::ClientConfig;
use crate::net::types::ChatListItem;
use crate::state::auth::AuthState;
use crate::state::chat::ChatState;
use crate::state::notifications::NotificationsState;
use crate::state::query_cache::QueryCache;
use crate::state::share::ShareState;
use crate::state::share_targets::{RowAvatar, ShareRow, last_activity, visible_share_targets};
use crate::util::highlight::highlight_segments;

#[cfg(feature = "hydrate")]
const LOAD_FAILED_TITLE: &str = "Failed to load chats.";

/// Chat picker that sends `message` to the selected chat.
#[component]
pub fn ChatShareModal(#[prop(into)] message: String, on_close: Callback<()>) -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let cache = expect_context::<RwSignal<QueryCache>>();
    let chat = expect_context::<RwSignal<ChatState>>();
    let notifications = expect_context::<RwSignal<NotificationsState>>();

    let share = RwSignal::new(ShareState::default());
    let list_loading = RwSignal::new(true);

    #[cfg(feature = "hydrate")]
    {
        use crate::state::notifications::Notification;
        use crate::state::query_cache::{QueryData, QueryKey};

        let config = config.clone();
        let ticket = cache.try_update(|c| c.begin_fetch(QueryKey::ChatList));
        leptos::task::spawn_local(async move {
            match crate::net::api::fetch_chat_list(&config).await {
                Ok(list) => {
                    if let Some(ticket) = ticket {
                        cache.update(|c| {
                            c.resolve(&ticket, QueryData::ChatList(list));
                        });
                    }
                }
                Err(e) => {
                    leptos::logging::warn!("chat list load failed: {e}");
                    let notification = Notification::error(LOAD_FAILED_TITLE, &e, Some(config.notification_auto_close_ms));
                    notifications.update(|n| n.push(notification));
                }
            }
            list_loading.set(false);
        });
    }

    let is_loading = move || list_loading.get() && cache.with(|c| c.chat_list().is_none());
    let targets = Memo::new(move |_| {
        let user_id = auth.with(AuthState::user_id);
        share.with(|s| {
            cache.with(|c| {
                c.chat_list()
                    .map(|list| visible_share_targets(list, user_id, &s.search))
                    .unwrap_or_default()
            })
        })
    });

    let close = move || {
        if !share.with_untracked(|s| s.is_sending) {
            on_close.run(());
        }
    };
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            close();
        }
    };

    let message_for_send = message.clone();
    let on_send = move |_| {
        let Some(input) = share.try_update(|s| s.begin_send(&message_for_send)).flatten() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            use crate::state::share::SendOutcome;

            let config = config.clone();
            leptos::task::spawn_local(async move {
                let result = crate::net::api::create_message(&config, &input).await;
                let outcome = share.try_update(|s| cache.try_update(|c| s.finish_send(c, result))).flatten();
                match outcome {
                    Some(SendOutcome::Sent { chat_id }) => {
                        chat.update(|c| c.open_chat(chat_id));
                        on_close.run(());
                    }
                    Some(SendOutcome::Failed(notification)) => notifications.update(|n| n.push(notification)),
                    None => {}
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&config, input, chat, notifications);
        }
    };

    let search_value = move || share.with(|s| s.search.clone());
    let has_search = move || share.with(|s| !s.search.is_empty());
    let can_send = move || share.with(ShareState::can_send);
    let is_sending = move || share.with(|s| s.is_sending);

    view! {
        <div class="dialog-backdrop" on:click=move |_| close()>
            <div
                class="dialog dialog--share"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
                tabindex="0"
            >
                <div class="dialog__header">
                    <h2>"Share"</h2>
                    <button class="dialog__close" on:click=move |_| close() title="Close" aria-label="Close">
                        "✕"
                    </button>
                </div>

                <div class="share-modal__search">
                    <input
                        class="share-modal__search-input"
                        type="text"
                        placeholder="Search"
                        prop:value=search_value
                        on:input=move |ev| {
                            let raw = event_target_value(&ev);
                            share.update(|s| s.set_search(&raw));
                        }
                    />
                    <button
                        class="share-modal__search-clear"
                        disabled=move || !has_search()
                        on:click=move |_| share.update(ShareState::clear_search)
                        title="Clear search"
                        aria-label="Clear search"
                    >
                        "✕"
                    </button>
                </div>

                <div class="share-modal__list">
                    <Show
                        when=move || !is_loading()
                        fallback=|| view! { <span class="loader loader--lg" aria-label="Loading"></span> }
                    >
                        <Show
                            when=move || targets.with(|t| !t.is_empty())
                            fallback=|| view! { <p class="share-modal__empty">"No chats."</p> }
                        >
                            <For
                                each=move || targets.get()
                                key=|chat: &ChatListItem| (chat.id, last_activity(chat))
                                children=move |chat| view! { <ShareTargetRow chat=chat share=share /> }
                            />
                        </Show>
                    </Show>
                </div>

                <div class="share-modal__message">
                    <span class="badge">"Message:"</span>
                    <span class="share-modal__message-text">{message}</span>
                </div>

                <div class="dialog__actions">
                    <button
                        class="btn btn--primary"
                        class:btn--busy=is_sending
                        disabled=move || !can_send()
                        on:click=on_send
                    >
                        {move || if is_sending() { "Sending…" } else { "Send" }}
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn ShareTargetRow(chat: ChatListItem, share: RwSignal<ShareState>) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let row = ShareRow::from_chat(&chat, auth.with_untracked(AuthState::user_id));
    let chat_id = row.chat_id;
    let names = row.names.clone();

    let avatar = match row.avatar {
        RowAvatar::User(user) => {
            let initial = user
                .username
                .as_deref()
                .and_then(|name| name.chars().next())
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default();
            match user.image {
                Some(src) => view! { <img class="share-row__avatar" src=src alt="" /> }.into_any(),
                None => view! { <span class="share-row__avatar share-row__avatar--initial">{initial}</span> }.into_any(),
            }
        }
        RowAvatar::Group => view! { <span class="share-row__avatar share-row__avatar--group">"👥"</span> }.into_any(),
        RowAvatar::Nobody => view! { <span class="share-row__avatar share-row__avatar--empty"></span> }.into_any(),
    };

    view! {
        <button
            class="share-row"
            class:share-row--selected=move || share.with(|s| s.is_selected(chat_id))
            on:click=move |_| share.update(|s| s.select(chat_id))
        >
            {avatar}
            <span class="share-row__body">
                <span class="share-row__names" class:share-row__names--moderator=row.has_moderator>
                    {move || {
                        let search = share.with(|s| s.search.clone());
                        highlight_segments(&names, &search)
                            .into_iter()
                            .map(|segment| {
                                if segment.highlighted {
                                    view! { <mark>{segment.text}</mark> }.into_any()
                                } else {
                                    view! { <span>{segment.text}</span> }.into_any()
                                }
                            })
                            .collect_view()
                    }}
                </span>
                {row.preview.map(|text| view! { <span class="share-row__preview">{text}</span> })}
            </span>
            {row.is_moderator_chat.then(|| view! { <span class="badge badge--moderator">"Moderator chat"</span> })}
        </button>
    }
}
