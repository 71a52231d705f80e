//! Stack of dismissible notifications.
//!
//! SYSTEM CONTEXT
//! ==============
//! Renders `NotificationsState` from context. Each toast arms its own
//! auto-close timer on mount when the notification asks for one.

use leptos::prelude::*;

use crate::state::notifications::{Notification, NotificationKind, NotificationsState};

/// Fixed-position notification stack.
#[component]
pub fn NotificationHost() -> impl IntoView {
    let notifications = expect_context::<RwSignal<NotificationsState>>();

    view! {
        <div class="notification-host" aria-live="polite">
            <For
                each=move || notifications.with(|n| n.items.clone())
                key=|n: &Notification| n.id.clone()
                children=move |n| view! { <Toast notification=n /> }
            />
        </div>
    }
}

#[component]
fn Toast(notification: Notification) -> impl IntoView {
    let notifications = expect_context::<RwSignal<NotificationsState>>();
    let id = notification.id.clone();

    let is_error = notification.kind == NotificationKind::Error;

    #[cfg(feature = "hydrate")]
    {
        if let Some(delay) = notification.auto_close_ms {
            let id = id.clone();
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(delay))).await;
                notifications.try_update(|n| n.dismiss(&id));
            });
        }
    }

    let on_dismiss = move |_| notifications.update(|n| n.dismiss(&id));

    view! {
        <div class="toast" class:toast--error=is_error role="status">
            <span class="toast__title">{notification.title}</span>
            <span class="toast__message">{notification.message}</span>
            <button class="toast__close" on:click=on_dismiss title="Dismiss" aria-label="Dismiss">
                "✕"
            </button>
        </div>
    }
}
