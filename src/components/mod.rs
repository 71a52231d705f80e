//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the feed and share flows while reading/writing shared
//! state from Leptos context providers.

pub mod article_card;
pub mod articles_infinite;
pub mod chat_drawer;
pub mod chat_share_modal;
pub mod in_view_loader;
pub mod no_content;
pub mod notification_host;
