//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`feed`, `share`, `query_cache`, etc.) so
//! components can depend on small focused models. None of these modules
//! touch the browser, so the data-flow logic is tested natively.

pub mod auth;
pub mod chat;
pub mod debounce;
pub mod feed;
pub mod filters;
pub mod notifications;
pub mod query_cache;
pub mod share;
pub mod share_targets;
pub mod ui;
