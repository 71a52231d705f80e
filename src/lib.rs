//! # feedshare
//!
//! Leptos + WASM frontend for an article feed with chat sharing.
//!
//! This crate contains the app shell, pages, components, application state,
//! network types and the RPC client. Data-flow logic (filter merging,
//! debouncing, keyed query caching, share-target selection and the send
//! transaction) lives in `state` as plain Rust and is tested natively.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        leptos::logging::warn!("console logger already installed: {e}");
    }
    leptos::mount::hydrate_body(app::App);
}
