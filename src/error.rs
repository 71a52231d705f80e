//! Error types shared by the RPC layer and the query cache.
//!
//! ERROR HANDLING
//! ==============
//! `ApiError`'s `Display` is what users see in notifications, so the `Rpc`
//! variant renders the server's message verbatim.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::net::types::ChatId;

/// Errors produced by RPC calls.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request could not be sent or the connection failed.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status and no RPC error body.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The server rejected the call with an RPC error.
    #[error("{message}")]
    Rpc { message: String },

    /// The response body could not be decoded.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// Called outside the browser (SSR or native tests).
    #[error("not available on server")]
    Unavailable,
}

/// Errors produced by cache transactions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// The cached message list for a chat has no page to append into.
    #[error("message cache for chat {chat_id} has no pages")]
    MissingPages { chat_id: ChatId },

    /// A cache entry holds a different kind of data than its key implies.
    #[error("cache entry {key} holds unexpected data")]
    TypeMismatch { key: String },
}
