//! RPC helpers for the article and chat procedures.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning [`ApiError::Unavailable`] since these
//! calls are only meaningful in the browser session.
//!
//! Wire envelope: success is `{"result":{"data":T}}`, failure is
//! `{"error":{"message":"..."}}`.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`; the RPC error message is kept
//! verbatim so it can be shown to the user.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(any(test, feature = "hydrate"))]
use serde::Deserialize;
#[cfg(any(test, feature = "hydrate"))]
use serde::de::DeserializeOwned;

use super::types::{Article, ChatId, ChatListItem, ChatMessage, CreateMessageInput, Page, User};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::state::filters::FilterSet;

#[cfg(any(test, feature = "hydrate"))]
fn rpc_url(api_base: &str, procedure: &str) -> String {
    format!("{}/{procedure}", api_base.trim_end_matches('/'))
}

/// Input object for `article.getInfinite`.
#[cfg(any(test, feature = "hydrate"))]
fn article_query_input(filters: &FilterSet, cursor: Option<i64>, limit: u32) -> serde_json::Value {
    let mut input = filters
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect::<serde_json::Map<_, _>>();
    input.insert("limit".to_owned(), limit.into());
    if let Some(cursor) = cursor {
        input.insert("cursor".to_owned(), cursor.into());
    }
    serde_json::Value::Object(input)
}

/// Input object for `chat.getInfiniteMessages`.
#[cfg(any(test, feature = "hydrate"))]
fn chat_messages_input(chat_id: ChatId, cursor: Option<i64>, limit: u32) -> serde_json::Value {
    let mut input = serde_json::json!({ "chatId": chat_id, "limit": limit });
    if let (Some(cursor), Some(map)) = (cursor, input.as_object_mut()) {
        map.insert("cursor".to_owned(), cursor.into());
    }
    input
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct RpcErrorEnvelope {
    error: RpcErrorBody,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    message: String,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct RpcResultEnvelope<T> {
    result: RpcResultBody<T>,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct RpcResultBody<T> {
    data: T,
}

/// Decode an RPC response body given its HTTP status.
#[cfg(any(test, feature = "hydrate"))]
fn parse_rpc_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    if let Ok(envelope) = serde_json::from_str::<RpcErrorEnvelope>(body) {
        return Err(ApiError::Rpc { message: envelope.error.message });
    }
    if !(200..300).contains(&status) {
        let message = body.trim();
        let message = if message.is_empty() { "request failed" } else { message };
        return Err(ApiError::Status { status, message: message.to_owned() });
    }
    serde_json::from_str::<RpcResultEnvelope<T>>(body)
        .map(|envelope| envelope.result.data)
        .map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(feature = "hydrate")]
async fn read_response<T: DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    let status = resp.status();
    let body = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
    parse_rpc_body(status, &body)
}

#[cfg(feature = "hydrate")]
async fn rpc_query<T: DeserializeOwned>(
    config: &ClientConfig,
    procedure: &str,
    input: Option<serde_json::Value>,
) -> Result<T, ApiError> {
    let url = rpc_url(&config.api_base, procedure);
    let mut request = gloo_net::http::Request::get(&url);
    if let Some(input) = input {
        request = request.query([("input", input.to_string())]);
    }
    let resp = request
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    read_response(resp).await
}

#[cfg(feature = "hydrate")]
async fn rpc_mutation<T: DeserializeOwned>(
    config: &ClientConfig,
    procedure: &str,
    input: &impl serde::Serialize,
) -> Result<T, ApiError> {
    let url = rpc_url(&config.api_base, procedure);
    let resp = gloo_net::http::Request::post(&url)
        .json(input)
        .map_err(|e| ApiError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    read_response(resp).await
}

/// Fetch one page of articles via `article.getInfinite`.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport, status, RPC or decode failure.
pub async fn fetch_articles(
    config: &ClientConfig,
    filters: &FilterSet,
    cursor: Option<i64>,
) -> Result<Page<Article>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let input = article_query_input(filters, cursor, config.page_limit);
        rpc_query(config, "article.getInfinite", Some(input)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, filters, cursor);
        Err(ApiError::Unavailable)
    }
}

/// Fetch every chat of the current user via `chat.getAllByUser`.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport, status, RPC or decode failure.
pub async fn fetch_chat_list(config: &ClientConfig) -> Result<Vec<ChatListItem>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        rpc_query(config, "chat.getAllByUser", None).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = config;
        Err(ApiError::Unavailable)
    }
}

/// Fetch one page of a chat's messages via `chat.getInfiniteMessages`.
///
/// # Errors
///
/// Returns an [`ApiError`] on transport, status, RPC or decode failure.
pub async fn fetch_chat_messages(
    config: &ClientConfig,
    chat_id: ChatId,
    cursor: Option<i64>,
) -> Result<Page<ChatMessage>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let input = chat_messages_input(chat_id, cursor, config.page_limit);
        rpc_query(config, "chat.getInfiniteMessages", Some(input)).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, chat_id, cursor);
        Err(ApiError::Unavailable)
    }
}

/// Send a chat message via `chat.createMessage`.
///
/// # Errors
///
/// Returns an [`ApiError`]; `ApiError::Rpc` carries the server's reason.
pub async fn create_message(config: &ClientConfig, input: &CreateMessageInput) -> Result<ChatMessage, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        rpc_mutation(config, "chat.createMessage", input).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, input);
        Err(ApiError::Unavailable)
    }
}

/// Fetch the signed-in user via `user.getCurrent`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_user(config: &ClientConfig) -> Option<User> {
    #[cfg(feature = "hydrate")]
    {
        rpc_query::<Option<User>>(config, "user.getCurrent", None)
            .await
            .ok()
            .flatten()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = config;
        None
    }
}
