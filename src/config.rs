//! Client configuration with build-time overrides.
//!
//! DESIGN
//! ======
//! The browser has no process environment, so overrides are read from
//! `FEEDSHARE_*` variables at compile time. The SSR binary and the WASM
//! bundle are built from the same environment and agree on every value.
//! Bad values fall back to the default instead of failing startup.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE: &str = "/api/trpc";
pub const DEFAULT_DEBOUNCE_MS: u32 = 500;
pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const DEFAULT_NOTIFICATION_AUTO_CLOSE_MS: u32 = 4000;

/// Runtime settings for RPC access, feed debouncing and notifications.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base path of the RPC endpoints, without a trailing slash.
    pub api_base: String,
    /// Quiet period before a filter change reaches the feed query.
    pub debounce_ms: u32,
    /// Page size requested from paginated endpoints.
    pub page_limit: u32,
    /// Lifetime of auto-closing notifications.
    pub notification_auto_close_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            page_limit: DEFAULT_PAGE_LIMIT,
            notification_auto_close_ms: DEFAULT_NOTIFICATION_AUTO_CLOSE_MS,
        }
    }
}

impl ClientConfig {
    /// Build config from `FEEDSHARE_*` variables captured at compile time.
    ///
    /// Optional:
    /// - `FEEDSHARE_API_BASE`: default `/api/trpc`
    /// - `FEEDSHARE_DEBOUNCE_MS`: default 500
    /// - `FEEDSHARE_PAGE_LIMIT`: default 20
    /// - `FEEDSHARE_NOTIFICATION_AUTO_CLOSE_MS`: default 4000
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::from_lookup(build_env)
    }

    /// Build config from an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base = lookup("FEEDSHARE_API_BASE")
            .map(|v| v.trim().trim_end_matches('/').to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_owned());

        let config = Self {
            api_base,
            debounce_ms: parse_or(&lookup, "FEEDSHARE_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS),
            page_limit: parse_or(&lookup, "FEEDSHARE_PAGE_LIMIT", DEFAULT_PAGE_LIMIT).max(1),
            notification_auto_close_ms: parse_or(
                &lookup,
                "FEEDSHARE_NOTIFICATION_AUTO_CLOSE_MS",
                DEFAULT_NOTIFICATION_AUTO_CLOSE_MS,
            ),
        };
        log::debug!("client config: {config:?}");
        config
    }
}

fn build_env(key: &str) -> Option<String> {
    let value = match key {
        "FEEDSHARE_API_BASE" => option_env!("FEEDSHARE_API_BASE"),
        "FEEDSHARE_DEBOUNCE_MS" => option_env!("FEEDSHARE_DEBOUNCE_MS"),
        "FEEDSHARE_PAGE_LIMIT" => option_env!("FEEDSHARE_PAGE_LIMIT"),
        "FEEDSHARE_NOTIFICATION_AUTO_CLOSE_MS" => option_env!("FEEDSHARE_NOTIFICATION_AUTO_CLOSE_MS"),
        _ => None,
    };
    value.map(str::to_owned)
}

fn parse_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u32) -> u32 {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse::<u32>().unwrap_or_else(|_| {
            log::warn!("ignoring invalid {key}={raw:?}, using {default}");
            default
        }),
    }
}
