//! Article feed query driver: stale-while-revalidate with infinite paging.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ArticlesInfinite` commits debounced filter sets here. This module decides
//! which requests go out, which cached pages are shown meanwhile, and which
//! responses are still relevant; the component only performs the HTTP calls
//! and feeds results back.
//!
//! DESIGN
//! ======
//! - `active_key` is the query for the latest committed filters.
//! - `shown_key` is the query whose pages are on screen. It follows
//!   `active_key` as soon as that key has data (cached or fetched), so the
//!   previous result set stays visible while a new filter set loads. Paging
//!   state (`has_next_page`, next-page requests) follows the shown pages
//!   until the active key has data of its own.
//! - At most one first-page request and one next-page request are tracked for
//!   the active key; anything else resolving later is ignored.

#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

use crate::error::ApiError;
use crate::net::types::{Article, Page};
use crate::state::filters::{FilterSet, canonical_key};
use crate::state::query_cache::{FetchTicket, QueryCache, QueryKey};

/// A request the component should send to `article.getInfinite`.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedRequest {
    pub ticket: FetchTicket,
    pub filters: FilterSet,
    /// `None` for the first page.
    pub cursor: Option<i64>,
}

/// Render-ready view of the feed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedSnapshot {
    pub items: Vec<Article>,
    /// Nothing to show yet and a request is in flight.
    pub is_loading: bool,
    /// Data is shown while the first page for the active filters reloads.
    pub is_refetching: bool,
    pub is_fetching_next_page: bool,
    /// Any request for the active filters is in flight.
    pub is_fetching: bool,
    pub has_next_page: bool,
}

/// Feed orchestration state for one `ArticlesInfinite` instance.
#[derive(Clone, Debug, Default)]
pub struct FeedState {
    active_key: Option<QueryKey>,
    active_filters: FilterSet,
    shown_key: Option<QueryKey>,
    shown_filters: FilterSet,
    first_page: Option<FetchTicket>,
    next_page: Option<FetchTicket>,
}

impl FeedState {
    /// Start (re)loading the feed for newly committed filters.
    ///
    /// Cached pages for these filters are shown immediately and revalidated.
    pub fn request(&mut self, cache: &mut QueryCache, filters: FilterSet) -> FeedRequest {
        let key = QueryKey::Articles(canonical_key(&filters));
        if cache.contains(&key) {
            self.shown_key = Some(key.clone());
            self.shown_filters = filters.clone();
        }
        let ticket = cache.begin_fetch(key.clone());
        log::debug!("feed request {} (epoch {})", key, ticket.epoch);

        self.active_key = Some(key);
        self.active_filters = filters.clone();
        self.first_page = Some(ticket.clone());
        self.next_page = None;

        FeedRequest { ticket, filters, cursor: None }
    }

    /// Request the following page, if there is one and nothing is in flight.
    pub fn request_next_page(&mut self, cache: &mut QueryCache) -> Option<FeedRequest> {
        if self.first_page.is_some() || self.next_page.is_some() {
            return None;
        }
        let (key, filters) = match &self.active_key {
            Some(active) if cache.contains(active) => (active.clone(), self.active_filters.clone()),
            _ => (self.shown_key.clone()?, self.shown_filters.clone()),
        };
        let cursor = cache.articles(&key)?.next_cursor()?;
        let ticket = cache.begin_fetch(key);
        self.next_page = Some(ticket.clone());
        Some(FeedRequest { ticket, filters, cursor: Some(cursor) })
    }

    /// Feed back the outcome of a request.
    ///
    /// Returns `true` if the response changed what the feed shows.
    pub fn resolve(
        &mut self,
        cache: &mut QueryCache,
        request: &FeedRequest,
        result: Result<Page<Article>, ApiError>,
    ) -> bool {
        let is_first = self.first_page.as_ref() == Some(&request.ticket);
        let is_next = self.next_page.as_ref() == Some(&request.ticket);
        if is_first {
            self.first_page = None;
        }
        if is_next {
            self.next_page = None;
        }

        let page = match result {
            Ok(page) => page,
            Err(err) => {
                log::warn!("article feed request failed for {}: {err}", request.ticket.key);
                return is_first || is_next;
            }
        };

        let written = if request.cursor.is_some() {
            cache.resolve_next_page(&request.ticket, page)
        } else {
            cache.resolve_first_page(&request.ticket, page)
        };
        if !written {
            return is_first || is_next;
        }

        if self.active_key.as_ref() == Some(&request.ticket.key) {
            self.shown_key = Some(request.ticket.key.clone());
            self.shown_filters = self.active_filters.clone();
            return true;
        }
        self.shown_key.as_ref() == Some(&request.ticket.key)
    }

    /// Current render state.
    #[must_use]
    pub fn snapshot(&self, cache: &QueryCache) -> FeedSnapshot {
        let shown = self.shown_key.as_ref().and_then(|key| cache.articles(key));
        let has_data = shown.is_some();
        let fetching_first = self.first_page.is_some();
        let fetching_next = self.next_page.is_some();

        FeedSnapshot {
            items: shown.map(|data| data.items()).unwrap_or_default(),
            is_loading: fetching_first && !has_data,
            is_refetching: fetching_first && has_data,
            is_fetching_next_page: fetching_next,
            is_fetching: fetching_first || fetching_next,
            has_next_page: shown.is_some_and(|data| data.has_next_page()),
        }
    }
}
