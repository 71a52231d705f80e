//! Infinitely scrolling article grid.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads the global `ArticleFilters` store, merges caller overrides, debounces
//! the result and drives `FeedState` against the shared `QueryCache`.
//!
//! DESIGN
//! ======
//! - The debouncer lives in an untracked signal; each input that schedules a
//!   deadline spawns a timer task that polls it, so a cancelled or superseded
//!   deadline simply yields nothing.
//! - HTTP responses are handed back to `FeedState::resolve`, which drops any
//!   that belong to an older request.

use leptos::prelude::*;

use crate::components::article_card::ArticleCard;
use crate::components::in_view_loader::InViewLoader;
use crate::components::no_content::{EndOfFeed, NoContent};
use crate::config::ClientConfig;
use crate::net::types::Article;
use crate::state::debounce::{DebounceAction, Debouncer};
use crate::state::feed::{FeedRequest, FeedState};
use crate::state::filters::{ArticleFilters, FilterSet, merge_filters};
use crate::state::query_cache::QueryCache;
use crate::util::clock::now_ms;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FeedPhase {
    Loading,
    Empty,
    Items,
}

/// Article feed for the merged filter set.
///
/// `filters` override the store values; with `disable_store_filters` the store
/// is ignored entirely.
#[component]
pub fn ArticlesInfinite(
    #[prop(into, default = Signal::derive(FilterSet::new))] filters: Signal<FilterSet>,
    #[prop(optional)] show_eof: bool,
    #[prop(optional)] show_empty_cta: bool,
    #[prop(optional)] disable_store_filters: bool,
) -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let store = expect_context::<RwSignal<ArticleFilters>>();
    let cache = expect_context::<RwSignal<QueryCache>>();

    let merged = Memo::new(move |_| store.with(|s| filters.with(|f| merge_filters(s, f, disable_store_filters))));

    let debouncer = RwSignal::new(Debouncer::new(merged.get_untracked(), config.debounce_ms));
    let debounced = RwSignal::new(merged.get_untracked());
    let feed = RwSignal::new(FeedState::default());

    Effect::new(move || {
        let next = merged.get();
        let now = now_ms();
        let action = debouncer.try_update_untracked(|d| d.input(next, now));
        if let Some(DebounceAction::Schedule { deadline_ms }) = action {
            arm_debounce(debouncer, debounced, deadline_ms);
        }
    });

    let fetch_config = config.clone();
    Effect::new(move || {
        let committed = debounced.get();
        let request = feed.try_update(|f| cache.try_update(|c| f.request(c, committed))).flatten();
        if let Some(request) = request {
            spawn_fetch(fetch_config.clone(), feed, cache, request);
        }
    });

    let snapshot = Memo::new(move |_| feed.with(|f| cache.with(|c| f.snapshot(c))));
    let phase = Memo::new(move |_| {
        snapshot.with(|s| {
            if s.is_loading {
                FeedPhase::Loading
            } else if s.items.is_empty() {
                FeedPhase::Empty
            } else {
                FeedPhase::Items
            }
        })
    });

    let load_more = Callback::new(move |()| {
        let request = feed.try_update(|f| cache.try_update(|c| f.request_next_page(c))).flatten().flatten();
        if let Some(request) = request {
            spawn_fetch(config.clone(), feed, cache, request);
        }
    });
    let can_load_more = Signal::derive(move || snapshot.with(|s| !s.is_fetching));

    move || match phase.get() {
        FeedPhase::Loading => view! {
            <div class="articles-infinite__center">
                <span class="loader loader--xl" aria-label="Loading"></span>
            </div>
        }
        .into_any(),
        FeedPhase::Empty => view! {
            <NoContent>
                {show_empty_cta
                    .then(|| view! { <a class="btn btn--primary btn--round" href="/articles/create">"Write an Article"</a> })}
            </NoContent>
        }
        .into_any(),
        FeedPhase::Items => view! {
            <div class="articles-infinite">
                <Show when=move || snapshot.with(|s| s.is_refetching)>
                    <div class="articles-infinite__overlay">
                        <span class="loader loader--xl" aria-label="Refreshing"></span>
                    </div>
                </Show>
                <div class="articles-infinite__grid">
                    <For
                        each=move || snapshot.with(|s| s.items.clone())
                        key=|article: &Article| article.id
                        children=|article| view! { <ArticleCard article=article /> }
                    />
                </div>
                <Show
                    when=move || snapshot.with(|s| s.has_next_page)
                    fallback=move || show_eof.then(|| view! { <EndOfFeed /> })
                >
                    <InViewLoader load_fn=load_more load_condition=can_load_more>
                        <div class="articles-infinite__center">
                            <span class="loader loader--lg" aria-label="Loading more"></span>
                        </div>
                    </InViewLoader>
                </Show>
            </div>
        }
        .into_any(),
    }
}

fn arm_debounce(debouncer: RwSignal<Debouncer<FilterSet>>, debounced: RwSignal<FilterSet>, deadline_ms: f64) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        crate::util::clock::sleep_until(deadline_ms).await;
        if let Some(value) = debouncer.try_update_untracked(|d| d.poll(now_ms())).flatten() {
            debounced.set(value);
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (debouncer, debounced, deadline_ms);
    }
}

fn spawn_fetch(config: ClientConfig, feed: RwSignal<FeedState>, cache: RwSignal<QueryCache>, request: FeedRequest) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = crate::net::api::fetch_articles(&config, &request.filters, request.cursor).await;
        feed.try_update(|f| cache.try_update(|c| f.resolve(c, &request, result)));
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, feed, cache, request);
    }
}
