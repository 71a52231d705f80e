//! Articles page: filter controls above the infinite article feed.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the landing route. Controls write the shared `ArticleFilters`
//! store on every change; the feed debounces them before fetching. The share
//! dialog opened from a card is mounted here while `UiState::share_message`
//! is set.

#[cfg(test)]
#[path = "articles_test.rs"]
mod articles_test;

use leptos::prelude::*;

use crate::components::articles_infinite::ArticlesInfinite;
use crate::components::chat_share_modal::ChatShareModal;
use crate::state::filters::{ArticleFilters, ArticleSort, MetricPeriod};
use crate::state::ui::UiState;

pub(crate) fn sort_from_label(label: &str) -> Option<ArticleSort> {
    ArticleSort::ALL.into_iter().find(|s| s.label() == label)
}

pub(crate) fn period_from_label(label: &str) -> Option<MetricPeriod> {
    MetricPeriod::ALL.into_iter().find(|p| p.label() == label)
}

/// Store representation of the search box: blank input clears the query.
pub(crate) fn query_from_input(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Articles page with sort, period and search controls.
#[component]
pub fn ArticlesPage() -> impl IntoView {
    let filters = expect_context::<RwSignal<ArticleFilters>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let on_sort = move |ev| {
        if let Some(sort) = sort_from_label(&event_target_value(&ev)) {
            filters.update(|f| f.sort = sort);
        }
    };
    let on_period = move |ev| {
        if let Some(period) = period_from_label(&event_target_value(&ev)) {
            filters.update(|f| f.period = period);
        }
    };
    let on_query = move |ev| {
        let query = query_from_input(&event_target_value(&ev));
        filters.update(|f| f.query = query);
    };

    let share_message = move || ui.with(|u| u.share_message.clone());
    let on_share_close = Callback::new(move |()| ui.update(UiState::close_share));

    view! {
        <div class="articles-page" id="top">
            <div class="articles-page__controls">
                <input
                    class="articles-page__search"
                    type="search"
                    placeholder="Search articles"
                    prop:value=move || filters.with(|f| f.query.clone().unwrap_or_default())
                    on:input=on_query
                />
                <select class="articles-page__sort" on:change=on_sort>
                    {ArticleSort::ALL
                        .into_iter()
                        .map(|sort| {
                            view! {
                                <option value=sort.label() selected=move || filters.with(|f| f.sort == sort)>
                                    {sort.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                <select class="articles-page__period" on:change=on_period>
                    {MetricPeriod::ALL
                        .into_iter()
                        .map(|period| {
                            view! {
                                <option value=period.label() selected=move || filters.with(|f| f.period == period)>
                                    {period.label()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <ArticlesInfinite show_eof=true show_empty_cta=true />

            {move || {
                share_message().map(|message| view! { <ChatShareModal message=message on_close=on_share_close /> })
            }}
        </div>
    }
}
