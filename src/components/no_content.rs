//! Empty-state placeholder and end-of-feed marker.

use leptos::prelude::*;

/// Placeholder shown when a list has no results, with optional actions.
#[component]
pub fn NoContent(#[prop(optional)] children: Option<Children>) -> impl IntoView {
    view! {
        <div class="no-content">
            <p class="no-content__title">"No results found"</p>
            <p class="no-content__hint">"Try adjusting your search or filters to find what you're looking for"</p>
            {children.map(|children| children())}
        </div>
    }
}

/// Marker rendered below a feed once every page has loaded.
#[component]
pub fn EndOfFeed() -> impl IntoView {
    view! {
        <div class="end-of-feed">
            <span class="end-of-feed__rule" aria-hidden="true"></span>
            <span class="end-of-feed__label">"You've reached the end of the feed"</span>
            <a class="end-of-feed__top" href="#top">"Back to top"</a>
        </div>
    }
}
