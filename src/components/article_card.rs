//! Card for one article in the feed grid.
//!
//! DESIGN
//! ======
//! The card body links to the article. The share action sits beside the
//! link, not inside it, and opens the chat share dialog with the article
//! link as the message.

#[cfg(test)]
#[path = "article_card_test.rs"]
mod article_card_test;

use leptos::prelude::*;

use crate::net::types::Article;
use crate::state::ui::UiState;

pub(crate) fn article_href(id: i64) -> String {
    format!("/articles/{id}")
}

/// Absolute link to an article, or the bare path when no origin is known.
pub(crate) fn share_link(origin: Option<&str>, id: i64) -> String {
    let path = article_href(id);
    match origin {
        Some(origin) if !origin.is_empty() => format!("{}{path}", origin.trim_end_matches('/')),
        _ => path,
    }
}

/// Compact counter label: `999`, `1.2K`, `3.4M`.
pub(crate) fn compact_count(n: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let value = n as f64;
    if n >= 1_000_000 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        n.to_string()
    }
}

fn page_origin() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window().and_then(|w| w.location().origin().ok())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// A feed card for `article`.
#[component]
pub fn ArticleCard(article: Article) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let href = article_href(article.id);
    let id = article.id;
    let on_share = move |_| {
        let link = share_link(page_origin().as_deref(), id);
        ui.update(|u| u.open_share(link));
    };

    let author = article.username.clone().unwrap_or_default();
    let stats = article.stats;

    view! {
        <div class="article-card">
            <a class="article-card__link" href=href>
                {article.cover.clone().map(|src| view! { <img class="article-card__cover" src=src alt="" loading="lazy" /> })}
                <span class="article-card__title">{article.title.clone()}</span>
                <span class="article-card__author">{author}</span>
                <span class="article-card__tags">
                    {article
                        .tags
                        .iter()
                        .map(|tag| view! { <span class="article-card__tag">{tag.clone()}</span> })
                        .collect_view()}
                </span>
                <span class="article-card__stats">
                    <span title="Likes">{compact_count(stats.like_count)}</span>
                    <span title="Comments">{compact_count(stats.comment_count)}</span>
                    <span title="Views">{compact_count(stats.view_count)}</span>
                </span>
            </a>
            <button type="button" class="article-card__share" on:click=on_share title="Share" aria-label="Share">
                "Share"
            </button>
        </div>
    }
}
