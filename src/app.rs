//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::chat_drawer::ChatDrawer;
use crate::components::notification_host::NotificationHost;
use crate::config::ClientConfig;
use crate::pages::articles::ArticlesPage;
use crate::state::{
    auth::AuthState, chat::ChatState, filters::ArticleFilters, notifications::NotificationsState,
    query_cache::QueryCache, ui::UiState,
};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let auth = RwSignal::new(AuthState { user: None, loading: true });

    provide_context(config.clone());
    provide_context(auth);
    provide_context(RwSignal::new(ArticleFilters::default()));
    provide_context(RwSignal::new(QueryCache::default()));
    provide_context(RwSignal::new(ChatState::default()));
    provide_context(RwSignal::new(NotificationsState::default()));
    provide_context(RwSignal::new(UiState::default()));

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let user = crate::net::api::fetch_current_user(&config).await;
        auth.update(|a| {
            a.user = user;
            a.loading = false;
        });
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = config;

    view! {
        <Stylesheet id="leptos" href="/pkg/feedshare.css"/>
        <Title text="Articles"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=ArticlesPage/>
            </Routes>
        </Router>
        <ChatDrawer/>
        <NotificationHost/>
    }
}
