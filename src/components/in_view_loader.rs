//! Viewport sentinel that requests more content when scrolled into view.
//!
//! DESIGN
//! ======
//! Visibility comes from an `IntersectionObserver` (hydrate only). Loading is
//! gated by a caller-supplied readiness signal so a page request is never
//! issued while one is already in flight; when the request finishes and the
//! sentinel is still visible, the effect fires again and loads the next page.

#[cfg(test)]
#[path = "in_view_loader_test.rs"]
mod in_view_loader_test;

use leptos::prelude::*;

/// Whether the sentinel should trigger a load.
pub(crate) fn should_load(in_view: bool, ready: bool) -> bool {
    in_view && ready
}

/// Wraps `children` and calls `load_fn` whenever it is visible and
/// `load_condition` holds.
#[component]
pub fn InViewLoader(
    load_fn: Callback<()>,
    #[prop(into)] load_condition: Signal<bool>,
    children: Children,
) -> impl IntoView {
    let sentinel = NodeRef::<leptos::html::Div>::new();
    let in_view = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    observe_visibility(sentinel, in_view);

    Effect::new(move || {
        if should_load(in_view.get(), load_condition.get()) {
            load_fn.run(());
        }
    });

    view! {
        <div class="in-view-loader" node_ref=sentinel>
            {children()}
        </div>
    }
}

#[cfg(feature = "hydrate")]
fn observe_visibility(target: NodeRef<leptos::html::Div>, in_view: RwSignal<bool>) {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use wasm_bindgen::JsCast as _;
    use wasm_bindgen::closure::Closure;

    let alive = Arc::new(AtomicBool::new(true));
    let alive_cb = alive.clone();
    on_cleanup(move || alive.store(false, Ordering::Relaxed));

    Effect::new(move |started: Option<bool>| {
        if started == Some(true) {
            return true;
        }
        let Some(el) = target.get() else {
            return false;
        };

        let alive_cb = alive_cb.clone();
        let callback = Closure::<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
                if !alive_cb.load(Ordering::Relaxed) {
                    observer.disconnect();
                    return;
                }
                let visible = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<web_sys::IntersectionObserverEntry>().ok())
                    .any(|entry| entry.is_intersecting());
                in_view.set(visible);
            },
        );

        let options = web_sys::IntersectionObserverInit::new();
        options.set_root_margin("200px");
        match web_sys::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => {
                observer.observe(&el);
                callback.forget();
            }
            Err(e) => {
                leptos::logging::warn!("IntersectionObserver unavailable: {e:?}");
            }
        }
        true
    });
}
