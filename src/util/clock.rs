//! Wall-clock access for timers and debouncing.

/// Milliseconds since the Unix epoch; `0.0` outside the browser.
pub fn now_ms() -> f64 {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::now()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0.0
    }
}

/// Wait until `deadline_ms` (as returned by [`now_ms`]) has passed.
#[cfg(feature = "hydrate")]
pub async fn sleep_until(deadline_ms: f64) {
    let remaining = (deadline_ms - now_ms()).max(0.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let remaining = remaining.ceil() as u64;
    gloo_timers::future::sleep(std::time::Duration::from_millis(remaining)).await;
}
