//! Monotonic clock for UI timers (banner auto-close, fetch timing).
//! `std::time::Instant::now` panics on wasm32-unknown-unknown; `web_time`
//! re-exports the std type on native and wraps `performance.now()` in the browser.

pub type AppInstant = web_time::Instant;

pub fn now() -> AppInstant {
    AppInstant::now()
}
