//! Debugging feature flags.
//!
//! Toggle individual diagnostics here. Every flag is additionally gated by
//! `cfg(debug_assertions)`, so release builds stay quiet regardless.

pub struct DebugFlags {
    /// Emit the outgoing history URL and response timings.
    pub print_fetch_requests: bool,
    /// Emit chart instance create/resize/dispose events.
    pub print_chart_lifecycle: bool,
    /// Emit UI interaction logs (form submits, dismissals, rejected edits).
    pub print_ui_interactions: bool,
    /// Emit notification show/expire transitions.
    pub print_notification_events: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_fetch_requests: true,
    print_chart_lifecycle: false,
    print_ui_interactions: true,
    print_notification_events: false,
    print_shutdown: false,
};
