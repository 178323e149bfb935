//! Status banner timing

pub struct NotificationConfig {
    /// Auto-close notifications after this long
    pub duration_ms: u64,
    pub auto_close: bool,
}

pub const NOTIFICATION: NotificationConfig = NotificationConfig {
    duration_ms: 5_000,
    auto_close: true,
};
