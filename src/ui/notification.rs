//! Transient status banner state.
//!
//! A visible notification owns its own auto-close deadline, so replacing or
//! dismissing it drops the deadline with it: a timer can never fire against a
//! notification other than the one that armed it.

use std::time::Duration;

use crate::config::NOTIFICATION;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::utils::app_time::AppInstant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    shown_at: AppInstant,
    auto_close: bool,
    duration: Duration,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>, shown_at: AppInstant) -> Self {
        Self {
            kind,
            message: message.into(),
            shown_at,
            auto_close: NOTIFICATION.auto_close,
            duration: Duration::from_millis(NOTIFICATION.duration_ms),
        }
    }

    pub fn with_auto_close(mut self, auto_close: bool) -> Self {
        self.auto_close = auto_close;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn expires_at(&self) -> Option<AppInstant> {
        self.auto_close.then(|| self.shown_at + self.duration)
    }

    /// Time left before auto-close, `None` for sticky notifications
    pub fn remaining(&self, now: AppInstant) -> Option<Duration> {
        self.expires_at()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    pub fn is_expired(&self, now: AppInstant) -> bool {
        self.expires_at().is_some_and(|deadline| now >= deadline)
    }
}

#[derive(Debug, Default)]
pub struct NotificationState {
    current: Option<Notification>,
}

impl NotificationState {
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    pub fn show(&mut self, kind: NotificationKind, message: impl Into<String>, now: AppInstant) {
        self.show_notification(Notification::new(kind, message, now));
    }

    /// Replaces whatever is showing, restarting the auto-close timer.
    pub fn show_notification(&mut self, notification: Notification) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_notification_events {
            log::info!(
                "[notification] show {:?}: {}",
                notification.kind,
                notification.message
            );
        }
        self.current = Some(notification);
    }

    /// Returns true if something was showing
    pub fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Applies the auto-close timer. Returns true if the notification expired.
    pub fn tick(&mut self, now: AppInstant) -> bool {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|notification| notification.is_expired(now));

        if expired {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_notification_events {
                log::info!("[notification] auto-closed");
            }
            self.current = None;
        }
        expired
    }

    /// How long until the next repaint is needed to honour the timer
    pub fn repaint_after(&self, now: AppInstant) -> Option<Duration> {
        self.current
            .as_ref()
            .and_then(|notification| notification.remaining(now))
    }
}
