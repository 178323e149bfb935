//! Configuration module for the OHLC chart application.

pub mod api;
pub mod form;
pub mod notification;
pub mod plot;

mod debug; // Private: use crate::config::DEBUG_FLAGS rather than crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

// Re-export commonly used items
pub use api::{API, ApiConfig};
pub use form::FORM_DEFAULTS;
pub use notification::NOTIFICATION;
pub use plot::PLOT_CONFIG;
