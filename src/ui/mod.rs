// User interface components
pub mod app;
pub mod app_async;
pub mod chart_form;
pub mod chart_view;
pub mod config;
pub mod notification;
pub mod page_state;
pub mod plot_layers;
pub mod styles;
pub mod ui_panels;
pub mod ui_render;
pub mod ui_text;
pub mod utils;

// Re-export main app
pub use app::ChartApp;
pub use config::UI_CONFIG;
