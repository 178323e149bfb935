#![allow(clippy::collapsible_if)]

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod ui;
pub mod utils;

use std::time::Duration;

// Re-export commonly used types
pub use config::ApiConfig;
pub use data::{FetchError, HttpOhlcClient, OhlcSource, transform_api_response};
pub use domain::{CandleData, ChartFormData, OhlcQueryParams, Resolution};
pub use ui::ChartApp;
pub use utils::app_time;

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the OHLC history API (defaults to the production host)
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = config::API.timeout_ms)]
    pub timeout_ms: u64,
}

impl Cli {
    pub fn api_config(&self) -> ApiConfig {
        let mut api = match &self.api_base_url {
            Some(base_url) => ApiConfig::with_base_url(base_url.clone()),
            None => ApiConfig::default(),
        };
        api.timeout = Duration::from_millis(self.timeout_ms);
        api
    }
}

pub type AppCreatorResult = Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>>;

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext, api: ApiConfig) -> AppCreatorResult {
    let client = HttpOhlcClient::new(api)?;
    let app = ui::ChartApp::new(cc, client);
    Ok(Box::new(app))
}
