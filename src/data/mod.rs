// Remote history fetching and response decoding
pub mod api_response;
pub mod client;
pub mod error;

// Re-export commonly used types
pub use api_response::{OhlcApiResponse, transform_api_response};
pub use client::{HttpOhlcClient, OhlcSource};
pub use error::FetchError;
