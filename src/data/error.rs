use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status
    #[error("API request failed with status: {status}")]
    Transport { status: u16 },

    /// HTTP 2xx, but the payload status field was not "ok"
    #[error("API returned error status: {status}{}", detail_suffix(.message))]
    Upstream {
        status: String,
        message: Option<String>,
    },

    /// Connection refused, DNS failure, timeout, client construction
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Body was not the expected JSON shape
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

fn detail_suffix(message: &Option<String>) -> String {
    match message.as_deref() {
        Some(text) if !text.is_empty() => format!(" ({text})"),
        _ => String::new(),
    }
}
