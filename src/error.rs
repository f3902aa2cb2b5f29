//! Error types for chatblocks
//!
//! Classification and detection never fail: unmatched input degrades to a
//! paragraph or to an absent payload. Errors only exist at the I/O edges
//! (configuration, CLI input, documentation fetches), and fetch errors are
//! folded into a per-entry lookup outcome rather than propagated.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

const MAX_REASON_LEN: usize = 500;

static SECRET_PAIR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(password|token|key|secret)[=:]\s*[^\s&]+").expect("secret pattern is valid")
});

/// Failure fetching a remote documentation resource
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Create unexpected status error
    pub fn status<S: Into<String>>(status: u16, url: S) -> Self {
        Self::Status {
            status,
            url: url.into(),
        }
    }

    /// Short reason suitable for recording next to a lookup result
    pub fn reason(&self) -> String {
        sanitize_error_message(&self.to_string())
    }
}

/// Top-level error for the CLI and library I/O entry points
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration render error: {0}")]
    ConfigRender(#[from] toml::ser::Error),
}

/// Mask secret-looking values and cap the length of a failure message
///
/// Fetch URLs can carry access tokens in their query string, and reasons end
/// up in rendered output and logs.
pub fn sanitize_error_message(message: &str) -> String {
    let mut sanitized = SECRET_PAIR.replace_all(message, "${1}=***").to_string();

    if sanitized.len() > MAX_REASON_LEN {
        let suffix = "...[truncated]";
        let mut cut = MAX_REASON_LEN - suffix.len();
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str(suffix);
    }

    sanitized
}

/// Result type for chatblocks I/O operations
pub type ReplyResult<T> = Result<T, ReplyError>;
