//! Server-directory listing detection
//!
//! Recognizes the reply the assistant sends when asked which tool servers are
//! available: an introductory sentence ending in `repo:` followed by lines of
//! the form `- [name](link): description`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

static INTRO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Here are available MCP servers from the .*?repo:")
        .expect("server list intro pattern is valid")
});
static ENTRY_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^- \[([^\]]+)\]\(([^)]+)\): (.*?)\r?$")
        .expect("server entry pattern is valid")
});

/// One row of a discovered tool-server directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEntry {
    pub name: String,
    pub link: String,
    pub description: String,
}

impl ServerEntry {
    pub fn new(
        name: impl Into<String>,
        link: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
            description: description.into(),
        }
    }
}

/// Extract the server entries announced by a directory reply
///
/// Returns `None` both when the introductory phrase is missing and when it is
/// present but no entry line follows it; callers treat the two the same way.
pub fn detect_server_list(text: &str) -> Option<Vec<ServerEntry>> {
    let intro = INTRO.find(text)?;
    let remainder = &text[intro.end()..];

    let entries: Vec<ServerEntry> = ENTRY_LINE
        .captures_iter(remainder)
        .map(|caps| ServerEntry::new(&caps[1], &caps[2], &caps[3]))
        .collect();

    if entries.is_empty() {
        debug!("Server list introduction found without any entry lines");
        return None;
    }

    debug!(count = entries.len(), "Detected server directory listing");
    Some(entries)
}
