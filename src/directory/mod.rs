//! Tool-server directory
//!
//! Produces the directory reply the server-list detector recognizes: the
//! community awesome-mcp-servers README is scraped for `- [Name](link) - description`
//! lines and re-rendered as `- [Name](link): description` under a fixed
//! introduction.

use crate::detect::server_list::ServerEntry;
use crate::enrich::DocumentSource;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{error, info};

static LISTING_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^- \[([^\]]+)\]\(([^)]+)\)[ \t]*-[ \t]*(.*?)\r?$")
        .expect("directory listing pattern is valid")
});

const REQUEST_PHRASES: [&str; 3] = ["list mcp", "available mcp", "huggingface mcp"];

/// Reply used when the directory has no entries
pub const EMPTY_DIRECTORY_REPLY: &str = "No MCP servers found in the awesome-mcp-servers repo.";

/// True when a user message asks for the server directory
pub fn is_directory_request(message: &str) -> bool {
    let lowered = message.to_lowercase();
    REQUEST_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}

/// Extract `- [Name](link) - description` entries in source order
pub fn parse_directory_listing(markdown: &str) -> Vec<ServerEntry> {
    LISTING_LINE
        .captures_iter(markdown)
        .map(|caps| ServerEntry::new(caps[1].trim(), caps[2].trim(), caps[3].trim()))
        .collect()
}

/// Render entries as the agent's directory reply
pub fn format_directory_reply(entries: &[ServerEntry], repo_url: &str) -> String {
    if entries.is_empty() {
        return EMPTY_DIRECTORY_REPLY.to_string();
    }

    let lines: Vec<String> = entries
        .iter()
        .map(|e| format!("- [{}]({}): {}", e.name, e.link, e.description))
        .collect();

    format!(
        "Here are available MCP servers from the [awesome-mcp-servers]({repo_url}) repo:\n\n{}",
        lines.join("\n")
    )
}

/// Fetches and parses the directory listing
pub struct DirectoryScraper<S> {
    source: S,
    source_url: String,
}

impl<S: DocumentSource> DirectoryScraper<S> {
    pub fn new(source: S, source_url: impl Into<String>) -> Self {
        Self {
            source,
            source_url: source_url.into(),
        }
    }

    /// Fetch the listing; any failure yields an empty list
    pub async fn fetch_entries(&self) -> Vec<ServerEntry> {
        info!(url = %self.source_url, "Fetching server directory");

        match self.source.fetch_text(&self.source_url).await {
            Ok(markdown) => {
                let entries = parse_directory_listing(&markdown);
                info!(count = entries.len(), "Parsed server directory");
                entries
            }
            Err(e) => {
                error!(reason = %e.reason(), "Failed to fetch server directory");
                Vec::new()
            }
        }
    }
}
