//! Embedded configuration snippet extraction
//!
//! Tool-server READMEs usually show how to register the server with a JSON
//! snippet such as `{"mcpServers": {...}}`. This module locates that snippet in
//! fetched documentation text and derives the documentation URL from a
//! repository link.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::trace;
use url::Url;

/// Default top-level key identifying a server registration snippet
pub const DEFAULT_CONFIG_KEY: &str = "mcpServers";

static JSON_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```json[ \t]*\r?\n(.*?)```").expect("json fence pattern is valid")
});

/// A pretty-printed JSON object carrying the recognized top-level key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigSnippet {
    /// Key that qualified this object
    pub key: String,
    /// Object re-serialized with two-space indentation
    pub pretty: String,
    #[serde(skip)]
    value: Map<String, Value>,
}

impl ConfigSnippet {
    fn new(key: &str, value: Map<String, Value>) -> Option<Self> {
        let pretty = serde_json::to_string_pretty(&value).ok()?;
        Some(Self {
            key: key.to_string(),
            pretty,
            value,
        })
    }

    /// Parsed object
    pub fn value(&self) -> &Map<String, Value> {
        &self.value
    }

    /// Value stored under the recognized key
    pub fn entry(&self) -> Option<&Value> {
        self.value.get(&self.key)
    }
}

/// Find the first JSON object in `doc` that has `key` at its top level
///
/// Fenced ```` ```json ```` blocks are tried first, in order. If none
/// qualifies, every balanced `{...}` region that mentions `"key"` is tried
/// in order of its opening brace. Candidates that fail to parse are skipped.
pub fn extract_config_snippet(doc: &str, key: &str) -> Option<ConfigSnippet> {
    from_json_fences(doc, key).or_else(|| from_brace_regions(doc, key))
}

fn from_json_fences(doc: &str, key: &str) -> Option<ConfigSnippet> {
    JSON_FENCE
        .captures_iter(doc)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .find_map(|body| qualify(body, key))
}

fn from_brace_regions(doc: &str, key: &str) -> Option<ConfigSnippet> {
    let quoted = format!("\"{key}\"");

    doc.char_indices()
        .filter(|(_, ch)| *ch == '{')
        .filter_map(|(start, _)| balanced_region(doc, start))
        .filter(|region| region.contains(&quoted))
        .find_map(|region| qualify(region, key))
}

/// Slice from the brace at `start` to its matching closing brace
///
/// Braces inside JSON string literals are not counted.
fn balanced_region(doc: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in doc[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&doc[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

fn qualify(candidate: &str, key: &str) -> Option<ConfigSnippet> {
    match serde_json::from_str::<Value>(candidate.trim()) {
        Ok(Value::Object(map)) if map.contains_key(key) => ConfigSnippet::new(key, map),
        Ok(_) => None,
        Err(e) => {
            trace!(error = %e, "Skipping config candidate that is not valid JSON");
            None
        }
    }
}

/// Derives raw documentation URLs from repository links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsLocator {
    /// Base of the raw-content host, without trailing slash
    pub raw_host: String,
    /// Branch the documentation is read from
    pub branch: String,
    /// Documentation file at the repository root
    pub file: String,
}

impl Default for DocsLocator {
    fn default() -> Self {
        Self {
            raw_host: "https://raw.githubusercontent.com".to_string(),
            branch: "main".to_string(),
            file: "README.md".to_string(),
        }
    }
}

impl DocsLocator {
    /// Documentation URL for a `github.com/<owner>/<repo>` link
    ///
    /// Links with a different host or fewer than two path segments yield
    /// `None`. A trailing `.git` on the repository name is dropped.
    pub fn readme_url(&self, repo_url: &str) -> Option<String> {
        let parsed = Url::parse(repo_url.trim()).ok()?;
        let host = parsed.host_str()?;
        if host != "github.com" && host != "www.github.com" {
            return None;
        }

        let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());
        let owner = segments.next()?;
        let repo = segments.next()?;
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        if repo.is_empty() {
            return None;
        }

        Some(format!(
            "{}/{}/{}/{}/{}",
            self.raw_host.trim_end_matches('/'),
            owner,
            repo,
            self.branch,
            self.file
        ))
    }
}
