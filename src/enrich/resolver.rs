//! Per-entry configuration lookup

use crate::detect::config_snippet::{extract_config_snippet, ConfigSnippet, DocsLocator};
use crate::detect::server_list::ServerEntry;
use crate::enrich::source::DocumentSource;
use crate::fetch_span;
use futures::stream::{FuturesUnordered, Stream};
use serde::Serialize;
use tracing::{debug, warn, Instrument};

/// Outcome of looking up one entry's registration snippet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConfigLookup {
    /// Documentation fetched and a qualifying snippet found
    Found { snippet: ConfigSnippet },
    /// Documentation fetched but no candidate qualified
    NotFound,
    /// Entry link is not a repository URL, nothing was fetched
    NoDocsUrl,
    /// Fetch failed; treated by renderers the same as `NotFound`
    FetchFailed { reason: String },
}

impl ConfigLookup {
    pub fn snippet(&self) -> Option<&ConfigSnippet> {
        match self {
            ConfigLookup::Found { snippet } => Some(snippet),
            _ => None,
        }
    }
}

/// A server entry paired with its lookup outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedEntry {
    #[serde(flatten)]
    pub entry: ServerEntry,
    pub config: ConfigLookup,
}

/// Resolves registration snippets for server entries
pub struct ConfigResolver<S> {
    source: S,
    locator: DocsLocator,
    config_key: String,
}

impl<S: DocumentSource> ConfigResolver<S> {
    pub fn new(source: S, locator: DocsLocator, config_key: impl Into<String>) -> Self {
        Self {
            source,
            locator,
            config_key: config_key.into(),
        }
    }

    /// Look up one entry; never fails
    pub async fn resolve(&self, entry: &ServerEntry) -> ConfigLookup {
        let Some(url) = self.locator.readme_url(&entry.link) else {
            debug!(server = %entry.name, link = %entry.link, "Entry link has no documentation URL");
            return ConfigLookup::NoDocsUrl;
        };

        let span = fetch_span!(server = %entry.name, url = %url);
        async {
            match self.source.fetch_text(&url).await {
                Ok(doc) => match extract_config_snippet(&doc, &self.config_key) {
                    Some(snippet) => {
                        debug!("Found registration snippet");
                        ConfigLookup::Found { snippet }
                    }
                    None => {
                        debug!("No registration snippet in documentation");
                        ConfigLookup::NotFound
                    }
                },
                Err(e) => {
                    let reason = e.reason();
                    warn!(reason = %reason, "Documentation fetch failed");
                    ConfigLookup::FetchFailed { reason }
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Look up all entries concurrently, returning outcomes in entry order
    pub async fn resolve_all(&self, entries: &[ServerEntry]) -> Vec<EnrichedEntry> {
        let lookups = futures::future::join_all(entries.iter().map(|e| self.resolve(e))).await;

        entries
            .iter()
            .cloned()
            .zip(lookups)
            .map(|(entry, config)| EnrichedEntry { entry, config })
            .collect()
    }

    /// Yield `(index, outcome)` pairs in completion order
    ///
    /// Lets a renderer show each entry's snippet as soon as it is available
    /// instead of waiting for the slowest fetch.
    pub fn resolve_as_completed<'a>(
        &'a self,
        entries: &'a [ServerEntry],
    ) -> impl Stream<Item = (usize, ConfigLookup)> + 'a {
        entries
            .iter()
            .enumerate()
            .map(move |(index, entry)| async move { (index, self.resolve(entry).await) })
            .collect::<FuturesUnordered<_>>()
    }
}
