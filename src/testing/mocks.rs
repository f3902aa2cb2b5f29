//! Mock implementations for testing
//!
//! Provides a canned `DocumentSource` so enrichment and directory scraping can
//! be exercised without network access.

use crate::enrich::DocumentSource;
use crate::error::FetchError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
enum CannedResponse {
    Body(String),
    Status(u16),
}

/// Mock document source serving fixed bodies or status failures per URL
///
/// Unknown URLs answer with status 404. Every call is counted, including
/// repeated calls for the same URL.
#[derive(Debug, Default)]
pub struct MockDocumentSource {
    responses: HashMap<String, CannedResponse>,
    calls: Arc<AtomicUsize>,
}

impl MockDocumentSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, url: &str, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), CannedResponse::Body(body.to_string()));
        self
    }

    pub fn with_failure(mut self, url: &str, status: u16) -> Self {
        self.responses
            .insert(url.to_string(), CannedResponse::Status(status));
        self
    }

    /// Shared handle on the number of fetches made so far
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl DocumentSource for MockDocumentSource {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.responses.get(url) {
            Some(CannedResponse::Body(body)) => Ok(body.clone()),
            Some(CannedResponse::Status(status)) => Err(FetchError::status(*status, url)),
            None => Err(FetchError::status(404, url)),
        }
    }
}
