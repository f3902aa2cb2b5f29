//! Remote document retrieval

use crate::config::HttpSection;
use crate::error::FetchError;
use async_trait::async_trait;
use tracing::debug;

/// Fetches the text of a remote document
///
/// Implementations must not retry or cache; each call is one fetch.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// `DocumentSource` backed by a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpDocumentSource {
    client: reqwest::Client,
}

impl Default for HttpDocumentSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpDocumentSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Build a client carrying the configured user agent and optional timeout
    pub fn from_config(http: &HttpSection) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(http.user_agent.clone());
        if let Some(timeout) = http.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl DocumentSource for HttpDocumentSource {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let parsed =
            url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;

        debug!(url = %parsed, "Fetching document");
        let response = self.client.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(status.as_u16(), url));
        }

        Ok(response.text().await?)
    }
}
