//! Page download.
//!
//! [`PageSource`] is the seam between the pipeline and the network. The real
//! implementation is [`HttpFetcher`]; tests substitute a static page map.

use crate::error::FetchError;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, instrument};

/// Something that can turn a URL into page markup.
pub trait PageSource {
    /// Fetch one page. Exactly one attempt is made.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Plain HTTP GET with a fixed `User-Agent`.
///
/// Redirects follow reqwest's default policy; timeouts are the transport's own.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

impl PageSource for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(transport)?;
        debug!(
            %status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}
