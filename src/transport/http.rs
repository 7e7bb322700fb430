use crate::transport::error::FetchError;
use log::{debug, info, warn};
use reqwest::Client;
use std::future::Future;
use std::time::Duration;

/// Default per-request timeout for every document fetch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Retrieves the raw bytes behind a URL.
///
/// [`HttpFetcher`] is the implementation used by default. Implement this trait to serve
/// documents from somewhere else, such as a local mirror.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

/// How a document's bytes must be decoded before they can be parsed as XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentEncoding {
    /// Used by the site catalog.
    Utf8,
    /// ISO-8859-1, used by the observation and forecast documents.
    Latin1,
}

impl DocumentEncoding {
    pub fn decode(self, url: &str, bytes: Vec<u8>) -> Result<String, FetchError> {
        let text = match self {
            DocumentEncoding::Utf8 => {
                String::from_utf8(bytes).map_err(|e| FetchError::InvalidUtf8 {
                    url: url.to_string(),
                    source: e,
                })?
            }
            // Every ISO-8859-1 byte is the code point of the same value.
            DocumentEncoding::Latin1 => bytes.into_iter().map(char::from).collect(),
        };
        Ok(match text.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => text,
        })
    }
}

/// Fetches `url` and decodes the body with `encoding`.
pub async fn fetch_document<F: Fetch>(
    fetcher: &F,
    url: &str,
    encoding: DocumentEncoding,
) -> Result<String, FetchError> {
    let bytes = fetcher.fetch(url).await?;
    encoding.decode(url, bytes)
}

/// [`Fetch`] over plain HTTP GET requests with a fixed timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }

    fn request_error(&self, url: &str, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            warn!("Request for {} timed out after {:?}", url, self.timeout);
            FetchError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else {
            FetchError::NetworkRequest(url.to_string(), e)
        }
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!("Requesting {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.request_error(url, e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    self.request_error(url, e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| self.request_error(url, e))?;
        info!("Downloaded {} bytes from {}", body.len(), url);
        Ok(body.to_vec())
    }
}
