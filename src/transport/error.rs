use std::string::FromUtf8Error;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request for {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("Response body from {url} is not valid UTF-8")]
    InvalidUtf8 {
        url: String,
        #[source]
        source: FromUtf8Error,
    },
}
