//! HTTP transport for the account validation service.

use std::time::Duration;

use crate::core::SepaError;

/// HTTP collaborator: fetch the body of a GET request.
///
/// Implementations block until the response is complete. Timeouts,
/// retries and cancellation are the implementation's business.
pub trait HttpFetch {
    fn get(&self, url: &str) -> Result<String, SepaError>;
}

impl<T: HttpFetch + ?Sized> HttpFetch for &T {
    fn get(&self, url: &str) -> Result<String, SepaError> {
        (**self).get(url)
    }
}

/// Blocking reqwest transport.
#[derive(Debug, Clone)]
pub struct ReqwestFetch {
    client: reqwest::blocking::Client,
}

impl ReqwestFetch {
    /// Client with reqwest's default settings.
    pub fn new() -> Result<Self, SepaError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| SepaError::Network(e.to_string()))?;
        Ok(Self { client })
    }

    /// Client that gives up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, SepaError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SepaError::Network(e.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpFetch for ReqwestFetch {
    fn get(&self, url: &str) -> Result<String, SepaError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| SepaError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| SepaError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(SepaError::Network(format!("HTTP {status}: {body}")));
        }
        Ok(body)
    }
}
