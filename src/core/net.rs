// src/core/net.rs
// Blocking HTTP GET with a timeout; failures are sorted into FetchError kinds.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::USER_AGENT;
use crate::config::options::FetchOptions;
use crate::error::FetchError;

/// Where the raw page comes from. The pipeline only ever asks for one URL.
pub trait Source {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

pub struct HttpSource {
    client: Client,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(opts: &FetchOptions) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(opts.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Other { url: opts.url.clone(), reason: e.to_string() })?;
        Ok(Self { client, timeout: opts.timeout })
    }
}

impl Source for HttpSource {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        logf!("Fetching SHL standings from {url}");
        let t = std::time::Instant::now();

        let resp = self.client
            .get(url)
            .send()
            .map_err(|e| classify(url, self.timeout, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpError { url: s!(url), status: status.as_u16() });
        }

        let body = resp.text().map_err(|e| classify(url, self.timeout, e))?;
        logd!("Fetched {} bytes in {:?}", body.len(), t.elapsed());
        Ok(body)
    }
}

fn classify(url: &str, timeout: Duration, e: reqwest::Error) -> FetchError {
    let url = s!(url);
    if e.is_timeout() {
        FetchError::TimedOut { url, timeout }
    } else if e.is_connect() {
        FetchError::ConnectionFailed { url, reason: e.to_string() }
    } else if let Some(status) = e.status() {
        FetchError::HttpError { url, status: status.as_u16() }
    } else {
        FetchError::Other { url, reason: e.to_string() }
    }
}
