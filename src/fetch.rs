use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};

use crate::config::CrawlConfig;
use crate::error::CrawlError;

/// Fetches a page body. A single call is a single attempt.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<String, CrawlError>;
}

impl<T: PageFetcher + ?Sized> PageFetcher for &T {
    fn fetch(&self, url: &str) -> Result<String, CrawlError> {
        (**self).fetch(url)
    }
}

impl<T: PageFetcher + ?Sized> PageFetcher for Box<T> {
    fn fetch(&self, url: &str) -> Result<String, CrawlError> {
        (**self).fetch(url)
    }
}

#[derive(Clone)]
pub struct KeggHttpClient {
    client: Client,
}

impl KeggHttpClient {
    pub fn new(config: &CrawlConfig) -> Result<Self, CrawlError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|err| CrawlError::InvalidHeader(err.to_string()))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| CrawlError::Http(err.to_string()))?;

        Ok(Self { client })
    }
}

impl PageFetcher for KeggHttpClient {
    fn fetch(&self, url: &str) -> Result<String, CrawlError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| CrawlError::Http(err.to_string()))?;
        if !response.status().is_success() {
            return Err(CrawlError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        response
            .text()
            .map_err(|err| CrawlError::Http(err.to_string()))
    }
}
