use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use crate::error::MonitorError;

// The case database serves plain HTML to anything that looks like a
// desktop browser, and bot-ish agents get challenged.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// The one operation the pipeline needs from a page source. Tests swap in
/// canned bytes or canned failures through this seam.
#[async_trait]
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, MonitorError>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, MonitorError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MonitorError::Fetch(e.to_string()))?
            .error_for_status()
            .map_err(|e| MonitorError::Fetch(e.to_string()))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| MonitorError::Fetch(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
