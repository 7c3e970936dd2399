use std::time::Duration;

use async_trait::async_trait;

use super::client::HttpClient;

/// Plain reqwest-backed [`HttpClient`] with the crate's fetch timeouts:
/// 10 seconds to connect, 30 seconds for the whole request by default.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new() -> reqwest::Result<Self> {
        Self::with_timeout(Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self(client))
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
