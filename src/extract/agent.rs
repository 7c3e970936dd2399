use async_trait::async_trait;
use reqwest::header::USER_AGENT;

use super::client::HttpClient;

/// Browser identity presented to review pages. Sites frequently serve
/// reduced markup, or a block page, to clients that identify as bots.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// An [`HttpClient`] wrapper that stamps a `User-Agent` header onto every
/// request before handing it to the inner client.
pub struct UserAgent<C> {
    pub inner: C,
    pub value: String,
}

impl<C> UserAgent<C> {
    /// Convenience constructor that uses [`BROWSER_USER_AGENT`].
    pub fn browser(inner: C) -> Self {
        Self {
            inner,
            value: BROWSER_USER_AGENT.to_string(),
        }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for UserAgent<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.headers_mut().insert(
            USER_AGENT,
            self.value.parse().expect("UserAgent: invalid header value"),
        );
        self.inner.execute(req).await
    }
}
