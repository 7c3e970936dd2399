use async_trait::async_trait;
use reqwest::{Request, Response};

/// Transport seam for page fetching. Implemented by the reqwest-backed
/// client and by decorators that adjust a request before sending it.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
