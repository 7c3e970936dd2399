//! Content acquisition: fetch a page over HTTP, scrape review text out of
//! its HTML, and substitute synthetic reviews when the fetch fails.

mod agent;
mod basic;
mod client;
mod extractor;
mod fallback;
mod html;

pub use agent::{BROWSER_USER_AGENT, UserAgent};
pub use basic::BasicClient;
pub use client::HttpClient;
pub use extractor::{ContentExtractor, ContentMetadata, ExtractedContent, Review, UrlExtractor};
pub use fallback::FallbackGenerator;
