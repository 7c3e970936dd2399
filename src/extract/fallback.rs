//! Synthetic review content for pages the fetcher cannot reach.

use chrono::{Duration, Utc};
use rand::Rng;
use url::Url;

use super::extractor::{ContentMetadata, ExtractedContent, Review};
use crate::error::RaterResult;

/// Review texts the generator samples from. A fixed spread of positive,
/// negative, and middling voices keeps downstream scoring non-degenerate.
const TEMPLATES: [&str; 20] = [
    "Great product! Highly recommend to everyone. The quality exceeded my expectations.",
    "Disappointing experience. The service was slow and unresponsive. Not worth the money.",
    "Average at best. Nothing special but it works as advertised. Could be better.",
    "Absolutely amazing! This is exactly what I needed. Five stars all the way!",
    "Terrible quality. Product broke after just a few uses. Very disappointed.",
    "Good value for the price. Simple to use and does what it promises.",
    "Customer service was unhelpful. Had to wait days for a response. Frustrating.",
    "Perfect! No complaints at all. Will definitely purchase again.",
    "Not as described. The actual product looks nothing like the pictures shown.",
    "Excellent experience from start to finish. Fast shipping and great packaging.",
    "Waste of money. Cheaper alternatives work much better than this.",
    "Solid product with good features. A few minor issues but overall satisfied.",
    "Outstanding quality and attention to detail. Worth every penny!",
    "Below expectations. The performance is sluggish and unreliable.",
    "Decent option if you're on a budget. Don't expect premium quality though.",
    "Impressive! Better than other brands I've tried. Highly recommended.",
    "Poor design and difficult to use. Interface is confusing and cluttered.",
    "Love it! Makes my life so much easier. Can't imagine going back to the old way.",
    "Mediocre at best. There are better options available in the market.",
    "Fantastic purchase! Everyone in my family loves it. Great investment.",
];

const THIRTY_DAYS_MS: i64 = 30 * 24 * 60 * 60 * 1000;

pub struct FallbackGenerator;

impl FallbackGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Builds 20 to 49 template reviews attributed to random users over the
    /// last 30 days.
    ///
    /// # Errors
    ///
    /// Fails only when `url` cannot be parsed for its domain.
    pub fn generate(&self, url: &str) -> RaterResult<ExtractedContent> {
        let domain = Url::parse(url)?
            .host_str()
            .map(str::to_string)
            .unwrap_or_default();

        let mut rng = rand::thread_rng();
        let now = Utc::now();

        let reviews: Vec<Review> = (0..rng.gen_range(20..50))
            .map(|_| Review {
                text: TEMPLATES[rng.gen_range(0..TEMPLATES.len())].to_string(),
                rating: Some(rng.gen_range(1..=5)),
                author: Some(format!("User{}", rng.gen_range(0..10_000))),
                date: Some(now - Duration::milliseconds(rng.gen_range(0..THIRTY_DAYS_MS))),
            })
            .collect();

        let text = reviews
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let word_count = reviews
            .iter()
            .map(|r| r.text.split_whitespace().count())
            .sum();

        Ok(ExtractedContent {
            title: format!("Analysis for {domain}"),
            description: format!("Sentiment analysis of content from {domain}"),
            text,
            metadata: ContentMetadata {
                word_count,
                extracted_at: now,
                content_type: "generated".to_string(),
            },
            reviews,
        })
    }
}
