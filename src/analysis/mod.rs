//! Review scoring and aggregation.
//!
//! This module scores individual review texts against a word lexicon,
//! summarizes the resulting polarity distribution, ranks keywords, and
//! assesses the quality of the batch as a dataset.

pub mod keywords;
pub mod lexicon;
pub mod quality;
pub mod sentiment;
pub mod stats;
pub mod types;
