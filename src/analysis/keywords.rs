//! Keyword frequency ranking across cleaned record texts.

use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;

use crate::analysis::lexicon::Lexicon;
use crate::analysis::sentiment::SentimentScorer;
use crate::analysis::types::KeywordStat;

/// Ranks the most frequent substantive words in a batch of texts.
///
/// A keyword is any run of four or more word characters that is not a stop
/// word. Every occurrence counts: a word repeated inside one record weighs
/// that record's polarity once per repeat in the keyword's average sentiment.
pub struct KeywordExtractor {
    scorer: SentimentScorer,
    lexicon: Arc<Lexicon>,
    word_re: Regex,
}

struct Tally {
    word: String,
    count: usize,
    polarity_sum: f64,
}

impl KeywordExtractor {
    pub const DEFAULT_TOP_N: usize = 15;

    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            scorer: SentimentScorer::new(Arc::clone(&lexicon)),
            word_re: Regex::new(r"\b\w{4,}\b").unwrap(),
            lexicon,
        }
    }

    /// Returns up to `top_n` keywords ordered by descending count. Equal
    /// counts keep first-encountered order across the batch.
    pub fn extract(&self, texts: &[String], top_n: usize) -> Vec<KeywordStat> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut tallies: Vec<Tally> = Vec::new();

        for text in texts {
            let polarity = self.scorer.score(text).polarity;
            let lowered = text.to_lowercase();

            for m in self.word_re.find_iter(&lowered) {
                let word = m.as_str();
                if self.lexicon.is_stop_word(word) {
                    continue;
                }
                let slot = *index.entry(word.to_string()).or_insert_with(|| {
                    tallies.push(Tally {
                        word: word.to_string(),
                        count: 0,
                        polarity_sum: 0.0,
                    });
                    tallies.len() - 1
                });
                tallies[slot].count += 1;
                tallies[slot].polarity_sum += polarity;
            }
        }

        // Stable sort, so ties stay in first-encountered order.
        tallies.sort_by(|a, b| b.count.cmp(&a.count));
        tallies.truncate(top_n);

        tallies
            .into_iter()
            .map(|t| KeywordStat {
                word: t.word,
                avg_sentiment: t.polarity_sum / t.count as f64,
                count: t.count,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> KeywordExtractor {
        KeywordExtractor::new(Arc::new(Lexicon::default()))
    }

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_counts_and_ranks_by_frequency() {
        let batch = texts(&["Great phone, great battery", "Terrible battery died fast"]);

        let keywords = extractor().extract(&batch, KeywordExtractor::DEFAULT_TOP_N);

        let words: Vec<&str> = keywords.iter().map(|k| k.word.as_str()).collect();
        assert_eq!(
            words,
            ["great", "battery", "phone", "terrible", "died", "fast"]
        );
        assert_eq!(keywords[0].count, 2);
        assert_eq!(keywords[1].count, 2);
        assert_eq!(keywords[2].count, 1);
    }

    #[test]
    fn test_avg_sentiment_weighs_each_occurrence() {
        // First record scores +1.0 (two positive hits), second -1.0.
        let batch = texts(&["Great phone, great battery", "Terrible battery died fast"]);

        let keywords = extractor().extract(&batch, KeywordExtractor::DEFAULT_TOP_N);

        let battery = keywords.iter().find(|k| k.word == "battery").unwrap();
        assert_eq!(battery.avg_sentiment, 0.0);

        let great = keywords.iter().find(|k| k.word == "great").unwrap();
        assert_eq!(great.avg_sentiment, 1.0);
    }

    #[test]
    fn test_short_words_are_ignored() {
        let batch = texts(&["the cat sat on a big red mat"]);
        assert!(extractor()
            .extract(&batch, KeywordExtractor::DEFAULT_TOP_N)
            .is_empty());
    }

    #[test]
    fn test_stop_words_are_dropped() {
        let batch = texts(&["this that with have been"]);
        assert!(extractor()
            .extract(&batch, KeywordExtractor::DEFAULT_TOP_N)
            .is_empty());
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let batch = texts(&["Great GREAT great"]);

        let keywords = extractor().extract(&batch, KeywordExtractor::DEFAULT_TOP_N);

        assert_eq!(keywords.len(), 1);
        assert_eq!(keywords[0].word, "great");
        assert_eq!(keywords[0].count, 3);
        assert_eq!(keywords[0].avg_sentiment, 1.0);
    }

    #[test]
    fn test_tied_counts_keep_first_encountered_order() {
        let batch = texts(&["zebra apple", "zebra apple"]);

        let keywords = extractor().extract(&batch, KeywordExtractor::DEFAULT_TOP_N);

        let words: Vec<&str> = keywords.iter().map(|k| k.word.as_str()).collect();
        assert_eq!(words, ["zebra", "apple"]);
    }

    #[test]
    fn test_top_n_truncates_the_ranking() {
        let batch = texts(&["alpha alpha bravo bravo charlie"]);

        let keywords = extractor().extract(&batch, 2);

        assert_eq!(keywords.len(), 2);
        assert_eq!(keywords[0].word, "alpha");
        assert_eq!(keywords[1].word, "bravo");
    }
}
