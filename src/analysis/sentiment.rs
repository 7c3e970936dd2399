//! Lexicon-driven sentiment scoring for single text records.

use std::sync::Arc;

use regex::Regex;

use crate::analysis::lexicon::Lexicon;
use crate::analysis::types::{Sentiment, SentimentResult};

/// Scores one text at a time against an injected [`Lexicon`].
///
/// Scoring walks the word tokens left to right with a one-token lookback:
/// a preceding negation inverts a sentiment word's contribution, a preceding
/// intensifier multiplies its magnitude by 1.5. Tokens outside both lexicons
/// contribute nothing but still count toward subjectivity normalization.
pub struct SentimentScorer {
    lexicon: Arc<Lexicon>,
    word_re: Regex,
}

impl SentimentScorer {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            lexicon,
            word_re: Regex::new(r"\b\w+\b").unwrap(),
        }
    }

    /// Scores a single record.
    ///
    /// Deterministic: the same text always yields the same result. Empty or
    /// signal-free text comes back as polarity 0.0, confidence 0, Neutral.
    pub fn score(&self, text: &str) -> SentimentResult {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = self
            .word_re
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();

        let mut score = 0.0_f64;
        let mut matched = 0_usize;
        let mut subjectivity_acc = 0.0_f64;

        for (i, token) in tokens.iter().enumerate() {
            let prev = if i > 0 { tokens[i - 1] } else { "" };
            let negated = self.lexicon.is_negation(prev);
            let multiplier = if self.lexicon.is_intensifier(prev) {
                1.5
            } else {
                1.0
            };

            if self.lexicon.is_positive(token) {
                score += if negated { -1.0 } else { 1.0 } * multiplier;
                matched += 1;
                subjectivity_acc += 0.5;
            } else if self.lexicon.is_negative(token) {
                score += if negated { 1.0 } else { -1.0 } * multiplier;
                matched += 1;
                subjectivity_acc += 0.5;
            }
        }

        let polarity = if matched > 0 {
            (score / matched as f64).clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let confidence = (matched as f64 * 10.0).min(100.0);
        let subjectivity = if tokens.is_empty() {
            0.0
        } else {
            (subjectivity_acc / tokens.len() as f64).min(1.0)
        };

        SentimentResult {
            text: text.to_string(),
            sentiment: Sentiment::from_polarity(polarity),
            polarity,
            confidence,
            subjectivity,
        }
    }

    /// Scores a batch of records, one call per record.
    pub fn score_batch(&self, texts: &[String]) -> Vec<SentimentResult> {
        texts.iter().map(|t| self.score(t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> SentimentScorer {
        SentimentScorer::new(Arc::new(Lexicon::default()))
    }

    #[test]
    fn test_positive_text() {
        let result = scorer().score("This is excellent and amazing!");

        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.polarity, 1.0);
        assert_eq!(result.confidence, 20.0);
        // 2 matched words * 0.5, over 5 tokens.
        assert_eq!(result.subjectivity, 0.2);
    }

    #[test]
    fn test_negative_text() {
        let result = scorer().score("Terrible, awful experience.");

        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.polarity, -1.0);
        assert_eq!(result.confidence, 20.0);
    }

    #[test]
    fn test_neutral_text_without_signal() {
        let result = scorer().score("It was fine.");

        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.polarity, 0.0);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_empty_text() {
        let result = scorer().score("");

        assert_eq!(result.sentiment, Sentiment::Neutral);
        assert_eq!(result.polarity, 0.0);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.subjectivity, 0.0);
    }

    #[test]
    fn test_negation_inverts_contribution() {
        let s = scorer();
        let plain = s.score("good");
        let negated = s.score("not good");

        assert!(plain.polarity > 0.0);
        assert!(negated.polarity <= 0.0);
        assert_eq!(negated.polarity, -1.0);
        assert_eq!(negated.sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_negated_negative_flips_positive() {
        let result = scorer().score("not terrible");

        assert_eq!(result.polarity, 1.0);
        assert_eq!(result.sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_intensifier_raises_magnitude() {
        let s = scorer();
        // "good" +1.5 and "slow" -1 over two matches vs. +1 and -1.
        let intensified = s.score("very good but slow");
        let plain = s.score("good but slow");

        assert_eq!(plain.polarity, 0.0);
        assert_eq!(intensified.polarity, 0.25);
    }

    #[test]
    fn test_lookback_is_one_token_only() {
        // The negation sits two tokens back, so it must not fire.
        let result = scorer().score("not very good");

        // "very" intensifies "good": +1.5 over one match, clamped to 1.
        assert_eq!(result.polarity, 1.0);
    }

    #[test]
    fn test_confidence_caps_at_100() {
        let text = "good ".repeat(15);
        let result = scorer().score(&text);

        assert_eq!(result.confidence, 100.0);
    }

    #[test]
    fn test_punctuation_and_case_ignored() {
        let result = scorer().score("EXCELLENT!!!");

        assert_eq!(result.polarity, 1.0);
        assert_eq!(result.sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_bounds_hold_for_varied_inputs() {
        let s = scorer();
        let mut samples: Vec<String> = [
            "",
            "the and or but",
            "absolutely wonderful, highly recommend",
            "worst scam ever, total fraud and waste",
            "not bad, not good, never terrible",
        ]
        .iter()
        .map(|t| t.to_string())
        .collect();
        samples.push("word ".repeat(200));

        for text in &samples {
            let r = s.score(text);
            assert!((-1.0..=1.0).contains(&r.polarity), "polarity for {text:?}");
            assert!((0.0..=100.0).contains(&r.confidence), "confidence for {text:?}");
            assert!((0.0..=1.0).contains(&r.subjectivity), "subjectivity for {text:?}");
            assert_eq!(r.sentiment, Sentiment::from_polarity(r.polarity));
        }
    }

    #[test]
    fn test_injected_lexicon_is_respected() {
        let mut lexicon = Lexicon::empty();
        lexicon.add_positive("shiny");
        let s = SentimentScorer::new(Arc::new(lexicon));

        assert_eq!(s.score("shiny").sentiment, Sentiment::Positive);
        // Default-table words mean nothing to a custom lexicon.
        assert_eq!(s.score("excellent").sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_custom_negation_and_intensifier_tables() {
        let mut lexicon = Lexicon::empty();
        lexicon.add_positive("snappy");
        lexicon.add_negative("laggy");
        lexicon.add_intensifier("insanely");
        lexicon.add_negation("hardly");
        let s = SentimentScorer::new(Arc::new(lexicon));

        // "insanely laggy" -1.5 and "snappy" +1 over two matches.
        assert_eq!(s.score("insanely laggy but snappy").polarity, -0.25);

        let inverted = s.score("hardly laggy");
        assert_eq!(inverted.polarity, 1.0);
        assert_eq!(inverted.sentiment, Sentiment::Positive);

        // The default negators are not in this lexicon, so "not" is inert.
        assert_eq!(s.score("not laggy").polarity, -1.0);
    }

    #[test]
    fn test_score_batch_order_preserved() {
        let texts = vec!["good".to_string(), "bad".to_string()];
        let results = scorer().score_batch(&texts);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].sentiment, Sentiment::Positive);
        assert_eq!(results[1].sentiment, Sentiment::Negative);
    }
}
