//! Fixed word tables driving sentiment scoring and keyword extraction.
//!
//! A [`Lexicon`] is built once at startup and injected into the scorer and
//! keyword extractor, so tests can substitute their own tables instead of
//! patching globals. All lookups are against lowercase entries; callers pass
//! lowercased tokens.

use std::collections::HashSet;

static POSITIVE_WORDS: &[&str] = &[
    "excellent",
    "amazing",
    "great",
    "wonderful",
    "fantastic",
    "awesome",
    "outstanding",
    "superb",
    "brilliant",
    "perfect",
    "love",
    "best",
    "incredible",
    "impressive",
    "beautiful",
    "good",
    "nice",
    "happy",
    "delighted",
    "satisfied",
    "recommend",
    "quality",
    "reliable",
    "efficient",
    "helpful",
    "professional",
    "friendly",
];

static NEGATIVE_WORDS: &[&str] = &[
    "terrible",
    "awful",
    "horrible",
    "bad",
    "worst",
    "disappointing",
    "poor",
    "useless",
    "pathetic",
    "disgusting",
    "hate",
    "annoying",
    "frustrating",
    "slow",
    "broken",
    "defective",
    "waste",
    "scam",
    "fraud",
    "cheap",
    "flawed",
    "difficult",
    "confusing",
    "unreliable",
    "unprofessional",
    "rude",
];

static INTENSIFIERS: &[&str] = &["very", "extremely", "absolutely", "totally", "completely"];

// The contracted forms are kept for parity with the word lists this tool has
// always shipped; the word-boundary tokenizer splits "don't" into "don" and
// "t", so only the whole-word negators actually fire.
static NEGATIONS: &[&str] = &[
    "not",
    "no",
    "never",
    "neither",
    "nobody",
    "nothing",
    "don't",
    "doesn't",
    "didn't",
    "won't",
    "wouldn't",
    "shouldn't",
    "couldn't",
];

static STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "is", "was", "are", "were", "be", "been", "being", "have", "has", "had", "do", "does",
    "did", "will", "would", "should", "could", "may", "might", "must", "can", "this", "that",
    "these", "those", "i", "you", "he", "she", "it", "we", "they", "what", "which", "who", "when",
    "where", "why", "how",
];

/// Immutable word tables: sentiment-bearing words, their modifiers, and the
/// stop words excluded from keyword ranking.
#[derive(Debug, Clone)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
    intensifiers: HashSet<String>,
    negations: HashSet<String>,
    stop_words: HashSet<String>,
}

impl Lexicon {
    /// Creates a lexicon with no entries. Useful as a test scaffold together
    /// with the `add_*` methods.
    pub fn empty() -> Self {
        Self {
            positive: HashSet::new(),
            negative: HashSet::new(),
            intensifiers: HashSet::new(),
            negations: HashSet::new(),
            stop_words: HashSet::new(),
        }
    }

    pub fn add_positive(&mut self, word: &str) {
        self.positive.insert(word.to_lowercase());
    }

    pub fn add_negative(&mut self, word: &str) {
        self.negative.insert(word.to_lowercase());
    }

    pub fn add_intensifier(&mut self, word: &str) {
        self.intensifiers.insert(word.to_lowercase());
    }

    pub fn add_negation(&mut self, word: &str) {
        self.negations.insert(word.to_lowercase());
    }

    pub fn add_stop_word(&mut self, word: &str) {
        self.stop_words.insert(word.to_lowercase());
    }

    pub fn is_positive(&self, token: &str) -> bool {
        self.positive.contains(token)
    }

    pub fn is_negative(&self, token: &str) -> bool {
        self.negative.contains(token)
    }

    pub fn is_intensifier(&self, token: &str) -> bool {
        self.intensifiers.contains(token)
    }

    pub fn is_negation(&self, token: &str) -> bool {
        self.negations.contains(token)
    }

    pub fn is_stop_word(&self, token: &str) -> bool {
        self.stop_words.contains(token)
    }
}

impl Default for Lexicon {
    /// The fixed production tables.
    fn default() -> Self {
        let collect = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();

        Self {
            positive: collect(POSITIVE_WORDS),
            negative: collect(NEGATIVE_WORDS),
            intensifiers: collect(INTENSIFIERS),
            negations: collect(NEGATIONS),
            stop_words: collect(STOP_WORDS),
        }
    }
}
