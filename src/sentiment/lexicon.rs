//! Opinion-word lexicon scoring
//!
//! Rule-based polarity in the style of pattern/TextBlob: opinion words carry a
//! polarity, a preceding negation flips and halves it, a preceding intensifier
//! scales it, and the text score is the mean over matched words.

use super::PolarityAnalyzer;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{L}\p{N}]+(?:'[\p{L}]+)?").expect("token pattern is valid"));

/// Polarity multiplier applied to an opinion word following a negation
pub const NEGATION_FACTOR: f64 = -0.5;

/// Tokens a pending negation or intensifier survives before it lapses
const MODIFIER_WINDOW: usize = 3;

const OPINION_WORDS: &[(&str, f64)] = &[
    // Positive
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("love", 0.5),
    ("loved", 0.7),
    ("loving", 0.6),
    ("lovely", 0.5),
    ("happy", 0.8),
    ("nice", 0.6),
    ("fantastic", 0.4),
    ("wonderful", 1.0),
    ("perfect", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("helpful", 0.5),
    ("useful", 0.3),
    ("easy", 0.43),
    ("fast", 0.2),
    ("friendly", 0.375),
    ("satisfied", 0.5),
    ("enjoy", 0.4),
    ("enjoyed", 0.4),
    ("pleased", 0.5),
    ("beautiful", 0.85),
    ("brilliant", 0.9),
    ("impressive", 1.0),
    ("smooth", 0.4),
    ("clean", 0.37),
    ("glad", 0.5),
    ("fun", 0.3),
    ("cool", 0.35),
    ("positive", 0.23),
    ("thanks", 0.2),
    ("intuitive", 0.5),
    ("reliable", 0.5),
    // Negative
    ("bad", -0.7),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("hate", -0.8),
    ("hated", -0.9),
    ("poor", -0.4),
    ("worst", -1.0),
    ("worse", -0.4),
    ("disappointing", -0.6),
    ("disappointed", -0.75),
    ("slow", -0.3),
    ("broken", -0.4),
    ("useless", -0.5),
    ("annoying", -0.8),
    ("difficult", -0.5),
    ("confusing", -0.3),
    ("frustrating", -0.4),
    ("sad", -0.5),
    ("angry", -0.5),
    ("ugly", -0.7),
    ("boring", -1.0),
    ("wrong", -0.5),
    ("buggy", -0.5),
    ("expensive", -0.5),
    ("rude", -0.3),
    ("unhappy", -0.6),
    ("negative", -0.3),
    ("failed", -0.5),
    ("unusable", -0.8),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "nothing", "none", "cannot", "can't", "don't",
    "doesn't", "didn't", "won't", "wouldn't", "shouldn't", "couldn't", "isn't", "aren't",
    "wasn't", "weren't", "hardly", "barely",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.2),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("absolutely", 1.5),
    ("totally", 1.3),
    ("super", 1.3),
    ("quite", 1.1),
    ("somewhat", 0.7),
    ("slightly", 0.5),
];

/// Lexicon-backed polarity analyzer
#[derive(Debug, Clone)]
pub struct LexiconAnalyzer {
    /// Word to polarity mapping
    words: HashMap<String, f64>,
    /// Intensifier word to multiplier mapping
    intensifiers: HashMap<String, f64>,
    /// Negation words
    negations: Vec<String>,
}

impl Default for LexiconAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconAnalyzer {
    /// Create an analyzer with the built-in English opinion lexicon
    pub fn new() -> Self {
        let words = OPINION_WORDS
            .iter()
            .map(|(w, s)| (w.to_string(), *s))
            .collect();
        let intensifiers = INTENSIFIERS
            .iter()
            .map(|(w, m)| (w.to_string(), *m))
            .collect();
        let negations = NEGATIONS.iter().map(|w| w.to_string()).collect();

        Self {
            words,
            intensifiers,
            negations,
        }
    }

    /// Add or override opinion words; polarities are clamped to [-1, 1]
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        for (word, score) in words {
            self.add_word(word.as_ref(), score);
        }
        self
    }

    /// Add a custom word to the lexicon
    pub fn add_word(&mut self, word: &str, score: f64) {
        self.words
            .insert(word.to_lowercase(), score.clamp(-1.0, 1.0));
    }

    /// Polarity of a single word, if it is an opinion word
    pub fn get_score(&self, word: &str) -> Option<f64> {
        self.words.get(&word.to_lowercase()).copied()
    }

    /// Check if a word is a negation
    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.iter().any(|n| n == word)
    }

    /// Intensifier multiplier for a word
    pub fn get_intensifier(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(word).copied()
    }

    /// Score a text
    pub fn analyze(&self, text: &str) -> LexiconResult {
        let lowered = text.to_lowercase();
        let mut scores: Vec<f64> = Vec::new();
        let mut matched_words: Vec<(String, f64)> = Vec::new();

        let mut negated = false;
        let mut intensity: f64 = 1.0;
        let mut since_modifier = 0usize;

        for token in TOKEN_PATTERN.find_iter(&lowered).map(|m| m.as_str()) {
            if self.is_negation(token) {
                negated = true;
                since_modifier = 0;
                continue;
            }

            if let Some(mult) = self.get_intensifier(token) {
                intensity *= mult;
                since_modifier = 0;
                continue;
            }

            if let Some(mut score) = self.words.get(token).copied() {
                if negated {
                    score *= NEGATION_FACTOR;
                }
                score = (score * intensity).clamp(-1.0, 1.0);

                scores.push(score);
                matched_words.push((token.to_string(), score));

                negated = false;
                intensity = 1.0;
                since_modifier = 0;
            } else {
                since_modifier += 1;
                if since_modifier >= MODIFIER_WINDOW {
                    negated = false;
                    intensity = 1.0;
                }
            }
        }

        let polarity = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };

        LexiconResult {
            polarity: polarity.clamp(-1.0, 1.0),
            matched_words,
        }
    }
}

impl PolarityAnalyzer for LexiconAnalyzer {
    fn polarity(&self, text: &str) -> f64 {
        let result = self.analyze(text);
        debug!(
            "Lexicon polarity {:.3} from {} matched word(s)",
            result.polarity,
            result.matched_words.len()
        );
        result.polarity
    }
}

/// Result from lexicon-based analysis
#[derive(Debug, Clone)]
pub struct LexiconResult {
    /// Mean polarity over matched words (-1 to 1)
    pub polarity: f64,
    /// Words that matched with their adjusted scores
    pub matched_words: Vec<(String, f64)>,
}
