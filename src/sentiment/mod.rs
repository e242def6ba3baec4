// src/sentiment/mod.rs
//! Rule-based comment scorer: phrases, emojis, lexicon words with
//! intensifier/negation context, length normalization and a density-based
//! confidence.
//!
//! Scoring is a pure function of the text and the static tables in
//! `lexicon`, `phrases` and `emoji`. It never fails; empty or unusable text
//! comes back as a zero-confidence result.

pub mod emoji;
pub mod lexicon;
pub mod phrases;

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::comment::{anon_id, Comment};
use crate::config::AnalyzerConfig;

/// UI keeps only the earliest few reasons.
pub const MAX_REASONS: usize = 3;

pub const SCORE_MIN: f64 = -3.0;
pub const SCORE_MAX: f64 = 3.0;

const PREV_INTENSIFIER_FACTOR: f64 = 1.8;
const NEXT_INTENSIFIER_FACTOR: f64 = 1.5;
const NEGATION_FACTOR: f64 = -0.9;
const NEGATION_WINDOW: usize = 4;

const SHORT_COMMENT_TOKENS: usize = 3;
const SHORT_COMMENT_SCORE: f64 = 1.5;
const SHORT_COMMENT_CONFIDENCE: f64 = 0.8;

/// Output bucket of a scored comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Positive,
    Negative,
    Neutral,
    /// The heuristic could not form an opinion.
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Positive,
        Category::Negative,
        Category::Neutral,
        Category::Other,
    ];

    /// Four-way threshold shared by single-comment scoring and batch routing.
    pub fn classify(score: f64, confidence: f64) -> Self {
        if score > 0.05 && confidence > 0.1 {
            Category::Positive
        } else if score < -0.05 && confidence > 0.1 {
            Category::Negative
        } else if confidence > 0.05 {
            Category::Neutral
        } else {
            Category::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Positive => "positive",
            Category::Negative => "negative",
            Category::Neutral => "neutral",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Ok(Category::Positive),
            "negative" => Ok(Category::Negative),
            "neutral" => Ok(Category::Neutral),
            "other" => Ok(Category::Other),
            other => Err(anyhow::anyhow!("unknown sentiment category: {other}")),
        }
    }
}

/// Evidence counters behind a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDetails {
    pub positive_words: usize,
    pub negative_words: usize,
    pub emojis: usize,
    pub total_words: usize,
    pub phrases: usize,
}

impl SentimentDetails {
    /// Everything that counts as sentiment evidence for the confidence estimate.
    pub fn indicators(&self) -> usize {
        self.positive_words + self.negative_words + self.emojis + self.phrases
    }
}

/// Scored view of one comment. Created once, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Clamped to `[-3, 3]`.
    pub score: f64,
    pub category: Category,
    /// In `[0, 1]`.
    pub confidence: f64,
    /// Earliest-found reasons, at most `MAX_REASONS`.
    pub reasoning: Vec<String>,
    pub details: SentimentDetails,
}

/// Comment scorer. The lexicon tables are process-wide; the instance only
/// carries batching settings used by `analyze_comments`.
#[derive(Debug, Clone, Default)]
pub struct SentimentAnalyzer {
    cfg: AnalyzerConfig,
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(cfg: AnalyzerConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.cfg
    }

    pub fn analyze_single_comment(&self, comment: &Comment) -> SentimentResult {
        self.analyze_text(&comment.text)
    }

    /// Score raw comment text. Deterministic: same text, same result.
    pub fn analyze_text(&self, text: &str) -> SentimentResult {
        let tokens = tokenize(text);
        let total_words = tokens.len();

        if total_words < SHORT_COMMENT_TOKENS {
            if let Some(res) = short_comment(text) {
                tracing::trace!(target: "sentiment", id = %anon_id(text), "short comment shortcut");
                return res;
            }
        }

        let mut reasoning: Vec<String> = Vec::new();
        let mut details = SentimentDetails {
            total_words,
            ..Default::default()
        };

        // (1) fráze nad původním textem
        let phrase_hits = phrases::match_phrases(text);
        let mut score = phrase_hits.score;
        details.phrases = phrase_hits.count;
        reasoning.extend(phrase_hits.reasons);

        // (2) emoji
        let emoji_hits = emoji::scan_emojis(text);
        score += emoji_hits.score as f64 * emoji::EMOJI_WEIGHT;
        details.emojis = emoji_hits.count;
        if emoji_hits.count > 0 {
            reasoning.push(format!("{} sentiment emoji(s) found", emoji_hits.count));
        }

        // (3) slova s kontextem
        for (i, tok) in tokens.iter().enumerate() {
            let base = lexicon::word_polarity(tok);
            if base == 0 {
                continue;
            }
            if base > 0 {
                details.positive_words += 1;
                reasoning.push(format!("Positive word: \"{tok}\""));
            } else {
                details.negative_words += 1;
                reasoning.push(format!("Negative word: \"{tok}\""));
            }

            let mut word_score = base as f64;
            let prev = i.checked_sub(1).map(|j| tokens[j].as_str());
            let next = tokens.get(i + 1).map(String::as_str);

            if let Some(p) = prev.filter(|p| lexicon::is_intensifier(p)) {
                word_score *= PREV_INTENSIFIER_FACTOR;
                reasoning.push(format!("Intensified by \"{p}\""));
            } else if next.is_some_and(lexicon::is_intensifier) {
                word_score *= NEXT_INTENSIFIER_FACTOR;
            }

            let window = i.min(NEGATION_WINDOW);
            if let Some(neg) = (1..=window)
                .map(|k| tokens[i - k].as_str())
                .find(|t| lexicon::is_negator(t))
            {
                word_score *= NEGATION_FACTOR;
                reasoning.push(format!("Negated by \"{neg}\""));
            }

            score += word_score;
        }

        // (4) delší komentáře nenasbírají neúměrně velké skóre
        if total_words > 0 {
            score /= 1.0 + length_penalty(total_words);
        }

        let confidence = confidence(&details, score);
        let category = Category::classify(score, confidence);
        reasoning.truncate(MAX_REASONS);

        SentimentResult {
            score: score.clamp(SCORE_MIN, SCORE_MAX),
            category,
            confidence,
            reasoning,
            details,
        }
    }
}

/// Lowercase, blank out everything that is not an ASCII word char or
/// whitespace, split on whitespace runs.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Capped at 0.5, i.e. the divisor never exceeds 1.5.
fn length_penalty(total_words: usize) -> f64 {
    ((total_words as f64).sqrt() / 10.0).min(0.5)
}

fn confidence(details: &SentimentDetails, score: f64) -> f64 {
    let indicators = details.indicators() as f64;
    let mut conf = match details.total_words {
        0 => 0.0,
        n if n < SHORT_COMMENT_TOKENS => indicators.min(1.0),
        n => (indicators / n as f64 * 3.0).min(1.0),
    };
    if score.abs() > 1.0 {
        conf = (conf * 1.3).min(1.0);
    }
    conf
}

/// Fixed verdict for very short comments containing a known literal.
/// Substring containment on purpose: "good" also fires inside "goodbye".
fn short_comment(text: &str) -> Option<SentimentResult> {
    let lower = text.trim().to_lowercase();

    let (sign, label, details) = if lexicon::SHORT_POSITIVE.iter().any(|w| lower.contains(w)) {
        (
            1.0,
            "positive",
            SentimentDetails {
                positive_words: 1,
                total_words: 1,
                ..Default::default()
            },
        )
    } else if lexicon::SHORT_NEGATIVE.iter().any(|w| lower.contains(w)) {
        (
            -1.0,
            "negative",
            SentimentDetails {
                negative_words: 1,
                total_words: 1,
                ..Default::default()
            },
        )
    } else {
        return None;
    };

    Some(SentimentResult {
        score: sign * SHORT_COMMENT_SCORE,
        category: if sign > 0.0 {
            Category::Positive
        } else {
            Category::Negative
        },
        confidence: SHORT_COMMENT_CONFIDENCE,
        reasoning: vec![format!("Short {label} comment: \"{text}\"")],
        details,
    })
}
