//! Multi-word idioms matched against the original (not lowercased) comment text.
//!
//! Each pattern is case-insensitive and bounded by ASCII word boundaries, so a
//! non-ASCII letter next to an idiom does not glue it into a longer word (the
//! tokenizer treats those letters as separators too). Every match counts on
//! its own; overlapping idioms from different patterns are not deduplicated.

use once_cell::sync::Lazy;
use regex::Regex;

/// Score contributed by every single phrase match (sign comes from polarity).
pub const PHRASE_WEIGHT: f64 = 2.0;

const POSITIVE_PATTERNS: &[&str] = &[
    r"(?i)(?-u:\b)(so good|really good|very good|pretty good|quite good)(?-u:\b)",
    r"(?i)(?-u:\b)(love it|love this|absolutely love|really love)(?-u:\b)",
    r"(?i)(?-u:\b)(well done|great job|nice work|good work)(?-u:\b)",
    r"(?i)(?-u:\b)(thank you|thanks|appreciate|grateful)(?-u:\b)",
    r"(?i)(?-u:\b)(highly recommend|would recommend|definitely recommend)(?-u:\b)",
    r"(?i)(?-u:\b)(keep it up|keep going|more like this)(?-u:\b)",
    r"(?i)(?-u:\b)(made my day|brightened my day|put a smile)(?-u:\b)",
];

const NEGATIVE_PATTERNS: &[&str] = &[
    r"(?i)(?-u:\b)(so bad|really bad|very bad|pretty bad|quite bad)(?-u:\b)",
    r"(?i)(?-u:\b)(hate it|hate this|absolutely hate|really hate)(?-u:\b)",
    r"(?i)(?-u:\b)(waste of time|wasting time|total waste)(?-u:\b)",
    r"(?i)(?-u:\b)(not good|not great|not worth|not recommended)(?-u:\b)",
    r"(?i)(?-u:\b)(disappointed|let down|expected better)(?-u:\b)",
    r"(?i)(?-u:\b)(makes me sick|makes me angry|drives me crazy)(?-u:\b)",
    r"(?i)(?-u:\b)(worst ever|terrible quality|horrible experience)(?-u:\b)",
];

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("phrase regex"))
        .collect()
}

static POSITIVE: Lazy<Vec<Regex>> = Lazy::new(|| compile(POSITIVE_PATTERNS));
static NEGATIVE: Lazy<Vec<Regex>> = Lazy::new(|| compile(NEGATIVE_PATTERNS));

/// Aggregate of all phrase hits in one text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhraseHits {
    /// Signed sum, `±PHRASE_WEIGHT` per match.
    pub score: f64,
    /// Number of individual matches across all patterns.
    pub count: usize,
    /// One entry per pattern that matched, quoting its first match.
    pub reasons: Vec<String>,
}

/// Scan `text` against positive patterns first, then negative, in table order.
pub fn match_phrases(text: &str) -> PhraseHits {
    let mut hits = PhraseHits::default();
    scan(&POSITIVE, text, 1.0, "Positive", &mut hits);
    scan(&NEGATIVE, text, -1.0, "Negative", &mut hits);
    hits
}

fn scan(patterns: &[Regex], text: &str, sign: f64, label: &str, hits: &mut PhraseHits) {
    for re in patterns {
        let mut first: Option<&str> = None;
        let mut n = 0usize;
        for m in re.find_iter(text) {
            first.get_or_insert(m.as_str());
            n += 1;
        }
        if let Some(quote) = first {
            hits.score += sign * PHRASE_WEIGHT * n as f64;
            hits.count += n;
            hits.reasons.push(format!("{label} phrase: \"{quote}\""));
        }
    }
}
