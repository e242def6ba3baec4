// src/comment.rs
//! Comment records as handed over by a comment source, plus the small text
//! helpers a source needs (like-count parsing, cleanup, stable ids).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::sentiment::SentimentResult;

pub const UNKNOWN_AUTHOR: &str = "Unknown";

fn default_author() -> String {
    UNKNOWN_AUTHOR.to_string()
}

/// One scraped comment. Immutable once created; scoring never touches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    #[serde(default = "default_author")]
    pub author: String,
    /// Accepts a plain count or the raw like label ("1.2K").
    #[serde(default, deserialize_with = "de_likes")]
    pub likes: u64,
    /// Relative age label as shown by YouTube ("3 days ago").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_ago: Option<String>,
}

impl Comment {
    pub fn new(text: impl Into<String>, author: impl Into<String>, likes: u64) -> Self {
        let author = author.into();
        let author = if author.trim().is_empty() {
            default_author()
        } else {
            author
        };
        Self {
            text: text.into(),
            author,
            likes,
            time_ago: None,
        }
    }

    pub fn id(&self) -> String {
        comment_id(&self.text, &self.author)
    }
}

fn de_likes<'de, D>(d: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Likes {
        Count(u64),
        Label(String),
    }
    Ok(match Likes::deserialize(d)? {
        Likes::Count(n) => n,
        Likes::Label(label) => parse_like_count(&label),
    })
}

/// A comment together with its score. `index` is the position in the input
/// batch, so every output row maps back to exactly one input record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedComment {
    pub index: usize,
    #[serde(flatten)]
    pub comment: Comment,
    pub sentiment: SentimentResult,
}

/// Parse a YouTube like label: "57", "1.2K", "3M", "1,024".
/// Anything unparseable counts as zero.
pub fn parse_like_count(label: &str) -> u64 {
    let label = label.trim();
    if label.is_empty() || label == "0" {
        return 0;
    }

    let clean: String = label
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | 'k' | 'K' | 'm' | 'M'))
        .collect();

    // leading float prefix, e.g. "1.2K" -> "1.2"
    let end = clean
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (c == '.' && !clean[..i].contains('.'))))
        .map(|(i, _)| i)
        .unwrap_or(clean.len());
    let number: f64 = match clean[..end].parse() {
        Ok(n) => n,
        Err(_) => return 0,
    };

    let lower = clean.to_ascii_lowercase();
    let scaled = if lower.contains('k') {
        number * 1_000.0
    } else if lower.contains('m') {
        number * 1_000_000.0
    } else {
        number
    };
    scaled.floor() as u64
}

/// Stable short id from the text prefix and author.
pub fn comment_id(text: &str, author: &str) -> String {
    let prefix: String = text.chars().take(50).collect();
    anon_id(&format!("{prefix}{author}"))
}

/// 12-hex-char SHA-256 prefix. Logs carry this instead of raw comment text.
pub fn anon_id(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)</?[^>]+>").expect("tag regex"));
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

/// Source-side cleanup: decode entities, strip tags, collapse whitespace, trim.
pub fn clean_text(raw: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw);
    let no_tags = RE_TAGS.replace_all(&decoded, " ");
    RE_WS.replace_all(&no_tags, " ").trim().to_string()
}
