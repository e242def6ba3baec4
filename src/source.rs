// src/source.rs
//! Comment sources: whatever scrapes or replays comments hands them over
//! through `CommentSource`. `collect_comments` merges sources into one clean,
//! deduplicated, capped batch ready for scoring.

use anyhow::Result;
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use std::collections::HashSet;

use crate::comment::{clean_text, Comment};

#[async_trait::async_trait]
pub trait CommentSource: Send + Sync {
    async fn fetch_comments(&self) -> Result<Vec<Comment>>;
    fn name(&self) -> &'static str;
}

/// Fixed, in-memory list of comments (tests, replays, pre-scraped payloads).
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    comments: Vec<Comment>,
}

impl StaticSource {
    pub fn new(comments: Vec<Comment>) -> Self {
        Self { comments }
    }
}

#[async_trait::async_trait]
impl CommentSource for StaticSource {
    async fn fetch_comments(&self) -> Result<Vec<Comment>> {
        Ok(self.comments.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "comment_source_errors_total",
            "Comment source fetch errors."
        );
        describe_counter!(
            "comments_collected_total",
            "Comments kept after cleanup, dedup and cap."
        );
        describe_counter!(
            "comments_dropped_total",
            "Comments dropped as empty or duplicate."
        );
    });
}

/// Clean texts, drop empties and duplicate ids (first wins), keep input order,
/// stop at `max_count`. Returns `(kept, dropped)`.
pub fn normalize_dedup_cap(raw: Vec<Comment>, max_count: usize) -> (Vec<Comment>, usize) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut kept = Vec::with_capacity(raw.len().min(max_count));
    let mut dropped = 0usize;

    for mut c in raw {
        if kept.len() >= max_count {
            break;
        }
        c.text = clean_text(&c.text);
        if c.text.is_empty() || !seen.insert(c.id()) {
            dropped += 1;
            continue;
        }
        kept.push(c);
    }
    (kept, dropped)
}

/// Run every source in order. A failing source is logged and skipped.
pub async fn collect_comments(sources: &[Box<dyn CommentSource>], max_count: usize) -> Vec<Comment> {
    ensure_metrics_described();

    let mut raw = Vec::new();
    for s in sources {
        match s.fetch_comments().await {
            Ok(mut v) => raw.append(&mut v),
            Err(e) => {
                tracing::warn!(error = ?e, source = s.name(), "comment source error");
                counter!("comment_source_errors_total").increment(1);
            }
        }
    }

    let (kept, dropped) = normalize_dedup_cap(raw, max_count);
    counter!("comments_collected_total").increment(kept.len() as u64);
    counter!("comments_dropped_total").increment(dropped as u64);
    tracing::debug!(target: "source", kept = kept.len(), dropped, "comments collected");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    #[async_trait::async_trait]
    impl CommentSource for Failing {
        async fn fetch_comments(&self) -> Result<Vec<Comment>> {
            Err(anyhow::anyhow!("comments section not found"))
        }
        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn empties_and_duplicates_are_dropped() {
        let raw = vec![
            Comment::new("  Great&nbsp;video ", "ann", 1),
            Comment::new("<br>", "bob", 0),
            Comment::new("Great video", "ann", 5),
            Comment::new("Great video", "cid", 5),
        ];
        let (kept, dropped) = normalize_dedup_cap(raw, 50);
        assert_eq!(kept.len(), 2);
        assert_eq!(dropped, 2);
        assert_eq!(kept[0].text, "Great video");
        assert_eq!(kept[0].likes, 1);
        assert_eq!(kept[1].author, "cid");
    }

    #[test]
    fn cap_keeps_input_order() {
        let raw = (0..10)
            .map(|i| Comment::new(format!("comment number {i}"), "x", 0))
            .collect();
        let (kept, _) = normalize_dedup_cap(raw, 3);
        let texts: Vec<&str> = kept.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["comment number 0", "comment number 1", "comment number 2"]);
    }

    #[tokio::test]
    async fn failing_source_is_not_fatal() {
        let sources: Vec<Box<dyn CommentSource>> = vec![
            Box::new(Failing),
            Box::new(StaticSource::new(vec![Comment::new("nice", "a", 0)])),
        ];
        let got = collect_comments(&sources, 50).await;
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].text, "nice");
    }
}
