// src/analysis.rs
//! # Batch analysis
//! Scores a batch of comments in fixed-size slices, yielding to the runtime
//! between slices so a host event loop is never blocked for the whole batch.
//!
//! Results are appended in strict input order; buckets are sorted only after
//! the last slice. There are no suspension points inside a slice, so a caller
//! that drops the future mid-way simply loses the partial result.

use chrono::{DateTime, Utc};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::Instant;
use tracing::{debug, info};

use crate::comment::{AnalyzedComment, Comment};
use crate::error::AnalysisError;
use crate::sentiment::{Category, SentimentAnalyzer};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "comments_analyzed_total",
            "Comments scored, labelled by output category."
        );
        describe_counter!("analysis_batches_total", "Scoring slices processed.");
        describe_counter!(
            "analysis_empty_input_total",
            "Batch calls rejected because no comments were given."
        );
        describe_histogram!(
            "analysis_duration_ms",
            "Wall-clock time of a whole batch analysis in milliseconds."
        );
    });
}

/// Per-bucket counts and percentages. Percentages are rounded independently
/// against the batch total and may not add up to exactly 100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub other: usize,
    pub positive_percent: u32,
    pub negative_percent: u32,
    pub neutral_percent: u32,
    pub other_percent: u32,
}

impl AnalysisSummary {
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Positive => self.positive,
            Category::Negative => self.negative,
            Category::Neutral => self.neutral,
            Category::Other => self.other,
        }
    }

    pub fn percent(&self, category: Category) -> u32 {
        match category {
            Category::Positive => self.positive_percent,
            Category::Negative => self.negative_percent,
            Category::Neutral => self.neutral_percent,
            Category::Other => self.other_percent,
        }
    }
}

/// Aggregate scanning metrics over the whole batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisDetails {
    pub total_words_analyzed: usize,
    pub sentiment_words_found: usize,
    pub emojis_analyzed: usize,
    pub phrases_detected: usize,
    /// Number of scoring slices the batch was split into.
    pub batches: usize,
    pub processing_time_ms: u64,
}

/// Four buckets partitioning the input, plus summary and metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total: usize,
    pub positive: Vec<AnalyzedComment>,
    pub negative: Vec<AnalyzedComment>,
    pub neutral: Vec<AnalyzedComment>,
    pub other: Vec<AnalyzedComment>,
    pub summary: AnalysisSummary,
    pub analysis_details: AnalysisDetails,
    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn bucket(&self, category: Category) -> &[AnalyzedComment] {
        match category {
            Category::Positive => &self.positive,
            Category::Negative => &self.negative,
            Category::Neutral => &self.neutral,
            Category::Other => &self.other,
        }
    }

    /// All analysed comments, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &AnalyzedComment> {
        Category::ALL.into_iter().flat_map(move |c| self.bucket(c).iter())
    }
}

#[derive(Default)]
struct Buckets {
    positive: Vec<AnalyzedComment>,
    negative: Vec<AnalyzedComment>,
    neutral: Vec<AnalyzedComment>,
    other: Vec<AnalyzedComment>,
}

impl Buckets {
    fn push(&mut self, category: Category, item: AnalyzedComment) {
        match category {
            Category::Positive => self.positive.push(item),
            Category::Negative => self.negative.push(item),
            Category::Neutral => self.neutral.push(item),
            Category::Other => self.other.push(item),
        }
    }
}

impl SentimentAnalyzer {
    /// Score every comment and route it into exactly one bucket.
    ///
    /// Fails only on an empty batch. Individual comments always produce a result.
    pub async fn analyze_comments(
        &self,
        comments: Vec<Comment>,
    ) -> Result<AnalysisResult, AnalysisError> {
        ensure_metrics_described();

        if comments.is_empty() {
            counter!("analysis_empty_input_total").increment(1);
            return Err(AnalysisError::EmptyInput);
        }

        let started = Instant::now();
        let total = comments.len();
        let batch_size = self.config().batch_size.max(1);
        info!(target: "analysis", total, batch_size, "analyzing comment sentiment");

        let mut buckets = Buckets::default();
        let mut details = AnalysisDetails::default();
        let mut pending = comments.into_iter().enumerate();
        let mut processed = 0usize;

        loop {
            let slice: Vec<(usize, Comment)> = pending.by_ref().take(batch_size).collect();
            if slice.is_empty() {
                break;
            }
            details.batches += 1;
            processed += slice.len();

            for (index, comment) in slice {
                let sentiment = self.analyze_single_comment(&comment);

                details.total_words_analyzed += sentiment.details.total_words;
                details.sentiment_words_found +=
                    sentiment.details.positive_words + sentiment.details.negative_words;
                details.emojis_analyzed += sentiment.details.emojis;
                details.phrases_detected += sentiment.details.phrases;

                let category = Category::classify(sentiment.score, sentiment.confidence);
                counter!("comments_analyzed_total", "category" => category.as_str()).increment(1);
                buckets.push(
                    category,
                    AnalyzedComment {
                        index,
                        comment,
                        sentiment,
                    },
                );
            }
            counter!("analysis_batches_total").increment(1);
            debug!(target: "analysis", batch = details.batches, processed, total, "slice scored");

            if processed < total && self.config().yield_between_batches {
                tokio::task::yield_now().await;
            }
        }

        for bucket in [
            &mut buckets.positive,
            &mut buckets.negative,
            &mut buckets.neutral,
            &mut buckets.other,
        ] {
            sort_by_relevance(bucket);
        }

        let summary = AnalysisSummary {
            positive: buckets.positive.len(),
            negative: buckets.negative.len(),
            neutral: buckets.neutral.len(),
            other: buckets.other.len(),
            positive_percent: percent(buckets.positive.len(), total),
            negative_percent: percent(buckets.negative.len(), total),
            neutral_percent: percent(buckets.neutral.len(), total),
            other_percent: percent(buckets.other.len(), total),
        };

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        details.processing_time_ms = elapsed_ms.round() as u64;
        histogram!("analysis_duration_ms").record(elapsed_ms);

        info!(
            target: "analysis",
            positive = summary.positive,
            negative = summary.negative,
            neutral = summary.neutral,
            other = summary.other,
            words = details.total_words_analyzed,
            emojis = details.emojis_analyzed,
            phrases = details.phrases_detected,
            ms = details.processing_time_ms,
            "sentiment analysis complete"
        );

        Ok(AnalysisResult {
            total,
            positive: buckets.positive,
            negative: buckets.negative,
            neutral: buckets.neutral,
            other: buckets.other,
            summary,
            analysis_details: details,
            analyzed_at: Utc::now(),
        })
    }
}

/// Composite relevance used to order each bucket:
/// `confidence*2 + ln(likes+1)*0.3 + |score|*0.5`.
pub fn relevance_score(item: &AnalyzedComment) -> f64 {
    let s = &item.sentiment;
    s.confidence * 2.0 + ((item.comment.likes as f64) + 1.0).ln() * 0.3 + s.score.abs() * 0.5
}

/// Descending by relevance; stable, so ties keep input order.
pub fn sort_by_relevance(items: &mut [AnalyzedComment]) {
    items.sort_by(|a, b| {
        relevance_score(b)
            .partial_cmp(&relevance_score(a))
            .unwrap_or(Ordering::Equal)
    });
}

/// Top `count` comments of one category by `confidence * ln(likes + 2)`.
/// Ties keep input order, whatever order the items arrive in.
pub fn top_comments<'a, I>(comments: I, category: Category, count: usize) -> Vec<AnalyzedComment>
where
    I: IntoIterator<Item = &'a AnalyzedComment>,
{
    let mut picked: Vec<AnalyzedComment> = comments
        .into_iter()
        .filter(|c| c.sentiment.category == category)
        .cloned()
        .collect();
    picked.sort_by_key(|c| c.index);
    let key = |c: &AnalyzedComment| c.sentiment.confidence * ((c.comment.likes as f64) + 2.0).ln();
    picked.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    picked.truncate(count);
    picked
}

fn percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}
