//! Assembly of the detailed readability report.
//!
//! Pure shaping: the pieces computed upstream are combined into the public
//! [`ReadabilityReport`]. Upstream unavailability arrives as `None` fields
//! and stays that way; assembly itself never fails.

use crate::annotation::AnnotatedSentence;
use crate::scoring::ScoreResult;

use super::AnalysisOptions;
use super::reports::{
    DocumentFeatures, DocumentStats, ReadabilityReport, SentenceFeatures, SentenceStats,
};

/// Combine per-sentence and document-level results into the report.
///
/// `sentences`, `features`, and `scores` are parallel slices in document
/// order.
pub fn build_report(
    sentences: &[AnnotatedSentence],
    features: Vec<SentenceFeatures>,
    scores: &[ScoreResult],
    document_features: DocumentFeatures,
    document_score: ScoreResult,
    options: &AnalysisOptions,
) -> ReadabilityReport {
    let scored: Vec<f64> = scores.iter().filter_map(|s| s.score).collect();
    let min_sentence_score = scored.iter().copied().reduce(f64::min);
    let max_sentence_score = scored.iter().copied().reduce(f64::max);

    let sentence_stats = sentences
        .iter()
        .zip(features)
        .zip(scores)
        .map(|((sentence, features), score)| SentenceStats {
            text: sentence.text(),
            score: score.score,
            level: score.level,
            least_frequent_words: features.least_frequent(options.least_frequent_words),
            features,
        })
        .collect();

    ReadabilityReport {
        document: DocumentStats {
            sentence_count: document_features.sentence_count,
            score: document_score.score,
            level: document_score.level,
            min_sentence_score,
            max_sentence_score,
            features: document_features,
            compound_frequency_adjustment: options.compound_frequency_adjustment,
        },
        sentences: sentence_stats,
    }
}
