//! Readability analysis over annotated documents.
//!
//! Decomposes the computation into per-sentence feature extraction,
//! document-level aggregation, scoring, and report assembly, orchestrated
//! by [`analyze_document`]. Callers can also drive the pieces individually
//! (for example to score sentences in parallel; extraction has no
//! cross-sentence state).

pub mod aggregate;
pub mod dependency;
pub mod detail;
pub mod features;
pub mod reports;

pub use reports::ReadabilityReport;

use crate::annotation::AnnotatedSentence;
use crate::error::AnnotationResult;
use crate::lexicon::LexiconStore;
use crate::scoring::{Coefficients, ScoreResult};

use features::SentenceFeatureExtractor;

/// Tunables for a document analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Resolve compound lemmas to their base word for the frequency
    /// feature.
    pub compound_frequency_adjustment: bool,
    /// How many least-frequent words to list per sentence in the report.
    pub least_frequent_words: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            compound_frequency_adjustment: true,
            least_frequent_words: 5,
        }
    }
}

/// Run the full analysis over a document.
///
/// Extracts features per sentence, scores each sentence, aggregates the
/// feature vectors, scores the document, and assembles the report. Fails
/// only on a malformed annotation; missing features flow through as
/// unavailable values.
#[tracing::instrument(skip_all, fields(sentences = sentences.len()))]
pub fn analyze_document(
    sentences: &[AnnotatedSentence],
    lexicon: &LexiconStore,
    coefficients: &Coefficients,
    options: AnalysisOptions,
) -> AnnotationResult<ReadabilityReport> {
    let extractor = SentenceFeatureExtractor::with_options(lexicon, options);
    let features = sentences
        .iter()
        .map(|sentence| extractor.extract(sentence))
        .collect::<AnnotationResult<Vec<_>>>()?;

    let scores: Vec<ScoreResult> = features
        .iter()
        .map(|f| coefficients.score(&f.feature_vector()))
        .collect();

    let document_features = aggregate::aggregate(&features);
    let document_score = coefficients.score(&document_features.feature_vector());

    tracing::debug!(
        document_score = ?document_score.score,
        document_level = ?document_score.level,
        "document analyzed"
    );

    Ok(detail::build_report(
        sentences,
        features,
        &scores,
        document_features,
        document_score,
        &options,
    ))
}
