//! Document-level feature aggregation.

use super::reports::{DocumentFeatures, SentenceFeatures};

/// Combine per-sentence features into document-level means.
///
/// Each feature averages independently over the sentences where it is
/// defined; a sentence missing one feature still contributes its others.
/// A feature no sentence defines stays `None` and will make the document
/// score unavailable.
#[tracing::instrument(skip_all, fields(sentences = features.len()))]
pub fn aggregate(features: &[SentenceFeatures]) -> DocumentFeatures {
    DocumentFeatures {
        mean_log_word_frequency: mean_of(features, |f| f.mean_log_word_frequency),
        mean_max_dependency_length: mean_of(features, |f| {
            f.max_dependency_length.map(|v| v as f64)
        }),
        mean_content_words_per_clause: mean_of(features, |f| f.content_words_per_clause),
        mean_proportion_concrete_nouns: mean_of(features, |f| f.proportion_concrete_nouns),
        sentence_count: features.len(),
    }
}

fn mean_of(
    features: &[SentenceFeatures],
    value: impl Fn(&SentenceFeatures) -> Option<f64>,
) -> Option<f64> {
    let defined: Vec<f64> = features.iter().filter_map(value).collect();
    if defined.is_empty() {
        None
    } else {
        Some(defined.iter().sum::<f64>() / defined.len() as f64)
    }
}
