//! Report structs for readability analysis.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so a
//! consumer (display layer, service, notebook) can take the report as JSON
//! without any extra shaping. Unavailable values are `None` and skipped
//! during serialization; the report is always structurally complete.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scoring::FeatureVector;

/// Per-word Zipf frequency diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WordFrequency {
    /// The word (lowercased surface form).
    pub word: String,
    /// The lemma the frequency was looked up for, after compound
    /// resolution.
    pub looked_up: String,
    /// Zipf frequency (log10 occurrences per billion words).
    pub zipf: f64,
    /// Whether the word counts as uncommon (Zipf below 3). Display only;
    /// not part of the formula.
    pub uncommon: bool,
}

/// Dependency length of one token, with its effective head set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TokenDependency {
    /// The token (lowercased surface form).
    pub token: String,
    /// Number of intervening non-punctuation tokens to the farthest
    /// effective head.
    pub length: usize,
    /// Effective heads after conjunct-chain rewriting (lowercased surface
    /// forms). Usually one; a subject of a conjoined root has several.
    pub heads: Vec<String>,
}

/// Word- and token-level evidence backing the four features.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SentenceDiagnostics {
    /// All content words, in sentence order.
    pub content_words: Vec<String>,
    /// Nouns classified concrete.
    pub concrete_nouns: Vec<String>,
    /// Nouns classified abstract (by lexicon or entity override).
    pub abstract_nouns: Vec<String>,
    /// Nouns listed in the lexicon without a decided class.
    pub undefined_nouns: Vec<String>,
    /// Nouns absent from the lexicon; excluded from the proportion.
    pub unknown_nouns: Vec<String>,
    /// Finite verbs (clause markers).
    pub finite_verbs: Vec<String>,
    /// Per-token dependency lengths for all non-punctuation tokens,
    /// plus punctuation tokens at fixed length 0.
    pub dependency_lengths: Vec<TokenDependency>,
    /// Zipf frequencies of the words entering the frequency feature.
    pub word_frequencies: Vec<WordFrequency>,
}

/// The four features of one sentence plus their diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SentenceFeatures {
    /// Mean log (Zipf) frequency of qualifying content words.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_log_word_frequency: Option<f64>,
    /// Maximum syntactic dependency length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_dependency_length: Option<usize>,
    /// Content words per clause (finite verb).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_words_per_clause: Option<f64>,
    /// Concrete nouns as a share of classifiable nouns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proportion_concrete_nouns: Option<f64>,
    /// Supporting evidence.
    pub diagnostics: SentenceDiagnostics,
}

impl SentenceFeatures {
    /// The feature values in scoring shape.
    pub fn feature_vector(&self) -> FeatureVector {
        FeatureVector {
            frequency: self.mean_log_word_frequency,
            dependency_length: self.max_dependency_length.map(|v| v as f64),
            density: self.content_words_per_clause,
            concrete: self.proportion_concrete_nouns,
        }
    }

    /// The `n` least frequent words of the sentence, rarest first.
    pub fn least_frequent(&self, n: usize) -> Vec<WordFrequency> {
        let mut words = self.diagnostics.word_frequencies.clone();
        words.sort_by(|a, b| a.zipf.total_cmp(&b.zipf));
        words.truncate(n);
        words
    }
}

/// Document-level feature means.
///
/// Each mean covers only the sentences where that feature is defined; a
/// feature no sentence defines stays `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DocumentFeatures {
    /// Mean of the sentence-level mean log word frequencies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_log_word_frequency: Option<f64>,
    /// Mean of the sentence-level maximum dependency lengths.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_max_dependency_length: Option<f64>,
    /// Mean of the sentence-level content-word densities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_content_words_per_clause: Option<f64>,
    /// Mean of the sentence-level concrete-noun proportions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_proportion_concrete_nouns: Option<f64>,
    /// Total number of sentences, regardless of feature availability.
    pub sentence_count: usize,
}

impl DocumentFeatures {
    /// The document feature values in scoring shape.
    pub fn feature_vector(&self) -> FeatureVector {
        FeatureVector {
            frequency: self.mean_log_word_frequency,
            dependency_length: self.mean_max_dependency_length,
            density: self.mean_content_words_per_clause,
            concrete: self.mean_proportion_concrete_nouns,
        }
    }
}

/// Document-level summary of a readability analysis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentStats {
    /// Number of sentences analyzed.
    pub sentence_count: usize,
    /// Document readability score (from the document feature vector).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Document difficulty level 1–4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// Lowest sentence score in the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_sentence_score: Option<f64>,
    /// Highest sentence score in the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_sentence_score: Option<f64>,
    /// Document-level feature means.
    pub features: DocumentFeatures,
    /// Whether compound lemmas were resolved to their base word for the
    /// frequency feature.
    pub compound_frequency_adjustment: bool,
}

/// Per-sentence entry of the report.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SentenceStats {
    /// Sentence text.
    pub text: String,
    /// Sentence readability score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Sentence difficulty level 1–4.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// The least frequent words of the sentence, rarest first.
    pub least_frequent_words: Vec<WordFrequency>,
    /// Feature values and diagnostics.
    pub features: SentenceFeatures,
}

/// The complete readability report for one document.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityReport {
    /// Document-level stats.
    pub document: DocumentStats,
    /// Per-sentence stats, in document order.
    pub sentences: Vec<SentenceStats>,
}
