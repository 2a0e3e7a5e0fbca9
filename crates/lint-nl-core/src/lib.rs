//! Core readability engine for lint-nl.
//!
//! Computes a LiNT readability score (0–100, higher = harder) and a 1–4
//! difficulty level for Dutch text, from sentences that an external
//! annotator has already tokenized, tagged, parsed, and entity-labeled.
//! Four linguistic features drive the score:
//!
//! - mean log word frequency of content words
//! - maximum syntactic dependency length
//! - content words per clause
//! - proportion of concrete nouns
//!
//! The engine is pure and synchronous: no I/O, no global state. Lexical
//! resources come in as an injected [`LexiconStore`]; the regression
//! coefficients are a replaceable, versioned input with the reference fit
//! as default.
//!
//! # Quick Start
//!
//! ```
//! use lint_nl_core::{
//!     AnalysisOptions, AnnotatedSentence, AnnotatedToken, Coefficients, CoarsePos,
//!     DepRelation, LexiconStore, analyze_document,
//! };
//!
//! let lexicon = LexiconStore::builder()
//!     .frequency("kat", 5.1)
//!     .frequency("slapen", 4.9)
//!     .build();
//!
//! // "De kat slaapt."
//! let sentence = AnnotatedSentence::new(vec![
//!     AnnotatedToken::new("De", "de", CoarsePos::Other).with_head(1, DepRelation::Other),
//!     AnnotatedToken::new("kat", "kat", CoarsePos::Noun).with_head(2, DepRelation::Subject),
//!     AnnotatedToken::new("slaapt", "slapen", CoarsePos::Verb)
//!         .with_head(2, DepRelation::Root)
//!         .with_fine_tag("WW|pv|tgw|ev"),
//! ]);
//!
//! let report = analyze_document(
//!     &[sentence],
//!     &lexicon,
//!     &Coefficients::default(),
//!     AnalysisOptions::default(),
//! )
//! .expect("well-formed annotation");
//!
//! assert_eq!(report.document.sentence_count, 1);
//! ```
#![deny(unsafe_code)]

pub mod analysis;

pub mod annotation;

pub mod config;

pub mod error;

pub mod lexicon;

pub mod preprocess;

pub mod scoring;

pub use analysis::{AnalysisOptions, ReadabilityReport, analyze_document};

pub use analysis::features::SentenceFeatureExtractor;

pub use annotation::{AnnotatedSentence, AnnotatedToken, CoarsePos, DepRelation, EntityLabel};

pub use config::{ModelConfig, ModelConfigLoader};

pub use error::{AnnotationError, AnnotationResult, ConfigError, ConfigResult};

pub use lexicon::{LexiconStore, LexiconTables, SemanticClass};

pub use scoring::{Coefficients, FeatureVector, ScoreResult, difficulty_level};
