//! Read-only lexical resource store.
//!
//! Holds the five lookup tables the engine needs: word frequencies (Zipf
//! scale), the frequency skip-list, the compound → base-word table, the
//! noun semantic-type lexicon, and the manner-adverb set. The tables are
//! supplied by an external collaborator at process start; this module only
//! defines the query contract and the in-memory representation.
//!
//! The store is immutable after construction and `Send + Sync`, so one
//! instance can be shared by reference across any number of concurrent
//! analyses without locking. All lookups are case-insensitive on the lemma
//! form; keys are lowercased once at insert time.

use std::collections::{HashMap, HashSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Semantic class assigned to a noun by the lexicon.
///
/// Nouns absent from the lexicon are "unknown", which is the absence of a
/// [`NounInfo`] rather than a class of its own: unknown nouns are reported
/// but never enter the concreteness proportion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SemanticClass {
    /// Concrete noun (tangible referent).
    Concrete,
    /// Abstract noun.
    Abstract,
    /// Listed in the lexicon but without a decided class.
    Undefined,
}

/// Lexicon entry for a noun.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NounInfo {
    /// Fine-grained semantic type from the lexicon (e.g. "artefact").
    pub semantic_type: String,
    /// Coarse semantic class used by the concreteness feature.
    pub class: SemanticClass,
}

/// The five lookup tables as a serde-friendly bundle.
///
/// This is the hand-over format for the lexicon collaborator: deserialize
/// from wherever the tables live and convert into a [`LexiconStore`]. The
/// compound table must map plural compound forms to the *singular* base
/// word (the upstream word list enumerates singular and plural keys side
/// by side).
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LexiconTables {
    /// Word → Zipf frequency.
    pub frequencies: HashMap<String, f64>,
    /// Lemmas excluded from the frequency feature.
    pub skip_list: Vec<String>,
    /// Compound (singular or plural) → singular base word.
    pub compounds: HashMap<String, String>,
    /// Noun → semantic type and class.
    pub nouns: HashMap<String, NounInfo>,
    /// Adverb lemmas that count as content words.
    pub manner_adverbs: Vec<String>,
}

/// Immutable store over the five lexical lookup tables.
#[derive(Debug, Clone, Default)]
pub struct LexiconStore {
    frequencies: HashMap<String, f64>,
    skip_list: HashSet<String>,
    compounds: HashMap<String, String>,
    nouns: HashMap<String, NounInfo>,
    manner_adverbs: HashSet<String>,
}

impl LexiconStore {
    /// Start building a store, mostly useful for tests and small fixtures.
    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::default()
    }

    /// Zipf frequency of a lemma, or `None` when the corpus has no entry.
    pub fn frequency(&self, lemma: &str) -> Option<f64> {
        self.frequencies.get(&lemma.to_lowercase()).copied()
    }

    /// Whether the lemma is on the frequency skip-list.
    pub fn is_skipped(&self, lemma: &str) -> bool {
        self.skip_list.contains(&lemma.to_lowercase())
    }

    /// Resolve a compound to its singular base word; identity otherwise.
    pub fn base_word<'a>(&'a self, lemma: &'a str) -> &'a str {
        self.compounds
            .get(&lemma.to_lowercase())
            .map_or(lemma, String::as_str)
    }

    /// Semantic information for a noun, or `None` when unknown.
    pub fn noun_info(&self, lemma: &str) -> Option<&NounInfo> {
        self.nouns.get(&lemma.to_lowercase())
    }

    /// Whether the lemma is a manner adverb.
    pub fn is_manner_adverb(&self, lemma: &str) -> bool {
        self.manner_adverbs.contains(&lemma.to_lowercase())
    }
}

impl From<LexiconTables> for LexiconStore {
    fn from(tables: LexiconTables) -> Self {
        let mut builder = LexiconBuilder::default();
        for (word, zipf) in tables.frequencies {
            builder = builder.frequency(word, zipf);
        }
        for word in tables.skip_list {
            builder = builder.skip(word);
        }
        for (compound, base) in tables.compounds {
            builder = builder.compound(compound, base);
        }
        for (word, info) in tables.nouns {
            builder = builder.noun(word, info.semantic_type, info.class);
        }
        for word in tables.manner_adverbs {
            builder = builder.manner_adverb(word);
        }
        builder.build()
    }
}

/// Builder for [`LexiconStore`]; lowercases every key at insert time.
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    store: LexiconStore,
}

impl LexiconBuilder {
    /// Add a word → Zipf frequency entry.
    #[must_use]
    pub fn frequency(mut self, word: impl Into<String>, zipf: f64) -> Self {
        self.store.frequencies.insert(lower(word), zipf);
        self
    }

    /// Add a lemma to the frequency skip-list.
    #[must_use]
    pub fn skip(mut self, word: impl Into<String>) -> Self {
        self.store.skip_list.insert(lower(word));
        self
    }

    /// Map a compound (any of its forms) to its singular base word.
    #[must_use]
    pub fn compound(mut self, compound: impl Into<String>, base: impl Into<String>) -> Self {
        self.store.compounds.insert(lower(compound), lower(base));
        self
    }

    /// Add a noun with its semantic type and class.
    #[must_use]
    pub fn noun(
        mut self,
        word: impl Into<String>,
        semantic_type: impl Into<String>,
        class: SemanticClass,
    ) -> Self {
        self.store.nouns.insert(
            lower(word),
            NounInfo {
                semantic_type: semantic_type.into(),
                class,
            },
        );
        self
    }

    /// Add a manner adverb.
    #[must_use]
    pub fn manner_adverb(mut self, word: impl Into<String>) -> Self {
        self.store.manner_adverbs.insert(lower(word));
        self
    }

    /// Finish building.
    pub fn build(self) -> LexiconStore {
        self.store
    }
}

fn lower(word: impl Into<String>) -> String {
    word.into().to_lowercase()
}
