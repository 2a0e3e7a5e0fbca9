//! Input data model: annotated tokens and sentences.
//!
//! The engine never tokenizes, tags, or parses. An external annotator
//! produces one [`AnnotatedSentence`] per input sentence and the engine
//! consumes it read-only. The structures here are plain value objects so
//! the scoring core stays decoupled from any particular parser's object
//! model.
//!
//! Head indices are 0-based positions within the sentence; the root token
//! is its own head. [`AnnotatedSentence::validate`] enforces the structural
//! contract and fails fast on a broken parse.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{AnnotationError, AnnotationResult};

/// Coarse part-of-speech tag from the annotator's closed tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum CoarsePos {
    /// Common noun.
    Noun,
    /// Proper noun.
    Propn,
    /// Lexical verb.
    Verb,
    /// Auxiliary verb.
    Aux,
    /// Adjective.
    Adj,
    /// Adverb.
    Adv,
    /// Punctuation.
    Punct,
    /// Any other tag (determiners, pronouns, adpositions, numerals, …).
    #[serde(other)]
    Other,
}

impl CoarsePos {
    /// Whether this tag marks a noun in the wide sense (common or proper).
    pub const fn is_noun(self) -> bool {
        matches!(self, Self::Noun | Self::Propn)
    }
}

/// Dependency relation label.
///
/// Only the relations the engine branches on are distinguished; everything
/// else collapses into [`DepRelation::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DepRelation {
    /// Sentence root.
    Root,
    /// Subject of a clause.
    Subject,
    /// Non-first member of a coordination.
    Conjunct,
    /// Attachment of a punctuation token.
    Punctuation,
    /// Any other relation.
    #[serde(other)]
    Other,
}

/// Named-entity label attached to a token, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EntityLabel {
    /// Organization or institution.
    Organization,
    /// Language name.
    Language,
    /// Law or contract.
    Law,
    /// Nationality, religious or political group.
    Norp,
    /// Person name.
    Person,
    /// Geographic or political location.
    Location,
    /// Any other entity type.
    #[serde(other)]
    Misc,
}

impl EntityLabel {
    /// Entity types that force a noun into the abstract class, regardless
    /// of its lexicon entry.
    pub const fn forces_abstract(self) -> bool {
        matches!(
            self,
            Self::Organization | Self::Language | Self::Law | Self::Norp
        )
    }
}

/// One token of an annotated sentence, as delivered by the annotator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnnotatedToken {
    /// Surface text.
    pub text: String,
    /// Lemma form.
    pub lemma: String,
    /// Coarse part-of-speech tag.
    pub pos: CoarsePos,
    /// Fine-grained tag string; carries the finiteness marker for verbs
    /// (CGN `WW|pv`).
    #[serde(default)]
    pub fine_tag: String,
    /// Index of the syntactic head within the sentence; self for the root.
    pub head: usize,
    /// Dependency relation to the head.
    pub relation: DepRelation,
    /// Whether this token is a non-first member of a conjunct chain.
    #[serde(default)]
    pub is_conjunct: bool,
    /// Named-entity label, if the token is part of an entity span.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityLabel>,
    /// Punctuation attached before the token (quotes, brackets).
    #[serde(default)]
    pub leading_punct: String,
    /// Punctuation attached after the token.
    #[serde(default)]
    pub trailing_punct: String,
}

impl AnnotatedToken {
    /// Create a token with the given surface form, lemma, and tag.
    ///
    /// The token starts out as its own head with relation
    /// [`DepRelation::Root`]; use the `with_*` methods to attach it.
    pub fn new(text: impl Into<String>, lemma: impl Into<String>, pos: CoarsePos) -> Self {
        Self {
            text: text.into(),
            lemma: lemma.into(),
            pos,
            fine_tag: String::new(),
            head: 0,
            relation: DepRelation::Root,
            is_conjunct: false,
            entity: None,
            leading_punct: String::new(),
            trailing_punct: String::new(),
        }
    }

    /// Set the head index and dependency relation.
    #[must_use]
    pub fn with_head(mut self, head: usize, relation: DepRelation) -> Self {
        self.head = head;
        self.relation = relation;
        self
    }

    /// Set the fine-grained tag string.
    #[must_use]
    pub fn with_fine_tag(mut self, tag: impl Into<String>) -> Self {
        self.fine_tag = tag.into();
        self
    }

    /// Mark the token as a non-first conjunct.
    #[must_use]
    pub const fn as_conjunct(mut self) -> Self {
        self.is_conjunct = true;
        self
    }

    /// Attach a named-entity label.
    #[must_use]
    pub const fn with_entity(mut self, entity: EntityLabel) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Attach leading/trailing punctuation strings.
    #[must_use]
    pub fn with_attached_punct(
        mut self,
        leading: impl Into<String>,
        trailing: impl Into<String>,
    ) -> Self {
        self.leading_punct = leading.into();
        self.trailing_punct = trailing.into();
        self
    }

    /// Whether the token is punctuation, by tag or by attachment relation.
    pub fn is_punctuation(&self) -> bool {
        self.pos == CoarsePos::Punct || self.relation == DepRelation::Punctuation
    }

    /// Lowercased lemma, the key form for all lexicon lookups.
    pub fn lemma_key(&self) -> String {
        self.lemma.to_lowercase()
    }
}

/// An ordered sequence of annotated tokens forming one sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnnotatedSentence {
    /// Tokens in sentence order.
    tokens: Vec<AnnotatedToken>,
}

impl AnnotatedSentence {
    /// Wrap a token sequence. No validation happens here; call
    /// [`AnnotatedSentence::validate`] (the extractor does) before analysis.
    pub fn new(tokens: Vec<AnnotatedToken>) -> Self {
        Self { tokens }
    }

    /// The tokens in sentence order.
    pub fn tokens(&self) -> &[AnnotatedToken] {
        &self.tokens
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the sentence has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Reconstruct the surface text from the tokens.
    ///
    /// Attached punctuation is glued to its token; standalone punctuation
    /// tokens are glued to the preceding word.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            if !out.is_empty() && !token.is_punctuation() {
                out.push(' ');
            }
            out.push_str(&token.leading_punct);
            out.push_str(&token.text);
            out.push_str(&token.trailing_punct);
        }
        out
    }

    /// Check the structural contract of the annotation.
    ///
    /// Verifies that the sentence is non-empty, every head index is in
    /// bounds, exactly one token is its own head, and conjunct
    /// back-references terminate. A violation is a collaborator-side
    /// contract break and aborts analysis of the sentence.
    pub fn validate(&self) -> AnnotationResult<()> {
        if self.tokens.is_empty() {
            return Err(AnnotationError::EmptySentence);
        }

        let len = self.tokens.len();
        let mut root: Option<usize> = None;
        for (i, token) in self.tokens.iter().enumerate() {
            if token.head >= len {
                return Err(AnnotationError::HeadOutOfBounds {
                    token: i,
                    text: token.text.clone(),
                    head: token.head,
                    len,
                });
            }
            if token.head == i {
                match root {
                    None => root = Some(i),
                    Some(first) => {
                        return Err(AnnotationError::MultipleRoots { first, second: i });
                    }
                }
            }
        }
        if root.is_none() {
            return Err(AnnotationError::MissingRoot);
        }

        // Every conjunct chain must reach a non-conjunct first member.
        for (i, token) in self.tokens.iter().enumerate() {
            if token.is_conjunct {
                self.first_conjunct(i)?;
            }
        }

        Ok(())
    }

    /// Walk the conjunct chain backward from `index` to its first member.
    ///
    /// The first conjunct of a chain is the one *not* flagged `is_conjunct`;
    /// each later member points at an earlier one through its head. The walk
    /// is iterative with a visited set so a malformed cyclic chain is
    /// reported instead of looping.
    pub(crate) fn first_conjunct(&self, index: usize) -> AnnotationResult<usize> {
        let mut current = index;
        let mut visited = vec![false; self.tokens.len()];
        while self.tokens[current].is_conjunct {
            if visited[current] {
                return Err(AnnotationError::ConjunctCycle {
                    token: index,
                    text: self.tokens[index].text.clone(),
                });
            }
            visited[current] = true;
            current = self.tokens[current].head;
        }
        Ok(current)
    }
}

impl From<Vec<AnnotatedToken>> for AnnotatedSentence {
    fn from(tokens: Vec<AnnotatedToken>) -> Self {
        Self::new(tokens)
    }
}
