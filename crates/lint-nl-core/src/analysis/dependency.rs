//! Syntactic dependency length (SDL).
//!
//! The dependency length of a token is the number of intervening tokens
//! between it and its syntactic head, with punctuation excluded from the
//! count. Adjacent pairs have length 0.
//!
//! Three rewrites apply before measuring:
//!
//! 1. Punctuation tokens keep a fixed length of 0 and are never counted as
//!    interveners.
//! 2. A conjunct takes the head of the *first* conjunct of its chain, so a
//!    coordination collapses to one shared head instead of a chain of
//!    pairwise links.
//! 3. A subject whose head belongs to a conjunct chain is measured against
//!    *every* member of that chain, and its length is the maximum.

use std::collections::HashMap;

use crate::annotation::{AnnotatedSentence, DepRelation};
use crate::error::AnnotationResult;

use super::reports::TokenDependency;

/// Compute per-token dependency lengths and the sentence maximum.
///
/// The maximum is `None` when the sentence has at most one non-punctuation
/// token: with no head-dependent pair, the feature does not exist.
pub fn dependency_lengths(
    sentence: &AnnotatedSentence,
) -> AnnotationResult<(Vec<TokenDependency>, Option<usize>)> {
    let tokens = sentence.tokens();
    let chains = conjunct_chains(sentence)?;

    let mut lengths = Vec::with_capacity(tokens.len());
    let mut max: Option<usize> = None;

    for (i, token) in tokens.iter().enumerate() {
        if token.is_punctuation() {
            lengths.push(TokenDependency {
                token: token.text.to_lowercase(),
                length: 0,
                heads: vec![tokens[token.head].text.to_lowercase()],
            });
            continue;
        }

        let heads = effective_heads(sentence, &chains, i)?;
        let length = heads
            .iter()
            .map(|&h| intervening(sentence, i, h))
            .max()
            .unwrap_or(0);

        max = Some(max.map_or(length, |m| m.max(length)));
        lengths.push(TokenDependency {
            token: token.text.to_lowercase(),
            length,
            heads: heads
                .into_iter()
                .map(|h| tokens[h].text.to_lowercase())
                .collect(),
        });
    }

    let non_punct = tokens.iter().filter(|t| !t.is_punctuation()).count();
    let max = if non_punct <= 1 { None } else { max };

    Ok((lengths, max))
}

/// Group conjunct tokens by the first conjunct of their chain.
///
/// The first conjunct itself is included as a member, so a chain's entry
/// lists every token that shares the coordination.
fn conjunct_chains(sentence: &AnnotatedSentence) -> AnnotationResult<HashMap<usize, Vec<usize>>> {
    let mut chains: HashMap<usize, Vec<usize>> = HashMap::new();
    for (i, token) in sentence.tokens().iter().enumerate() {
        if token.is_conjunct {
            let first = sentence.first_conjunct(i)?;
            chains.entry(first).or_insert_with(|| vec![first]).push(i);
        }
    }
    Ok(chains)
}

/// Resolve the effective head set of a non-punctuation token.
fn effective_heads(
    sentence: &AnnotatedSentence,
    chains: &HashMap<usize, Vec<usize>>,
    index: usize,
) -> AnnotationResult<Vec<usize>> {
    let tokens = sentence.tokens();
    let token = &tokens[index];

    if token.is_conjunct {
        let first = sentence.first_conjunct(index)?;
        return Ok(vec![tokens[first].head]);
    }

    if token.relation == DepRelation::Subject {
        let head = token.head;
        let first = if tokens[head].is_conjunct {
            sentence.first_conjunct(head)?
        } else {
            head
        };
        if let Some(members) = chains.get(&first) {
            return Ok(members.clone());
        }
    }

    Ok(vec![token.head])
}

/// Count non-punctuation tokens strictly between two positions.
fn intervening(sentence: &AnnotatedSentence, a: usize, b: usize) -> usize {
    if a == b {
        return 0;
    }
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    sentence.tokens()[lo + 1..hi]
        .iter()
        .filter(|t| !t.is_punctuation())
        .count()
}
