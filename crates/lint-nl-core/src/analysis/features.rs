//! Per-sentence feature extraction.
//!
//! Turns one annotated sentence into the four feature values the scoring
//! formula consumes, plus the word-level diagnostics that make the numbers
//! auditable. Every policy here is deterministic; a feature that cannot be
//! computed is `None`, never an error.

use crate::annotation::{AnnotatedSentence, AnnotatedToken, CoarsePos, EntityLabel};
use crate::error::AnnotationResult;
use crate::lexicon::{LexiconStore, SemanticClass};

use super::AnalysisOptions;
use super::dependency;
use super::reports::{SentenceDiagnostics, SentenceFeatures, WordFrequency};

/// Fine-tag marker for finite (person/tense-bearing) verb forms (CGN).
pub const FINITE_VERB_MARKER: &str = "WW|pv";

/// Zipf frequency below which a word is flagged uncommon (display only).
pub const UNCOMMON_ZIPF_THRESHOLD: f64 = 3.0;

/// Extracts [`SentenceFeatures`] from annotated sentences.
///
/// Holds a shared reference to the lexicon; one extractor can serve any
/// number of sentences, and independent extractors over the same store can
/// run concurrently.
#[derive(Debug, Clone)]
pub struct SentenceFeatureExtractor<'a> {
    lexicon: &'a LexiconStore,
    options: AnalysisOptions,
}

impl<'a> SentenceFeatureExtractor<'a> {
    /// Create an extractor with default options.
    pub fn new(lexicon: &'a LexiconStore) -> Self {
        Self::with_options(lexicon, AnalysisOptions::default())
    }

    /// Create an extractor with explicit options.
    pub const fn with_options(lexicon: &'a LexiconStore, options: AnalysisOptions) -> Self {
        Self { lexicon, options }
    }

    /// Compute the four features and their diagnostics for one sentence.
    ///
    /// Validates the annotation first and fails fast on a structural
    /// violation; extraction itself cannot fail.
    #[tracing::instrument(skip_all, fields(tokens = sentence.len()))]
    pub fn extract(&self, sentence: &AnnotatedSentence) -> AnnotationResult<SentenceFeatures> {
        sentence.validate()?;
        let tokens = sentence.tokens();

        // The content-word set feeds both the frequency and the density
        // feature; determine it once.
        let content_words: Vec<usize> = (0..tokens.len())
            .filter(|&i| self.is_content_word(&tokens[i]))
            .collect();
        let finite_verbs: Vec<usize> = (0..tokens.len())
            .filter(|&i| is_finite_verb(&tokens[i]))
            .collect();

        let word_frequencies = self.word_frequencies(tokens, &content_words);
        let mean_log_word_frequency = mean(word_frequencies.iter().map(|w| w.zipf));

        let (dependency_lengths, max_dependency_length) =
            dependency::dependency_lengths(sentence)?;

        let content_words_per_clause = if finite_verbs.is_empty() {
            None
        } else {
            Some(content_words.len() as f64 / finite_verbs.len() as f64)
        };

        let nouns = self.classify_nouns(tokens);
        let classifiable = nouns.concrete.len() + nouns.abstract_.len() + nouns.undefined.len();
        let proportion_concrete_nouns = if classifiable == 0 {
            None
        } else {
            Some(nouns.concrete.len() as f64 / classifiable as f64)
        };

        tracing::debug!(
            content_words = content_words.len(),
            finite_verbs = finite_verbs.len(),
            max_sdl = ?max_dependency_length,
            "sentence features extracted"
        );

        Ok(SentenceFeatures {
            mean_log_word_frequency,
            max_dependency_length,
            content_words_per_clause,
            proportion_concrete_nouns,
            diagnostics: SentenceDiagnostics {
                content_words: surface(tokens, &content_words),
                concrete_nouns: nouns.concrete,
                abstract_nouns: nouns.abstract_,
                undefined_nouns: nouns.undefined,
                unknown_nouns: nouns.unknown,
                finite_verbs: surface(tokens, &finite_verbs),
                dependency_lengths,
                word_frequencies,
            },
        })
    }

    /// A token is a content word iff it is a noun, proper noun, lexical
    /// verb, or adjective, or its lemma is a manner adverb. Auxiliaries
    /// carry their own coarse tag and so never qualify as lexical verbs.
    fn is_content_word(&self, token: &AnnotatedToken) -> bool {
        matches!(
            token.pos,
            CoarsePos::Noun | CoarsePos::Propn | CoarsePos::Verb | CoarsePos::Adj
        ) || self.lexicon.is_manner_adverb(&token.lemma)
    }

    /// Zipf frequencies for the content words that qualify for the
    /// frequency feature: proper nouns are excluded, compounds resolve to
    /// their base word (unless disabled), skipped lemmas drop out, and so
    /// do lemmas the corpus has no entry for.
    fn word_frequencies(
        &self,
        tokens: &[AnnotatedToken],
        content_words: &[usize],
    ) -> Vec<WordFrequency> {
        let mut frequencies = Vec::new();
        for &i in content_words {
            let token = &tokens[i];
            if token.pos == CoarsePos::Propn {
                continue;
            }
            let lemma = token.lemma_key();
            let looked_up = if self.options.compound_frequency_adjustment {
                self.lexicon.base_word(&lemma).to_string()
            } else {
                lemma
            };
            if self.lexicon.is_skipped(&looked_up) {
                continue;
            }
            let Some(zipf) = self.lexicon.frequency(&looked_up) else {
                continue;
            };
            frequencies.push(WordFrequency {
                word: token.text.to_lowercase(),
                looked_up,
                zipf,
                uncommon: zipf < UNCOMMON_ZIPF_THRESHOLD,
            });
        }
        frequencies
    }

    /// Classify every noun into concrete / abstract / undefined / unknown.
    ///
    /// The entity override wins over the lexicon; the lexicon is consulted
    /// on the lemma as-is, without compound resolution.
    fn classify_nouns(&self, tokens: &[AnnotatedToken]) -> NounClassification {
        let mut nouns = NounClassification::default();
        for token in tokens {
            if !token.pos.is_noun() {
                continue;
            }
            let word = token.text.to_lowercase();
            if token.entity.is_some_and(EntityLabel::forces_abstract) {
                nouns.abstract_.push(word);
                continue;
            }
            match self.lexicon.noun_info(&token.lemma_key()) {
                Some(info) => match info.class {
                    SemanticClass::Concrete => nouns.concrete.push(word),
                    SemanticClass::Abstract => nouns.abstract_.push(word),
                    SemanticClass::Undefined => nouns.undefined.push(word),
                },
                None => nouns.unknown.push(word),
            }
        }
        nouns
    }
}

/// Whether the fine tag marks a finite verb form.
pub fn is_finite_verb(token: &AnnotatedToken) -> bool {
    token.fine_tag.contains(FINITE_VERB_MARKER)
}

#[derive(Default)]
struct NounClassification {
    concrete: Vec<String>,
    abstract_: Vec<String>,
    undefined: Vec<String>,
    unknown: Vec<String>,
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}

fn surface(tokens: &[AnnotatedToken], indices: &[usize]) -> Vec<String> {
    indices
        .iter()
        .map(|&i| tokens[i].text.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::DepRelation;

    fn lexicon() -> LexiconStore {
        LexiconStore::builder()
            .frequency("sfeervol", 3.21)
            .frequency("hart", 5.2)
            .frequency("stad", 5.68)
            .frequency("pad", 4.9)
            .frequency("fietspad", 2.1)
            .frequency("graag", 5.1)
            .compound("fietspad", "pad")
            .noun("stad", "place", SemanticClass::Concrete)
            .noun("hart", "body", SemanticClass::Undefined)
            .noun("idee", "mental", SemanticClass::Abstract)
            .noun("pad", "place", SemanticClass::Concrete)
            .manner_adverb("graag")
            .build()
    }

    fn token(text: &str, lemma: &str, pos: CoarsePos, head: usize) -> AnnotatedToken {
        AnnotatedToken::new(text, lemma, pos).with_head(head, DepRelation::Other)
    }

    /// "De Oudegracht is het sfeervolle hart van de stad."
    fn oudegracht() -> AnnotatedSentence {
        AnnotatedSentence::new(vec![
            token("De", "de", CoarsePos::Other, 1),
            token("Oudegracht", "oudegracht", CoarsePos::Propn, 5),
            token("is", "zijn", CoarsePos::Aux, 5).with_fine_tag("WW|pv|tgw|ev"),
            token("het", "het", CoarsePos::Other, 5),
            token("sfeervolle", "sfeervol", CoarsePos::Adj, 5),
            AnnotatedToken::new("hart", "hart", CoarsePos::Noun).with_head(5, DepRelation::Root),
            token("van", "van", CoarsePos::Other, 8),
            token("de", "de", CoarsePos::Other, 8),
            token("stad", "stad", CoarsePos::Noun, 5),
            token(".", ".", CoarsePos::Punct, 5),
        ])
    }

    #[test]
    fn worked_example_features() {
        let lexicon = lexicon();
        let features = SentenceFeatureExtractor::new(&lexicon)
            .extract(&oudegracht())
            .unwrap();

        // Oudegracht is a proper noun: a content word, but not part of the
        // frequency feature.
        assert_eq!(
            features.diagnostics.content_words,
            vec!["oudegracht", "sfeervolle", "hart", "stad"]
        );
        let expected_mean = (3.21 + 5.2 + 5.68) / 3.0;
        assert!((features.mean_log_word_frequency.unwrap() - expected_mean).abs() < 1e-9);

        assert_eq!(features.max_dependency_length, Some(3));
        assert_eq!(features.content_words_per_clause, Some(4.0));
        assert_eq!(features.diagnostics.finite_verbs, vec!["is"]);

        // stad concrete, hart undefined, oudegracht unknown.
        assert_eq!(features.diagnostics.concrete_nouns, vec!["stad"]);
        assert_eq!(features.diagnostics.undefined_nouns, vec!["hart"]);
        assert_eq!(features.diagnostics.unknown_nouns, vec!["oudegracht"]);
        assert_eq!(features.proportion_concrete_nouns, Some(0.5));
    }

    #[test]
    fn single_word_question_has_no_features() {
        let lexicon = lexicon();
        let sentence = AnnotatedSentence::new(vec![
            AnnotatedToken::new("Waarom", "waarom", CoarsePos::Adv),
            token("?", "?", CoarsePos::Punct, 0),
        ]);
        let features = SentenceFeatureExtractor::new(&lexicon)
            .extract(&sentence)
            .unwrap();
        assert_eq!(features.mean_log_word_frequency, None);
        assert_eq!(features.max_dependency_length, None);
        assert_eq!(features.content_words_per_clause, None);
        assert_eq!(features.proportion_concrete_nouns, None);
    }

    #[test]
    fn manner_adverb_is_a_content_word() {
        let lexicon = lexicon();
        // "Jan zwemt graag": graag is a manner adverb, zo would not be.
        let sentence = AnnotatedSentence::new(vec![
            token("Jan", "jan", CoarsePos::Propn, 1),
            AnnotatedToken::new("zwemt", "zwemmen", CoarsePos::Verb)
                .with_head(1, DepRelation::Root)
                .with_fine_tag("WW|pv|tgw|ev"),
            token("graag", "graag", CoarsePos::Adv, 1),
        ]);
        let features = SentenceFeatureExtractor::new(&lexicon)
            .extract(&sentence)
            .unwrap();
        assert_eq!(
            features.diagnostics.content_words,
            vec!["jan", "zwemt", "graag"]
        );
        assert_eq!(features.content_words_per_clause, Some(3.0));
    }

    #[test]
    fn plain_adverb_and_auxiliary_are_not_content_words() {
        let lexicon = lexicon();
        let sentence = AnnotatedSentence::new(vec![
            token("zo", "zo", CoarsePos::Adv, 1),
            AnnotatedToken::new("is", "zijn", CoarsePos::Aux)
                .with_head(1, DepRelation::Root)
                .with_fine_tag("WW|pv|tgw|ev"),
            token("stil", "stil", CoarsePos::Adj, 1),
        ]);
        let features = SentenceFeatureExtractor::new(&lexicon)
            .extract(&sentence)
            .unwrap();
        assert_eq!(features.diagnostics.content_words, vec!["stil"]);
    }

    #[test]
    fn zero_finite_verbs_leaves_density_unavailable() {
        let lexicon = lexicon();
        let sentence = AnnotatedSentence::new(vec![
            token("de", "de", CoarsePos::Other, 1),
            AnnotatedToken::new("stad", "stad", CoarsePos::Noun).with_head(1, DepRelation::Root),
        ]);
        let features = SentenceFeatureExtractor::new(&lexicon)
            .extract(&sentence)
            .unwrap();
        assert_eq!(features.content_words_per_clause, None);
        // The noun is still classified.
        assert_eq!(features.proportion_concrete_nouns, Some(1.0));
    }

    #[test]
    fn compound_resolves_to_base_for_frequency_only() {
        let lexicon = lexicon();
        // fietspad has its own (rare) corpus entry, but the compound table
        // points to pad; the noun lexicon is consulted for fietspad itself.
        let sentence = AnnotatedSentence::new(vec![
            token("het", "het", CoarsePos::Other, 1),
            AnnotatedToken::new("fietspad", "fietspad", CoarsePos::Noun)
                .with_head(1, DepRelation::Root),
        ]);
        let features = SentenceFeatureExtractor::new(&lexicon)
            .extract(&sentence)
            .unwrap();
        let freq = &features.diagnostics.word_frequencies;
        assert_eq!(freq.len(), 1);
        assert_eq!(freq[0].looked_up, "pad");
        assert_eq!(freq[0].zipf, 4.9);
        // Classification sees the surface lemma, which is not in the noun
        // table, so the noun is unknown despite pad being concrete.
        assert_eq!(features.diagnostics.unknown_nouns, vec!["fietspad"]);
        assert_eq!(features.proportion_concrete_nouns, None);
    }

    #[test]
    fn compound_adjustment_can_be_disabled() {
        let lexicon = lexicon();
        let options = AnalysisOptions {
            compound_frequency_adjustment: false,
            ..AnalysisOptions::default()
        };
        let sentence = AnnotatedSentence::new(vec![AnnotatedToken::new(
            "fietspad",
            "fietspad",
            CoarsePos::Noun,
        )]);
        let features = SentenceFeatureExtractor::with_options(&lexicon, options)
            .extract(&sentence)
            .unwrap();
        let freq = &features.diagnostics.word_frequencies;
        assert_eq!(freq[0].looked_up, "fietspad");
        assert_eq!(freq[0].zipf, 2.1);
        assert!(freq[0].uncommon);
    }

    #[test]
    fn skipped_lemma_is_excluded_from_frequency() {
        let lexicon = LexiconStore::builder()
            .frequency("stad", 5.68)
            .frequency("hart", 5.2)
            .skip("hart")
            .build();
        let sentence = AnnotatedSentence::new(vec![
            token("hart", "hart", CoarsePos::Noun, 1),
            AnnotatedToken::new("stad", "stad", CoarsePos::Noun).with_head(1, DepRelation::Root),
        ]);
        let features = SentenceFeatureExtractor::new(&lexicon)
            .extract(&sentence)
            .unwrap();
        assert_eq!(features.diagnostics.word_frequencies.len(), 1);
        assert_eq!(features.mean_log_word_frequency, Some(5.68));
    }

    #[test]
    fn entity_label_forces_abstract_over_lexicon() {
        let lexicon = lexicon();
        // stad is concrete in the lexicon, but as an organization name it
        // is forced abstract.
        let sentence = AnnotatedSentence::new(vec![AnnotatedToken::new(
            "Stad",
            "stad",
            CoarsePos::Propn,
        )
        .with_entity(EntityLabel::Organization)]);
        let features = SentenceFeatureExtractor::new(&lexicon)
            .extract(&sentence)
            .unwrap();
        assert_eq!(features.diagnostics.abstract_nouns, vec!["stad"]);
        assert!(features.diagnostics.concrete_nouns.is_empty());
        assert_eq!(features.proportion_concrete_nouns, Some(0.0));
    }

    #[test]
    fn person_entity_does_not_force_abstract() {
        let lexicon = lexicon();
        let sentence = AnnotatedSentence::new(vec![AnnotatedToken::new(
            "Jan",
            "jan",
            CoarsePos::Propn,
        )
        .with_entity(EntityLabel::Person)]);
        let features = SentenceFeatureExtractor::new(&lexicon)
            .extract(&sentence)
            .unwrap();
        assert_eq!(features.diagnostics.unknown_nouns, vec!["jan"]);
        assert_eq!(features.proportion_concrete_nouns, None);
    }

    #[test]
    fn unknown_nouns_stay_out_of_the_denominator() {
        let lexicon = lexicon();
        // Two unknown nouns, one concrete: the proportion ignores the
        // unknowns entirely.
        let sentence = AnnotatedSentence::new(vec![
            token("gracht", "gracht", CoarsePos::Noun, 2),
            token("werf", "werf", CoarsePos::Noun, 2),
            AnnotatedToken::new("stad", "stad", CoarsePos::Noun).with_head(2, DepRelation::Root),
        ]);
        let features = SentenceFeatureExtractor::new(&lexicon)
            .extract(&sentence)
            .unwrap();
        assert_eq!(features.diagnostics.unknown_nouns.len(), 2);
        assert_eq!(features.proportion_concrete_nouns, Some(1.0));
    }

    #[test]
    fn malformed_annotation_fails_fast() {
        let lexicon = lexicon();
        let sentence = AnnotatedSentence::new(vec![token("de", "de", CoarsePos::Other, 7)]);
        assert!(
            SentenceFeatureExtractor::new(&lexicon)
                .extract(&sentence)
                .is_err()
        );
    }
}
