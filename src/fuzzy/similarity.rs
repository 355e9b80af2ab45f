// File: src/fuzzy/similarity.rs
//! Learned phoneme similarity.
//!
//! Alternate pronunciations of the same word are taken as ground truth for
//! which phonemes stand in for one another. Each pair of alternates is
//! aligned, substitutions are counted, and every phoneme pair gets the
//! log-odds score
//!
//! ```text
//! log( ((swaps(p1,p2) + 1) / total) / (P(p1) · P(p2)) )
//! ```
//!
//! where `total` counts every non-gap aligned element and `P(p) = freq(p) / total`.
//! The +1 keeps unseen pairs finite. The same `total` is the denominator of
//! both probabilities.
//!
//! Method after Hixon, Schneider and Epstein, "Phonemic Similarity Metrics to
//! Compare Pronunciation Methods" (Interspeech 2011).
use crate::core::dictionary::PronunciationStore;
use crate::core::loader::phrase_words;
use crate::core::types::{Phoneme, Pronunciation};
use crate::error::{PunError, Result};
use crate::fuzzy::alignment::{align, align_score, indicator, DEFAULT_GAP_PENALTY};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{debug, info};

/// Symmetric phoneme x phoneme log-odds matrix over the known alphabet.
/// Built once from a store snapshot and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    scores: HashMap<Phoneme, HashMap<Phoneme, f64>>,
}

/// Unordered pair key, so (a, b) and (b, a) count together.
fn pair_key(a: &str, b: &str) -> (Phoneme, Phoneme) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl SimilarityMatrix {
    pub fn build(store: &PronunciationStore) -> Result<Self> {
        let mut frequency: HashMap<Phoneme, u64> = HashMap::new();
        let mut swaps: HashMap<(Phoneme, Phoneme), u64> = HashMap::new();
        let mut total: u64 = 0;
        let mut pair_count = 0usize;

        for (_, pronunciations) in store.pronunciation_sets() {
            if pronunciations.len() < 2 {
                continue;
            }
            let alternates: Vec<&Pronunciation> = pronunciations.iter().collect();
            for (i, first) in alternates.iter().enumerate() {
                for second in &alternates[i + 1..] {
                    pair_count += 1;
                    let (seq1, seq2) = align(
                        first.phonemes(),
                        second.phonemes(),
                        DEFAULT_GAP_PENALTY,
                        indicator,
                    );
                    for phoneme in seq1.iter().chain(seq2.iter()).flatten() {
                        *frequency.entry(phoneme.clone()).or_insert(0) += 1;
                        total += 1;
                    }
                    for (a, b) in seq1.iter().zip(seq2.iter()) {
                        if let (Some(a), Some(b)) = (a, b) {
                            *swaps.entry(pair_key(a, b)).or_insert(0) += 1;
                        }
                    }
                }
            }
        }

        if total == 0 {
            return Err(PunError::NoAlternatePronunciations);
        }

        let alphabet = store.known_phonemes();
        let total = total as f64;
        let mut probabilities = HashMap::with_capacity(alphabet.len());
        for phoneme in &alphabet {
            let count = frequency.get(phoneme).copied().unwrap_or(0);
            if count == 0 {
                return Err(PunError::UnobservedPhoneme(phoneme.clone()));
            }
            probabilities.insert(phoneme.as_str(), count as f64 / total);
        }

        let mut scores: HashMap<Phoneme, HashMap<Phoneme, f64>> = HashMap::with_capacity(alphabet.len());
        for p1 in &alphabet {
            let row = scores.entry(p1.clone()).or_default();
            for p2 in &alphabet {
                let swap_count = swaps.get(&pair_key(p1, p2)).copied().unwrap_or(0) as f64;
                let swap_prob = (swap_count + 1.0) / total;
                let expected = probabilities[p1.as_str()] * probabilities[p2.as_str()];
                row.insert(p2.clone(), (swap_prob / expected).ln());
            }
        }

        info!(
            alternate_pairs = pair_count,
            aligned_elements = total as u64,
            phonemes = alphabet.len(),
            "built phoneme similarity matrix"
        );
        Ok(Self { scores })
    }

    /// Direct matrix lookup.
    pub fn similarity(&self, p1: &str, p2: &str) -> Result<f64> {
        let row = self
            .scores
            .get(p1)
            .ok_or_else(|| PunError::UnknownPhoneme(p1.to_string()))?;
        row.get(p2)
            .copied()
            .ok_or_else(|| PunError::UnknownPhoneme(p2.to_string()))
    }

    pub fn alphabet(&self) -> BTreeSet<&Phoneme> {
        self.scores.keys().collect()
    }

    /// All similarities of `phoneme` to the alphabet, most similar first.
    pub fn neighbours(&self, phoneme: &str) -> Result<Vec<(&Phoneme, f64)>> {
        let row = self
            .scores
            .get(phoneme)
            .ok_or_else(|| PunError::UnknownPhoneme(phoneme.to_string()))?;
        let mut out: Vec<(&Phoneme, f64)> = row.iter().map(|(p, s)| (p, *s)).collect();
        out.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        Ok(out)
    }

    /// Checks the whole sequence against the alphabet up front, so scoring
    /// below can index the matrix without failing mid-alignment.
    fn check_known(&self, seq: &[Phoneme]) -> Result<()> {
        match seq.iter().find(|p| !self.scores.contains_key(p.as_str())) {
            Some(p) => Err(PunError::UnknownPhoneme(p.clone())),
            None => Ok(()),
        }
    }

    /// Alignment score of two phoneme sequences with this matrix as cost.
    pub fn sequence_similarity(&self, seq1: &[Phoneme], seq2: &[Phoneme]) -> Result<f64> {
        self.sequence_similarity_with_gap(seq1, seq2, DEFAULT_GAP_PENALTY)
    }

    pub fn sequence_similarity_with_gap(
        &self,
        seq1: &[Phoneme],
        seq2: &[Phoneme],
        gap_penalty: f64,
    ) -> Result<f64> {
        self.check_known(seq1)?;
        self.check_known(seq2)?;
        Ok(align_score(seq1, seq2, gap_penalty, |a: &Phoneme, b: &Phoneme| {
            self.scores[a][b]
        }))
    }
}

/// Phrase-level phonetic similarity on top of a [`SimilarityMatrix`].
#[derive(Debug, Clone)]
pub struct SimilarityModel {
    store: Arc<PronunciationStore>,
    matrix: SimilarityMatrix,
    gap_penalty: f64,
}

impl SimilarityModel {
    pub fn new(store: Arc<PronunciationStore>) -> Result<Self> {
        let matrix = SimilarityMatrix::build(&store)?;
        Ok(Self::with_matrix(store, matrix))
    }

    pub fn with_matrix(store: Arc<PronunciationStore>, matrix: SimilarityMatrix) -> Self {
        Self { store, matrix, gap_penalty: DEFAULT_GAP_PENALTY }
    }

    /// Gap penalty used when scoring; learning the matrix always uses -1.
    pub fn with_gap_penalty(mut self, gap_penalty: f64) -> Self {
        self.gap_penalty = gap_penalty;
        self
    }

    pub fn matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn similarity(&self, p1: &str, p2: &str) -> Result<f64> {
        self.matrix.similarity(p1, p2)
    }

    pub fn sequence_similarity(&self, seq1: &[Phoneme], seq2: &[Phoneme]) -> Result<f64> {
        self.matrix.sequence_similarity_with_gap(seq1, seq2, self.gap_penalty)
    }

    /// Best-case similarity of two phrases across every combination of their
    /// words' alternate pronunciations.
    pub fn phrase_similarity(&self, phrase1: &str, phrase2: &str) -> Result<f64> {
        let realizations1 = scoring_realizations(&self.store, phrase1)?;
        let realizations2 = scoring_realizations(&self.store, phrase2)?;
        debug!(
            left = realizations1.len(),
            right = realizations2.len(),
            "scoring phrase realizations"
        );

        let mut best = f64::NEG_INFINITY;
        for seq1 in &realizations1 {
            for seq2 in &realizations2 {
                best = best.max(self.sequence_similarity(seq1.phonemes(), seq2.phonemes())?);
            }
        }
        Ok(best)
    }
}

/// A phrase with no words is scored as the single empty sequence, so it
/// aligns against the other phrase with gaps only.
fn scoring_realizations(store: &PronunciationStore, phrase: &str) -> Result<Vec<Pronunciation>> {
    let realizations = phrase_realizations(store, phrase)?;
    if realizations.is_empty() {
        return Ok(vec![Pronunciation::default()]);
    }
    Ok(realizations)
}

/// Every flat phoneme sequence a phrase can be read as: the cartesian product
/// of its words' pronunciations. A phrase with no words has no realizations.
pub fn phrase_realizations(store: &PronunciationStore, phrase: &str) -> Result<Vec<Pronunciation>> {
    let words = phrase_words(phrase);
    if words.is_empty() {
        return Ok(Vec::new());
    }

    let mut choices = Vec::with_capacity(words.len());
    for word in &words {
        let pronunciations = store
            .lookup_pronunciations(word)
            .ok_or_else(|| PunError::WordNotFound(word.clone()))?;
        choices.push(pronunciations.iter().collect::<Vec<_>>());
    }

    let mut partials: Vec<Vec<&Pronunciation>> = vec![Vec::new()];
    for options in &choices {
        partials = partials
            .into_iter()
            .flat_map(|prefix| {
                options.iter().map(move |option| {
                    let mut next = prefix.clone();
                    next.push(*option);
                    next
                })
            })
            .collect();
    }
    Ok(partials.into_iter().map(Pronunciation::concat).collect())
}
