// File: src/core/generator.rs
use crate::core::dictionary::PronunciationStore;
use crate::core::types::Phoneme;
use crate::error::{PunError, Result};
use crate::fuzzy::similarity::phrase_realizations;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Finds word phrases whose concatenated pronunciation equals a target
/// phoneme sequence.
///
/// Every contiguous binary split of the sequence is tried recursively and the
/// matches of both halves are recombined. Results are memoized in the pun
/// table by canonical sequence key; entries persist for the generator's
/// lifetime, so repeated queries share sub-problems.
pub struct PunGenerator {
    store: Arc<PronunciationStore>,
    /// canonical phoneme key -> word phrases pronounced exactly that way
    pun_table: HashMap<String, BTreeSet<String>>,
    max_sequence_len: Option<usize>,
}

impl PunGenerator {
    pub fn new(store: Arc<PronunciationStore>) -> Self {
        Self { store, pun_table: HashMap::new(), max_sequence_len: None }
    }

    /// Rejects target sequences longer than `max` phonemes. The recursion
    /// itself has no bound, so callers facing user input should set this.
    pub fn with_max_sequence_len(mut self, max: Option<usize>) -> Self {
        self.max_sequence_len = max;
        self
    }

    pub fn generate_puns(&mut self, phrase: &str) -> Result<BTreeSet<String>> {
        let targets = phrase_realizations(&self.store, phrase)?;
        if let Some(max) = self.max_sequence_len {
            if let Some(long) = targets.iter().find(|t| t.len() > max) {
                return Err(PunError::SequenceTooLong { len: long.len(), max });
            }
        }

        let mut puns = BTreeSet::new();
        for target in &targets {
            self.resolve(target.phonemes());
            if let Some(found) = self.pun_table.get(&target.key()) {
                puns.extend(found.iter().cloned());
            }
        }
        debug!(
            phrase,
            targets = targets.len(),
            puns = puns.len(),
            table_size = self.pun_table.len(),
            "generated puns"
        );
        Ok(puns)
    }

    /// Fills the pun table entry for `phonemes` and every sub-sequence it
    /// depends on. An entry is inserted only once it is complete, so a
    /// present key is always final.
    fn resolve(&mut self, phonemes: &[Phoneme]) {
        let key = phonemes.join(" ");
        if self.pun_table.contains_key(&key) {
            return;
        }

        let mut puns = self.store.lookup_words(&key).cloned().unwrap_or_default();

        for split in 1..phonemes.len() {
            let (left, right) = phonemes.split_at(split);
            self.resolve(left);
            self.resolve(right);

            let left_puns = &self.pun_table[&left.join(" ")];
            let right_puns = &self.pun_table[&right.join(" ")];
            for l in left_puns {
                for r in right_puns {
                    puns.insert(format!("{} {}", l, r));
                }
            }
        }

        self.pun_table.insert(key, puns);
    }

    pub fn memoized(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.pun_table.get(key)
    }

    pub fn table_len(&self) -> usize {
        self.pun_table.len()
    }

    pub fn store(&self) -> &Arc<PronunciationStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> PunGenerator {
        PunGenerator::new(Arc::new(PronunciationStore::from_entries([
            ("CAT", "K AE T"),
            ("KAT", "K AE T"),
            ("DOG", "D AA G"),
            ("CA", "K AE"),
            ("TEA", "T IY"),
            ("T", "T IY"),
            ("TEE", "T"),
            ("ATE", "EY T"),
            ("EIGHT", "EY T"),
        ])))
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn homophones_are_puns() {
        let mut gen = generator();
        let puns = gen.generate_puns("cat").unwrap();
        assert_eq!(puns, set(&["CA TEE", "CAT", "KAT"]));
    }

    #[test]
    fn unrelated_word_stays_separate() {
        let mut gen = generator();
        let puns = gen.generate_puns("dog").unwrap();
        assert!(puns.contains("DOG"));
        assert!(!puns.contains("CAT"));
    }

    #[test]
    fn recombines_across_word_boundaries() {
        let mut gen = generator();
        let puns = gen.generate_puns("ca tea").unwrap();
        assert_eq!(puns, set(&["CA T", "CA TEA"]));
    }

    #[test]
    fn word_is_in_its_own_pun_set() {
        let mut gen = generator();
        for word in ["cat", "dog", "eight"] {
            let puns = gen.generate_puns(word).unwrap();
            assert!(puns.contains(&word.to_uppercase()));
        }
    }

    #[test]
    fn repeated_calls_are_stable() {
        let mut gen = generator();
        let first = gen.generate_puns("ate").unwrap();
        let entry = gen.memoized("EY T").cloned().unwrap();
        let size = gen.table_len();

        let second = gen.generate_puns("ate").unwrap();
        assert_eq!(first, second);
        assert_eq!(gen.memoized("EY T"), Some(&entry));
        assert_eq!(gen.table_len(), size);
        assert_eq!(first, set(&["ATE", "EIGHT"]));
    }

    #[test]
    fn table_keeps_every_sub_sequence() {
        let mut gen = generator();
        gen.generate_puns("cat").unwrap();
        for key in ["K", "AE", "T", "K AE", "AE T", "K AE T"] {
            assert!(gen.memoized(key).is_some(), "missing {key}");
        }
        assert!(gen.memoized("K").unwrap().is_empty());
    }

    #[test]
    fn unknown_word_aborts_phrase() {
        let mut gen = generator();
        let err = gen.generate_puns("cat bird").unwrap_err();
        assert!(matches!(err, PunError::WordNotFound(w) if w == "BIRD"));
    }

    #[test]
    fn empty_phrase_gives_no_puns() {
        let mut gen = generator();
        assert!(gen.generate_puns("").unwrap().is_empty());
        assert!(gen.generate_puns("   ").unwrap().is_empty());
        assert_eq!(gen.table_len(), 0);
    }

    #[test]
    fn long_sequences_are_refused() {
        let mut gen = generator().with_max_sequence_len(Some(2));
        let err = gen.generate_puns("cat").unwrap_err();
        assert!(matches!(err, PunError::SequenceTooLong { len: 3, max: 2 }));
        assert_eq!(gen.table_len(), 0);
        assert!(gen.generate_puns("ate").is_ok());
    }

    #[test]
    fn empty_pronunciation_uses_direct_lookup_only() {
        let mut gen = PunGenerator::new(Arc::new(PronunciationStore::from_entries([("UH", "")])));
        assert_eq!(gen.generate_puns("uh").unwrap(), set(&["UH"]));
    }
}
