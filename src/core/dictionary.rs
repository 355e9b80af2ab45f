// --- File: src/core/dictionary.rs
use crate::core::types::{Phoneme, Pronunciation, Word};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Read-only bidirectional mapping between words and their pronunciations.
///
/// A word may have several pronunciations and a pronunciation may be shared
/// by several words (homophones). Both maps are only touched by [`insert`],
/// which keeps them mutual inverses.
///
/// [`insert`]: PronunciationStore::insert
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PronunciationStore {
    words_to_phonemes: HashMap<Word, BTreeSet<Pronunciation>>,
    /// Keyed by the canonical space-joined form of the pronunciation.
    phonemes_to_words: HashMap<String, BTreeSet<Word>>,
}

impl PronunciationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I, W, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (W, P)>,
        W: Into<Word>,
        P: Into<Pronunciation>,
    {
        let mut store = Self::new();
        for (word, pronunciation) in entries {
            store.insert(word.into(), pronunciation.into());
        }
        store
    }

    /// Records that `word` can be pronounced as `pronunciation`.
    /// Inserting a pair that is already present changes nothing.
    pub fn insert(&mut self, word: Word, pronunciation: Pronunciation) {
        self.phonemes_to_words
            .entry(pronunciation.key())
            .or_default()
            .insert(word.clone());
        self.words_to_phonemes
            .entry(word)
            .or_default()
            .insert(pronunciation);
    }

    /// `None` means the word is absent from the dictionary altogether.
    pub fn lookup_pronunciations(&self, word: &str) -> Option<&BTreeSet<Pronunciation>> {
        self.words_to_phonemes.get(word)
    }

    /// Words pronounced exactly as the canonical sequence `key`.
    pub fn lookup_words(&self, key: &str) -> Option<&BTreeSet<Word>> {
        self.phonemes_to_words.get(key)
    }

    /// The phoneme alphabet actually observed across all pronunciations.
    pub fn known_phonemes(&self) -> BTreeSet<Phoneme> {
        self.words_to_phonemes
            .values()
            .flatten()
            .flat_map(|p| p.phonemes().iter().cloned())
            .collect()
    }

    /// Iterates every word together with all of its pronunciations.
    pub fn pronunciation_sets(&self) -> impl Iterator<Item = (&Word, &BTreeSet<Pronunciation>)> {
        self.words_to_phonemes.iter()
    }

    pub fn word_count(&self) -> usize {
        self.words_to_phonemes.len()
    }

    pub fn pronunciation_count(&self) -> usize {
        self.phonemes_to_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words_to_phonemes.is_empty()
    }
}
