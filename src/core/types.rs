// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single sound, stress markers already stripped (e.g. "AH", "K").
pub type Phoneme = String;

/// A normalized dictionary word (e.g. "CANT" for "CAN'T").
pub type Word = String;

/// An ordered list of phonemes: one way of saying a word or phrase.
///
/// The canonical form is the space-joined string returned by [`key`], which
/// is what the store and the pun table hash on.
///
/// [`key`]: Pronunciation::key
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pronunciation(Vec<Phoneme>);

impl Pronunciation {
    pub fn new(phonemes: Vec<Phoneme>) -> Self {
        Self(phonemes)
    }

    /// Parses a space separated phoneme string. Runs of whitespace collapse,
    /// so `parse(seq.key())` always gives back `seq`.
    pub fn parse(key: &str) -> Self {
        Self(key.split_whitespace().map(str::to_string).collect())
    }

    pub fn key(&self) -> String {
        self.0.join(" ")
    }

    pub fn phonemes(&self) -> &[Phoneme] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Concatenates pronunciations into a single flat sequence.
    pub fn concat<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = &'a Pronunciation>,
    {
        Self(parts.into_iter().flat_map(|p| p.0.iter().cloned()).collect())
    }
}

impl fmt::Display for Pronunciation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl From<&str> for Pronunciation {
    fn from(key: &str) -> Self {
        Self::parse(key)
    }
}
