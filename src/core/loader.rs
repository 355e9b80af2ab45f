// File: src/core/loader.rs
//! Reader for the CMU pronouncing dictionary text format.
//!
//! Each meaningful line is `WORD<two spaces>PHONEME PHONEME ...`, e.g.
//!
//! ```text
//! ;;; comment lines start with three semicolons
//! CAN'T  K AE1 N T
//! CAN'T(1)  K AA1 N T
//! ```
//!
//! Words are normalized (variant suffix and punctuation stripped) and
//! phonemes lose their stress digits, so `CAN'T(1)` above becomes
//! `CANT -> K AA N T`.
use crate::core::dictionary::PronunciationStore;
use crate::core::types::{Pronunciation, Word};
use crate::error::{PunError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

const COMMENT_MARKER: &str = ";;;";

static LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<word>.*?)\s\s(?P<phonemes>.*?)\s*$").expect("valid regex"));
/// Trailing alternate-pronunciation marker, e.g. the "(1)" of "CAN'T(1)".
static VARIANT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\d+\)$").expect("valid regex"));

pub fn load_dictionary(path: &Path, strict: bool) -> Result<PronunciationStore> {
    let file = File::open(path)?;
    let store = parse_dictionary(BufReader::new(file), strict)?;
    info!(
        path = %path.display(),
        words = store.word_count(),
        pronunciations = store.pronunciation_count(),
        "loaded pronunciation dictionary"
    );
    Ok(store)
}

/// Parses dictionary lines from `reader`. The file is not guaranteed to be
/// UTF-8 (cmudict-0.7b is Latin-1), so each line is decoded lossily.
///
/// With `strict` set a malformed line aborts the load, otherwise it is
/// logged and skipped.
pub fn parse_dictionary<R: BufRead>(reader: R, strict: bool) -> Result<PronunciationStore> {
    let mut store = PronunciationStore::new();

    for (idx, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let line = String::from_utf8_lossy(&raw);
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }

        let Some(caps) = LINE_RE.captures(line) else {
            if strict {
                return Err(PunError::MalformedLine { line_no: idx + 1, line: line.to_string() });
            }
            warn!(line_no = idx + 1, line, "skipping malformed dictionary line");
            continue;
        };

        let word = normalize_word(&caps["word"]);
        let pronunciation = normalize_phonemes(&caps["phonemes"]);
        if word.is_empty() {
            if strict {
                return Err(PunError::MalformedLine { line_no: idx + 1, line: line.to_string() });
            }
            warn!(line_no = idx + 1, line, "skipping dictionary line with empty word");
            continue;
        }
        store.insert(word, pronunciation);
    }
    Ok(store)
}

fn normalize_word(raw: &str) -> Word {
    let upper = raw.trim().to_uppercase();
    let base = VARIANT_RE.replace(&upper, "");
    strip_punctuation(&base)
}

/// Uppercases a word and removes apostrophes, hyphens and periods.
/// Shared with phrase tokenization so lookups use the loader's spelling.
pub fn strip_punctuation(word: &str) -> Word {
    word.chars()
        .filter(|c| !matches!(c, '\'' | '-' | '.'))
        .flat_map(char::to_uppercase)
        .collect()
}

fn normalize_phonemes(raw: &str) -> Pronunciation {
    let stripped: String = raw.chars().filter(|c| !c.is_ascii_digit()).collect();
    Pronunciation::parse(&stripped)
}

/// Splits a phrase into normalized dictionary words. Tokens that normalize
/// to nothing (a lone "-") are dropped.
pub fn phrase_words(phrase: &str) -> Vec<Word> {
    phrase
        .split_whitespace()
        .map(strip_punctuation)
        .filter(|w| !w.is_empty())
        .collect()
}
