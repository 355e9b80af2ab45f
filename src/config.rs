// File: src/config.rs
use crate::error::Result;
use crate::fuzzy::alignment::DEFAULT_GAP_PENALTY;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Uses the format specified by http://www.speech.cs.cmu.edu/cgi-bin/cmudict
pub const DEFAULT_DICTIONARY_PATH: &str = "data/cmudict-0.7b";

/// Runtime settings. Every field has a default, so a config file only needs
/// the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PunConfig {
    pub dictionary_path: PathBuf,
    /// Bincode cache of the parsed dictionary, written on first load.
    pub snapshot_path: Option<PathBuf>,
    pub gap_penalty: f64,
    /// Ceiling on target phoneme sequence length.
    pub max_sequence_len: Option<usize>,
    /// Fail on malformed dictionary lines instead of skipping them.
    pub strict_dictionary: bool,
}

impl Default for PunConfig {
    fn default() -> Self {
        Self {
            dictionary_path: PathBuf::from(DEFAULT_DICTIONARY_PATH),
            snapshot_path: None,
            gap_penalty: DEFAULT_GAP_PENALTY,
            max_sequence_len: None,
            strict_dictionary: false,
        }
    }
}

impl PunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}
