// File: src/error.rs
use thiserror::Error;

/// Errors raised while loading dictionaries, generating puns or scoring
/// phonetic similarity.
#[derive(Debug, Error)]
pub enum PunError {
    /// A word of the phrase has no entry in the pronunciation dictionary.
    #[error("word '{0}' is not in the pronunciation dictionary")]
    WordNotFound(String),

    /// A phoneme outside the alphabet the similarity matrix was built over.
    #[error("phoneme '{0}' is not in the known phoneme alphabet")]
    UnknownPhoneme(String),

    /// A known phoneme never occurs in any aligned alternate pronunciation,
    /// so its probability is zero and its log-odds are undefined.
    #[error("phoneme '{0}' never appears in an alternate pronunciation")]
    UnobservedPhoneme(String),

    #[error("dictionary has no word with more than one pronunciation")]
    NoAlternatePronunciations,

    /// A target phoneme sequence exceeds the configured ceiling.
    #[error("phoneme sequence of length {len} exceeds the limit of {max}")]
    SequenceTooLong { len: usize, max: usize },

    #[error("malformed dictionary line {line_no}: {line:?}")]
    MalformedLine { line_no: usize, line: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PunError>;
