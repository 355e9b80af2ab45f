// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod fuzzy;
pub mod graph;
pub mod persistence;

pub use crate::config::PunConfig;
pub use crate::core::dictionary::PronunciationStore;
pub use crate::core::engine::PunEngine;
pub use crate::core::generator::PunGenerator;
pub use crate::core::types::{Phoneme, Pronunciation, Word};
pub use crate::error::{PunError, Result};
pub use crate::fuzzy::similarity::{SimilarityMatrix, SimilarityModel};
