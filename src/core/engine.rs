use crate::config::PunConfig;
use crate::core::dictionary::PronunciationStore;
use crate::core::generator::PunGenerator;
use crate::core::loader::load_dictionary;
use crate::error::Result;
use crate::fuzzy::similarity::SimilarityModel;
use crate::persistence::{load_store, save_store};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};

// The engine ties the shared dictionary to the pun generator and, on first
// use, the similarity model. The matrix is only learned when asked for.
pub struct PunEngine {
    store: Arc<PronunciationStore>,
    generator: PunGenerator,
    similarity: Option<SimilarityModel>,
    gap_penalty: f64,
}

impl PunEngine {
    pub fn new(store: PronunciationStore, config: &PunConfig) -> Self {
        let store = Arc::new(store);
        Self {
            generator: PunGenerator::new(store.clone()).with_max_sequence_len(config.max_sequence_len),
            store,
            similarity: None,
            gap_penalty: config.gap_penalty,
        }
    }

    /// Loads the dictionary snapshot when one is configured, readable and
    /// built from `config.dictionary_path`; otherwise parses the text
    /// dictionary and (re)writes the snapshot.
    pub fn open(config: &PunConfig) -> Result<Self> {
        if let Some(snapshot) = &config.snapshot_path {
            if snapshot.exists() {
                match load_store(snapshot) {
                    Ok((source, store)) if source == config.dictionary_path => {
                        return Ok(Self::new(store, config));
                    }
                    Ok((source, _)) => warn!(
                        path = %snapshot.display(),
                        snapshot_source = %source.display(),
                        dictionary = %config.dictionary_path.display(),
                        "snapshot was built from another dictionary, reparsing"
                    ),
                    Err(e) => warn!(path = %snapshot.display(), error = %e, "ignoring unreadable snapshot"),
                }
            }
        }

        let store = load_dictionary(&config.dictionary_path, config.strict_dictionary)?;
        if let Some(snapshot) = &config.snapshot_path {
            match save_store(&store, &config.dictionary_path, snapshot) {
                Ok(()) => info!(path = %snapshot.display(), "wrote dictionary snapshot"),
                Err(e) => warn!(path = %snapshot.display(), error = %e, "could not write snapshot"),
            }
        }
        Ok(Self::new(store, config))
    }

    pub fn store(&self) -> &PronunciationStore {
        &self.store
    }

    pub fn generate_puns(&mut self, phrase: &str) -> Result<BTreeSet<String>> {
        self.generator.generate_puns(phrase)
    }

    /// Puns for `phrase` in display order.
    pub fn ranked_puns(&mut self, phrase: &str) -> Result<Vec<String>> {
        Ok(self.generate_puns(phrase)?.into_iter().collect())
    }

    pub fn similarity_model(&mut self) -> Result<&SimilarityModel> {
        let model = match self.similarity.take() {
            Some(model) => model,
            None => SimilarityModel::new(self.store.clone())?.with_gap_penalty(self.gap_penalty),
        };
        Ok(&*self.similarity.insert(model))
    }

    pub fn phrase_similarity(&mut self, phrase1: &str, phrase2: &str) -> Result<f64> {
        self.similarity_model()?.phrase_similarity(phrase1, phrase2)
    }

    pub fn generator(&self) -> &PunGenerator {
        &self.generator
    }
}
