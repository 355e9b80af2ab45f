// File: src/persistence.rs
use crate::core::dictionary::PronunciationStore;
use crate::error::Result;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Writes a binary snapshot of the store together with the path of the
/// dictionary it was parsed from. The file is written next to its
/// destination and renamed into place, so readers never see a partial file.
pub fn save_store(store: &PronunciationStore, source: &Path, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let mut writer = BufWriter::new(&temp_file);
    bincode::serialize_into(&mut writer, &(source, store))?;
    writer.flush()?;
    drop(writer);
    temp_file.persist(path).map_err(|e| e.error)?;
    debug!(path = %path.display(), words = store.word_count(), "saved dictionary snapshot");
    Ok(())
}

/// Reads a snapshot back, returning the source dictionary path it records.
pub fn load_store(path: &Path) -> Result<(PathBuf, PronunciationStore)> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let (source, store): (PathBuf, PronunciationStore) = bincode::deserialize_from(reader)?;
    debug!(path = %path.display(), source = %source.display(), words = store.word_count(), "loaded dictionary snapshot");
    Ok((source, store))
}
