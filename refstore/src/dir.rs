use std::collections::BTreeSet;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use accentid_embed::Embedding;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::{ReferenceStore, StoreError, codec, validate_class_name};

const EXTENSION: &str = "emb";

/// [`ReferenceStore`] keeping one `<class>.emb` file per class in a
/// directory.
///
/// Writes go to a temporary file in the same directory which is then
/// renamed over the target, so a reader never observes a partially written
/// reference and a failed write leaves the previous one intact. The
/// directory is created on first write.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the reference for `class`.
    pub fn path_for(&self, class: &str) -> PathBuf {
        self.dir.join(format!("{class}.{EXTENSION}"))
    }
}

impl ReferenceStore for DirStore {
    fn put(&self, class: &str, embedding: &Embedding) -> Result<(), StoreError> {
        validate_class_name(class)?;
        let bytes = codec::encode(embedding)?;
        let path = self.path_for(class);

        fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;
        tmp.write_all(&bytes)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&path)
            .map_err(|e| StoreError::io(&path, e.error))?;

        info!(
            class,
            dim = embedding.dimension(),
            tag = embedding.tag(),
            path = %path.display(),
            "stored reference"
        );
        Ok(())
    }

    fn get(&self, class: &str) -> Result<Option<Embedding>, StoreError> {
        validate_class_name(class)?;
        let path = self.path_for(class);
        let bytes = match fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&path, e)),
        };
        let embedding = codec::decode(&bytes).map_err(|e| StoreError::Corrupt {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        debug!(class, dim = embedding.dimension(), "loaded reference");
        Ok(Some(embedding))
    }

    fn list_classes(&self) -> Result<BTreeSet<String>, StoreError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeSet::new()),
            Err(e) => return Err(StoreError::io(&self.dir, e)),
        };

        let mut classes = BTreeSet::new();
        for entry in entries {
            let path = entry.map_err(|e| StoreError::io(&self.dir, e))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if validate_class_name(stem).is_ok() && path.is_file() {
                classes.insert(stem.to_string());
            }
        }
        Ok(classes)
    }

    fn remove(&self, class: &str) -> Result<bool, StoreError> {
        validate_class_name(class)?;
        let path = self.path_for(class);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(class, "removed reference");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }
}
