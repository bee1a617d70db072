use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use accentid_audio::{RawAudio, load_wav};
use accentid_embed::Embedding;
use accentid_refstore::ReferenceStore;
use serde::Serialize;
use tracing::{info, warn};

use crate::{AccentClass, AccentError, Manifest, Pipeline};

/// Computes reference embeddings and writes them to the store.
///
/// Uses the same [`Pipeline`] as the classifier. Building a class again
/// replaces its reference; nothing is averaged.
#[derive(Clone)]
pub struct ReferenceBuilder {
    pipeline: Pipeline,
    store: Arc<dyn ReferenceStore>,
    classes: BTreeSet<AccentClass>,
}

impl ReferenceBuilder {
    pub fn new(
        pipeline: Pipeline,
        store: Arc<dyn ReferenceStore>,
        classes: BTreeSet<AccentClass>,
    ) -> Self {
        Self {
            pipeline,
            store,
            classes,
        }
    }

    /// Embeds `raw` and stores it as the reference for `class`.
    pub fn build(&self, raw: &RawAudio, class: &str) -> Result<Embedding, AccentError> {
        let class = self.resolve(class)?;
        let embedding = self.pipeline.embed(raw)?;
        self.store
            .put(class.as_str(), &embedding)
            .map_err(|source| AccentError::ReferenceWrite {
                class: class.to_string(),
                source,
            })?;
        info!(class = %class, dim = embedding.dimension(), "built reference");
        Ok(embedding)
    }

    /// Decodes a WAV file and builds the reference for `class` from it.
    pub fn build_from_wav(
        &self,
        path: impl AsRef<Path>,
        class: &str,
    ) -> Result<Embedding, AccentError> {
        self.resolve(class)?;
        let raw = load_wav(path)?;
        self.build(&raw, class)
    }

    /// Builds every entry of the manifest, continuing past failures.
    pub fn seed(&self, manifest: &Manifest) -> SeedReport {
        let entries = manifest
            .samples
            .iter()
            .map(|(class, path)| {
                let result = self.build_from_wav(path, class.as_str());
                match &result {
                    Ok(_) => info!(class = %class, path = %path.display(), "seeded reference"),
                    Err(e) => warn!(class = %class, path = %path.display(), error = %e, "seed failed"),
                }
                SeedEntry {
                    class: class.clone(),
                    path: path.clone(),
                    status: match result {
                        Ok(_) => SeedStatus::Built,
                        Err(e) => SeedStatus::Failed {
                            kind: e.kind(),
                            error: e.to_string(),
                        },
                    },
                }
            })
            .collect();
        SeedReport { entries }
    }

    fn resolve(&self, class: &str) -> Result<AccentClass, AccentError> {
        let class = AccentClass::new(class)?;
        if !self.classes.contains(&class) {
            return Err(AccentError::UnknownClass(class.to_string()));
        }
        Ok(class)
    }
}

/// Per-class outcome of [`ReferenceBuilder::seed`].
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub entries: Vec<SeedEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeedEntry {
    pub class: AccentClass,
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: SeedStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SeedStatus {
    Built,
    Failed { kind: &'static str, error: String },
}

impl SeedReport {
    pub fn built(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == SeedStatus::Built)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.entries.len() - self.built()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}
