//! English accent identification.
//!
//! # Architecture
//!
//! 1. [`normalize`]: decoded audio -> 16kHz mono [`Waveform`]
//! 2. [`Extractor::extract`]: waveform -> mean-pooled [`Embedding`]
//! 3. [`Classifier::classify`]: embedding vs. one stored reference per
//!    class -> [`ClassificationResult`] (cosine similarity, argmax)
//!
//! [`ReferenceBuilder`] runs steps 1 and 2 through the same [`Pipeline`]
//! and writes the result to a [`ReferenceStore`], so references and
//! queries are always comparable.
//!
//! [`AccentId`] wires all of it from a [`Config`]:
//!
//! ```no_run
//! use accentid::{AccentId, Config};
//!
//! let cfg = Config::load(None)?;
//! let id = AccentId::from_config(&cfg)?;
//! id.build_reference_wav("samples/british.wav", "british")?;
//! let result = id.classify_wav("query.wav")?;
//! println!("{} ({:.1}%)", result.best, result.confidence);
//! # Ok::<(), accentid::AccentError>(())
//! ```

mod builder;
mod class;
mod classifier;
pub mod config;
mod error;
mod pipeline;

use std::path::Path;
use std::sync::Arc;

pub use accentid_audio::{
    AudioError, Format, RawAudio, TARGET_SAMPLE_RATE, Waveform, decode_wav, load_wav, normalize,
};
pub use accentid_embed::{
    EmbedError, Embedding, Extractor, FbankModel, FeatureModel, LazyModel, OnnxModel,
};
pub use accentid_refstore::{
    DirStore, MemoryStore, ReferenceStore, StoreError, cosine_similarity,
};
pub use builder::{ReferenceBuilder, SeedEntry, SeedReport, SeedStatus};
pub use class::AccentClass;
pub use classifier::{ClassificationResult, Classifier};
pub use config::{Config, Manifest, ModelConfig, ModelKind};
pub use error::AccentError;
pub use pipeline::Pipeline;

use serde::Serialize;
use tracing::debug;

/// Summary of one stored reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceInfo {
    pub class: String,
    pub tag: String,
    pub dimension: usize,
    /// Whether the class is in the configured set.
    pub configured: bool,
    /// Whether the reference was built with the current pipeline.
    pub compatible: bool,
}

/// Classifier and builder sharing one pipeline and one store.
#[derive(Clone)]
pub struct AccentId {
    pipeline: Pipeline,
    store: Arc<dyn ReferenceStore>,
    classifier: Classifier,
    builder: ReferenceBuilder,
}

impl AccentId {
    /// Builds the model and a [`DirStore`] at `cfg.store_dir`.
    pub fn from_config(cfg: &Config) -> Result<Self, AccentError> {
        cfg.validate()?;
        let model = cfg.model.build()?;
        let store = Arc::new(DirStore::new(&cfg.store_dir));
        debug!(
            store = %cfg.store_dir.display(),
            model = model.tag(),
            classes = cfg.classes.len(),
            "accentid ready"
        );
        Ok(Self::new(model, store, cfg.class_set()))
    }

    pub fn new(
        model: Arc<dyn FeatureModel>,
        store: Arc<dyn ReferenceStore>,
        classes: impl IntoIterator<Item = AccentClass>,
    ) -> Self {
        let classes: std::collections::BTreeSet<_> = classes.into_iter().collect();
        let pipeline = Pipeline::new(model);
        Self {
            classifier: Classifier::new(store.clone(), classes.clone()),
            builder: ReferenceBuilder::new(pipeline.clone(), store.clone(), classes),
            pipeline,
            store,
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn builder(&self) -> &ReferenceBuilder {
        &self.builder
    }

    pub fn store(&self) -> &Arc<dyn ReferenceStore> {
        &self.store
    }

    pub fn classify(&self, raw: &RawAudio) -> Result<ClassificationResult, AccentError> {
        let query = self.pipeline.embed(raw)?;
        self.classifier.classify(&query)
    }

    pub fn classify_wav(&self, path: impl AsRef<Path>) -> Result<ClassificationResult, AccentError> {
        let query = self.pipeline.embed_wav(path)?;
        self.classifier.classify(&query)
    }

    pub fn build_reference(&self, raw: &RawAudio, class: &str) -> Result<Embedding, AccentError> {
        self.builder.build(raw, class)
    }

    pub fn build_reference_wav(
        &self,
        path: impl AsRef<Path>,
        class: &str,
    ) -> Result<Embedding, AccentError> {
        self.builder.build_from_wav(path, class)
    }

    pub fn seed(&self, manifest: &Manifest) -> SeedReport {
        self.builder.seed(manifest)
    }

    /// Every stored reference, configured or not, in class order.
    pub fn list_references(&self) -> Result<Vec<ReferenceInfo>, AccentError> {
        let mut out = Vec::new();
        for class in self.store.list_classes()? {
            let Some(e) = self.store.get(&class)? else {
                continue;
            };
            let configured = self
                .classifier
                .classes()
                .iter()
                .any(|c| c.as_str() == class);
            out.push(ReferenceInfo {
                compatible: e.tag() == self.pipeline.tag()
                    && e.dimension() == self.pipeline.dimension(),
                configured,
                class,
                tag: e.tag().to_string(),
                dimension: e.dimension(),
            });
        }
        Ok(out)
    }

    /// Deletes the stored reference for `class`. Returns whether one existed.
    pub fn remove_reference(&self, class: &str) -> Result<bool, AccentError> {
        let class = AccentClass::new(class)?;
        Ok(self.store.remove(class.as_str())?)
    }
}
