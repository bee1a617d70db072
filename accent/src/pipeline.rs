use std::path::Path;
use std::sync::Arc;

use accentid_audio::{RawAudio, Waveform, load_wav, normalize};
use accentid_embed::{Embedding, Extractor, FeatureModel};

use crate::AccentError;

/// Normalizer followed by extractor.
///
/// Reference building and classification go through the same `Pipeline`
/// so that references and queries live in the same embedding space.
#[derive(Clone)]
pub struct Pipeline {
    extractor: Extractor,
}

impl Pipeline {
    pub fn new(model: Arc<dyn FeatureModel>) -> Self {
        Self {
            extractor: Extractor::new(model),
        }
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Tag carried by every embedding this pipeline produces.
    pub fn tag(&self) -> &str {
        self.extractor.tag()
    }

    pub fn dimension(&self) -> usize {
        self.extractor.dimension()
    }

    /// Normalizes to 16kHz mono, then extracts.
    pub fn embed(&self, raw: &RawAudio) -> Result<Embedding, AccentError> {
        let wave = normalize(raw)?;
        self.embed_waveform(&wave)
    }

    pub fn embed_waveform(&self, wave: &Waveform) -> Result<Embedding, AccentError> {
        Ok(self.extractor.extract(wave)?)
    }

    /// Decodes a WAV file and embeds it.
    pub fn embed_wav(&self, path: impl AsRef<Path>) -> Result<Embedding, AccentError> {
        let raw = load_wav(path)?;
        self.embed(&raw)
    }
}
