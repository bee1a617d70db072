use std::sync::Arc;

use accentid_audio::{TARGET_SAMPLE_RATE, Waveform};
use tracing::debug;

use crate::{EmbedError, Embedding, FeatureModel, Frames};

/// Identifies the preprocessing and pooling applied around the model.
/// Bump when normalization or pooling changes so stale references are
/// reported as incompatible instead of silently mis-scored.
pub const PIPELINE_TAG: &str = "mono16k-meanpool-v1";

/// Turns a normalized waveform into a fixed-length [`Embedding`].
///
/// The same `Extractor` must be used to build references and to classify
/// queries; its [`tag`](Extractor::tag) is stored with every embedding so a
/// mismatch is caught at comparison time.
#[derive(Clone)]
pub struct Extractor {
    model: Arc<dyn FeatureModel>,
    tag: String,
}

impl Extractor {
    pub fn new(model: Arc<dyn FeatureModel>) -> Self {
        let tag = format!("{}+{}", model.tag(), PIPELINE_TAG);
        Self { model, tag }
    }

    pub fn dimension(&self) -> usize {
        self.model.dimension()
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn model(&self) -> &Arc<dyn FeatureModel> {
        &self.model
    }

    /// Computes the embedding of a 16kHz mono waveform.
    ///
    /// Deterministic: the same waveform always yields the same vector.
    pub fn extract(&self, wave: &Waveform) -> Result<Embedding, EmbedError> {
        if wave.sample_rate() != TARGET_SAMPLE_RATE {
            return Err(EmbedError::SampleRate {
                expected: TARGET_SAMPLE_RATE,
                got: wave.sample_rate(),
            });
        }
        let samples = wave.samples();
        let min = self.model.min_samples();
        if samples.len() < min {
            return Err(EmbedError::AudioTooShort {
                min_samples: min,
                got_samples: samples.len(),
            });
        }
        if samples.iter().all(|&s| s == 0.0) {
            return Err(EmbedError::Silent);
        }

        let frames = self.model.frames(samples)?;
        if frames.is_empty() {
            return Err(EmbedError::NoFrames);
        }
        if frames.dim() != self.model.dimension() {
            return Err(EmbedError::DimensionMismatch {
                expected: self.model.dimension(),
                got: frames.dim(),
            });
        }

        let pooled = mean_pool(&frames)?;
        let embedding = Embedding::new(self.tag.clone(), pooled);
        if !embedding.is_finite() {
            return Err(EmbedError::NonFinite);
        }
        if embedding.norm() == 0.0 {
            return Err(EmbedError::ZeroNorm);
        }

        debug!(
            samples = samples.len(),
            frames = frames.num_frames(),
            dim = embedding.dimension(),
            "extracted embedding"
        );
        Ok(embedding)
    }
}

/// Arithmetic mean of the frames over the time axis, accumulated in f64.
pub fn mean_pool(frames: &Frames) -> Result<Vec<f32>, EmbedError> {
    let n = frames.num_frames();
    if n == 0 {
        return Err(EmbedError::NoFrames);
    }
    let mut sum = vec![0.0f64; frames.dim()];
    for row in frames.rows() {
        for (acc, &v) in sum.iter_mut().zip(row) {
            *acc += v as f64;
        }
    }
    Ok(sum.into_iter().map(|s| (s / n as f64) as f32).collect())
}
