//! [`FeatureModel`] implementation running an ONNX export of a wav2vec2-style
//! model with tract.

use std::path::{Path, PathBuf};

use tract_onnx::prelude::*;
use tracing::{debug, info};

use crate::{EmbedError, FeatureModel, Frames, LazyModel};

type Plan = TypedRunnableModel<TypedModel>;

/// Configuration for [`OnnxModel`].
#[derive(Debug, Clone)]
pub struct OnnxModelConfig {
    /// Path to the `.onnx` file.
    pub path: PathBuf,
    /// Width of the hidden-state output (default: 768, wav2vec2-base).
    pub dim: usize,
    /// Receptive field of the convolutional front end (default: 400 = 25ms).
    pub min_samples: usize,
    /// Identifies the weights; stored with every embedding.
    pub tag: String,
    /// Which model output holds the `[1, frames, dim]` hidden states.
    pub output_index: usize,
    /// Zero-mean, unit-variance normalize the waveform before inference.
    /// Matches feature extractors configured with `do_normalize`.
    pub normalize_input: bool,
}

impl Default for OnnxModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("wav2vec2-base.onnx"),
            dim: 768,
            min_samples: 400,
            tag: "wav2vec2-base".to_string(),
            output_index: 0,
            normalize_input: false,
        }
    }
}

/// Runs a self-supervised speech model exported to ONNX.
///
/// Input is a `[1, T]` f32 tensor of raw 16kHz samples; output is the last
/// hidden state `[1, frames, dim]` (roughly one frame per 20ms of audio).
///
/// # Thread Safety
///
/// The optimized plan is immutable once loaded. Each `frames` call builds
/// its own execution state, so one `OnnxModel` serves concurrent callers.
pub struct OnnxModel {
    plan: Plan,
    cfg: OnnxModelConfig,
}

impl OnnxModel {
    /// Loads and optimizes the model. This is the expensive step.
    pub fn load(cfg: OnnxModelConfig) -> Result<Self, EmbedError> {
        if cfg.dim == 0 {
            return Err(EmbedError::Load("dimension must be positive".into()));
        }
        info!(path = %cfg.path.display(), tag = %cfg.tag, "loading onnx model");
        let plan = build_plan(&cfg.path)
            .map_err(|e| EmbedError::Load(format!("{}: {e}", cfg.path.display())))?;
        Ok(Self { plan, cfg })
    }

    /// Defers [`OnnxModel::load`] until the first inference.
    pub fn lazy(cfg: OnnxModelConfig) -> LazyModel<OnnxModel> {
        let tag = cfg.tag.clone();
        let (dim, min_samples) = (cfg.dim, cfg.min_samples);
        LazyModel::new(tag, dim, min_samples, move || OnnxModel::load(cfg.clone()))
    }

    pub fn config(&self) -> &OnnxModelConfig {
        &self.cfg
    }
}

fn build_plan(path: &Path) -> TractResult<Plan> {
    tract_onnx::onnx()
        .model_for_path(path)?
        .into_optimized()?
        .into_runnable()
}

fn standardize(samples: &[f32]) -> Vec<f32> {
    let n = samples.len() as f64;
    let mean = samples.iter().map(|&s| s as f64).sum::<f64>() / n;
    let var = samples
        .iter()
        .map(|&s| (s as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    let scale = 1.0 / (var + 1e-7).sqrt();
    samples
        .iter()
        .map(|&s| ((s as f64 - mean) * scale) as f32)
        .collect()
}

impl FeatureModel for OnnxModel {
    fn frames(&self, samples: &[f32]) -> Result<Frames, EmbedError> {
        let model_err = |e: TractError| EmbedError::Model(e.to_string());

        let input = if self.cfg.normalize_input {
            standardize(samples)
        } else {
            samples.to_vec()
        };
        let tensor = Tensor::from_shape(&[1, input.len()], &input).map_err(model_err)?;
        let mut outputs = self.plan.run(tvec!(tensor.into())).map_err(model_err)?;

        let idx = self.cfg.output_index;
        if idx >= outputs.len() {
            return Err(EmbedError::Model(format!(
                "model has {} outputs, wanted index {idx}",
                outputs.len()
            )));
        }
        let out = outputs.remove(idx);
        let dim = match out.shape() {
            &[1, _, d] | &[_, d] => d,
            other => {
                return Err(EmbedError::Model(format!(
                    "unexpected output shape {other:?}"
                )));
            }
        };
        let data = out.as_slice::<f32>().map_err(model_err)?;
        debug!(samples = samples.len(), frames = data.len() / dim.max(1), dim, "onnx inference");
        Frames::new(data.to_vec(), dim)
    }

    fn dimension(&self) -> usize {
        self.cfg.dim
    }

    fn min_samples(&self) -> usize {
        self.cfg.min_samples
    }

    fn tag(&self) -> &str {
        &self.cfg.tag
    }
}
