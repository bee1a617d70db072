//! Fixed-length acoustic embeddings.
//!
//! # Architecture
//!
//! 1. [`FeatureModel::frames`]: 16kHz mono waveform -> per-frame feature matrix
//! 2. [`mean_pool`]: feature matrix -> one vector (arithmetic mean over time)
//! 3. [`Extractor::extract`]: validation + 1 + 2 -> tagged [`Embedding`]
//!
//! Mean pooling makes clips of any length produce vectors of the same
//! dimensionality. Every embedding carries a tag naming the model and the
//! preprocessing that produced it, so vectors from different configurations
//! are never compared.
//!
//! # Models
//!
//! - [`OnnxModel`]: wav2vec2-style self-supervised model exported to ONNX,
//!   run with tract (input `[1, T]`, output `[1, frames, dim]`)
//! - [`FbankModel`]: Kaldi-compatible log mel filterbank frames, pure Rust
//! - [`LazyModel`]: loads any model once on first use and shares it

mod embedding;
mod error;
mod extractor;
pub mod fbank;
mod lazy;
mod model;
mod onnx;

pub use embedding::Embedding;
pub use error::EmbedError;
pub use extractor::{Extractor, PIPELINE_TAG, mean_pool};
pub use fbank::{FbankConfig, FbankModel, compute_fbank};
pub use lazy::LazyModel;
pub use model::{FeatureModel, Frames};
pub use onnx::{OnnxModel, OnnxModelConfig};
