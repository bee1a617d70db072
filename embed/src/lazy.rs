use once_cell::sync::OnceCell;
use tracing::info;

use crate::{EmbedError, FeatureModel, Frames};

type Loader<M> = Box<dyn Fn() -> Result<M, EmbedError> + Send + Sync>;

/// Loads a model on first use and shares it afterwards.
///
/// Concurrent first callers block until one load finishes; all of them then
/// see the same instance. A failed load is not cached, so the next call
/// retries. Dimension, minimum input length and tag are known up front, so
/// callers can inspect them without paying the load cost.
pub struct LazyModel<M> {
    tag: String,
    dim: usize,
    min_samples: usize,
    loader: Loader<M>,
    cell: OnceCell<M>,
}

impl<M: FeatureModel> LazyModel<M> {
    pub fn new(
        tag: impl Into<String>,
        dim: usize,
        min_samples: usize,
        loader: impl Fn() -> Result<M, EmbedError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            tag: tag.into(),
            dim,
            min_samples,
            loader: Box::new(loader),
            cell: OnceCell::new(),
        }
    }

    /// Returns the loaded model, loading it if needed.
    pub fn get(&self) -> Result<&M, EmbedError> {
        self.cell.get_or_try_init(|| {
            info!(tag = %self.tag, "initializing model");
            let model = (self.loader)()?;
            if model.dimension() != self.dim {
                return Err(EmbedError::DimensionMismatch {
                    expected: self.dim,
                    got: model.dimension(),
                });
            }
            Ok(model)
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<M: FeatureModel> FeatureModel for LazyModel<M> {
    fn frames(&self, samples: &[f32]) -> Result<Frames, EmbedError> {
        self.get()?.frames(samples)
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn min_samples(&self) -> usize {
        self.min_samples
    }

    fn tag(&self) -> &str {
        &self.tag
    }
}
