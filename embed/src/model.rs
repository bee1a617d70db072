use crate::EmbedError;

/// Produces per-time-step feature vectors from a waveform.
///
/// The input is `f32` samples in `[-1, 1]`, 16kHz, mono. The output is a
/// `[frames, dimension]` matrix; the number of frames grows with the input
/// length while the dimension is fixed by the model.
///
/// # Thread Safety
///
/// Implementations must be safe for concurrent use. Inference never mutates
/// model state; each call owns its input and output buffers.
pub trait FeatureModel: Send + Sync {
    /// Runs the model over the waveform samples.
    fn frames(&self, samples: &[f32]) -> Result<Frames, EmbedError>;

    /// Width of each output frame (e.g., 768).
    fn dimension(&self) -> usize;

    /// Shortest input the model accepts (its receptive field).
    fn min_samples(&self) -> usize;

    /// Identifies the model weights and settings, stored with every
    /// embedding it produces.
    fn tag(&self) -> &str;
}

/// Row-major `[frames, dim]` feature matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Frames {
    data: Vec<f32>,
    dim: usize,
}

impl Frames {
    /// Wraps a flat row-major buffer.
    pub fn new(data: Vec<f32>, dim: usize) -> Result<Self, EmbedError> {
        if dim == 0 {
            return Err(EmbedError::Model("frame dimension is zero".into()));
        }
        if data.len() % dim != 0 {
            return Err(EmbedError::Model(format!(
                "{} values do not divide into frames of {dim}",
                data.len()
            )));
        }
        Ok(Self { data, dim })
    }

    /// Builds a matrix from equal-length rows.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, EmbedError> {
        let dim = rows.first().map(|r| r.len()).unwrap_or(0);
        if let Some(bad) = rows.iter().find(|r| r.len() != dim) {
            return Err(EmbedError::DimensionMismatch {
                expected: dim,
                got: bad.len(),
            });
        }
        if rows.is_empty() {
            return Ok(Self {
                data: Vec::new(),
                dim: 1,
            });
        }
        Self::new(rows.into_iter().flatten().collect(), dim)
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn num_frames(&self) -> usize {
        self.data.len() / self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn row(&self, i: usize) -> Option<&[f32]> {
        self.data.get(i * self.dim..(i + 1) * self.dim)
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, f32> {
        self.data.chunks_exact(self.dim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_shape() {
        let f = Frames::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3).unwrap();
        assert_eq!(f.num_frames(), 2);
        assert_eq!(f.dim(), 3);
        assert_eq!(f.row(1), Some(&[4.0, 5.0, 6.0][..]));
        assert_eq!(f.row(2), None);
        assert_eq!(f.rows().count(), 2);
    }

    #[test]
    fn frames_bad_shape() {
        assert!(Frames::new(vec![1.0; 5], 3).is_err());
        assert!(Frames::new(vec![1.0; 6], 0).is_err());
    }

    #[test]
    fn frames_from_rows() {
        let f = Frames::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(f.num_frames(), 2);
        assert_eq!(f.dim(), 2);

        assert!(Frames::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
        assert!(Frames::from_rows(Vec::new()).unwrap().is_empty());
    }
}
