/// A fixed-length acoustic embedding and the tag of the configuration that
/// produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    tag: String,
    vector: Vec<f32>,
}

impl Embedding {
    pub fn new(tag: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            tag: tag.into(),
            vector,
        }
    }

    /// Model and preprocessing tag, e.g. `"wav2vec2-base+mono16k-meanpool-v1"`.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.vector
    }

    pub fn dimension(&self) -> usize {
        self.vector.len()
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.vector
    }

    /// Euclidean norm, accumulated in f64.
    pub fn norm(&self) -> f64 {
        self.vector
            .iter()
            .map(|&x| (x as f64) * (x as f64))
            .sum::<f64>()
            .sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.vector.iter().all(|v| v.is_finite())
    }
}
