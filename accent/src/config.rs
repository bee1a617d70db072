//! YAML configuration.
//!
//! Stored in `~/.accentid/config.yaml` unless a path is given:
//!
//! ```yaml
//! classes: [american, australian, british]
//! store_dir: /home/me/.accentid/references
//! model:
//!   kind: wav2vec2
//!   path: /models/wav2vec2-base.onnx
//!   dimension: 768
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use accentid_embed::{FbankConfig, FbankModel, FeatureModel, OnnxModel, OnnxModelConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{AccentClass, AccentError};

/// Default base configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".accentid";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
/// Default reference directory name under the base directory.
pub const DEFAULT_STORE_DIR: &str = "references";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Accent classes a query is scored against.
    pub classes: Vec<AccentClass>,

    /// Directory holding one `<class>.emb` file per class.
    pub store_dir: PathBuf,

    pub model: ModelConfig,
}

/// Which embedding backend to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// wav2vec2-style ONNX export; needs `path`.
    #[default]
    Wav2vec2,
    /// Log mel filterbank frames; no model file.
    Fbank,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub kind: ModelKind,

    /// ONNX file for `wav2vec2`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Hidden-state width for `wav2vec2`.
    pub dimension: usize,

    /// Shortest accepted waveform, in 16kHz samples.
    pub min_samples: usize,

    /// Tag stored with references. Defaults to the model file stem
    /// (`wav2vec2`) or `fbank-<num_mels>` (`fbank`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,

    /// Which ONNX output holds the hidden states.
    #[serde(skip_serializing_if = "is_zero")]
    pub output_index: usize,

    /// Standardize the waveform before ONNX inference.
    pub normalize_input: bool,

    /// Mel bins for `fbank`.
    pub num_mels: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl Default for ModelConfig {
    fn default() -> Self {
        let onnx = OnnxModelConfig::default();
        Self {
            kind: ModelKind::default(),
            path: None,
            dimension: onnx.dim,
            min_samples: onnx.min_samples,
            tag: None,
            output_index: onnx.output_index,
            normalize_input: onnx.normalize_input,
            num_mels: FbankConfig::default().num_mels,
        }
    }
}

impl ModelConfig {
    /// Constructs the configured model. ONNX models are loaded lazily on
    /// first inference.
    pub fn build(&self) -> Result<Arc<dyn FeatureModel>, AccentError> {
        match self.kind {
            ModelKind::Wav2vec2 => {
                let path = self.path.clone().ok_or_else(|| {
                    AccentError::Config("model.path is required for kind wav2vec2".into())
                })?;
                if self.dimension == 0 {
                    return Err(AccentError::Config("model.dimension must be positive".into()));
                }
                let tag = match &self.tag {
                    Some(t) => t.clone(),
                    None => path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .unwrap_or("onnx")
                        .to_string(),
                };
                let cfg = OnnxModelConfig {
                    path,
                    dim: self.dimension,
                    min_samples: self.min_samples,
                    tag,
                    output_index: self.output_index,
                    normalize_input: self.normalize_input,
                };
                Ok(Arc::new(OnnxModel::lazy(cfg)))
            }
            ModelKind::Fbank => {
                if self.num_mels == 0 {
                    return Err(AccentError::Config("model.num_mels must be positive".into()));
                }
                let model = FbankModel::new(FbankConfig {
                    num_mels: self.num_mels,
                    ..Default::default()
                });
                Ok(Arc::new(model))
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let store_dir = Config::default_dir()
            .map(|d| d.join(DEFAULT_STORE_DIR))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR));
        Self {
            classes: AccentClass::defaults(),
            store_dir,
            model: ModelConfig::default(),
        }
    }
}

impl Config {
    /// `~/.accentid`.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_BASE_DIR))
    }

    /// `~/.accentid/config.yaml`.
    pub fn default_path() -> Option<PathBuf> {
        Self::default_dir().map(|dir| dir.join(DEFAULT_CONFIG_FILE))
    }

    /// Loads `path`, or the default path when `None`. A missing file yields
    /// the defaults.
    pub fn load(path: Option<&Path>) -> Result<Config, AccentError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Config::default()),
            },
        };

        if !path.exists() {
            debug!(path = %path.display(), "config not found, using defaults");
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(&path)
            .map_err(|e| AccentError::Config(format!("{}: {e}", path.display())))?;
        let cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AccentError::Config(format!("{}: {e}", path.display())))?;
        cfg.validate()?;
        debug!(path = %path.display(), classes = cfg.classes.len(), "loaded config");
        Ok(cfg)
    }

    /// Parses and validates YAML.
    pub fn from_yaml(content: &str) -> Result<Config, AccentError> {
        let cfg: Config =
            serde_yaml::from_str(content).map_err(|e| AccentError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> Result<String, AccentError> {
        serde_yaml::to_string(self).map_err(|e| AccentError::Config(e.to_string()))
    }

    /// Writes the configuration, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), AccentError> {
        let io_err = |e: std::io::Error| AccentError::Config(format!("{}: {e}", path.display()));
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_yaml()?).map_err(io_err)
    }

    pub fn validate(&self) -> Result<(), AccentError> {
        if self.classes.is_empty() {
            return Err(AccentError::Config("at least one class is required".into()));
        }
        let mut seen = BTreeSet::new();
        for class in &self.classes {
            if !seen.insert(class) {
                return Err(AccentError::Config(format!("duplicate class {class}")));
            }
        }
        Ok(())
    }

    /// Configured classes in lexicographic order.
    pub fn class_set(&self) -> BTreeSet<AccentClass> {
        self.classes.iter().cloned().collect()
    }
}

/// Sample clip per class, used to seed the reference store.
///
/// ```yaml
/// american: samples/american.wav
/// british: samples/british.wav
/// ```
///
/// Relative paths are resolved against the manifest's directory by
/// [`Manifest::load`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub samples: BTreeMap<AccentClass, PathBuf>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Manifest, AccentError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AccentError::Config(format!("{}: {e}", path.display())))?;
        let mut manifest: Manifest = serde_yaml::from_str(&content)
            .map_err(|e| AccentError::Config(format!("{}: {e}", path.display())))?;
        if let Some(base) = path.parent() {
            for sample in manifest.samples.values_mut() {
                if sample.is_relative() {
                    *sample = base.join(&*sample);
                }
            }
        }
        Ok(manifest)
    }
}
