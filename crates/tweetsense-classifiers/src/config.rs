//! Configuration for the artifact store

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tweetsense_core::{Error, Result};

/// Locations of every artifact loaded at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Vectorizer artifact shared by every model
    pub vectorizer: PathBuf,

    /// Labelled dataset shown on the information page
    pub dataset: PathBuf,

    /// Models offered to the viewer, in tab order
    pub models: Vec<ModelSpec>,
}

/// A model offered to the viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Stable identifier used in URLs and the API
    pub id: String,

    /// Tab title
    pub title: String,

    /// Short explanation shown above the result
    #[serde(default)]
    pub description: String,

    /// Classifier artifact
    pub path: PathBuf,
}

impl ArtifactConfig {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load from file, resolving relative paths against the file's directory
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::load(path, e))?;
        let config = Self::from_yaml(&content).map_err(|e| Error::load(path, e))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(config.resolve_paths(base))
    }

    /// Make every relative artifact path relative to `base`
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        self.vectorizer = resolve(base, &self.vectorizer);
        self.dataset = resolve(base, &self.dataset);
        for model in &mut self.models {
            model.path = resolve(base, &model.path);
        }
        self
    }

    /// Check the model list is usable
    pub fn validate(&self) -> Result<()> {
        if self.models.is_empty() {
            return Err(Error::config("at least one model must be configured"));
        }

        let mut ids = HashSet::new();
        for model in &self.models {
            if model.id.trim().is_empty() {
                return Err(Error::config("model ids must not be empty"));
            }
            if !ids.insert(model.id.as_str()) {
                return Err(Error::config(format!("duplicate model id '{}'", model.id)));
            }
        }

        Ok(())
    }

    /// Get all model ids, in tab order
    pub fn model_ids(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.id.as_str()).collect()
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
