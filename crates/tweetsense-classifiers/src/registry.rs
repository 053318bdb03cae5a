//! Load-once store of the vectorizer and every offered model

use crate::{ArtifactConfig, Classifier, LinearClassifier, ModelSpec, TextVectorizer, Vectorizer};
use std::sync::Arc;
use tracing::info;
use tweetsense_core::{Error, Result};

/// A classifier together with how it is presented
#[derive(Clone)]
pub struct RegisteredModel {
    pub spec: ModelSpec,
    pub classifier: Arc<dyn Classifier>,
}

/// Registry for the shared vectorizer and the classifiers built on it
///
/// Every registered classifier accepts exactly the vectorizer's output width;
/// registration refuses anything else.
#[derive(Clone)]
pub struct ModelRegistry {
    vectorizer: Arc<dyn Vectorizer>,
    models: Vec<RegisteredModel>,
}

impl ModelRegistry {
    /// Create an empty registry around a vectorizer
    pub fn new(vectorizer: Arc<dyn Vectorizer>) -> Self {
        Self {
            vectorizer,
            models: Vec::new(),
        }
    }

    /// Load the vectorizer and every configured model
    ///
    /// Any missing, corrupt or mis-shaped artifact fails the whole load.
    pub fn from_config(config: &ArtifactConfig) -> Result<Self> {
        config.validate()?;

        info!("Initializing model registry with {} models", config.models.len());

        let vectorizer = TextVectorizer::load(&config.vectorizer)?;
        let mut registry = Self::new(Arc::new(vectorizer));

        for spec in &config.models {
            info!("Loading model: {}", spec.id);
            let classifier = LinearClassifier::load(&spec.id, &spec.path)?;
            registry
                .register(spec.clone(), Arc::new(classifier))
                .map_err(|e| Error::load(&spec.path, e))?;
            info!("✓ Loaded model: {}", spec.id);
        }

        info!(
            "Model registry initialized with {} models over {} features",
            registry.models.len(),
            registry.dimension()
        );

        Ok(registry)
    }

    /// Register a classifier; its width must match the vectorizer
    pub fn register(&mut self, spec: ModelSpec, classifier: Arc<dyn Classifier>) -> Result<()> {
        if self.get(&spec.id).is_some() {
            return Err(Error::config(format!("model '{}' is already registered", spec.id)));
        }

        let expected = self.dimension();
        if classifier.n_features() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                actual: classifier.n_features(),
            });
        }

        self.models.push(RegisteredModel { spec, classifier });
        Ok(())
    }

    /// Builder-style [`ModelRegistry::register`]
    pub fn with_model(mut self, spec: ModelSpec, classifier: Arc<dyn Classifier>) -> Result<Self> {
        self.register(spec, classifier)?;
        Ok(self)
    }

    /// Get a model by id
    pub fn get(&self, id: &str) -> Option<&RegisteredModel> {
        self.models.iter().find(|m| m.spec.id == id)
    }

    /// All models, in registration (tab) order
    pub fn models(&self) -> &[RegisteredModel] {
        &self.models
    }

    pub fn vectorizer(&self) -> &Arc<dyn Vectorizer> {
        &self.vectorizer
    }

    /// Feature width shared by the vectorizer and every model
    pub fn dimension(&self) -> usize {
        self.vectorizer.dimension()
    }

    /// Get the number of registered models
    pub fn count(&self) -> usize {
        self.models.len()
    }
}
