//! Everything loaded at startup, shared read-only afterwards

use crate::config::AppConfig;
use std::sync::Arc;
use tracing::info;
use tweetsense_classifiers::{Dataset, LabelFormatter, ModelRegistry, PredictionPipeline};
use tweetsense_core::Result;

/// Loaded artifacts plus the configuration that produced them
pub struct AppContext {
    pub config: AppConfig,
    pub pipeline: PredictionPipeline,
    pub dataset: Dataset,
}

impl AppContext {
    /// Load every artifact named by the configuration
    ///
    /// Fails on the first missing or malformed artifact; nothing is served
    /// until this succeeds.
    pub fn load(config: AppConfig) -> Result<Self> {
        config.validate()?;

        let registry = ModelRegistry::from_config(&config.artifacts)?;
        let dataset = Dataset::load(&config.artifacts.dataset)?;

        info!(
            models = registry.count(),
            features = registry.dimension(),
            examples = dataset.len(),
            "Application context ready"
        );

        Ok(Self::from_parts(config, registry, dataset))
    }

    /// Assemble a context from already-loaded parts
    pub fn from_parts(config: AppConfig, registry: ModelRegistry, dataset: Dataset) -> Self {
        let formatter = LabelFormatter::new(config.topic.clone());
        Self {
            pipeline: PredictionPipeline::new(Arc::new(registry), formatter),
            config,
            dataset,
        }
    }

    pub fn registry(&self) -> &ModelRegistry {
        self.pipeline.registry()
    }
}
