//! TweetSense Classifiers
//!
//! Everything between a line of text and a sentiment sentence:
//! - A count / TF-IDF vectorizer restored from a JSON artifact
//! - Linear classifiers (LinearSVC, logistic regression, ridge) restored the same way
//! - The label formatter that turns an integer label into a sentence
//! - The labelled dataset loader
//! - A registry that loads every artifact once at startup and a pipeline that queries it
//!
//! Artifacts are read-only after loading, so a registry can be shared across
//! any number of requests behind an `Arc` without locking.

pub mod classifier;
pub mod config;
pub mod dataset;
pub mod label;
pub mod linear;
pub mod pipeline;
pub mod registry;
pub mod vectorizer;

pub use classifier::{ClassScore, Classifier, ModelKind};
pub use config::{ArtifactConfig, ModelSpec};
pub use dataset::Dataset;
pub use label::LabelFormatter;
pub use linear::{LinearClassifier, LinearModelArtifact};
pub use pipeline::{ModelOutcome, Prediction, PredictionPipeline, PipelineRun};
pub use registry::{ModelRegistry, RegisteredModel};
pub use vectorizer::{Norm, TextVectorizer, Vectorizer, VectorizerArtifact, VectorizerKind};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{ClassScore, Classifier, ModelKind};
    pub use crate::label::LabelFormatter;
    pub use crate::pipeline::{PredictionPipeline, PipelineRun};
    pub use crate::registry::ModelRegistry;
    pub use crate::vectorizer::{TextVectorizer, Vectorizer};
}
