//! Classifier trait and common types

use serde::{Deserialize, Serialize};
use std::fmt;
use tweetsense_core::{FeatureVector, Result};

/// Trait for all classifiers
///
/// Implementations are pure functions of their loaded weights: the same
/// feature vector always yields the same label.
pub trait Classifier: Send + Sync {
    /// Predict the raw integer label for a feature vector
    fn predict(&self, features: &FeatureVector) -> Result<i64>;

    /// Per-class decision scores, in the order of [`Classifier::classes`]
    fn decision_scores(&self, features: &FeatureVector) -> Result<Vec<ClassScore>>;

    /// Get the classifier name
    fn name(&self) -> &str;

    /// Get the model family
    fn kind(&self) -> ModelKind;

    /// Labels this classifier can emit
    fn classes(&self) -> &[i64];

    /// Width of the feature vectors this classifier was trained on
    fn n_features(&self) -> usize;
}

/// Decision score for a single class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassScore {
    /// Raw class label
    pub label: i64,

    /// Signed distance from the decision boundary
    pub score: f64,
}

/// Family of a trained linear model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Linear support vector classifier
    LinearSvc,
    /// Logistic regression
    LogisticRegression,
    /// Ridge classifier
    RidgeClassifier,
}

impl ModelKind {
    /// Display name used when a model has no configured title
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LinearSvc => "LinearSVC",
            Self::LogisticRegression => "Logistic Regression",
            Self::RidgeClassifier => "Ridge Classifier",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
