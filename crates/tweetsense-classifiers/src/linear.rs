//! Linear classifiers restored from exported weights
//!
//! LinearSVC, logistic regression and ridge classifiers all predict through
//! the same decision function, `coef · x + intercept`, so one implementation
//! serves the three families. Binary models carry a single coefficient row
//! whose positive side is the second class.

use crate::classifier::{ClassScore, Classifier, ModelKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use tweetsense_core::{Error, FeatureVector, Result};

/// Serialized linear model weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModelArtifact {
    /// Model family
    pub kind: ModelKind,

    /// Class labels, in coefficient-row order
    pub classes: Vec<i64>,

    /// One weight row per class (a single row for binary models)
    pub coef: Vec<Vec<f64>>,

    /// One bias per coefficient row
    pub intercept: Vec<f64>,
}

/// A trained linear classifier
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    name: String,
    kind: ModelKind,
    classes: Vec<i64>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    n_features: usize,
}

impl LinearClassifier {
    /// Build a classifier from an artifact, validating the weight shapes
    pub fn from_artifact(name: impl Into<String>, artifact: LinearModelArtifact) -> Result<Self> {
        let name = name.into();
        let LinearModelArtifact {
            kind,
            classes,
            coef,
            intercept,
        } = artifact;

        if classes.len() < 2 {
            return Err(Error::invalid_artifact(format!(
                "model '{name}' needs at least two classes, got {}",
                classes.len()
            )));
        }

        let expected_rows = if classes.len() == 2 && coef.len() == 1 {
            1
        } else {
            classes.len()
        };
        if coef.len() != expected_rows {
            return Err(Error::invalid_artifact(format!(
                "model '{name}' has {} coefficient rows for {} classes",
                coef.len(),
                classes.len()
            )));
        }
        if intercept.len() != coef.len() {
            return Err(Error::invalid_artifact(format!(
                "model '{name}' has {} intercepts for {} coefficient rows",
                intercept.len(),
                coef.len()
            )));
        }

        let n_features = coef[0].len();
        if n_features == 0 || coef.iter().any(|row| row.len() != n_features) {
            return Err(Error::invalid_artifact(format!(
                "model '{name}' has ragged or empty coefficient rows"
            )));
        }

        Ok(Self {
            name,
            kind,
            classes,
            coef,
            intercept,
            n_features,
        })
    }

    /// Load a classifier artifact from a JSON file
    pub fn load(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::load(path, e))?;
        let artifact: LinearModelArtifact =
            serde_json::from_str(&content).map_err(|e| Error::load(path, e))?;
        let classifier = Self::from_artifact(name, artifact).map_err(|e| Error::load(path, e))?;

        info!(
            model = %classifier.name,
            kind = %classifier.kind,
            classes = classifier.classes.len(),
            n_features = classifier.n_features,
            "Loaded classifier"
        );

        Ok(classifier)
    }

    fn is_binary(&self) -> bool {
        self.coef.len() == 1
    }

    fn check_width(&self, features: &FeatureVector) -> Result<()> {
        if features.len() != self.n_features {
            return Err(Error::DimensionMismatch {
                expected: self.n_features,
                actual: features.len(),
            });
        }
        Ok(())
    }

    /// Raw decision value per coefficient row
    fn decision_function(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        self.check_width(features)?;
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, bias)| Ok(features.dot(row)? + bias))
            .collect()
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<i64> {
        let scores = self.decision_function(features)?;

        if self.is_binary() {
            let index = usize::from(scores[0] > 0.0);
            return Ok(self.classes[index]);
        }

        let mut best = 0;
        for (index, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = index;
            }
        }
        Ok(self.classes[best])
    }

    fn decision_scores(&self, features: &FeatureVector) -> Result<Vec<ClassScore>> {
        let scores = self.decision_function(features)?;

        if self.is_binary() {
            return Ok(vec![
                ClassScore {
                    label: self.classes[0],
                    score: -scores[0],
                },
                ClassScore {
                    label: self.classes[1],
                    score: scores[0],
                },
            ]);
        }

        Ok(self
            .classes
            .iter()
            .zip(scores)
            .map(|(&label, score)| ClassScore { label, score })
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ModelKind {
        self.kind
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }
}
