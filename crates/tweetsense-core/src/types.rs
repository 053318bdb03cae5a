//! Core types for TweetSense

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentiment of a tweet towards man-made climate change
///
/// Serialized as its integer label so artifacts, datasets and API payloads
/// all speak the same encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Sentiment {
    /// The tweet does not believe in man-made climate change
    Anti,
    /// The tweet neither supports nor refutes man-made climate change
    Neutral,
    /// The tweet supports the belief of man-made climate change
    Pro,
    /// The tweet links to factual news about climate change
    News,
}

impl Sentiment {
    /// Every label, in ascending integer order
    pub const ALL: [Sentiment; 4] = [Self::Anti, Self::Neutral, Self::Pro, Self::News];

    /// The integer label used by the classifiers and the dataset
    pub fn value(self) -> i64 {
        match self {
            Self::Anti => -1,
            Self::Neutral => 0,
            Self::Pro => 1,
            Self::News => 2,
        }
    }

    /// Short class name
    pub fn name(self) -> &'static str {
        match self {
            Self::Anti => "Anti",
            Self::Neutral => "Neutral",
            Self::Pro => "Pro",
            Self::News => "News",
        }
    }

    /// Phrase slotted into "classified as ... climate change"
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Anti => "anti",
            Self::Neutral => "a neutral message on",
            Self::Pro => "pro",
            Self::News => "news about",
        }
    }

    /// One-line description of what the class means
    pub fn description(self) -> &'static str {
        match self {
            Self::Anti => "The tweet does not believe in man-made climate change",
            Self::Neutral => {
                "The tweet neither supports nor refutes the belief of man-made climate change"
            }
            Self::Pro => "The tweet supports the belief of man-made climate change",
            Self::News => "The tweet links to factual news about climate change",
        }
    }
}

impl TryFrom<i64> for Sentiment {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            -1 => Ok(Self::Anti),
            0 => Ok(Self::Neutral),
            1 => Ok(Self::Pro),
            2 => Ok(Self::News),
            other => Err(Error::UnexpectedLabel(other)),
        }
    }
}

impl From<Sentiment> for i64 {
    fn from(sentiment: Sentiment) -> Self {
        sentiment.value()
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.value(), self.name())
    }
}

/// Dense feature vector produced by a vectorizer for a single input
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    /// Wrap raw feature values
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// All-zero vector of the given width
    pub fn zeros(width: usize) -> Self {
        Self(vec![0.0; width])
    }

    /// Width of the vector
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.0.iter().filter(|v| **v != 0.0).count()
    }

    /// Dot product with a weight row of the same width
    pub fn dot(&self, weights: &[f64]) -> Result<f64> {
        if weights.len() != self.0.len() {
            return Err(Error::DimensionMismatch {
                expected: weights.len(),
                actual: self.0.len(),
            });
        }
        Ok(self.0.iter().zip(weights).map(|(x, w)| x * w).sum())
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// A labelled tweet from the training dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledExample {
    /// Tweet text
    pub text: String,

    /// Annotated sentiment
    pub label: Sentiment,
}

impl LabeledExample {
    pub fn new(text: impl Into<String>, label: Sentiment) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// Outcome of running one model over one input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Predicted label
    pub label: Sentiment,

    /// Human-readable sentence (markdown) reporting the label
    pub display_text: String,
}

/// Soft warning raised for input that is unlikely to classify meaningfully
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputWarning {
    /// Nothing but whitespace was submitted
    Empty,
    /// The input box still holds its placeholder text
    Placeholder,
}

impl InputWarning {
    /// Inspect submitted text; `placeholder` is the input box's default value
    pub fn detect(text: &str, placeholder: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            Some(Self::Empty)
        } else if !placeholder.is_empty() && trimmed == placeholder.trim() {
            Some(Self::Placeholder)
        } else {
            None
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Empty => "No text was entered; the prediction below is not meaningful.",
            Self::Placeholder => {
                "The placeholder text was submitted; type a tweet for a meaningful prediction."
            }
        }
    }
}
