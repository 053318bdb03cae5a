//! TweetSense Core
//!
//! Core types and error handling shared across the TweetSense crates.
//!
//! This crate provides:
//! - The sentiment label set and its human-readable phrasing
//! - Feature vectors, labelled examples and prediction results
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{FeatureVector, InputWarning, LabeledExample, PredictionResult, Sentiment};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{FeatureVector, InputWarning, LabeledExample, PredictionResult, Sentiment};
}
