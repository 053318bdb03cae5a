//! Count / TF-IDF text vectorizer
//!
//! The vocabulary, document frequencies and preprocessing switches are
//! restored from a JSON artifact exported by the training pipeline; nothing
//! here learns. Preprocessing mirrors the common bag-of-words recipe:
//! lowercase, regex tokenization, stop-word removal, word n-grams, term
//! counting, optional sublinear TF, IDF weighting and row normalisation.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;
use tweetsense_core::{Error, FeatureVector, Result};

/// Default token pattern: words of two or more word characters
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Turns raw text into fixed-width feature vectors
pub trait Vectorizer: Send + Sync {
    /// Vectorize a single document
    fn transform(&self, text: &str) -> FeatureVector;

    /// Width of every vector this vectorizer produces
    fn dimension(&self) -> usize;
}

/// Weighting scheme of the exported vectorizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorizerKind {
    /// Raw term counts
    Count,
    /// Term counts weighted by inverse document frequency
    #[default]
    Tfidf,
}

/// Row normalisation applied after TF-IDF weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

/// Serialized vectorizer state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    /// Weighting scheme
    #[serde(default)]
    pub kind: VectorizerKind,

    /// Term -> column index
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per column (TF-IDF only)
    #[serde(default)]
    pub idf: Option<Vec<f64>>,

    /// Lowercase before tokenizing
    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// Inclusive range of word n-gram lengths
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// Terms dropped before n-gram construction
    #[serde(default)]
    pub stop_words: Vec<String>,

    /// Row normalisation (TF-IDF only)
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,

    /// Replace tf with 1 + ln(tf)
    #[serde(default)]
    pub sublinear_tf: bool,

    /// Clamp counts to 1
    #[serde(default)]
    pub binary: bool,

    /// Token regex; defaults to [`DEFAULT_TOKEN_PATTERN`]
    #[serde(default)]
    pub token_pattern: Option<String>,
}

fn default_true() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

impl VectorizerArtifact {
    /// Minimal TF-IDF artifact over the given terms, one column per term
    pub fn tfidf(terms: &[&str], idf: Vec<f64>) -> Self {
        Self {
            kind: VectorizerKind::Tfidf,
            vocabulary: terms
                .iter()
                .enumerate()
                .map(|(index, term)| (term.to_string(), index))
                .collect(),
            idf: Some(idf),
            lowercase: true,
            ngram_range: default_ngram_range(),
            stop_words: Vec::new(),
            norm: default_norm(),
            sublinear_tf: false,
            binary: false,
            token_pattern: None,
        }
    }

    /// Minimal count artifact over the given terms
    pub fn count(terms: &[&str]) -> Self {
        Self {
            kind: VectorizerKind::Count,
            idf: None,
            norm: None,
            ..Self::tfidf(terms, Vec::new())
        }
    }
}

/// Vectorizer restored from an exported artifact
#[derive(Debug, Clone)]
pub struct TextVectorizer {
    kind: VectorizerKind,
    vocabulary: HashMap<String, usize>,
    idf: Option<Vec<f64>>,
    lowercase: bool,
    ngram_range: (usize, usize),
    stop_words: HashSet<String>,
    norm: Option<Norm>,
    sublinear_tf: bool,
    binary: bool,
    token_pattern: Regex,
}

impl TextVectorizer {
    /// Build a vectorizer from an artifact, validating its consistency
    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self> {
        let width = artifact.vocabulary.len();
        if width == 0 {
            return Err(Error::invalid_artifact("vectorizer vocabulary is empty"));
        }

        let mut seen = vec![false; width];
        for (term, &index) in &artifact.vocabulary {
            if index >= width {
                return Err(Error::invalid_artifact(format!(
                    "vocabulary index {index} for '{term}' is out of range (size {width})"
                )));
            }
            if std::mem::replace(&mut seen[index], true) {
                return Err(Error::invalid_artifact(format!(
                    "vocabulary index {index} is assigned to more than one term"
                )));
            }
        }

        let idf = match (artifact.kind, artifact.idf) {
            (VectorizerKind::Count, _) => None,
            (VectorizerKind::Tfidf, Some(idf)) if idf.len() != width => {
                return Err(Error::invalid_artifact(format!(
                    "idf has {} entries but the vocabulary has {width}",
                    idf.len()
                )));
            }
            (VectorizerKind::Tfidf, idf) => idf,
        };

        let (min_n, max_n) = artifact.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::invalid_artifact(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        let pattern = artifact
            .token_pattern
            .as_deref()
            .unwrap_or(DEFAULT_TOKEN_PATTERN);
        let token_pattern = Regex::new(pattern).map_err(|e| {
            Error::invalid_artifact(format!("token pattern '{pattern}' does not compile: {e}"))
        })?;

        let lowercase = artifact.lowercase;
        let stop_words = artifact
            .stop_words
            .into_iter()
            .map(|w| if lowercase { w.to_lowercase() } else { w })
            .collect();

        Ok(Self {
            kind: artifact.kind,
            vocabulary: artifact.vocabulary,
            idf,
            lowercase,
            ngram_range: artifact.ngram_range,
            stop_words,
            norm: artifact.norm,
            sublinear_tf: artifact.sublinear_tf,
            binary: artifact.binary,
            token_pattern,
        })
    }

    /// Load a vectorizer artifact from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::load(path, e))?;
        let artifact: VectorizerArtifact =
            serde_json::from_str(&content).map_err(|e| Error::load(path, e))?;
        let vectorizer = Self::from_artifact(artifact).map_err(|e| Error::load(path, e))?;

        info!(
            path = %path.display(),
            kind = ?vectorizer.kind,
            dimension = vectorizer.dimension(),
            "Loaded vectorizer"
        );

        Ok(vectorizer)
    }

    pub fn kind(&self) -> VectorizerKind {
        self.kind
    }

    /// Column index of a term, if it is in the vocabulary
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// Split text into the terms that are looked up in the vocabulary
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(*token))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|gram| gram.join(" ")));
        }
        terms
    }

    fn normalize(&self, values: &mut [f64]) {
        let norm = match (self.kind, self.norm) {
            (VectorizerKind::Tfidf, Some(Norm::L1)) => values.iter().map(|v| v.abs()).sum::<f64>(),
            (VectorizerKind::Tfidf, Some(Norm::L2)) => {
                values.iter().map(|v| v * v).sum::<f64>().sqrt()
            }
            _ => return,
        };
        if norm > 0.0 {
            values.iter_mut().for_each(|v| *v /= norm);
        }
    }
}

impl Vectorizer for TextVectorizer {
    fn transform(&self, text: &str) -> FeatureVector {
        let mut values = vec![0.0_f64; self.dimension()];

        for term in self.analyze(text) {
            if let Some(index) = self.term_index(&term) {
                values[index] += 1.0;
            }
        }

        for value in values.iter_mut().filter(|v| **v > 0.0) {
            if self.binary {
                *value = 1.0;
            }
            if self.kind == VectorizerKind::Tfidf && self.sublinear_tf {
                *value = 1.0 + value.ln();
            }
        }

        if let Some(idf) = &self.idf {
            values.iter_mut().zip(idf).for_each(|(v, w)| *v *= w);
        }

        self.normalize(&mut values);
        FeatureVector::new(values)
    }

    fn dimension(&self) -> usize {
        self.vocabulary.len()
    }
}
