//! Labelled tweet dataset, loaded from CSV for display

use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::info;
use tweetsense_core::{Error, LabeledExample, Result, Sentiment};

/// One CSV row; columns other than these are ignored
#[derive(Debug, Deserialize)]
struct DatasetRecord {
    sentiment: i64,
    message: String,
}

/// In-memory labelled dataset
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    examples: Vec<LabeledExample>,
}

impl Dataset {
    pub fn new(examples: Vec<LabeledExample>) -> Self {
        Self { examples }
    }

    /// Load a dataset from a CSV file with `sentiment` and `message` columns
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::load(path, e))?;
        let dataset = Self::from_reader(file).map_err(|e| Error::load(path, e))?;

        info!(
            path = %path.display(),
            examples = dataset.len(),
            "Loaded dataset"
        );

        Ok(dataset)
    }

    /// Parse CSV from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let mut examples = Vec::new();

        for (index, record) in reader.deserialize::<DatasetRecord>().enumerate() {
            // Header is line 1
            let line = index + 2;
            let record = record
                .map_err(|e| Error::invalid_artifact(format!("line {line}: {e}")))?;
            let label = Sentiment::try_from(record.sentiment)
                .map_err(|e| Error::invalid_artifact(format!("line {line}: {e}")))?;
            examples.push(LabeledExample::new(record.message, label));
        }

        Ok(Self::new(examples))
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn examples(&self) -> &[LabeledExample] {
        &self.examples
    }

    /// First `limit` examples
    pub fn head(&self, limit: usize) -> &[LabeledExample] {
        &self.examples[..limit.min(self.examples.len())]
    }

    /// Number of examples per label; every label is present, possibly with 0
    pub fn label_counts(&self) -> BTreeMap<Sentiment, usize> {
        let mut counts: BTreeMap<Sentiment, usize> =
            Sentiment::ALL.iter().map(|s| (*s, 0)).collect();
        for example in &self.examples {
            *counts.entry(example.label).or_insert(0) += 1;
        }
        counts
    }
}
