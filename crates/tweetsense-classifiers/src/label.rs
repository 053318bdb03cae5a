//! Turns integer labels into the sentence shown to the viewer

use tweetsense_core::{PredictionResult, Result, Sentiment};

/// Subject used when none is configured
pub const DEFAULT_TOPIC: &str = "climate change";

/// Formats a classifier's raw label as a markdown sentence
#[derive(Debug, Clone)]
pub struct LabelFormatter {
    topic: String,
}

impl LabelFormatter {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }

    /// Phrase for a raw label; labels outside {-1, 0, 1, 2} are an error
    pub fn phrase(&self, label: i64) -> Result<&'static str> {
        Ok(Sentiment::try_from(label)?.phrase())
    }

    /// Full prediction result for a raw label
    pub fn format(&self, label: i64) -> Result<PredictionResult> {
        let sentiment = Sentiment::try_from(label)?;
        Ok(PredictionResult {
            label: sentiment,
            display_text: format!(
                "The text entered above has been classified as **{}** {}.",
                sentiment.phrase(),
                self.topic
            ),
        })
    }
}

impl Default for LabelFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_TOPIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use tweetsense_core::Error;

    #[test]
    fn test_formats_every_known_label() {
        let formatter = LabelFormatter::default();
        let texts: HashSet<String> = [-1, 0, 1, 2]
            .into_iter()
            .map(|label| formatter.format(label).unwrap().display_text)
            .collect();
        assert_eq!(texts.len(), 4);
    }

    #[test]
    fn test_format_text() {
        let result = LabelFormatter::default().format(-1).unwrap();
        assert_eq!(result.label, Sentiment::Anti);
        assert_eq!(
            result.display_text,
            "The text entered above has been classified as **anti** climate change."
        );

        let news = LabelFormatter::default().format(2).unwrap();
        assert!(news.display_text.contains("**news about**"));
    }

    #[test]
    fn test_format_is_stable() {
        let formatter = LabelFormatter::default();
        for label in [-1, 0, 1, 2] {
            assert_eq!(formatter.format(label).unwrap(), formatter.format(label).unwrap());
        }
    }

    #[test]
    fn test_unknown_label_is_surfaced() {
        let formatter = LabelFormatter::default();
        assert!(matches!(formatter.format(3), Err(Error::UnexpectedLabel(3))));
        assert!(matches!(formatter.phrase(-7), Err(Error::UnexpectedLabel(-7))));
    }

    #[test]
    fn test_custom_topic() {
        let result = LabelFormatter::new("global warming").format(1).unwrap();
        assert!(result.display_text.ends_with("**pro** global warming."));
    }
}
