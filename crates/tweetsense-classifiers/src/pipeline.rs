//! Prediction pipeline: vectorize, classify, format
//!
//! The pipeline reports each model's answer on its own; it never votes or
//! ensembles across models.

use crate::{ClassScore, LabelFormatter, ModelRegistry, RegisteredModel};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use tweetsense_core::{Error, FeatureVector, InputWarning, PredictionResult, Result};

/// A formatted prediction plus the scores behind it
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub result: PredictionResult,
    pub scores: Vec<ClassScore>,
}

/// One model's answer within a run
#[derive(Debug)]
pub struct ModelOutcome {
    /// Model id
    pub model_id: String,

    /// Model tab title
    pub title: String,

    /// Prediction, or the error that replaced it
    pub result: Result<Prediction>,

    /// Time spent in this model, in microseconds
    pub latency_us: u64,
}

/// Answers from every requested model for one input
#[derive(Debug)]
pub struct PipelineRun {
    /// The submitted text
    pub text: String,

    /// Soft warning for blank or placeholder input
    pub warning: Option<InputWarning>,

    /// One outcome per model, in tab order
    pub outcomes: Vec<ModelOutcome>,
}

/// Wires the shared vectorizer through each classifier and the formatter
#[derive(Clone)]
pub struct PredictionPipeline {
    registry: Arc<ModelRegistry>,
    formatter: LabelFormatter,
}

impl PredictionPipeline {
    pub fn new(registry: Arc<ModelRegistry>, formatter: LabelFormatter) -> Self {
        Self {
            registry,
            formatter,
        }
    }

    pub fn registry(&self) -> &Arc<ModelRegistry> {
        &self.registry
    }

    /// Vectorize text with the shared vectorizer
    pub fn vectorize(&self, text: &str) -> FeatureVector {
        self.registry.vectorizer().transform(text)
    }

    /// Run a single model by id
    pub fn predict(&self, model_id: &str, text: &str) -> Result<Prediction> {
        let model = self
            .registry
            .get(model_id)
            .ok_or_else(|| Error::UnknownModel(model_id.to_string()))?;
        let features = self.vectorize(text);
        self.predict_features(model, &features)
    }

    /// Run every registered model over the same input
    pub fn predict_all(&self, text: &str, placeholder: &str) -> PipelineRun {
        self.run(text, placeholder, self.registry.models())
    }

    /// Run the listed models, or all of them when `model_id` is `None`
    pub fn predict_selected(
        &self,
        text: &str,
        placeholder: &str,
        model_id: Option<&str>,
    ) -> Result<PipelineRun> {
        match model_id {
            None => Ok(self.predict_all(text, placeholder)),
            Some(id) => {
                let model = self
                    .registry
                    .get(id)
                    .ok_or_else(|| Error::UnknownModel(id.to_string()))?;
                Ok(self.run(text, placeholder, std::slice::from_ref(model)))
            }
        }
    }

    fn run(&self, text: &str, placeholder: &str, models: &[RegisteredModel]) -> PipelineRun {
        let warning = InputWarning::detect(text, placeholder);
        let features = self.vectorize(text);

        debug!(
            chars = text.len(),
            active_features = features.nnz(),
            models = models.len(),
            ?warning,
            "Running prediction pipeline"
        );

        let outcomes = models
            .iter()
            .map(|model| {
                let start = Instant::now();
                let result = self.predict_features(model, &features);
                ModelOutcome {
                    model_id: model.spec.id.clone(),
                    title: model.spec.title.clone(),
                    result,
                    latency_us: start.elapsed().as_micros() as u64,
                }
            })
            .collect();

        PipelineRun {
            text: text.to_string(),
            warning,
            outcomes,
        }
    }

    fn predict_features(&self, model: &RegisteredModel, features: &FeatureVector) -> Result<Prediction> {
        let label = model.classifier.predict(features)?;
        let result = self.formatter.format(label)?;
        let scores = model.classifier.decision_scores(features)?;

        debug!(model = %model.spec.id, label, "Prediction complete");

        Ok(Prediction { result, scores })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Classifier, LinearClassifier, LinearModelArtifact, ModelKind, ModelSpec, TextVectorizer,
        VectorizerArtifact,
    };
    use std::path::PathBuf;
    use tweetsense_core::Sentiment;

    fn pipeline() -> PredictionPipeline {
        let vectorizer =
            TextVectorizer::from_artifact(VectorizerArtifact::tfidf(&["hoax", "nasa", "real"], vec![1.0; 3]))
                .unwrap();
        let classifier: Arc<dyn Classifier> = Arc::new(
            LinearClassifier::from_artifact(
                "svc",
                LinearModelArtifact {
                    kind: ModelKind::LinearSvc,
                    classes: vec![-1, 0, 1, 2],
                    coef: vec![
                        vec![1.0, 0.0, 0.0],
                        vec![0.0, 0.0, 0.0],
                        vec![0.0, 0.0, 1.0],
                        vec![0.0, 1.0, 0.0],
                    ],
                    intercept: vec![0.0, 0.1, 0.0, 0.0],
                },
            )
            .unwrap(),
        );
        let spec = ModelSpec {
            id: "svc".to_string(),
            title: "LinearSVC".to_string(),
            description: String::new(),
            path: PathBuf::from("svc.json"),
        };
        let registry = ModelRegistry::new(Arc::new(vectorizer))
            .with_model(spec, classifier)
            .unwrap();
        PredictionPipeline::new(Arc::new(registry), LabelFormatter::default())
    }

    #[test]
    fn test_predict_single_model() {
        let prediction = pipeline().predict("svc", "what a hoax").unwrap();
        assert_eq!(prediction.result.label, Sentiment::Anti);
        assert_eq!(prediction.scores.len(), 4);
    }

    #[test]
    fn test_predict_unknown_model() {
        let err = pipeline().predict("nope", "text").unwrap_err();
        assert!(matches!(err, Error::UnknownModel(id) if id == "nope"));
    }

    #[test]
    fn test_predict_all_flags_placeholder() {
        let run = pipeline().predict_all("Type Here", "Type Here");
        assert_eq!(run.warning, Some(InputWarning::Placeholder));
        assert_eq!(run.outcomes.len(), 1);
        // Placeholder still classifies
        assert!(run.outcomes[0].result.is_ok());
    }

    #[test]
    fn test_empty_input_still_predicts() {
        let run = pipeline().predict_all("", "Type Here");
        assert_eq!(run.warning, Some(InputWarning::Empty));
        let prediction = run.outcomes[0].result.as_ref().unwrap();
        assert_eq!(prediction.result.label, Sentiment::Neutral);
    }

    #[test]
    fn test_predict_selected() {
        let pipeline = pipeline();
        let run = pipeline
            .predict_selected("NASA data", "", Some("svc"))
            .unwrap();
        assert_eq!(run.outcomes[0].model_id, "svc");
        assert!(pipeline.predict_selected("x", "", Some("missing")).is_err());
    }
}
