//! Page controller: navigation choice in, view model out
//!
//! Views are plain data. Rendering them to HTML (or JSON) happens elsewhere,
//! so every navigation path can be checked without a browser.

use crate::content::{Section, TeamSection};
use crate::context::AppContext;
use crate::pages::{Page, UnknownPage};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use tweetsense_classifiers::PipelineRun;
use tweetsense_core::{InputWarning, LabeledExample, Sentiment};

/// Query parameters of a page request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageRequest {
    /// Navigation choice; the first page when absent
    pub page: Option<String>,

    /// Submitted text; predictions run only when present
    pub text: Option<String>,

    /// Raw data toggle on the information page
    pub show_raw: Option<String>,
}

impl PageRequest {
    pub fn for_page(page: Page) -> Self {
        Self {
            page: Some(page.slug().to_string()),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_raw_data(mut self) -> Self {
        self.show_raw = Some("true".to_string());
        self
    }

    /// Checkbox-style truthiness of the raw data toggle
    pub fn show_raw(&self) -> bool {
        matches!(
            self.show_raw.as_deref().map(str::trim),
            Some("1" | "true" | "on" | "yes")
        )
    }
}

/// Rendered-agnostic description of one page
#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    /// Selected page; `None` when the selection was not recognised
    pub page: Option<Page>,
    pub body: PageBody,
}

impl PageView {
    pub fn is_not_found(&self) -> bool {
        matches!(self.body, PageBody::NotFound { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageBody {
    About {
        section: Section,
    },
    Team {
        section: TeamSection,
    },
    ProjectDescription {
        section: Section,
    },
    Information {
        section: Section,
        legend: Vec<LabelLegend>,
        total_examples: usize,
        raw: Option<RawTable>,
    },
    Predictions(PredictionsView),
    NotFound {
        requested: String,
    },
}

/// One row of the label legend
#[derive(Debug, Clone, Serialize)]
pub struct LabelLegend {
    pub label: Sentiment,
    pub name: &'static str,
    pub description: &'static str,
    pub count: usize,
}

/// The visible slice of the dataset
#[derive(Debug, Clone, Serialize)]
pub struct RawTable {
    pub rows: Vec<LabeledExample>,
    pub total: usize,
}

impl RawTable {
    pub fn is_truncated(&self) -> bool {
        self.rows.len() < self.total
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PredictionsView {
    pub section: Section,
    pub placeholder: String,
    /// Text box contents
    pub text: String,
    pub submitted: bool,
    pub warning: Option<InputWarning>,
    pub tabs: Vec<PredictionTab>,
}

/// One model's tab
#[derive(Debug, Clone, Serialize)]
pub struct PredictionTab {
    pub model_id: String,
    pub title: String,
    pub description: String,
    /// `None` until the form is submitted
    pub outcome: Option<TabOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TabOutcome {
    Success {
        label: Sentiment,
        display_text: String,
    },
    Error {
        message: String,
    },
}

/// Selects and builds the view for a navigation choice
#[derive(Clone)]
pub struct PageController {
    context: Arc<AppContext>,
}

impl PageController {
    pub fn new(context: Arc<AppContext>) -> Self {
        Self { context }
    }

    /// Build the view for a request
    pub fn view(&self, request: &PageRequest) -> PageView {
        let selection = request
            .page
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let page = match selection.map(str::parse::<Page>) {
            None => Page::default(),
            Some(Ok(page)) => page,
            Some(Err(UnknownPage(requested))) => {
                warn!(%requested, "Unknown page requested");
                return PageView {
                    page: None,
                    body: PageBody::NotFound { requested },
                };
            }
        };

        debug!(page = page.slug(), "Rendering page");

        let content = &self.context.config.content;
        let body = match page {
            Page::AboutUs => PageBody::About {
                section: content.about.clone(),
            },
            Page::Team => PageBody::Team {
                section: content.team.clone(),
            },
            Page::ProjectDescription => PageBody::ProjectDescription {
                section: content.project_description.clone(),
            },
            Page::Information => self.information(request.show_raw()),
            Page::ModelPredictions => PageBody::Predictions(self.predictions(request.text.as_deref())),
        };

        PageView {
            page: Some(page),
            body,
        }
    }

    fn information(&self, show_raw: bool) -> PageBody {
        let dataset = &self.context.dataset;
        let counts = dataset.label_counts();
        let legend = Sentiment::ALL
            .into_iter()
            .map(|label| LabelLegend {
                label,
                name: label.name(),
                description: label.description(),
                count: counts.get(&label).copied().unwrap_or(0),
            })
            .collect();

        let raw = show_raw.then(|| RawTable {
            rows: dataset.head(self.context.config.max_raw_rows).to_vec(),
            total: dataset.len(),
        });

        PageBody::Information {
            section: self.context.config.content.information.clone(),
            legend,
            total_examples: dataset.len(),
            raw,
        }
    }

    fn predictions(&self, submitted: Option<&str>) -> PredictionsView {
        let config = &self.context.config;
        let models = self.context.registry().models();

        let (text, warning, outcomes) = match submitted {
            None => (config.placeholder.clone(), None, None),
            Some(text) => {
                let run = self.context.pipeline.predict_all(text, &config.placeholder);
                if let Some(warning) = run.warning {
                    warn!(?warning, "Low-information input submitted");
                }
                (text.to_string(), run.warning, Some(tab_outcomes(run)))
            }
        };

        let mut outcomes = outcomes.map(Vec::into_iter);
        let tabs = models
            .iter()
            .map(|model| PredictionTab {
                model_id: model.spec.id.clone(),
                title: model.spec.title.clone(),
                description: model.spec.description.clone(),
                outcome: outcomes.as_mut().and_then(Iterator::next),
            })
            .collect();

        PredictionsView {
            section: config.content.predictions.clone(),
            placeholder: config.placeholder.clone(),
            text,
            submitted: submitted.is_some(),
            warning,
            tabs,
        }
    }
}

fn tab_outcomes(run: PipelineRun) -> Vec<TabOutcome> {
    run.outcomes
        .into_iter()
        .map(|outcome| match outcome.result {
            Ok(prediction) => TabOutcome::Success {
                label: prediction.result.label,
                display_text: prediction.result.display_text,
            },
            Err(e) => {
                warn!(model = %outcome.model_id, error = %e, "Prediction failed");
                TabOutcome::Error {
                    message: e.to_string(),
                }
            }
        })
        .collect()
}
