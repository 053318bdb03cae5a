use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Navigation options, in sidebar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    AboutUs,
    Team,
    ProjectDescription,
    Information,
    ModelPredictions,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Self::AboutUs,
        Self::Team,
        Self::ProjectDescription,
        Self::Information,
        Self::ModelPredictions,
    ];

    /// URL value of the `page` query parameter
    pub fn slug(&self) -> &'static str {
        match self {
            Self::AboutUs => "about",
            Self::Team => "team",
            Self::ProjectDescription => "project",
            Self::Information => "information",
            Self::ModelPredictions => "predictions",
        }
    }

    /// Sidebar label
    pub fn title(&self) -> &'static str {
        match self {
            Self::AboutUs => "About Us",
            Self::Team => "Team",
            Self::ProjectDescription => "Project Description",
            Self::Information => "Information",
            Self::ModelPredictions => "Model Predictions",
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::AboutUs
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Error for a navigation value that names no page
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page: {0}")]
pub struct UnknownPage(pub String);

impl FromStr for Page {
    type Err = UnknownPage;

    /// Accepts the slug or the sidebar label, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|page| {
                page.slug().eq_ignore_ascii_case(wanted) || page.title().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}
