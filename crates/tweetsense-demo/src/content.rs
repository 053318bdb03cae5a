//! Static copy for each page

use serde::{Deserialize, Serialize};

/// Everything on the site that is not computed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteContent {
    /// Main title, shown on every page
    pub title: String,

    /// Subheader, shown on every page
    pub subheader: String,

    /// Images shown above the title, relative to the assets directory
    pub logos: Vec<Logo>,

    pub about: Section,
    pub team: TeamSection,
    pub project_description: Section,
    pub information: Section,
    pub predictions: Section,
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            title: "Tweet Classifier".to_string(),
            subheader: String::new(),
            logos: Vec::new(),
            about: Section::default(),
            team: TeamSection::default(),
            project_description: Section::default(),
            information: Section::default(),
            predictions: Section::default(),
        }
    }
}

/// A logo image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logo {
    pub path: String,
    #[serde(default)]
    pub alt: String,
}

/// A page section: an info banner followed by markdown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    /// Highlighted one-line introduction
    pub intro: String,

    /// Body copy, markdown
    pub markdown: String,
}

/// Team page copy
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamSection {
    pub intro: String,
    pub members: Vec<TeamMember>,
}

/// One team member, shown as a tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Full name
    pub name: String,

    /// Tab label; the first name when omitted
    #[serde(default)]
    pub short_name: Option<String>,

    /// Job title
    pub role: String,

    /// Photo, relative to the assets directory
    #[serde(default)]
    pub image: Option<String>,
}

impl TeamMember {
    pub fn tab_label(&self) -> &str {
        match &self.short_name {
            Some(short) => short.as_str(),
            None => self.name.split_whitespace().next().unwrap_or(&self.name),
        }
    }

    /// Initials shown when there is no photo
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}
