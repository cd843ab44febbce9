//! Subject areas and the activities grouped under them.

use super::extension::{check_extensions, Extensions};
use super::feature::Feature;
use super::progress::Progress;
use super::validation::{require_name, RecordValidationError, Validate};
use serde::{Deserialize, Serialize};

/// Major feature set of an aspect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Short code used when numbering the subject's features.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<Activity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
    #[serde(default, skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
}

impl Subject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Validate for Subject {
    fn validate(&self) -> Result<(), RecordValidationError> {
        require_name("subject", &self.name)?;
        self.activities.validate()?;
        self.progress.validate()?;
        check_extensions(&self.extensions)
    }
}

/// Feature set inside a subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Owner initials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<Feature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
    #[serde(default, skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
}

impl Activity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Validate for Activity {
    fn validate(&self) -> Result<(), RecordValidationError> {
        require_name("activity", &self.name)?;
        self.features.validate()?;
        self.progress.validate()?;
        check_extensions(&self.extensions)
    }
}
