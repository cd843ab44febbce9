//! Feature records: the leaves of the hierarchy.

use super::extension::{check_extensions, Extensions};
use super::milestone::{Milestone, Note};
use super::progress::Progress;
use super::validation::{require_name, RecordValidationError, Validate};
use serde::{Deserialize, Serialize};

/// A client-valued function tracked through the aspect's milestones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Project-wide sequence number; `0` means not yet assigned.
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub seq: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub milestones: Vec<Milestone>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remarks: Vec<Note>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
    #[serde(default, skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
}

impl Feature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Validate for Feature {
    fn validate(&self) -> Result<(), RecordValidationError> {
        require_name("feature", &self.name)?;
        self.milestones.validate()?;
        self.remarks.validate()?;
        self.progress.validate()?;
        check_extensions(&self.extensions)
    }
}

fn is_unassigned(seq: &u32) -> bool {
    *seq == 0
}
