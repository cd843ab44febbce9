//! Aspect records and their milestone/level configuration.
//!
//! # Responsibility
//! - Define the unit of planning inside a project (e.g. "Backend", "UI").
//! - Carry the milestone definitions every nested feature is measured against.
//!
//! # Invariants
//! - `name` is non-empty after trimming.
//! - Milestone efforts are percentages; a well-formed set sums to 100.

use super::extension::{check_extensions, Extensions};
use super::milestone::MilestoneInfo;
use super::progress::Progress;
use super::subject::Subject;
use super::validation::{require_name, RecordValidationError, Validate};
use serde::{Deserialize, Serialize};

/// Milestone definitions with their standard FDD efforts.
const STANDARD_MILESTONES: &[(&str, u8)] = &[
    ("Domain Walkthrough", 1),
    ("Design", 40),
    ("Design Inspection", 3),
    ("Code", 45),
    ("Code Inspection", 10),
    ("Promote To Build", 1),
];

/// Planning unit owned by a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<AspectInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<Subject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
    #[serde(default, skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
}

impl Aspect {
    /// Creates an aspect with no info block and no subjects.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Milestone definitions for nested features; empty when `info` is absent.
    pub fn milestone_info(&self) -> &[MilestoneInfo] {
        self.info
            .as_ref()
            .map(|info| info.milestone_info.as_slice())
            .unwrap_or(&[])
    }
}

impl Validate for Aspect {
    fn validate(&self) -> Result<(), RecordValidationError> {
        require_name("aspect", &self.name)?;
        self.info.validate()?;
        self.subjects.validate()?;
        self.progress.validate()?;
        check_extensions(&self.extensions)
    }
}

/// Level labels and milestone definitions of an aspect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AspectInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone_name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub milestone_info: Vec<MilestoneInfo>,
    #[serde(default, skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
}

impl AspectInfo {
    /// Returns the classic FDD configuration: Subject/Activity/Feature/Milestone
    /// labels and the six standard milestones.
    pub fn standard() -> Self {
        Self {
            id: None,
            subject_name: Some("Subject".to_string()),
            activity_name: Some("Activity".to_string()),
            feature_name: Some("Feature".to_string()),
            milestone_name: Some("Milestone".to_string()),
            milestone_info: STANDARD_MILESTONES
                .iter()
                .map(|(name, effort)| MilestoneInfo::new(*name, *effort))
                .collect(),
            extensions: Extensions::new(),
        }
    }

    /// Sum of all milestone efforts.
    pub fn total_effort(&self) -> u32 {
        self.milestone_info
            .iter()
            .map(|info| u32::from(info.effort))
            .sum()
    }
}

impl Validate for AspectInfo {
    fn validate(&self) -> Result<(), RecordValidationError> {
        self.milestone_info.validate()?;
        check_extensions(&self.extensions)
    }
}
