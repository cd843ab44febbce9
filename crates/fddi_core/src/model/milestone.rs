//! Milestones, milestone definitions and feature remarks.

use super::extension::{check_extensions, Extensions};
use super::progress::Status;
use super::validation::{require_name, RecordValidationError, Validate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One milestone instance on a feature.
///
/// Milestones are positional: the n-th milestone of a feature is measured
/// against the n-th `MilestoneInfo` of the owning aspect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planned: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
}

impl Milestone {
    pub fn planned(date: NaiveDate) -> Self {
        Self {
            planned: Some(date),
            ..Self::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == Some(Status::Complete)
    }
}

impl Validate for Milestone {
    fn validate(&self) -> Result<(), RecordValidationError> {
        check_extensions(&self.extensions)
    }
}

/// Milestone definition declared once per aspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneInfo {
    pub name: String,
    /// Share of a feature's completion earned by this milestone, in percent.
    pub effort: u8,
}

impl MilestoneInfo {
    pub fn new(name: impl Into<String>, effort: u8) -> Self {
        Self {
            name: name.into(),
            effort,
        }
    }
}

impl Validate for MilestoneInfo {
    fn validate(&self) -> Result<(), RecordValidationError> {
        require_name("milestone info", &self.name)?;
        if self.effort > 100 {
            return Err(RecordValidationError::EffortOutOfRange {
                milestone: self.name.clone(),
                effort: self.effort,
            });
        }
        Ok(())
    }
}

/// Free-text remark on a feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub text: String,
}

impl Note {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

impl Validate for Note {
    fn validate(&self) -> Result<(), RecordValidationError> {
        Ok(())
    }
}
