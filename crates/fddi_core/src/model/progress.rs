//! Progress snapshot and status vocabulary.

use super::extension::{check_extensions, Extensions};
use super::validation::{RecordValidationError, Validate};
use serde::{Deserialize, Serialize};

/// Work status shared by milestones, progress snapshots and KPIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    NotStarted,
    Underway,
    Attention,
    Complete,
    Inactive,
}

/// Completion snapshot for one node of the hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Percentage in `0..=100`.
    pub completion: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// Number of features summarized by this snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kpis: Vec<Kpi>,
    #[serde(default, skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
}

impl Progress {
    pub fn with_completion(completion: u8) -> Self {
        Self {
            completion,
            ..Self::default()
        }
    }
}

impl Validate for Progress {
    fn validate(&self) -> Result<(), RecordValidationError> {
        if self.completion > 100 {
            return Err(RecordValidationError::CompletionOutOfRange {
                completion: self.completion,
            });
        }
        check_extensions(&self.extensions)
    }
}

/// Count of features in one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    pub status: Status,
    pub count: u32,
}
