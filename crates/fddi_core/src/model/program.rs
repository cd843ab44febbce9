use super::extension::{check_extensions, Extensions};
use super::progress::Progress;
use super::project::Project;
use super::validation::{RecordValidationError, Validate};
use serde::{Deserialize, Serialize};

/// Root of the hierarchy: a program of sub-programs and projects.
///
/// Unlike the other nodes, a program may be anonymous.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub programs: Vec<Program>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
    #[serde(default, skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
}

impl Program {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn unnamed() -> Self {
        Self::default()
    }
}

impl Validate for Program {
    fn validate(&self) -> Result<(), RecordValidationError> {
        self.programs.validate()?;
        self.projects.validate()?;
        self.progress.validate()?;
        check_extensions(&self.extensions)
    }
}
