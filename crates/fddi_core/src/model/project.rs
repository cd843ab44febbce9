use super::aspect::Aspect;
use super::extension::{check_extensions, Extensions};
use super::progress::Progress;
use super::validation::{require_name, RecordValidationError, Validate};
use serde::{Deserialize, Serialize};

/// A project made of aspects.
///
/// Persisted in the `Projects` table; the aspect subtree travels with the row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Must be non-empty.
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aspects: Vec<Aspect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
    #[serde(default, skip_serializing_if = "Extensions::is_empty")]
    pub extensions: Extensions,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Validate for Project {
    fn validate(&self) -> Result<(), RecordValidationError> {
        require_name("project", &self.name)?;
        self.aspects.validate()?;
        self.progress.validate()?;
        check_extensions(&self.extensions)
    }
}
