//! Structural invariants shared by every record type.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Invariant violation found while validating a record tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// A record whose name is required has an empty or blank name.
    EmptyName { record: &'static str },
    /// `Progress::completion` is above 100.
    CompletionOutOfRange { completion: u8 },
    /// `MilestoneInfo::effort` is above 100.
    EffortOutOfRange { milestone: String, effort: u8 },
    /// A float extension value is NaN or infinite.
    NonFiniteNumber { key: String },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName { record } => write!(f, "{record} name must not be empty"),
            Self::CompletionOutOfRange { completion } => {
                write!(f, "progress completion {completion} must be <= 100")
            }
            Self::EffortOutOfRange { milestone, effort } => {
                write!(f, "milestone `{milestone}` effort {effort} must be <= 100")
            }
            Self::NonFiniteNumber { key } => {
                write!(f, "extension `{key}` holds a non-finite number")
            }
        }
    }
}

impl Error for RecordValidationError {}

/// Recursive invariant check implemented by every record type.
pub trait Validate {
    /// Validates this record and all records it owns.
    fn validate(&self) -> Result<(), RecordValidationError>;
}

impl<T: Validate> Validate for [T] {
    fn validate(&self) -> Result<(), RecordValidationError> {
        self.iter().try_for_each(Validate::validate)
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), RecordValidationError> {
        match self {
            Some(value) => value.validate(),
            None => Ok(()),
        }
    }
}

pub(crate) fn require_name(record: &'static str, name: &str) -> Result<(), RecordValidationError> {
    if name.trim().is_empty() {
        return Err(RecordValidationError::EmptyName { record });
    }
    Ok(())
}
