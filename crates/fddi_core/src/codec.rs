//! JSON interchange codec for record trees.
//!
//! # Responsibility
//! - Convert any record tree to deterministic JSON text and back.
//! - Refuse to emit or accept trees that violate model invariants.
//!
//! # Invariants
//! - `decode(encode(r)) == r` for every valid record `r`.
//! - Decoding never yields a partially populated record.
//! - Encoding is pure; nothing here touches I/O or logging.

use crate::model::{RecordValidationError, Validate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type EncodeResult<T> = Result<T, EncodeError>;
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Failure to turn a record into JSON text.
#[derive(Debug)]
pub enum EncodeError {
    /// The record violates a model invariant or holds a value JSON cannot
    /// represent (a non-finite extension number).
    InvalidRecord(RecordValidationError),
    Json(serde_json::Error),
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRecord(err) => write!(f, "cannot encode record: {err}"),
            Self::Json(err) => write!(f, "cannot encode record: {err}"),
        }
    }
}

impl Error for EncodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidRecord(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<RecordValidationError> for EncodeError {
    fn from(value: RecordValidationError) -> Self {
        Self::InvalidRecord(value)
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Failure to turn JSON text into a record.
#[derive(Debug)]
pub enum DecodeError {
    /// Text is not valid JSON, or does not match the record shape
    /// (including a missing required field).
    Malformed(serde_json::Error),
    /// Text matches the shape but the decoded tree violates an invariant.
    InvalidRecord(RecordValidationError),
}

impl DecodeError {
    /// Returns whether the text itself was not well-formed JSON.
    pub fn is_syntax(&self) -> bool {
        match self {
            Self::Malformed(err) => err.is_syntax() || err.is_eof(),
            Self::InvalidRecord(_) => false,
        }
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed record text: {err}"),
            Self::InvalidRecord(err) => write!(f, "invalid record: {err}"),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::InvalidRecord(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value)
    }
}

impl From<RecordValidationError> for DecodeError {
    fn from(value: RecordValidationError) -> Self {
        Self::InvalidRecord(value)
    }
}

/// Encodes a record tree as compact JSON.
///
/// # Errors
/// - `InvalidRecord` when validation fails (e.g. empty project name, NaN in
///   an extension bag).
pub fn encode<R: Serialize + Validate>(record: &R) -> EncodeResult<String> {
    record.validate()?;
    Ok(serde_json::to_string(record)?)
}

/// Encodes a record tree as indented JSON for display.
pub fn encode_pretty<R: Serialize + Validate>(record: &R) -> EncodeResult<String> {
    record.validate()?;
    Ok(serde_json::to_string_pretty(record)?)
}

/// Decodes a record tree from JSON text.
///
/// # Errors
/// - `Malformed` on invalid JSON, wrong field types or a missing `name`.
/// - `InvalidRecord` when the decoded tree fails validation.
pub fn decode<R: DeserializeOwned + Validate>(text: &str) -> DecodeResult<R> {
    let record: R = serde_json::from_str(text)?;
    record.validate()?;
    Ok(record)
}
