//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when an input breaks a field rule.
//! - [`Reference`] thrown when an expense points at a missing category.
//! - [`KeyNotFound`] thrown when a record is not found by id.
//! - [`Storage`] thrown when the [`Store`] fails.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`Reference`]: EngineError::Reference
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`Storage`]: EngineError::Storage
//!  [`Store`]: crate::Store
use std::fmt;

use thiserror::Error;

use crate::store::StoreError;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    Validation(FieldError),
    #[error("{0} not found")]
    Reference(String),
    #[error("{0} not found")]
    KeyNotFound(String),
    #[error(transparent)]
    Storage(StoreError),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Reference(a), Self::Reference(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Storage(a), Self::Storage(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

impl From<StoreError> for EngineError {
    fn from(value: StoreError) -> Self {
        match value {
            // A row vanished between the read and the write.
            StoreError::NotFound(what) => Self::KeyNotFound(what),
            other => Self::Storage(other),
        }
    }
}

impl From<FieldError> for EngineError {
    fn from(value: FieldError) -> Self {
        Self::Validation(value)
    }
}

/// The rule a field broke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinLength,
    MaxLength,
    GreaterThanZero,
    InvalidNumber,
    DateFormat,
    NotInPast,
}

impl Rule {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength => "min_length",
            Self::MaxLength => "max_length",
            Self::GreaterThanZero => "greater_than_zero",
            Self::InvalidNumber => "invalid_number",
            Self::DateFormat => "date_format",
            Self::NotInPast => "not_in_past",
        }
    }
}

/// A single failed field check, ready to be rendered by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub rule: Rule,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, rule: Rule, message: impl Into<String>) -> Self {
        Self {
            field,
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
