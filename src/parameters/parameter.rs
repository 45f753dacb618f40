//! Parameter errors and values
//!
//! This module provides the error type shared by the whole parameter layer and
//! the value type exchanged through value groups.

use crate::parameters::bounds::BoundsError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when resolving or writing parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("No parameter named '{name}'")]
    UnknownParameterName { name: String },

    #[error("Authority {authority} contributes more than one name: {}", names.join(", "))]
    AmbiguousAuthority { authority: String, names: Vec<String> },

    #[error("Value for parameter '{name}' is out of domain: {reason}")]
    OutOfDomain { name: String, reason: String },

    #[error("Parameter '{name}' can only be set after '{requires}'")]
    MissingPrecondition { name: String, requires: String },

    #[error("Parameter '{name}' has no value and no default")]
    MissingValue { name: String },

    #[error("Parameter '{name}' expects {expected} value")]
    TypeMismatch { name: String, expected: &'static str },

    #[error("Dimension {dimension} is not supported, expected 2 or 3")]
    InvalidDimension { dimension: usize },

    #[error("Every name of parameter '{parameter}' was excluded")]
    NoSurvivingName { parameter: String },

    #[error("Parameter '{name}' appears more than once in group")]
    DuplicateParameter { name: String },

    #[error("Circular reference in definition of parameter '{name}'")]
    CircularReference { name: String },

    #[error("No variant for {source_dim}D -> {target_dim}D")]
    NoVariant { source_dim: usize, target_dim: usize },

    #[error("Values were created for '{found}', not '{expected}'")]
    DescriptorMismatch { expected: String, found: String },

    #[error("Bounds error: {0}")]
    Bounds(#[from] BoundsError),
}

impl ParameterError {
    pub(crate) fn out_of_domain(name: &str, reason: impl ToString) -> Self {
        ParameterError::OutOfDomain {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// A value read from or written to a value group
///
/// Stored parameters always hold a single real number; virtual parameters may
/// expose several stored parameters as one array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Real(f64),
    Array(Vec<f64>),
}

impl ParameterValue {
    /// The value as a single real number, if it is one
    pub fn as_real(&self) -> Option<f64> {
        match self {
            ParameterValue::Real(value) => Some(*value),
            ParameterValue::Array(_) => None,
        }
    }

    /// The value as a slice of real numbers (a real is a one-element slice)
    pub fn as_slice(&self) -> &[f64] {
        match self {
            ParameterValue::Real(value) => std::slice::from_ref(value),
            ParameterValue::Array(values) => values,
        }
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Real(value)
    }
}

impl From<Vec<f64>> for ParameterValue {
    fn from(values: Vec<f64>) -> Self {
        ParameterValue::Array(values)
    }
}

impl From<&[f64]> for ParameterValue {
    fn from(values: &[f64]) -> Self {
        ParameterValue::Array(values.to_vec())
    }
}
