//! Transform builder seam
//!
//! Turning resolved parameter values into a concrete transform is outside this
//! crate. Callers supply a [`TransformBuilder`], which receives a
//! [`TransformRequest`] holding the method, its dimensions and every resolved
//! value keyed by canonical parameter key.

use crate::parameters::ParameterError;
use crate::provider::family::{Dimensions, Redimension};
use crate::provider::method::{MethodKind, OperationMethod};
use thiserror::Error;

/// Everything a builder needs to create one transform
#[derive(Debug, Clone)]
pub struct TransformRequest<'a> {
    method: &'a OperationMethod,
    values: Vec<(&'a str, f64)>,
}

impl<'a> TransformRequest<'a> {
    pub(crate) fn new(method: &'a OperationMethod, values: Vec<(&'a str, f64)>) -> Self {
        Self { method, values }
    }

    pub fn method(&self) -> &'a OperationMethod {
        self.method
    }

    pub fn kind(&self) -> MethodKind {
        self.method.kind()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.method.dimensions()
    }

    /// Resolved value for a canonical key, in the parameter's canonical unit
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| *value)
    }

    /// Resolved value for a canonical key, or [`ParameterError::MissingValue`]
    pub fn require(&self, key: &str) -> Result<f64, ParameterError> {
        self.get(key).ok_or_else(|| ParameterError::MissingValue {
            name: key.to_string(),
        })
    }

    /// Every resolved value, in descriptor order
    pub fn values(&self) -> &[(&'a str, f64)] {
        &self.values
    }
}

/// Builds a concrete transform from resolved parameters
///
/// Plain functions and closures taking a [`TransformRequest`] are builders.
pub trait TransformBuilder {
    type Transform;
    type Error;

    fn build(&self, request: &TransformRequest<'_>) -> Result<Self::Transform, Self::Error>;
}

impl<F, T, E> TransformBuilder for F
where
    F: Fn(&TransformRequest<'_>) -> Result<T, E>,
{
    type Transform = T;
    type Error = E;

    fn build(&self, request: &TransformRequest<'_>) -> Result<T, E> {
        self(request)
    }
}

/// Failure to create a transform
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CreateTransformError<E> {
    /// The values could not be resolved against the method's descriptor
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// The builder rejected the request
    #[error("Transform builder failed: {0}")]
    Builder(E),
}
