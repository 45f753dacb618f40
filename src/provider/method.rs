//! Operation methods
//!
//! An [`OperationMethod`] pairs a [`MethodKind`] with the descriptor group it
//! exposes. Methods that come in several dimensions belong to a
//! [`LazyFamily`] and answer [`Redimension::redimension`] with their siblings.

use crate::descriptor::DescriptorGroup;
use crate::parameters::{ParameterError, ParameterValueGroup};
use crate::provider::family::{Dimensions, LazyFamily, Redimension};
use crate::provider::transform::{CreateTransformError, TransformBuilder, TransformRequest};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Mercator variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MercatorVariant {
    /// Scale factor at the natural origin
    A,
    /// Latitude of the standard parallel
    B,
    /// Spherical formulas applied to ellipsoidal coordinates
    Spherical,
}

/// Lambert Conic Conformal variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LambertVariant {
    OneParallel,
    TwoParallels,
}

/// What a method computes
///
/// Variants of one projection differ only in the parameters they expose, so
/// they share a kind and carry the variant as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodKind {
    Mercator(MercatorVariant),
    LambertConicConformal(LambertVariant),
    TransverseMercator,
    GeocentricTranslation,
    Molodensky,
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodKind::Mercator(variant) => write!(f, "Mercator ({:?})", variant),
            MethodKind::LambertConicConformal(LambertVariant::OneParallel) => {
                write!(f, "Lambert Conic Conformal (1SP)")
            }
            MethodKind::LambertConicConformal(LambertVariant::TwoParallels) => {
                write!(f, "Lambert Conic Conformal (2SP)")
            }
            MethodKind::TransverseMercator => write!(f, "Transverse Mercator"),
            MethodKind::GeocentricTranslation => write!(f, "Geocentric translations"),
            MethodKind::Molodensky => write!(f, "Molodensky"),
        }
    }
}

/// A transform provider together with its parameter descriptor
#[derive(Debug)]
pub struct OperationMethod {
    kind: MethodKind,
    dimensions: Dimensions,
    descriptor: Arc<DescriptorGroup>,
    family: Option<&'static LazyFamily<OperationMethod>>,
}

impl OperationMethod {
    /// A method outside any dimensional family
    pub fn new(kind: MethodKind, dimensions: Dimensions, descriptor: DescriptorGroup) -> Self {
        Self {
            kind,
            dimensions,
            descriptor: Arc::new(descriptor),
            family: None,
        }
    }

    /// A member of `family`, meant to be called from the family's construction
    /// function
    pub fn in_family(
        kind: MethodKind,
        dimensions: Dimensions,
        descriptor: Arc<DescriptorGroup>,
        family: &'static LazyFamily<OperationMethod>,
    ) -> Self {
        Self {
            kind,
            dimensions,
            descriptor,
            family: Some(family),
        }
    }

    pub fn kind(&self) -> MethodKind {
        self.kind
    }

    /// Primary name of the method
    pub fn name(&self) -> &str {
        &self.descriptor.primary_name().code
    }

    pub fn descriptor(&self) -> &Arc<DescriptorGroup> {
        &self.descriptor
    }

    /// Whether `name` is one of the method's names, ignoring case
    pub fn is_named(&self, name: &str) -> bool {
        self.descriptor
            .names()
            .iter()
            .any(|candidate| candidate.matches_code(name))
    }

    /// An empty value group for this method
    pub fn values(&self) -> ParameterValueGroup {
        ParameterValueGroup::new(&self.descriptor)
    }

    /// Resolve `values` and hand them to `builder`
    ///
    /// `values` must have been created from this method's descriptor. Required
    /// parameters without a value or default fail before the builder runs.
    pub fn create_transform<B>(
        &self,
        values: &ParameterValueGroup,
        builder: &B,
    ) -> Result<B::Transform, CreateTransformError<B::Error>>
    where
        B: TransformBuilder + ?Sized,
    {
        if !Arc::ptr_eq(values.descriptor(), &self.descriptor) {
            return Err(ParameterError::DescriptorMismatch {
                expected: self.name().to_string(),
                found: values.descriptor().primary_name().code.clone(),
            }
            .into());
        }
        let resolved = values.resolved()?;
        let request = TransformRequest::new(
            self,
            resolved
                .into_iter()
                .map(|(spec, value)| (spec.key(), value))
                .collect(),
        );
        debug!(
            method = self.name(),
            dimensions = %self.dimensions,
            parameters = request.values().len(),
            "creating transform"
        );
        builder.build(&request).map_err(CreateTransformError::Builder)
    }
}

impl Redimension for OperationMethod {
    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn family(&self) -> Option<&'static LazyFamily<Self>> {
        self.family
    }
}

impl fmt::Display for OperationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name(), self.dimensions)
    }
}
