//! Virtual (computed) parameters
//!
//! Virtual parameters have no storage of their own in a descriptor group.
//! Reading one computes a value from sibling stored parameters; writing one
//! forwards the value to those siblings. The set of virtual parameters is
//! closed and described by [`VirtualKind`]; lookups are gated by the owning
//! group's [`Capabilities`](crate::descriptor::Capabilities).
//!
//! The engine only talks to storage through the [`ValueGroup`] trait, using
//! the canonical keys of the sibling parameters.

use crate::descriptor::Capabilities;
use crate::parameters::identifier::codes_equal;
use crate::parameters::parameter::{ParameterError, ParameterValue};
use crate::parameters::values::ValueGroup;
use serde::{Deserialize, Serialize};

/// Canonical key of the semi-major axis parameter
pub const SEMI_MAJOR: &str = "semi_major";
/// Canonical key of the semi-minor axis parameter
pub const SEMI_MINOR: &str = "semi_minor";
/// Canonical key of the first standard parallel
pub const STANDARD_PARALLEL_1: &str = "standard_parallel_1";
/// Canonical key of the second standard parallel
pub const STANDARD_PARALLEL_2: &str = "standard_parallel_2";

/// The closed set of computed parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VirtualKind {
    /// Explicit radius, else the authalic radius of the ellipsoid
    EarthRadius,
    /// Explicit inverse flattening, else `a / (a - b)`
    InverseFlattening,
    /// `[standard_parallel_1, standard_parallel_2]` as one array
    StandardParallel,
}

impl VirtualKind {
    pub const ALL: [VirtualKind; 3] = [
        VirtualKind::EarthRadius,
        VirtualKind::InverseFlattening,
        VirtualKind::StandardParallel,
    ];

    /// The name this virtual parameter is looked up by
    pub fn name(&self) -> &'static str {
        match self {
            VirtualKind::EarthRadius => "earth_radius",
            VirtualKind::InverseFlattening => "inverse_flattening",
            VirtualKind::StandardParallel => "standard_parallel",
        }
    }

    /// Resolve a name against the virtual table, ignoring case
    pub fn from_name(name: &str) -> Option<VirtualKind> {
        Self::ALL
            .into_iter()
            .find(|kind| codes_equal(kind.name(), name))
    }

    /// The capability bit a group must carry to expose this parameter
    pub fn capability(&self) -> Capabilities {
        match self {
            VirtualKind::EarthRadius | VirtualKind::InverseFlattening => {
                Capabilities::EARTH_RADIUS
            }
            VirtualKind::StandardParallel => Capabilities::STANDARD_PARALLEL,
        }
    }

    /// Keys of the stored parameters this one reads from and writes to
    pub fn siblings(&self) -> &'static [&'static str] {
        match self {
            VirtualKind::EarthRadius | VirtualKind::InverseFlattening => &[SEMI_MAJOR, SEMI_MINOR],
            VirtualKind::StandardParallel => &[STANDARD_PARALLEL_1, STANDARD_PARALLEL_2],
        }
    }

    /// Siblings that must be present in a group exposing this parameter
    pub fn required_siblings(&self) -> &'static [&'static str] {
        match self {
            VirtualKind::StandardParallel => &[STANDARD_PARALLEL_1],
            _ => self.siblings(),
        }
    }

    /// Whether this parameter keeps an explicitly written value
    pub fn keeps_explicit_value(&self) -> bool {
        !matches!(self, VirtualKind::StandardParallel)
    }

    /// Read the value, preferring `explicit` when the parameter has one
    pub fn get(
        &self,
        explicit: Option<&ParameterValue>,
        group: &impl ValueGroup,
    ) -> Result<ParameterValue, ParameterError> {
        if let Some(value) = explicit {
            return Ok(value.clone());
        }
        match self {
            VirtualKind::EarthRadius => {
                let a = group.value(SEMI_MAJOR)?;
                let b = group.value(SEMI_MINOR)?;
                Ok(ParameterValue::Real(authalic_radius(a, b)))
            }
            VirtualKind::InverseFlattening => {
                let a = group.value(SEMI_MAJOR)?;
                let b = group.value(SEMI_MINOR)?;
                Ok(ParameterValue::Real(inverse_flattening(a, b)))
            }
            VirtualKind::StandardParallel => {
                let mut parallels = vec![group.value(STANDARD_PARALLEL_1)?];
                match group.value(STANDARD_PARALLEL_2) {
                    Ok(second) => parallels.push(second),
                    Err(ParameterError::MissingValue { .. })
                    | Err(ParameterError::UnknownParameterName { .. }) => {}
                    Err(err) => return Err(err),
                }
                Ok(ParameterValue::Array(parallels))
            }
        }
    }

    /// Write `value` through to the sibling parameters
    ///
    /// Returns the value to remember as explicit, if this kind keeps one.
    ///
    /// * `EarthRadius`: writes the radius to both axes, which makes the
    ///   ellipsoid a sphere.
    /// * `InverseFlattening`: writes `b = a * (1 - 1/f)`. The semi-major axis
    ///   must have been set first; otherwise nothing is written and
    ///   [`ParameterError::MissingPrecondition`] is returned.
    /// * `StandardParallel`: accepts one or two latitudes. With one, the
    ///   stored second parallel is cleared.
    pub fn set(
        &self,
        value: &ParameterValue,
        group: &mut impl ValueGroup,
    ) -> Result<Option<ParameterValue>, ParameterError> {
        match self {
            VirtualKind::EarthRadius => {
                let radius = self.expect_real(value)?;
                if radius.is_nan() || radius <= 0.0 {
                    return Err(ParameterError::out_of_domain(
                        self.name(),
                        format!("radius must be positive, got {}", radius),
                    ));
                }
                group.set_value(SEMI_MAJOR, radius)?;
                group.set_value(SEMI_MINOR, radius)?;
                Ok(Some(ParameterValue::Real(radius)))
            }
            VirtualKind::InverseFlattening => {
                let flattening = self.expect_real(value)?;
                if flattening.is_nan() || flattening <= 1.0 {
                    return Err(ParameterError::out_of_domain(
                        self.name(),
                        format!("inverse flattening must exceed 1, got {}", flattening),
                    ));
                }
                let a = group
                    .stored(SEMI_MAJOR)?
                    .ok_or_else(|| ParameterError::MissingPrecondition {
                        name: self.name().to_string(),
                        requires: SEMI_MAJOR.to_string(),
                    })?;
                group.set_value(SEMI_MINOR, a * (1.0 - 1.0 / flattening))?;
                Ok(Some(ParameterValue::Real(flattening)))
            }
            VirtualKind::StandardParallel => {
                match value.as_slice() {
                    [first] => {
                        group.set_value(STANDARD_PARALLEL_1, *first)?;
                        match group.clear(STANDARD_PARALLEL_2) {
                            Ok(()) | Err(ParameterError::UnknownParameterName { .. }) => {}
                            Err(err) => return Err(err),
                        }
                    }
                    [first, second] => {
                        group.set_value(STANDARD_PARALLEL_1, *first)?;
                        group.set_value(STANDARD_PARALLEL_2, *second)?;
                    }
                    other => {
                        return Err(ParameterError::out_of_domain(
                            self.name(),
                            format!("expected 1 or 2 parallels, got {}", other.len()),
                        ));
                    }
                }
                Ok(None)
            }
        }
    }

    fn expect_real(&self, value: &ParameterValue) -> Result<f64, ParameterError> {
        value.as_real().ok_or_else(|| ParameterError::TypeMismatch {
            name: self.name().to_string(),
            expected: "a real",
        })
    }
}

/// Radius of the sphere with the same surface area as the ellipsoid `(a, b)`
///
/// A semi-minor axis longer than the semi-major axis describes a prolate
/// spheroid; its radius lies between `a` and `b` as well.
///
/// # Examples
///
/// ```
/// use geoparam_rs::parameters::virtual_param::authalic_radius;
///
/// let r = authalic_radius(6378137.0, 6356752.314245179);
/// assert!((r - 6371007.181).abs() < 1e-3);
/// assert_eq!(authalic_radius(6371000.0, 6371000.0), 6371000.0);
/// ```
pub fn authalic_radius(a: f64, b: f64) -> f64 {
    if a == b {
        return a;
    }
    if b > a {
        let e = (1.0 - (a * a) / (b * b)).sqrt();
        return ((a * a + a * b * e.asin() / e) / 2.0).sqrt();
    }
    let e = (1.0 - (b * b) / (a * a)).sqrt();
    ((a * a + b * b * e.atanh() / e) / 2.0).sqrt()
}

/// Inverse flattening of the ellipsoid `(a, b)`, infinite for a sphere
pub fn inverse_flattening(a: f64, b: f64) -> f64 {
    if a == b {
        return f64::INFINITY;
    }
    a / (a - b)
}
