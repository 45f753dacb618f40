//! Canonical parameter identities
//!
//! A [`ParameterIdentity`] is the authority-independent concept behind a set
//! of names such as "central meridian", "Longitude of natural origin" and
//! "lon_0". It owns the full precedence-ordered name list and the numeric
//! domain of the parameter. Identities are built once from a [`NameTable`]
//! and never change afterwards.

use crate::parameters::bounds::Bounds;
use crate::parameters::identifier::{codes_equal, Authority, NamedIdentifier};
use crate::parameters::parameter::ParameterError;
use crate::parameters::unit::Unit;
use serde::{Deserialize, Serialize};

/// Declarative description of a parameter identity
///
/// Name tables are plain data: they can be written in code with the builder
/// methods or deserialized from JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameTable {
    /// Authority-independent key; defaults to the lower-cased first code
    #[serde(default)]
    pub key: Option<String>,

    /// Names in precedence order
    #[serde(default)]
    pub names: Vec<NamedIdentifier>,

    /// Default value, in `unit`
    #[serde(default)]
    pub default: Option<f64>,

    /// Valid domain, in `unit`
    #[serde(default)]
    pub bounds: Option<Bounds>,

    /// Unit the table's numbers are written in
    #[serde(default)]
    pub unit: Option<Unit>,

    /// Whether a value must be supplied
    #[serde(default)]
    pub required: Option<bool>,

    /// Key of an identity this one inherits names and domain from
    #[serde(default)]
    pub based_on: Option<String>,
}

impl NameTable {
    /// Start a table with an explicit key
    pub fn new(key: &str) -> Self {
        Self {
            key: Some(key.to_string()),
            ..Self::default()
        }
    }

    /// Append a name assigned by `authority`
    pub fn name(mut self, authority: Authority, code: &str) -> Self {
        self.names.push(NamedIdentifier::new(authority, code));
        self
    }

    /// Append a name without authority
    pub fn unscoped(mut self, code: &str) -> Self {
        self.names.push(NamedIdentifier::unscoped(code));
        self
    }

    /// Append a deprecated name assigned by `authority`
    pub fn deprecated(mut self, authority: Authority, code: &str, superseded_by: Option<&str>) -> Self {
        self.names
            .push(NamedIdentifier::new(authority, code).deprecated(superseded_by));
        self
    }

    pub fn default_value(mut self, value: f64) -> Self {
        self.default = Some(value);
        self
    }

    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn based_on(mut self, key: &str) -> Self {
        self.based_on = Some(key.to_string());
        self
    }
}

/// The canonical identity of a parameter
///
/// Only serializable: deserialize a [`NameTable`] and build from it instead,
/// so the non-empty name list and domain checks always run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterIdentity {
    key: String,
    names: Vec<NamedIdentifier>,
    default: Option<f64>,
    bounds: Bounds,
    unit: Unit,
    required: bool,
}

/// Build an identity from a name table
///
/// Numbers in the table are converted to the canonical unit of the table's
/// unit kind. Fails if the table has no names, if its bounds are inverted or
/// if its default lies outside its bounds.
///
/// # Examples
///
/// ```
/// use geoparam_rs::parameters::identifier::Authority;
/// use geoparam_rs::parameters::identity::{build_identity, NameTable};
/// use geoparam_rs::parameters::unit::Unit;
///
/// let identity = build_identity(
///     NameTable::new("central_meridian")
///         .name(Authority::EPSG, "Longitude of natural origin")
///         .name(Authority::OGC, "central_meridian")
///         .unit(Unit::Degree)
///         .default_value(0.0),
/// )
/// .unwrap();
///
/// assert_eq!(identity.primary_name().code, "Longitude of natural origin");
/// assert_eq!(identity.names().len(), 2);
/// ```
pub fn build_identity(table: NameTable) -> Result<ParameterIdentity, ParameterError> {
    ParameterIdentity::from_table(table, None)
}

impl ParameterIdentity {
    /// Build an identity, inheriting from `base` what the table leaves out
    ///
    /// Names of the base whose authority the table does not mention are
    /// appended after the table's own names. Domain fields missing from the
    /// table are copied from the base.
    pub(crate) fn from_table(
        table: NameTable,
        base: Option<&ParameterIdentity>,
    ) -> Result<Self, ParameterError> {
        let mut names = table.names;
        if let Some(base) = base {
            for inherited in &base.names {
                let overridden = names.iter().any(|own| own.authority == inherited.authority);
                if !overridden {
                    names.push(inherited.clone());
                }
            }
        }

        let key = match table.key {
            Some(key) => key,
            None => names
                .first()
                .map(|name| name.code.to_lowercase())
                .ok_or_else(|| ParameterError::NoSurvivingName {
                    parameter: "<unnamed>".to_string(),
                })?,
        };
        if names.is_empty() {
            return Err(ParameterError::NoSurvivingName { parameter: key });
        }

        let unit = table.unit.or(base.map(|b| b.unit)).unwrap_or(Unit::Unity);
        let canonical = unit.canonical();
        let to_canonical = |value: f64| unit.convert(value, canonical).unwrap_or(value);

        let bounds = match table.bounds {
            Some(bounds) => Bounds::new(to_canonical(bounds.min), to_canonical(bounds.max))?,
            None => base.map(|b| b.bounds).unwrap_or_default(),
        };
        let default = match table.default {
            Some(value) => Some(to_canonical(value)),
            None => base.and_then(|b| b.default),
        };
        if let Some(value) = default {
            bounds
                .check(value)
                .map_err(|err| ParameterError::out_of_domain(&key, err))?;
        }
        let required = table
            .required
            .or(base.map(|b| b.required))
            .unwrap_or(true);

        Ok(Self {
            key,
            names,
            default,
            bounds,
            unit: canonical,
            required,
        })
    }

    /// Authority-independent key of this identity
    pub fn key(&self) -> &str {
        &self.key
    }

    /// All names, in precedence order
    pub fn names(&self) -> &[NamedIdentifier] {
        &self.names
    }

    /// The highest-precedence name
    pub fn primary_name(&self) -> &NamedIdentifier {
        &self.names[0]
    }

    /// Find a name by code, ignoring authority
    ///
    /// An exact match wins over a case-insensitive one, so "Central_Meridian"
    /// finds the ESRI name even when "central_meridian" comes first.
    pub fn name(&self, code: &str) -> Option<&NamedIdentifier> {
        self.names
            .iter()
            .find(|name| name.code == code)
            .or_else(|| self.names.iter().find(|name| name.matches_code(code)))
    }

    /// Check whether `code` is one of this identity's names or its key
    pub fn is_named(&self, code: &str) -> bool {
        codes_equal(&self.key, code) || self.name(code).is_some()
    }

    /// Distinct authorities contributing names, in first-appearance order
    pub fn authorities(&self) -> Vec<Option<&Authority>> {
        let mut authorities: Vec<Option<&Authority>> = Vec::new();
        for name in &self.names {
            let authority = name.authority.as_ref();
            if !authorities.contains(&authority) {
                authorities.push(authority);
            }
        }
        authorities
    }

    pub fn default(&self) -> Option<f64> {
        self.default
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Canonical unit of stored values
    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn required(&self) -> bool {
        self.required
    }

    /// Convert `value` given in `unit` to the canonical unit and check it against the domain
    pub fn validate(&self, value: f64, unit: Unit) -> Result<f64, ParameterError> {
        let converted = unit.convert(value, self.unit).ok_or_else(|| {
            ParameterError::out_of_domain(
                &self.key,
                format!("unit {:?} is not compatible with {:?}", unit, self.unit),
            )
        })?;
        self.bounds
            .check(converted)
            .map_err(|err| ParameterError::out_of_domain(&self.key, err))
    }
}
