//! Authorities and the names they assign
//!
//! An [`Authority`] is an opaque token for a naming body (EPSG, OGC, ESRI...).
//! A [`NamedIdentifier`] is one code assigned by one authority to a parameter
//! concept.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A standards body that assigns its own codes to parameter concepts
///
/// Authorities compare by token only. They are intentionally not ordered:
/// no authority takes precedence over another except through the order of
/// names inside a [`ParameterIdentity`](crate::parameters::ParameterIdentity).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authority(Cow<'static, str>);

impl Authority {
    pub const EPSG: Authority = Authority::from_static("EPSG");
    pub const OGC: Authority = Authority::from_static("OGC");
    pub const ESRI: Authority = Authority::from_static("ESRI");
    pub const NETCDF: Authority = Authority::from_static("NetCDF");
    pub const GEOTIFF: Authority = Authority::from_static("GeoTIFF");
    pub const PROJ4: Authority = Authority::from_static("PROJ4");

    /// Create an authority from a static token
    pub const fn from_static(token: &'static str) -> Self {
        Self(Cow::Borrowed(token))
    }

    /// Create an authority from any token
    pub fn new(token: impl Into<String>) -> Self {
        Self(Cow::Owned(token.into()))
    }

    /// The authority token
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A code assigned by an authority (or by nobody in particular)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedIdentifier {
    /// The authority that assigned the code, if known
    #[serde(default)]
    pub authority: Option<Authority>,

    /// The code (name) itself
    pub code: String,

    /// Whether the authority has retired this name
    #[serde(default)]
    pub deprecated: bool,

    /// Code of the name that replaces this one, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<String>,
}

impl NamedIdentifier {
    /// Create a name assigned by `authority`
    ///
    /// # Examples
    ///
    /// ```
    /// use geoparam_rs::parameters::identifier::{Authority, NamedIdentifier};
    ///
    /// let name = NamedIdentifier::new(Authority::OGC, "central_meridian");
    /// assert_eq!(name.code, "central_meridian");
    /// assert!(!name.deprecated);
    /// ```
    pub fn new(authority: Authority, code: impl Into<String>) -> Self {
        Self {
            authority: Some(authority),
            code: code.into(),
            deprecated: false,
            superseded_by: None,
        }
    }

    /// Create a name with no authority
    pub fn unscoped(code: impl Into<String>) -> Self {
        Self {
            authority: None,
            code: code.into(),
            deprecated: false,
            superseded_by: None,
        }
    }

    /// Mark this name as deprecated, optionally pointing at its replacement
    pub fn deprecated(mut self, superseded_by: Option<&str>) -> Self {
        self.deprecated = true;
        self.superseded_by = superseded_by.map(str::to_string);
        self
    }

    /// Check whether the code matches `code`, ignoring case
    pub fn matches_code(&self, code: &str) -> bool {
        codes_equal(&self.code, code)
    }

    /// Check whether this name is excluded by an authority list
    ///
    /// Names without an authority are never excluded.
    pub fn is_excluded_by(&self, excluded: &[Authority]) -> bool {
        self.authority
            .as_ref()
            .map(|authority| excluded.contains(authority))
            .unwrap_or(false)
    }

    /// Check whether two identifiers denote the same name
    ///
    /// Codes must match case-insensitively, and the authorities must be equal
    /// unless at least one of them is unspecified.
    pub fn same_name(&self, other: &NamedIdentifier) -> bool {
        let authorities_match = match (&self.authority, &other.authority) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        };
        authorities_match && self.matches_code(&other.code)
    }
}

impl fmt::Display for NamedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.authority {
            Some(authority) => write!(f, "{}:{}", authority, self.code),
            None => f.write_str(&self.code),
        }
    }
}

/// Case-insensitive code comparison shared by every name lookup
pub(crate) fn codes_equal(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}
