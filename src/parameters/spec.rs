//! Provider-specific parameter specifications
//!
//! A [`ParameterSpec`] is what one transform provider exposes for one
//! canonical parameter: a primary name, ordered aliases (at most one live name
//! per authority) and possibly overridden `required` / `default` values.
//! Specs are produced by [`select`](crate::parameters::selector::select) and
//! shared by `Arc` between descriptor groups.

use crate::parameters::bounds::Bounds;
use crate::parameters::identifier::{Authority, NamedIdentifier};
use crate::parameters::identity::ParameterIdentity;
use crate::parameters::parameter::ParameterError;
use crate::parameters::unit::Unit;
use std::sync::Arc;

/// The names and domain one provider exposes for a canonical parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    identity: Arc<ParameterIdentity>,
    primary: NamedIdentifier,
    aliases: Vec<NamedIdentifier>,
    required: bool,
    default: Option<f64>,
}

impl ParameterSpec {
    pub(crate) fn new(
        identity: Arc<ParameterIdentity>,
        primary: NamedIdentifier,
        aliases: Vec<NamedIdentifier>,
        required: bool,
        default: Option<f64>,
    ) -> Self {
        Self {
            identity,
            primary,
            aliases,
            required,
            default,
        }
    }

    /// The canonical identity this spec was selected from
    pub fn identity(&self) -> &Arc<ParameterIdentity> {
        &self.identity
    }

    /// Authority-independent key of the underlying identity
    pub fn key(&self) -> &str {
        self.identity.key()
    }

    pub fn primary_name(&self) -> &NamedIdentifier {
        &self.primary
    }

    /// Aliases in order: live names first, then deprecated names
    pub fn aliases(&self) -> &[NamedIdentifier] {
        &self.aliases
    }

    /// Primary name followed by every alias
    pub fn names(&self) -> impl Iterator<Item = &NamedIdentifier> {
        std::iter::once(&self.primary).chain(self.aliases.iter())
    }

    /// Find one of this spec's names by code, ignoring case
    pub fn name(&self, code: &str) -> Option<&NamedIdentifier> {
        self.names().find(|name| name.matches_code(code))
    }

    /// The live (non-deprecated) name this spec exposes for `authority`
    pub fn name_for(&self, authority: &Authority) -> Option<&NamedIdentifier> {
        self.names()
            .find(|name| !name.deprecated && name.authority.as_ref() == Some(authority))
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<f64> {
        self.default
    }

    pub fn bounds(&self) -> &Bounds {
        self.identity.bounds()
    }

    pub fn unit(&self) -> Unit {
        self.identity.unit()
    }

    /// Re-project this spec without the names of `excluded` authorities
    ///
    /// Returns `Ok(None)` when no name is affected, so the caller can keep
    /// sharing the original. When the primary name is removed, the first
    /// surviving alias is promoted.
    pub(crate) fn without_authorities(
        &self,
        excluded: &[Authority],
    ) -> Result<Option<ParameterSpec>, ParameterError> {
        if !self.names().any(|name| name.is_excluded_by(excluded)) {
            return Ok(None);
        }

        let mut survivors = self
            .names()
            .filter(|name| !name.is_excluded_by(excluded))
            .cloned();
        let primary = survivors
            .next()
            .ok_or_else(|| ParameterError::NoSurvivingName {
                parameter: self.key().to_string(),
            })?;

        Ok(Some(ParameterSpec {
            identity: Arc::clone(&self.identity),
            primary,
            aliases: survivors.collect(),
            required: self.required,
            default: self.default,
        }))
    }
}
