//! Authority-aware name selection
//!
//! [`select`] turns a canonical [`ParameterIdentity`] into the
//! [`ParameterSpec`] a single provider exposes. The rules are:
//!
//! 1. names of excluded authorities are dropped;
//! 2. every disambiguation name must match a surviving name, which is then
//!    claimed for its authority;
//! 3. an authority with no claim keeps its only survivor, or fails with
//!    [`ParameterError::AmbiguousAuthority`] if it has several;
//! 4. requested deprecated names are looked up in the unfiltered name list and
//!    appended last, flagged deprecated;
//! 5. the primary name is the first kept name in identity order.
//!
//! Deprecated names already present in the identity never compete in steps
//! 2 and 3. They only reach a spec through step 4.

use crate::parameters::identifier::{Authority, NamedIdentifier};
use crate::parameters::identity::ParameterIdentity;
use crate::parameters::parameter::ParameterError;
use crate::parameters::spec::ParameterSpec;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace};

/// Per-provider selection options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectOptions {
    /// Authorities whose names must be dropped
    #[serde(default)]
    pub excluded_authorities: Vec<Authority>,

    /// Codes that pick one name for their authority when it has several
    #[serde(default)]
    pub disambiguation_names: Vec<String>,

    /// Override of the identity's `required` flag
    #[serde(default)]
    pub required: Option<bool>,

    /// Override of the identity's default value, in the canonical unit
    #[serde(default)]
    pub default: Option<f64>,

    /// Codes appended as deprecated aliases
    #[serde(default)]
    pub deprecated_names: Vec<String>,
}

impl SelectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exclude(mut self, authority: Authority) -> Self {
        self.excluded_authorities.push(authority);
        self
    }

    pub fn disambiguate(mut self, code: &str) -> Self {
        self.disambiguation_names.push(code.to_string());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn default_value(mut self, value: f64) -> Self {
        self.default = Some(value);
        self
    }

    pub fn deprecated_name(mut self, code: &str) -> Self {
        self.deprecated_names.push(code.to_string());
        self
    }
}

fn authority_label(authority: Option<&Authority>) -> String {
    authority
        .map(|a| a.to_string())
        .unwrap_or_else(|| "<none>".to_string())
}

/// Select the names and domain one provider exposes for `identity`
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use geoparam_rs::parameters::identifier::Authority;
/// use geoparam_rs::parameters::identity::{build_identity, NameTable};
/// use geoparam_rs::parameters::selector::{select, SelectOptions};
///
/// let identity = Arc::new(
///     build_identity(
///         NameTable::new("p")
///             .name(Authority::new("A"), "x")
///             .name(Authority::new("B"), "y")
///             .name(Authority::new("B"), "z"),
///     )
///     .unwrap(),
/// );
///
/// let spec = select(&identity, &SelectOptions::new().disambiguate("z")).unwrap();
/// assert_eq!(spec.primary_name().code, "x");
/// assert_eq!(spec.aliases()[0].code, "z");
/// assert_eq!(spec.aliases().len(), 1);
/// ```
pub fn select(
    identity: &Arc<ParameterIdentity>,
    options: &SelectOptions,
) -> Result<ParameterSpec, ParameterError> {
    let survivors: Vec<&NamedIdentifier> = identity
        .names()
        .iter()
        .filter(|name| !name.deprecated && !name.is_excluded_by(&options.excluded_authorities))
        .collect();

    // Explicit claims: (authority, index into survivors)
    let mut claims: Vec<(Option<&Authority>, usize)> = Vec::new();
    for wanted in &options.disambiguation_names {
        let mut found = false;
        for (index, name) in survivors.iter().enumerate() {
            if !name.matches_code(wanted) {
                continue;
            }
            found = true;
            let authority = name.authority.as_ref();
            match claims.iter().find(|(claimed, _)| *claimed == authority) {
                Some((_, previous)) if survivors[*previous].matches_code(&name.code) => {}
                Some((_, previous)) => {
                    return Err(ParameterError::AmbiguousAuthority {
                        authority: authority_label(authority),
                        names: vec![survivors[*previous].code.clone(), name.code.clone()],
                    });
                }
                None => claims.push((authority, index)),
            }
        }
        if !found {
            return Err(ParameterError::UnknownParameterName {
                name: wanted.clone(),
            });
        }
    }

    let mut authorities: Vec<Option<&Authority>> = Vec::new();
    for name in &survivors {
        let authority = name.authority.as_ref();
        if !authorities.contains(&authority) {
            authorities.push(authority);
        }
    }

    let mut kept: Vec<usize> = Vec::with_capacity(authorities.len());
    for authority in authorities {
        if let Some((_, index)) = claims.iter().find(|(claimed, _)| *claimed == authority) {
            kept.push(*index);
            continue;
        }
        let candidates: Vec<usize> = survivors
            .iter()
            .enumerate()
            .filter(|(_, name)| name.authority.as_ref() == authority)
            .map(|(index, _)| index)
            .collect();
        if candidates.len() > 1 {
            return Err(ParameterError::AmbiguousAuthority {
                authority: authority_label(authority),
                names: candidates
                    .iter()
                    .map(|index| survivors[*index].code.clone())
                    .collect(),
            });
        }
        kept.extend(candidates);
    }
    kept.sort_unstable();

    let names: Vec<NamedIdentifier> = kept.iter().map(|index| survivors[*index].clone()).collect();
    if names.is_empty() {
        return Err(ParameterError::NoSurvivingName {
            parameter: identity.key().to_string(),
        });
    }

    let mut deprecated: Vec<NamedIdentifier> = Vec::new();
    for code in &options.deprecated_names {
        let name = identity
            .name(code)
            .ok_or_else(|| ParameterError::UnknownParameterName { name: code.clone() })?;
        // a kept name stays live; only unkept names become deprecated aliases
        if names.iter().chain(&deprecated).any(|d| d.same_name(name)) {
            continue;
        }
        let superseded_by = name.superseded_by.clone();
        deprecated.push(NamedIdentifier {
            deprecated: true,
            superseded_by,
            ..name.clone()
        });
    }

    let default = match options.default {
        Some(value) => Some(
            identity
                .bounds()
                .check(value)
                .map_err(|err| ParameterError::out_of_domain(identity.key(), err))?,
        ),
        None => identity.default(),
    };
    let required = options.required.unwrap_or_else(|| identity.required());

    let mut names = names.into_iter();
    let primary = names
        .next()
        .ok_or_else(|| ParameterError::NoSurvivingName {
            parameter: identity.key().to_string(),
        })?;
    let mut aliases: Vec<NamedIdentifier> = names.collect();
    trace!(
        parameter = identity.key(),
        deprecated = deprecated.len(),
        "appending deprecated aliases"
    );
    aliases.extend(deprecated);

    debug!(
        parameter = identity.key(),
        primary = %primary,
        aliases = aliases.len(),
        "selected parameter names"
    );
    Ok(ParameterSpec::new(
        Arc::clone(identity),
        primary,
        aliases,
        required,
        default,
    ))
}
