//! Descriptor groups
//!
//! A [`DescriptorGroup`] is the final, ordered set of parameter specs one
//! provider exposes, together with the group's own names and capability bits.
//! Groups are built once by [`DescriptorGroupBuilder`] and are immutable
//! afterwards.
//!
//! Authority exclusion happens twice: once per parameter in
//! [`select`](crate::parameters::selector::select) and once more here, for
//! the whole group. Specs are shared by `Arc` between groups, and a later
//! group may need to drop authorities an earlier group kept.

use crate::descriptor::capabilities::Capabilities;
use crate::parameters::identifier::{codes_equal, Authority, NamedIdentifier};
use crate::parameters::parameter::ParameterError;
use crate::parameters::spec::ParameterSpec;
use crate::parameters::virtual_param::VirtualKind;
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of resolving a name against a descriptor group
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    /// A stored parameter, with its position in the group
    Parameter(usize, &'a ParameterSpec),
    /// A computed parameter enabled by the group's capabilities
    Virtual(VirtualKind),
    NotFound,
}

/// The named, ordered set of parameter specs of one provider
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorGroup {
    names: Vec<NamedIdentifier>,
    parameters: Vec<Arc<ParameterSpec>>,
    capabilities: Capabilities,
}

impl DescriptorGroup {
    /// Group names, primary first
    pub fn names(&self) -> &[NamedIdentifier] {
        &self.names
    }

    pub fn primary_name(&self) -> &NamedIdentifier {
        &self.names[0]
    }

    pub fn parameters(&self) -> &[Arc<ParameterSpec>] {
        &self.parameters
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Resolve `name` to a stored parameter, a virtual parameter or nothing
    ///
    /// Stored parameters are matched on every exposed name, ignoring case, and
    /// win over virtual names. Virtual names are only visible when the group
    /// carries the matching capability bit.
    pub fn lookup(&self, name: &str) -> Lookup<'_> {
        for (index, spec) in self.parameters.iter().enumerate() {
            if let Some(found) = spec.name(name) {
                if found.deprecated {
                    warn!(
                        requested = name,
                        replacement = %spec.primary_name(),
                        "parameter looked up by deprecated name"
                    );
                }
                return Lookup::Parameter(index, spec);
            }
        }
        match VirtualKind::from_name(name) {
            Some(kind) if self.capabilities.contains(kind.capability()) => Lookup::Virtual(kind),
            _ => Lookup::NotFound,
        }
    }

    /// Position of the parameter whose identity has key `key`
    pub fn index_of_key(&self, key: &str) -> Option<usize> {
        self.parameters
            .iter()
            .position(|spec| codes_equal(spec.key(), key))
    }

    /// The parameter whose identity has key `key`
    pub fn parameter_by_key(&self, key: &str) -> Option<&Arc<ParameterSpec>> {
        self.index_of_key(key).map(|index| &self.parameters[index])
    }
}

/// Assembles a [`DescriptorGroup`]
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use geoparam_rs::descriptor::{Capabilities, DescriptorGroupBuilder, Lookup};
/// use geoparam_rs::parameters::identifier::Authority;
/// use geoparam_rs::parameters::identity::{build_identity, NameTable};
/// use geoparam_rs::parameters::selector::{select, SelectOptions};
///
/// let identity = Arc::new(
///     build_identity(
///         NameTable::new("false_easting")
///             .name(Authority::EPSG, "False easting")
///             .name(Authority::OGC, "false_easting"),
///     )
///     .unwrap(),
/// );
/// let spec = Arc::new(select(&identity, &SelectOptions::new()).unwrap());
///
/// let group = DescriptorGroupBuilder::new()
///     .name(Authority::OGC, "Mercator_1SP")
///     .parameter(spec)
///     .exclude(Authority::EPSG)
///     .build()
///     .unwrap();
///
/// assert_eq!(group.parameters()[0].primary_name().code, "false_easting");
/// assert!(matches!(group.lookup("FALSE_EASTING"), Lookup::Parameter(0, _)));
/// assert!(matches!(group.lookup("False easting"), Lookup::NotFound));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DescriptorGroupBuilder {
    names: Vec<NamedIdentifier>,
    parameters: Vec<Arc<ParameterSpec>>,
    excluded: Vec<Authority>,
    capabilities: Capabilities,
}

impl DescriptorGroupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group name assigned by `authority`
    pub fn name(mut self, authority: Authority, code: &str) -> Self {
        self.names.push(NamedIdentifier::new(authority, code));
        self
    }

    /// Append several group names
    pub fn names(mut self, names: impl IntoIterator<Item = NamedIdentifier>) -> Self {
        self.names.extend(names);
        self
    }

    pub fn parameter(mut self, spec: Arc<ParameterSpec>) -> Self {
        self.parameters.push(spec);
        self
    }

    pub fn parameters(mut self, specs: impl IntoIterator<Item = Arc<ParameterSpec>>) -> Self {
        self.parameters.extend(specs);
        self
    }

    /// Exclude an authority from every name of the group
    pub fn exclude(mut self, authority: Authority) -> Self {
        self.excluded.push(authority);
        self
    }

    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities |= capabilities;
        self
    }

    /// Build the group
    ///
    /// Fails if the group or one of its parameters loses every name to the
    /// exclusion list, if two specs share an identity or expose the same code
    /// (ignoring case), or if a capability bit
    /// is set without the stored parameters its virtual parameters need.
    pub fn build(self) -> Result<DescriptorGroup, ParameterError> {
        let names: Vec<NamedIdentifier> = self
            .names
            .into_iter()
            .filter(|name| !name.is_excluded_by(&self.excluded))
            .collect();
        if names.is_empty() {
            return Err(ParameterError::NoSurvivingName {
                parameter: "<group>".to_string(),
            });
        }

        let mut parameters: Vec<Arc<ParameterSpec>> = Vec::with_capacity(self.parameters.len());
        for spec in self.parameters {
            if parameters.iter().any(|kept| kept.key() == spec.key()) {
                return Err(ParameterError::DuplicateParameter {
                    name: spec.key().to_string(),
                });
            }
            let spec = match spec.without_authorities(&self.excluded)? {
                Some(filtered) => Arc::new(filtered),
                None => spec,
            };
            // every exposed code must resolve to exactly one parameter
            if let Some(clash) = spec
                .names()
                .find(|name| parameters.iter().any(|kept| kept.name(&name.code).is_some()))
            {
                return Err(ParameterError::DuplicateParameter {
                    name: clash.code.clone(),
                });
            }
            parameters.push(spec);
        }

        let group = DescriptorGroup {
            names,
            parameters,
            capabilities: self.capabilities,
        };
        for kind in VirtualKind::ALL {
            if !group.capabilities.contains(kind.capability()) {
                continue;
            }
            for sibling in kind.required_siblings() {
                if group.index_of_key(sibling).is_none() {
                    return Err(ParameterError::MissingPrecondition {
                        name: kind.name().to_string(),
                        requires: sibling.to_string(),
                    });
                }
            }
        }

        debug!(
            group = %group.primary_name(),
            parameters = group.parameters.len(),
            capabilities = ?group.capabilities,
            "built descriptor group"
        );
        Ok(group)
    }
}

/// Build a descriptor group in one call
pub fn build_group(
    names: Vec<NamedIdentifier>,
    specs: &[Arc<ParameterSpec>],
    excluded: &[Authority],
    capabilities: Capabilities,
) -> Result<DescriptorGroup, ParameterError> {
    let mut builder = DescriptorGroupBuilder::new()
        .names(names)
        .parameters(specs.iter().cloned())
        .capabilities(capabilities);
    for authority in excluded {
        builder = builder.exclude(authority.clone());
    }
    builder.build()
}
