//! Parameter value groups
//!
//! A value group holds the values a caller supplies for one descriptor group.
//! Names are resolved case-insensitively through the descriptor group, so any
//! exposed alias reaches the same storage slot, and virtual parameter names
//! reach their computed view. Values are stored in the canonical unit of each
//! parameter and checked against its domain on every write.

use crate::descriptor::{DescriptorGroup, Lookup};
use crate::parameters::parameter::{ParameterError, ParameterValue};
use crate::parameters::spec::ParameterSpec;
use crate::parameters::unit::Unit;
use crate::parameters::virtual_param::VirtualKind;
use std::sync::Arc;
use tracing::trace;

/// Case-insensitive name to value storage
///
/// This is the only interface the virtual parameter engine uses to reach
/// stored parameters. Names may be any exposed name or a canonical key.
pub trait ValueGroup {
    /// The explicitly stored value, ignoring defaults
    fn stored(&self, name: &str) -> Result<Option<f64>, ParameterError>;

    /// The stored value, else the default, else [`ParameterError::MissingValue`]
    fn value(&self, name: &str) -> Result<f64, ParameterError>;

    /// Store a value given in the parameter's canonical unit
    fn set_value(&mut self, name: &str, value: f64) -> Result<(), ParameterError>;

    /// Remove a stored value, so the default applies again
    fn clear(&mut self, name: &str) -> Result<(), ParameterError>;
}

/// Cached state of a virtual parameter, created on first use
#[derive(Debug, Clone, PartialEq)]
struct VirtualSlot {
    kind: VirtualKind,
    explicit: Option<ParameterValue>,
}

/// Values for one descriptor group
///
/// # Examples
///
/// ```
/// use geoparam_rs::catalog;
/// use geoparam_rs::parameters::{ParameterValueGroup, ValueGroup};
///
/// let mercator = catalog::providers().method("Mercator_1SP").unwrap();
/// let mut values = ParameterValueGroup::new(mercator.descriptor());
///
/// values.set_value("semi_major", 6378137.0).unwrap();
/// values.set_value("Longitude of natural origin", 10.0).unwrap();
/// assert_eq!(values.value("central_meridian").unwrap(), 10.0);
/// assert_eq!(values.value("scale_factor").unwrap(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct ParameterValueGroup {
    descriptor: Arc<DescriptorGroup>,
    values: Vec<Option<f64>>,
    virtuals: Vec<VirtualSlot>,
}

impl ParameterValueGroup {
    /// Create an empty value group for `descriptor`
    pub fn new(descriptor: &Arc<DescriptorGroup>) -> Self {
        Self {
            descriptor: Arc::clone(descriptor),
            values: vec![None; descriptor.len()],
            virtuals: Vec::new(),
        }
    }

    pub fn descriptor(&self) -> &Arc<DescriptorGroup> {
        &self.descriptor
    }

    /// Resolve a name through the descriptor group
    pub fn lookup(&self, name: &str) -> Lookup<'_> {
        self.descriptor.lookup(name)
    }

    fn index_of(&self, name: &str) -> Result<usize, ParameterError> {
        match self.descriptor.lookup(name) {
            Lookup::Parameter(index, _) => Ok(index),
            _ => self
                .descriptor
                .index_of_key(name)
                .ok_or_else(|| ParameterError::UnknownParameterName {
                    name: name.to_string(),
                }),
        }
    }

    fn spec(&self, index: usize) -> &ParameterSpec {
        &self.descriptor.parameters()[index]
    }

    fn value_at(&self, index: usize) -> Result<f64, ParameterError> {
        self.values[index]
            .or_else(|| self.spec(index).default())
            .ok_or_else(|| ParameterError::MissingValue {
                name: self.spec(index).primary_name().code.clone(),
            })
    }

    fn store(&mut self, index: usize, value: Option<f64>) {
        self.values[index] = value;
        // Direct writes to a sibling invalidate explicit virtual values
        let key = self.descriptor.parameters()[index].key().to_string();
        for slot in &mut self.virtuals {
            if slot.explicit.is_some() && slot.kind.siblings().contains(&key.as_str()) {
                trace!(virtual_parameter = slot.kind.name(), sibling = %key, "dropping explicit value");
                slot.explicit = None;
            }
        }
    }

    fn slot(&self, kind: VirtualKind) -> Option<&VirtualSlot> {
        self.virtuals.iter().find(|slot| slot.kind == kind)
    }

    fn slot_index(&mut self, kind: VirtualKind) -> usize {
        match self.virtuals.iter().position(|slot| slot.kind == kind) {
            Some(index) => index,
            None => {
                trace!(virtual_parameter = kind.name(), "instantiating virtual parameter");
                self.virtuals.push(VirtualSlot {
                    kind,
                    explicit: None,
                });
                self.virtuals.len() - 1
            }
        }
    }

    /// Read a stored or virtual parameter
    pub fn get(&self, name: &str) -> Result<ParameterValue, ParameterError> {
        match self.descriptor.lookup(name) {
            Lookup::Parameter(index, _) => self.value_at(index).map(ParameterValue::Real),
            Lookup::Virtual(kind) => {
                let explicit = self.slot(kind).and_then(|slot| slot.explicit.as_ref());
                kind.get(explicit, self)
            }
            Lookup::NotFound => {
                let index = self.index_of(name)?;
                self.value_at(index).map(ParameterValue::Real)
            }
        }
    }

    /// Write a stored or virtual parameter, in canonical units
    pub fn set(&mut self, name: &str, value: impl Into<ParameterValue>) -> Result<(), ParameterError> {
        let value = value.into();
        let descriptor = Arc::clone(&self.descriptor);
        match descriptor.lookup(name) {
            Lookup::Virtual(kind) => self.virtual_by_kind(kind).set(value),
            _ => {
                let index = self.index_of(name)?;
                let real = value.as_real().ok_or_else(|| ParameterError::TypeMismatch {
                    name: name.to_string(),
                    expected: "a real",
                })?;
                let unit = self.spec(index).unit();
                self.set_at(index, real, unit)
            }
        }
    }

    /// Write a stored parameter given in `unit`
    ///
    /// The value is converted to the parameter's canonical unit. A unit of the
    /// wrong kind or a converted value outside the domain fails with
    /// [`ParameterError::OutOfDomain`].
    pub fn set_in(&mut self, name: &str, value: f64, unit: Unit) -> Result<(), ParameterError> {
        let index = self.index_of(name)?;
        self.set_at(index, value, unit)
    }

    fn set_at(&mut self, index: usize, value: f64, unit: Unit) -> Result<(), ParameterError> {
        let spec = self.spec(index);
        let canonical = spec.identity().validate(value, unit).map_err(|err| match err {
            ParameterError::OutOfDomain { reason, .. } => ParameterError::OutOfDomain {
                name: spec.primary_name().code.clone(),
                reason,
            },
            other => other,
        })?;
        self.store(index, Some(canonical));
        Ok(())
    }

    /// Check whether a stored parameter has an explicit value
    pub fn is_set(&self, name: &str) -> bool {
        self.index_of(name)
            .map(|index| self.values[index].is_some())
            .unwrap_or(false)
    }

    /// Obtain the view of a virtual parameter, creating it on first use
    pub fn virtual_parameter(&mut self, name: &str) -> Result<VirtualParameter<'_>, ParameterError> {
        let descriptor = Arc::clone(&self.descriptor);
        match descriptor.lookup(name) {
            Lookup::Virtual(kind) => Ok(self.virtual_by_kind(kind)),
            _ => Err(ParameterError::UnknownParameterName {
                name: name.to_string(),
            }),
        }
    }

    fn virtual_by_kind(&mut self, kind: VirtualKind) -> VirtualParameter<'_> {
        let slot = self.slot_index(kind);
        VirtualParameter { group: self, slot }
    }

    /// Every stored parameter with its effective value
    ///
    /// Parameters with neither a value nor a default are skipped when
    /// optional and reported as [`ParameterError::MissingValue`] when required.
    pub fn resolved(&self) -> Result<Vec<(&Arc<ParameterSpec>, f64)>, ParameterError> {
        let mut resolved = Vec::with_capacity(self.values.len());
        for (index, spec) in self.descriptor.parameters().iter().enumerate() {
            match self.value_at(index) {
                Ok(value) => resolved.push((spec, value)),
                Err(ParameterError::MissingValue { .. }) if !spec.required() => {}
                Err(err) => return Err(err),
            }
        }
        Ok(resolved)
    }
}

impl ValueGroup for ParameterValueGroup {
    fn stored(&self, name: &str) -> Result<Option<f64>, ParameterError> {
        match self.descriptor.lookup(name) {
            Lookup::Virtual(kind) => Ok(self
                .slot(kind)
                .and_then(|slot| slot.explicit.as_ref())
                .and_then(ParameterValue::as_real)),
            _ => {
                let index = self.index_of(name)?;
                Ok(self.values[index])
            }
        }
    }

    fn value(&self, name: &str) -> Result<f64, ParameterError> {
        self.get(name)?
            .as_real()
            .ok_or_else(|| ParameterError::TypeMismatch {
                name: name.to_string(),
                expected: "a real",
            })
    }

    fn set_value(&mut self, name: &str, value: f64) -> Result<(), ParameterError> {
        self.set(name, value)
    }

    fn clear(&mut self, name: &str) -> Result<(), ParameterError> {
        let index = self.index_of(name)?;
        self.store(index, None);
        Ok(())
    }
}

/// Mutable view of one virtual parameter, bound to its value group
#[derive(Debug)]
pub struct VirtualParameter<'a> {
    group: &'a mut ParameterValueGroup,
    slot: usize,
}

impl VirtualParameter<'_> {
    pub fn kind(&self) -> VirtualKind {
        self.group.virtuals[self.slot].kind
    }

    /// Compute the current value
    pub fn get(&self) -> Result<ParameterValue, ParameterError> {
        let slot = &self.group.virtuals[self.slot];
        slot.kind.get(slot.explicit.as_ref(), &*self.group)
    }

    /// Write through to the sibling parameters, remembering the value when the
    /// kind keeps an explicit one
    pub fn set(&mut self, value: impl Into<ParameterValue>) -> Result<(), ParameterError> {
        let value = value.into();
        let kind = self.kind();
        let explicit = kind.set(&value, &mut *self.group)?;
        self.group.virtuals[self.slot].explicit = explicit;
        Ok(())
    }
}
