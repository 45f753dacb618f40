//! Dimensional provider families
//!
//! Some operations come in 2-D and 3-D flavours that share every parameter
//! and differ only in the shape of the transform. A [`ProviderFamily`] holds
//! one member per supported `(source, target)` dimension pair, built together
//! by one construction function. [`LazyFamily`] makes a family usable from a
//! `static`: the first caller builds the whole family, concurrent callers
//! wait, and later calls read it without locking.

use crate::parameters::ParameterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

/// Number of `(source, target)` combinations over `{2, 3} x {2, 3}`
pub const FAMILY_SIZE: usize = 4;

/// A validated `(source, target)` dimension pair, each 2 or 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    source: usize,
    target: usize,
}

impl Dimensions {
    pub const TWO_TO_TWO: Dimensions = Dimensions { source: 2, target: 2 };
    pub const TWO_TO_THREE: Dimensions = Dimensions { source: 2, target: 3 };
    pub const THREE_TO_TWO: Dimensions = Dimensions { source: 3, target: 2 };
    pub const THREE_TO_THREE: Dimensions = Dimensions { source: 3, target: 3 };

    /// Every supported pair, in slot order
    pub const ALL: [Dimensions; FAMILY_SIZE] = [
        Dimensions::TWO_TO_TWO,
        Dimensions::TWO_TO_THREE,
        Dimensions::THREE_TO_TWO,
        Dimensions::THREE_TO_THREE,
    ];

    /// Validate a dimension pair
    ///
    /// # Examples
    ///
    /// ```
    /// use geoparam_rs::provider::Dimensions;
    ///
    /// assert_eq!(Dimensions::new(3, 2).unwrap(), Dimensions::THREE_TO_TWO);
    /// assert!(Dimensions::new(4, 2).is_err());
    /// ```
    pub fn new(source: usize, target: usize) -> Result<Self, ParameterError> {
        for dimension in [source, target] {
            if !(2..=3).contains(&dimension) {
                return Err(ParameterError::InvalidDimension { dimension });
            }
        }
        Ok(Self { source, target })
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Slot of this pair in a family: `(source is 3D) << 1 | (target is 3D)`
    pub fn slot(&self) -> usize {
        (usize::from(self.source == 3) << 1) | usize::from(self.target == 3)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D -> {}D", self.source, self.target)
    }
}

/// One member per dimension pair, all built before the family is exposed
#[derive(Debug)]
pub struct ProviderFamily<P> {
    members: [P; FAMILY_SIZE],
}

impl<P> ProviderFamily<P> {
    /// Build every member of a family
    ///
    /// `primary` is built first, then the other pairs in slot order.
    pub fn build(primary: Dimensions, mut make: impl FnMut(Dimensions) -> P) -> Self {
        let order = std::iter::once(primary)
            .chain(Dimensions::ALL.into_iter().filter(|dims| *dims != primary));
        Self::from_members(order.map(|dimensions| (dimensions, make(dimensions))))
    }

    /// Assemble a family from members built elsewhere
    ///
    /// Each member claims the slot computed from its dimensions.
    ///
    /// # Panics
    ///
    /// Panics if two members claim the same slot or if a slot is left empty.
    /// Both are programming errors in the provider, never user-facing
    /// conditions.
    pub fn from_members(members: impl IntoIterator<Item = (Dimensions, P)>) -> Self {
        let mut slots: [Option<P>; FAMILY_SIZE] = [None, None, None, None];
        for (dimensions, member) in members {
            let slot = dimensions.slot();
            assert!(
                slots[slot].is_none(),
                "duplicate slot {} claimed by {}",
                slot,
                dimensions
            );
            slots[slot] = Some(member);
        }
        if let Some(empty) = slots.iter().position(Option::is_none) {
            panic!("family slot {} left empty", empty);
        }
        let members = slots.map(|member| match member {
            Some(member) => member,
            None => unreachable!("every slot was checked"),
        });
        Self { members }
    }

    /// The member for a validated dimension pair
    pub fn member(&self, dimensions: Dimensions) -> &P {
        &self.members[dimensions.slot()]
    }

    /// The member for `(source, target)`, validating both dimensions
    pub fn redimension(&self, source: usize, target: usize) -> Result<&P, ParameterError> {
        Ok(self.member(Dimensions::new(source, target)?))
    }

    /// Every member, in slot order
    pub fn members(&self) -> &[P] {
        &self.members
    }
}

/// A family built on first use, suitable for a `static`
///
/// # Examples
///
/// ```
/// use geoparam_rs::provider::{Dimensions, LazyFamily, Redimension};
///
/// #[derive(Debug)]
/// struct Shift {
///     dimensions: Dimensions,
/// }
///
/// static SHIFTS: LazyFamily<Shift> =
///     LazyFamily::new(Dimensions::THREE_TO_THREE, |_, dimensions| Shift { dimensions });
///
/// impl Redimension for Shift {
///     fn dimensions(&self) -> Dimensions {
///         self.dimensions
///     }
///     fn family(&self) -> Option<&'static LazyFamily<Self>> {
///         Some(&SHIFTS)
///     }
/// }
///
/// let flat = SHIFTS.member(Dimensions::TWO_TO_TWO);
/// let lifted = flat.redimension(2, 3).unwrap();
/// assert_eq!(lifted.dimensions, Dimensions::TWO_TO_THREE);
/// assert!(std::ptr::eq(lifted.redimension(2, 2).unwrap(), flat));
/// ```
pub struct LazyFamily<P: 'static> {
    cell: OnceLock<ProviderFamily<P>>,
    primary: Dimensions,
    make: fn(&'static LazyFamily<P>, Dimensions) -> P,
}

impl<P: 'static> LazyFamily<P> {
    /// Declare a family; nothing is built until first use
    ///
    /// `make` receives the family itself so members can keep a reference to it.
    /// It must not access the family it is building.
    pub const fn new(primary: Dimensions, make: fn(&'static LazyFamily<P>, Dimensions) -> P) -> Self {
        Self {
            cell: OnceLock::new(),
            primary,
            make,
        }
    }

    /// The family, building every member on the first call
    pub fn get(&'static self) -> &'static ProviderFamily<P> {
        self.cell.get_or_init(|| {
            debug!(primary = %self.primary, "building provider family");
            ProviderFamily::build(self.primary, |dimensions| (self.make)(self, dimensions))
        })
    }

    /// The member for a validated dimension pair
    pub fn member(&'static self, dimensions: Dimensions) -> &'static P {
        self.get().member(dimensions)
    }

    /// Dimensions of the member built first
    pub fn primary(&self) -> Dimensions {
        self.primary
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<P: 'static> fmt::Debug for LazyFamily<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyFamily")
            .field("primary", &self.primary)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// Providers that can be asked for a sibling of other dimensions
pub trait Redimension: Sized + 'static {
    /// Dimensions of this provider
    fn dimensions(&self) -> Dimensions;

    /// The family this provider belongs to, if any
    fn family(&self) -> Option<&'static LazyFamily<Self>>;

    /// The sibling for `(source, target)`
    ///
    /// Both dimensions must be 2 or 3. A provider outside any family can only
    /// return itself.
    fn redimension(&'static self, source: usize, target: usize) -> Result<&'static Self, ParameterError> {
        let dimensions = Dimensions::new(source, target)?;
        match self.family() {
            Some(family) => Ok(family.member(dimensions)),
            None if dimensions == self.dimensions() => Ok(self),
            None => Err(ParameterError::NoVariant {
                source_dim: source,
                target_dim: target,
            }),
        }
    }
}
