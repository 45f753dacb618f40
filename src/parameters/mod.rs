//! # Parameter System
//!
//! This module provides the identity and resolution layer for coordinate
//! operation parameters. Standards bodies give different names to the same
//! parameter ("central meridian", "Longitude of natural origin", "lon_0");
//! this module keeps track of all of them and decides which ones each
//! transform provider exposes.
//!
//! ## Key Features
//!
//! - **Canonical identities**: every authority-specific name of a parameter, in
//!   precedence order, with its domain and canonical unit
//! - **Authority-aware selection**: at most one live name per authority for each
//!   provider, with typos in disambiguation names caught when the provider is built
//! - **Virtual parameters**: earth radius, inverse flattening and the standard
//!   parallel array, computed from and written through to stored parameters
//! - **Unit-checked value groups**: case-insensitive name lookup with domain checks
//!
//! ## Core Components
//!
//! - [`ParameterIdentity`] and [`NameTable`]: canonical parameter concepts
//! - [`select`] and [`SelectOptions`]: per-provider name selection
//! - [`ParameterSpec`]: what one provider exposes for one parameter
//! - [`ParameterValueGroup`] and [`ValueGroup`]: values for one descriptor group
//! - [`VirtualKind`] and [`VirtualParameter`]: computed parameters
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use geoparam_rs::parameters::{build_identity, select, Authority, NameTable, SelectOptions};
//!
//! let identity = Arc::new(
//!     build_identity(
//!         NameTable::new("central_meridian")
//!             .name(Authority::EPSG, "Longitude of natural origin")
//!             .name(Authority::OGC, "central_meridian")
//!             .name(Authority::ESRI, "Central_Meridian")
//!             .name(Authority::ESRI, "Longitude_Of_Origin"),
//!     )
//!     .unwrap(),
//! );
//!
//! // ESRI has two names: one must be picked explicitly
//! assert!(select(&identity, &SelectOptions::new()).is_err());
//!
//! let spec = select(&identity, &SelectOptions::new().disambiguate("Central_Meridian")).unwrap();
//! assert_eq!(spec.names().count(), 3);
//! ```

pub mod bounds;
pub mod identifier;
pub mod identity;
pub mod parameter;
pub mod selector;
pub mod spec;
pub mod unit;
pub mod values;
pub mod virtual_param;

// Re-export key types
pub use bounds::{Bounds, BoundsError};
pub use identifier::{Authority, NamedIdentifier};
pub use identity::{build_identity, NameTable, ParameterIdentity};
pub use parameter::{ParameterError, ParameterValue};
pub use selector::{select, SelectOptions};
pub use spec::ParameterSpec;
pub use unit::{Unit, UnitKind};
pub use values::{ParameterValueGroup, ValueGroup, VirtualParameter};
pub use virtual_param::{authalic_radius, VirtualKind};
