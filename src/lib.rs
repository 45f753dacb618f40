//! # geoparam-rs
//!
//! `geoparam-rs` is the parameter identity and resolution layer for coordinate
//! operations: map projections, datum shifts and the like.
//!
//! The library provides:
//! - Canonical parameter identities carrying every authority's name for a concept
//! - Per-provider name selection, with at most one live name per authority
//! - Virtual parameters (earth radius, inverse flattening, standard parallels)
//!   that read from and write through to stored parameters
//! - Descriptor groups with case-insensitive lookup and authority exclusion
//! - Dimensional provider families whose 2-D and 3-D members are built together
//! - A built-in catalog of identities and operation methods (feature `catalog`)
//!
//! ## Basic Usage
//!
//! ```
//! use geoparam_rs::catalog;
//! use geoparam_rs::parameters::ValueGroup;
//! use geoparam_rs::provider::TransformRequest;
//!
//! let mercator = catalog::providers().method("Mercator_1SP").unwrap();
//! let mut values = mercator.values();
//! values.set("semi_major", 6378137.0).unwrap();
//! values.set("semi_minor", 6356752.314245).unwrap();
//! values.set("lon_0", 110.0).unwrap();
//!
//! let central_meridian = mercator
//!     .create_transform(&values, &|request: &TransformRequest<'_>| {
//!         request.require("central_meridian")
//!     })
//!     .unwrap();
//! assert_eq!(central_meridian, 110.0);
//! ```

// Public modules
pub mod error;

// Parameter system
pub mod parameters;

// Descriptor groups
pub mod descriptor;

// Transform providers
pub mod provider;

// Conditional modules
#[cfg(feature = "catalog")]
pub mod catalog;

// Re-exports for convenience
pub use error::{GeoParamError, Result};

pub use descriptor::{DescriptorGroup, DescriptorGroupBuilder};
pub use parameters::{ParameterError, ParameterValueGroup, SelectOptions};
pub use provider::{OperationMethod, Redimension};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
