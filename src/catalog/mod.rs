//! # Built-in Catalog
//!
//! The identities and operation methods shipped with the crate. Both are
//! built on first access and shared for the life of the process.
//!
//! A failure to build either one means the built-in tables are inconsistent,
//! which no caller can recover from, so the first access panics instead of
//! returning an error.
//!
//! ## Example Usage
//!
//! ```rust
//! use geoparam_rs::catalog;
//! use geoparam_rs::parameters::ValueGroup;
//!
//! let lcc = catalog::providers().method("Lambert_Conformal_Conic_2SP").unwrap();
//! let mut values = lcc.values();
//! values.set("standard_parallel", vec![33.0, 45.0]).unwrap();
//! values.set("semi_major", 6378137.0).unwrap();
//! values.set("inverse_flattening", 298.257223563).unwrap();
//!
//! assert_eq!(values.value("Latitude of 2nd standard parallel").unwrap(), 45.0);
//! assert!((values.value("semi_minor").unwrap() - 6356752.314245).abs() < 1e-6);
//! ```

pub mod identities;
pub mod methods;

pub use identities::{builtin_tables, IdentityCatalog};
pub use methods::ProviderCatalog;

use std::sync::OnceLock;

/// The built-in identity catalog
pub fn identities() -> &'static IdentityCatalog {
    static IDENTITIES: OnceLock<IdentityCatalog> = OnceLock::new();
    IDENTITIES.get_or_init(|| {
        IdentityCatalog::builtin()
            .unwrap_or_else(|err| panic!("built-in parameter identities are inconsistent: {err}"))
    })
}

/// The built-in operation methods
pub fn providers() -> &'static ProviderCatalog {
    static PROVIDERS: OnceLock<ProviderCatalog> = OnceLock::new();
    PROVIDERS.get_or_init(|| {
        ProviderCatalog::builtin(identities())
            .unwrap_or_else(|err| panic!("built-in operation methods are inconsistent: {err}"))
    })
}
