//! # Transform Providers
//!
//! Operation methods, the dimensional families some of them belong to, and
//! the seam through which resolved parameters reach a transform builder.
//!
//! ## Core Components
//!
//! - [`OperationMethod`] and [`MethodKind`]: a provider and its descriptor group
//! - [`LazyFamily`], [`ProviderFamily`] and [`Redimension`]: 2-D/3-D siblings
//!   built together on first use
//! - [`TransformBuilder`] and [`TransformRequest`]: hand-off to transform code

pub mod family;
pub mod method;
pub mod transform;

pub use family::{Dimensions, LazyFamily, ProviderFamily, Redimension, FAMILY_SIZE};
pub use method::{LambertVariant, MercatorVariant, MethodKind, OperationMethod};
pub use transform::{CreateTransformError, TransformBuilder, TransformRequest};
