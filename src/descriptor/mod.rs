//! # Descriptor Groups
//!
//! This module assembles selected parameter specs into the descriptor group
//! consumed by transform creation, and resolves names against it.
//!
//! ## Core Components
//!
//! - [`DescriptorGroupBuilder`]: applies group-level authority exclusions and
//!   capability bits
//! - [`DescriptorGroup`]: immutable, ordered set of specs with [`Lookup`]
//! - [`Capabilities`]: bits enabling virtual parameters

pub mod capabilities;
pub mod group;

pub use capabilities::Capabilities;
pub use group::{build_group, DescriptorGroup, DescriptorGroupBuilder, Lookup};
