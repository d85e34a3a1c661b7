//! Class hierarchy model for the ctorchain analyzer.
//!
//! The constructor-chain resolver never looks at source code. It asks a
//! [`ClassModel`] for constructors, superclasses and the classified first
//! statement of each constructor body. This crate defines that boundary and
//! ships one implementation of it:
//!
//! - [`ClassModel`]: the read-only query trait (object safe)
//! - [`ClassHierarchy`]: an arena-backed snapshot implementing the trait
//! - [`HierarchyBuilder`]: programmatic construction of a hierarchy
//! - [`ModelSources`]: JSON snapshot loading and merging

pub mod ids;
pub use ids::{ClassId, ConstructorId};

pub mod types;
pub use types::{
    ClassFlags, DelegationCall, DelegationKind, DelegationTarget, FirstStatement, TypeDescriptor,
};

pub mod model;
pub use model::ClassModel;

pub mod hierarchy;
pub use hierarchy::{ClassData, ClassHierarchy, ConstructorData};

pub mod builder;
pub use builder::HierarchyBuilder;

pub mod loader;
pub use loader::{ModelSources, parse_snapshot};

#[cfg(test)]
#[path = "tests/builder_tests.rs"]
mod builder_tests;
#[cfg(test)]
#[path = "tests/loader_tests.rs"]
mod loader_tests;
