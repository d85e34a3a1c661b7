//! The read-only query surface the constructor-chain analysis runs against.

use crate::ids::{ClassId, ConstructorId};
use crate::types::{ClassFlags, FirstStatement, TypeDescriptor};

/// Class and constructor queries over an immutable hierarchy snapshot.
///
/// Implementations must keep two invariants: the superclass relation is
/// acyclic, and `declaring_class_of(c)` is the class whose
/// `constructors_of` lists `c`. Handles passed in must have been produced by
/// the same model; implementations may panic otherwise.
///
/// The trait is object safe so analyses can hold a `&dyn ClassModel`.
/// Parallel drivers additionally require `Sync`.
pub trait ClassModel {
    fn qualified_name(&self, class: ClassId) -> &str;

    fn class_flags(&self, class: ClassId) -> ClassFlags;

    /// Declared constructors in declaration order.
    fn constructors_of(&self, class: ClassId) -> &[ConstructorId];

    /// The direct superclass, or `None` at the hierarchy root (or when the
    /// superclass is outside the snapshot).
    fn superclass_of(&self, class: ClassId) -> Option<ClassId>;

    fn first_statement_of(&self, ctor: ConstructorId) -> FirstStatement;

    fn parameter_types_of(&self, ctor: ConstructorId) -> &[TypeDescriptor];

    fn declaring_class_of(&self, ctor: ConstructorId) -> ClassId;

    /// Whether the constructor was generated by the host compiler rather
    /// than written in source.
    fn is_synthetic(&self, ctor: ConstructorId) -> bool;

    /// Registration kinds (for example `"action"`) the host recorded for the class.
    fn registrations_of(&self, class: ClassId) -> &[String];

    fn find_class(&self, qualified_name: &str) -> Option<ClassId>;
}
