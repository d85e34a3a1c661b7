//! Arena-backed class hierarchy snapshot.

use ctorchain_common::SourceLocation;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;

use crate::ids::{ClassId, ConstructorId};
use crate::model::ClassModel;
use crate::types::{ClassFlags, FirstStatement, TypeDescriptor};

#[derive(Debug, Clone)]
pub struct ClassData {
    pub name: Box<str>,
    pub flags: ClassFlags,
    pub superclass: Option<ClassId>,
    pub constructors: SmallVec<[ConstructorId; 2]>,
    pub registrations: Vec<String>,
    pub location: Option<SourceLocation>,
}

#[derive(Debug, Clone)]
pub struct ConstructorData {
    pub class: ClassId,
    pub parameters: SmallVec<[TypeDescriptor; 3]>,
    pub first_statement: FirstStatement,
    pub synthetic: bool,
    pub location: Option<SourceLocation>,
}

/// An immutable class hierarchy.
///
/// Built by [`HierarchyBuilder`](crate::HierarchyBuilder), which guarantees
/// that class names are unique and that the superclass relation is acyclic.
/// All data lives in flat vectors indexed by [`ClassId`] and
/// [`ConstructorId`]; the type is `Send + Sync` and can be shared across
/// worker threads without locking.
#[derive(Debug, Clone, Default)]
pub struct ClassHierarchy {
    pub(crate) classes: Vec<ClassData>,
    pub(crate) constructors: Vec<ConstructorData>,
    pub(crate) by_name: IndexMap<Box<str>, ClassId, FxBuildHasher>,
}

impl ClassHierarchy {
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn constructor_count(&self) -> usize {
        self.constructors.len()
    }

    /// All classes in insertion order.
    pub fn classes(&self) -> impl ExactSizeIterator<Item = ClassId> + '_ {
        self.by_name.values().copied()
    }

    pub fn class(&self, class: ClassId) -> &ClassData {
        &self.classes[class.index()]
    }

    pub fn constructor(&self, ctor: ConstructorId) -> &ConstructorData {
        &self.constructors[ctor.index()]
    }

    pub fn class_location(&self, class: ClassId) -> Option<&SourceLocation> {
        self.class(class).location.as_ref()
    }

    pub fn constructor_location(&self, ctor: ConstructorId) -> Option<&SourceLocation> {
        self.constructor(ctor).location.as_ref()
    }

    /// Number of superclass links between `class` and its root.
    pub fn depth_of(&self, class: ClassId) -> usize {
        let mut depth = 0;
        let mut current = self.class(class).superclass;
        while let Some(parent) = current {
            depth += 1;
            current = self.class(parent).superclass;
        }
        depth
    }

    /// Render a constructor as `Name(T1, T2)` for messages and logs.
    pub fn describe_constructor(&self, ctor: ConstructorId) -> String {
        let data = self.constructor(ctor);
        let params: Vec<String> = data.parameters.iter().map(|p| p.to_string()).collect();
        format!("{}({})", self.class(data.class).name, params.join(", "))
    }
}

impl ClassModel for ClassHierarchy {
    fn qualified_name(&self, class: ClassId) -> &str {
        &self.class(class).name
    }

    fn class_flags(&self, class: ClassId) -> ClassFlags {
        self.class(class).flags
    }

    fn constructors_of(&self, class: ClassId) -> &[ConstructorId] {
        &self.class(class).constructors
    }

    fn superclass_of(&self, class: ClassId) -> Option<ClassId> {
        self.class(class).superclass
    }

    fn first_statement_of(&self, ctor: ConstructorId) -> FirstStatement {
        self.constructor(ctor).first_statement
    }

    fn parameter_types_of(&self, ctor: ConstructorId) -> &[TypeDescriptor] {
        &self.constructor(ctor).parameters
    }

    fn declaring_class_of(&self, ctor: ConstructorId) -> ClassId {
        self.constructor(ctor).class
    }

    fn is_synthetic(&self, ctor: ConstructorId) -> bool {
        self.constructor(ctor).synthetic
    }

    fn registrations_of(&self, class: ClassId) -> &[String] {
        &self.class(class).registrations
    }

    fn find_class(&self, qualified_name: &str) -> Option<ClassId> {
        self.by_name.get(qualified_name).copied()
    }
}
