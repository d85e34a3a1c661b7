//! Programmatic construction of a [`ClassHierarchy`].
//!
//! The builder is permissive while recording and validates once in
//! [`HierarchyBuilder::build`]: duplicate class names and superclass cycles
//! are rejected there.

use anyhow::{Result, bail};
use ctorchain_common::SourceLocation;
use smallvec::SmallVec;
use tracing::debug;

use crate::hierarchy::{ClassData, ClassHierarchy, ConstructorData};
use crate::ids::{ClassId, ConstructorId};
use crate::types::{ClassFlags, FirstStatement, TypeDescriptor};

#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    hierarchy: ClassHierarchy,
    duplicates: Vec<String>,
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class with no superclass, constructors or flags.
    ///
    /// Adding a name twice returns the first class and makes `build` fail.
    pub fn add_class(&mut self, name: &str) -> ClassId {
        if let Some(&existing) = self.hierarchy.by_name.get(name) {
            self.duplicates.push(name.to_string());
            return existing;
        }
        let id = ClassId(self.hierarchy.classes.len() as u32);
        self.hierarchy.classes.push(ClassData {
            name: name.into(),
            flags: ClassFlags::empty(),
            superclass: None,
            constructors: SmallVec::new(),
            registrations: Vec::new(),
            location: None,
        });
        self.hierarchy.by_name.insert(name.into(), id);
        id
    }

    pub fn find_class(&self, name: &str) -> Option<ClassId> {
        self.hierarchy.by_name.get(name).copied()
    }

    pub fn set_superclass(&mut self, class: ClassId, superclass: ClassId) -> &mut Self {
        self.class_mut(class).superclass = Some(superclass);
        self
    }

    pub fn set_flags(&mut self, class: ClassId, flags: ClassFlags) -> &mut Self {
        self.class_mut(class).flags = flags;
        self
    }

    pub fn add_registration(&mut self, class: ClassId, kind: impl Into<String>) -> &mut Self {
        self.class_mut(class).registrations.push(kind.into());
        self
    }

    pub fn set_class_location(&mut self, class: ClassId, location: SourceLocation) -> &mut Self {
        self.class_mut(class).location = Some(location);
        self
    }

    /// Declare a constructor with an empty body.
    pub fn add_constructor<I, T>(&mut self, class: ClassId, parameters: I) -> ConstructorId
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeDescriptor>,
    {
        let id = ConstructorId(self.hierarchy.constructors.len() as u32);
        self.hierarchy.constructors.push(ConstructorData {
            class,
            parameters: parameters.into_iter().map(Into::into).collect(),
            first_statement: FirstStatement::Empty,
            synthetic: false,
            location: None,
        });
        self.class_mut(class).constructors.push(id);
        id
    }

    pub fn set_first_statement(&mut self, ctor: ConstructorId, stmt: FirstStatement) -> &mut Self {
        self.constructor_mut(ctor).first_statement = stmt;
        self
    }

    pub fn set_synthetic(&mut self, ctor: ConstructorId, synthetic: bool) -> &mut Self {
        self.constructor_mut(ctor).synthetic = synthetic;
        self
    }

    pub fn set_constructor_location(
        &mut self,
        ctor: ConstructorId,
        location: SourceLocation,
    ) -> &mut Self {
        self.constructor_mut(ctor).location = Some(location);
        self
    }

    /// Constructors of `class` whose parameter list equals `parameters`.
    pub fn constructors_with_parameters(
        &self,
        class: ClassId,
        parameters: &[TypeDescriptor],
    ) -> SmallVec<[ConstructorId; 1]> {
        self.hierarchy.classes[class.index()]
            .constructors
            .iter()
            .copied()
            .filter(|ctor| {
                self.hierarchy.constructors[ctor.index()].parameters.as_slice() == parameters
            })
            .collect()
    }

    pub fn superclass_of(&self, class: ClassId) -> Option<ClassId> {
        self.hierarchy.classes[class.index()].superclass
    }

    pub fn build(self) -> Result<ClassHierarchy> {
        if let Some(name) = self.duplicates.first() {
            bail!("class '{name}' is declared more than once");
        }
        if let Some(class) = find_superclass_cycle(&self.hierarchy) {
            bail!(
                "circular inheritance involving class '{}'",
                self.hierarchy.classes[class.index()].name
            );
        }
        debug!(
            classes = self.hierarchy.class_count(),
            constructors = self.hierarchy.constructor_count(),
            "built class hierarchy"
        );
        Ok(self.hierarchy)
    }

    fn class_mut(&mut self, class: ClassId) -> &mut ClassData {
        &mut self.hierarchy.classes[class.index()]
    }

    fn constructor_mut(&mut self, ctor: ConstructorId) -> &mut ConstructorData {
        &mut self.hierarchy.constructors[ctor.index()]
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// Walk every superclass chain once; a chain that runs back into a class
/// still in progress is a cycle. Returns a class on the cycle.
fn find_superclass_cycle(hierarchy: &ClassHierarchy) -> Option<ClassId> {
    let mut state = vec![VisitState::Unvisited; hierarchy.classes.len()];
    let mut path = Vec::new();

    for start in 0..hierarchy.classes.len() {
        if state[start] != VisitState::Unvisited {
            continue;
        }
        let mut current = Some(ClassId(start as u32));
        while let Some(class) = current {
            match state[class.index()] {
                VisitState::Done => break,
                VisitState::InProgress => return Some(class),
                VisitState::Unvisited => {
                    state[class.index()] = VisitState::InProgress;
                    path.push(class);
                    current = hierarchy.classes[class.index()].superclass;
                }
            }
        }
        for class in path.drain(..) {
            state[class.index()] = VisitState::Done;
        }
    }
    None
}
