//! Which classes the driver inspects.

use ctorchain_common::limits::MAX_CONSTRUCTOR_CHAIN_STEPS;
use ctorchain_model::{ClassFlags, ClassId, ClassModel};
use globset::GlobSet;

use crate::signature::TEMPLATE_PRESENTATION_CLASS;

pub const ACTION_REGISTRATION: &str = "action";

pub trait CandidateFilter: Sync {
    fn is_candidate(&self, model: &dyn ClassModel, class: ClassId) -> bool;
}

impl<F> CandidateFilter for F
where
    F: Fn(&dyn ClassModel, ClassId) -> bool + Sync,
{
    fn is_candidate(&self, model: &dyn ClassModel, class: ClassId) -> bool {
        self(model, class)
    }
}

/// Every class that can have constructors.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllClasses;

impl CandidateFilter for AllClasses {
    fn is_candidate(&self, model: &dyn ClassModel, class: ClassId) -> bool {
        !model.class_flags(class).is_type_only()
    }
}

/// Named, top-level subclasses of `base_class` registered under `registration`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredSubclassFilter {
    pub base_class: String,
    pub registration: String,
}

impl RegisteredSubclassFilter {
    pub fn new(base_class: impl Into<String>, registration: impl Into<String>) -> Self {
        Self {
            base_class: base_class.into(),
            registration: registration.into(),
        }
    }
}

impl Default for RegisteredSubclassFilter {
    fn default() -> Self {
        Self::new(TEMPLATE_PRESENTATION_CLASS, ACTION_REGISTRATION)
    }
}

impl CandidateFilter for RegisteredSubclassFilter {
    fn is_candidate(&self, model: &dyn ClassModel, class: ClassId) -> bool {
        let flags = model.class_flags(class);
        if flags.intersects(
            ClassFlags::INTERFACE | ClassFlags::ANNOTATION | ClassFlags::ANONYMOUS | ClassFlags::LOCAL,
        ) {
            return false;
        }
        if !is_inheritor(model, class, &self.base_class) {
            return false;
        }
        model
            .registrations_of(class)
            .iter()
            .any(|kind| *kind == self.registration)
    }
}

/// Restricts another filter to classes whose qualified name matches a glob set.
pub struct NameFilter<F> {
    inner: F,
    names: GlobSet,
}

impl<F: CandidateFilter> NameFilter<F> {
    pub fn new(inner: F, names: GlobSet) -> Self {
        Self { inner, names }
    }
}

impl<F: CandidateFilter> CandidateFilter for NameFilter<F> {
    fn is_candidate(&self, model: &dyn ClassModel, class: ClassId) -> bool {
        self.names.is_match(model.qualified_name(class)) && self.inner.is_candidate(model, class)
    }
}

/// Whether `class` is `base_name` or extends it, directly or transitively.
pub fn is_inheritor(model: &dyn ClassModel, class: ClassId, base_name: &str) -> bool {
    let mut current = Some(class);
    let mut remaining = MAX_CONSTRUCTOR_CHAIN_STEPS;
    while let Some(c) = current {
        if model.qualified_name(c) == base_name {
            return true;
        }
        if remaining == 0 {
            return false;
        }
        remaining -= 1;
        current = model.superclass_of(c);
    }
    false
}
