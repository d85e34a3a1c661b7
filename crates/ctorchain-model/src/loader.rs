//! JSON class snapshots.
//!
//! A snapshot is what a host (IDE indexer, compiler plugin, bytecode
//! scanner) exports for the analysis: every class with its superclass name,
//! declaration traits, registrations and constructors, where each
//! constructor's first statement is already classified. Call targets are
//! referenced by class name and parameter list and are resolved to
//! [`ConstructorId`]s while loading; anything that does not resolve to
//! exactly one constructor becomes [`DelegationTarget::Unresolved`].
//!
//! Several snapshot files can be merged into one hierarchy with
//! [`ModelSources`].

use anyhow::{Context, Result, bail};
use ctorchain_common::SourceLocation;
use ctorchain_common::limits::MAX_SNAPSHOT_FILES;
use serde::Deserialize;
use smallvec::SmallVec;
use std::path::Path;
use tracing::{debug, trace};

use crate::builder::HierarchyBuilder;
use crate::hierarchy::ClassHierarchy;
use crate::ids::{ClassId, ConstructorId};
use crate::types::{ClassFlags, DelegationTarget, FirstStatement, TypeDescriptor};

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub classes: Vec<ClassEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEntry {
    pub name: String,
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default)]
    pub anonymous: bool,
    #[serde(default)]
    pub local: bool,
    #[serde(default)]
    pub registrations: Vec<String>,
    #[serde(default)]
    pub location: Option<SourceLocation>,
    #[serde(default)]
    pub constructors: Vec<ConstructorEntry>,
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Annotation,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorEntry {
    /// `null` entries are parameter types the host could not resolve.
    #[serde(default)]
    pub parameters: Vec<Option<String>>,
    #[serde(default)]
    pub synthetic: bool,
    #[serde(default)]
    pub location: Option<SourceLocation>,
    #[serde(default)]
    pub body: Option<BodyEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BodyEntry {
    This {
        #[serde(default)]
        target: Option<TargetEntry>,
    },
    Super {
        #[serde(default)]
        target: Option<TargetEntry>,
    },
    Other,
    Empty,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetEntry {
    /// Defaults to the declaring class for `this` and the superclass for `super`.
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Option<String>>,
}

/// Accumulates snapshot files and builds one merged [`ClassHierarchy`].
#[derive(Debug, Default)]
pub struct ModelSources {
    files: usize,
    classes: Vec<(String, ClassEntry)>,
}

impl ModelSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of classes collected so far.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn file_count(&self) -> usize {
        self.files
    }

    pub fn add_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read class snapshot {}", path.display()))?;
        self.add_str(&path.display().to_string(), &text)
    }

    /// Parse `text` as a snapshot; `origin` names it in error messages.
    pub fn add_str(&mut self, origin: &str, text: &str) -> Result<()> {
        if self.files >= MAX_SNAPSHOT_FILES {
            bail!("too many class snapshots (limit is {MAX_SNAPSHOT_FILES})");
        }
        let snapshot: Snapshot = serde_json::from_str(text)
            .with_context(|| format!("failed to parse class snapshot {origin}"))?;
        debug!(origin, classes = snapshot.classes.len(), "loaded class snapshot");
        self.add_snapshot(origin, snapshot);
        Ok(())
    }

    pub fn add_snapshot(&mut self, origin: &str, snapshot: Snapshot) {
        self.files += 1;
        self.classes.extend(
            snapshot
                .classes
                .into_iter()
                .map(|entry| (origin.to_string(), entry)),
        );
    }

    pub fn build(self) -> Result<ClassHierarchy> {
        let mut builder = HierarchyBuilder::new();

        let mut class_ids = Vec::with_capacity(self.classes.len());
        for (origin, entry) in &self.classes {
            if builder.find_class(&entry.name).is_some() {
                bail!("class '{}' in {origin} is already declared", entry.name);
            }
            let id = builder.add_class(&entry.name);
            builder.set_flags(id, class_flags(entry));
            for registration in &entry.registrations {
                builder.add_registration(id, registration.clone());
            }
            if let Some(location) = &entry.location {
                builder.set_class_location(id, location.clone());
            }
            class_ids.push(id);
        }

        for ((_, entry), &id) in self.classes.iter().zip(&class_ids) {
            let Some(name) = &entry.superclass else {
                continue;
            };
            match builder.find_class(name) {
                Some(superclass) => {
                    builder.set_superclass(id, superclass);
                }
                None => debug!(
                    class = %entry.name,
                    superclass = %name,
                    "superclass is outside the snapshot; treating class as a root"
                ),
            }
        }

        let mut ctor_ids: Vec<SmallVec<[ConstructorId; 2]>> = Vec::with_capacity(class_ids.len());
        for ((_, entry), &id) in self.classes.iter().zip(&class_ids) {
            let mut ids = SmallVec::new();
            for ctor in &entry.constructors {
                let ctor_id = builder.add_constructor(id, ctor.parameters.iter().map(descriptor));
                builder.set_synthetic(ctor_id, ctor.synthetic);
                if let Some(location) = &ctor.location {
                    builder.set_constructor_location(ctor_id, location.clone());
                }
                ids.push(ctor_id);
            }
            ctor_ids.push(ids);
        }

        // Bodies last: delegation targets may point at any constructor.
        for (((_, entry), &id), ids) in self.classes.iter().zip(&class_ids).zip(&ctor_ids) {
            for (ctor, &ctor_id) in entry.constructors.iter().zip(ids) {
                let stmt = classify_body(&builder, id, ctor.body.as_ref());
                builder.set_first_statement(ctor_id, stmt);
            }
        }

        builder.build().context("invalid class hierarchy")
    }
}

/// Parse a single snapshot document into a hierarchy.
pub fn parse_snapshot(text: &str) -> Result<ClassHierarchy> {
    let mut sources = ModelSources::new();
    sources.add_str("<input>", text)?;
    sources.build()
}

fn class_flags(entry: &ClassEntry) -> ClassFlags {
    let mut flags = match entry.kind {
        ClassKind::Class => ClassFlags::empty(),
        ClassKind::Interface => ClassFlags::INTERFACE,
        ClassKind::Annotation => ClassFlags::ANNOTATION,
    };
    flags.set(ClassFlags::ANONYMOUS, entry.anonymous);
    flags.set(ClassFlags::LOCAL, entry.local);
    flags
}

fn descriptor(text: &Option<String>) -> TypeDescriptor {
    TypeDescriptor::from(text.as_deref())
}

fn classify_body(
    builder: &HierarchyBuilder,
    class: ClassId,
    body: Option<&BodyEntry>,
) -> FirstStatement {
    match body {
        None | Some(BodyEntry::Empty) => FirstStatement::Empty,
        Some(BodyEntry::Other) => FirstStatement::Other,
        Some(BodyEntry::This { target }) => {
            FirstStatement::SelfDelegation(resolve_target(builder, Some(class), target.as_ref()))
        }
        Some(BodyEntry::Super { target }) => FirstStatement::SuperDelegation(resolve_target(
            builder,
            builder.superclass_of(class),
            target.as_ref(),
        )),
    }
}

fn resolve_target(
    builder: &HierarchyBuilder,
    default_class: Option<ClassId>,
    target: Option<&TargetEntry>,
) -> DelegationTarget {
    let Some(target) = target else {
        return DelegationTarget::Unresolved;
    };
    let class = match &target.class {
        Some(name) => builder.find_class(name),
        None => default_class,
    };
    let Some(class) = class else {
        trace!(class_name = ?target.class, "delegation target class is unknown");
        return DelegationTarget::Unresolved;
    };

    let parameters: SmallVec<[TypeDescriptor; 3]> =
        target.parameters.iter().map(descriptor).collect();
    if parameters.contains(&TypeDescriptor::Unresolved) {
        return DelegationTarget::Unresolved;
    }

    match builder
        .constructors_with_parameters(class, &parameters)
        .as_slice()
    {
        [ctor] => DelegationTarget::Resolved(*ctor),
        [] => {
            trace!(?class, "no constructor matches delegation target");
            DelegationTarget::Unresolved
        }
        candidates => {
            trace!(?class, candidates = candidates.len(), "ambiguous delegation target");
            DelegationTarget::Unresolved
        }
    }
}
