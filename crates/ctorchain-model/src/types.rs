//! Value types exchanged across the [`ClassModel`](crate::ClassModel) boundary.

use crate::ids::ConstructorId;
use std::fmt;

bitflags::bitflags! {
    /// Declaration traits of a class that affect whether it is inspected.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ClassFlags: u8 {
        const INTERFACE = 1 << 0;
        const ANNOTATION = 1 << 1;
        const ANONYMOUS = 1 << 2;
        const LOCAL = 1 << 3;
    }
}

impl ClassFlags {
    /// Interfaces and annotation types have no constructors to analyze.
    pub fn is_type_only(self) -> bool {
        self.intersects(Self::INTERFACE.union(Self::ANNOTATION))
    }
}

/// A parameter type as the host's type system printed it.
///
/// `Unresolved` stands for a type the host could not resolve. It never
/// compares equal to any canonical text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Resolved(Box<str>),
    Unresolved,
}

impl TypeDescriptor {
    pub fn resolved(text: impl Into<Box<str>>) -> Self {
        Self::Resolved(text.into())
    }

    pub fn canonical_text(&self) -> Option<&str> {
        match self {
            Self::Resolved(text) => Some(text),
            Self::Unresolved => None,
        }
    }
}

impl From<&str> for TypeDescriptor {
    fn from(text: &str) -> Self {
        Self::resolved(text)
    }
}

impl From<Option<&str>> for TypeDescriptor {
    fn from(text: Option<&str>) -> Self {
        text.map_or(Self::Unresolved, Self::resolved)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(text) => f.write_str(text),
            Self::Unresolved => f.write_str("<unresolved>"),
        }
    }
}

/// Where an explicit `this(...)` / `super(...)` call lands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DelegationTarget {
    Resolved(ConstructorId),
    /// Ambiguous overload, unknown symbol, or a call shape the host cannot interpret.
    Unresolved,
}

impl DelegationTarget {
    pub const fn constructor(self) -> Option<ConstructorId> {
        match self {
            Self::Resolved(ctor) => Some(ctor),
            Self::Unresolved => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DelegationKind {
    /// `this(...)`
    SelfDelegation,
    /// `super(...)`
    SuperDelegation,
}

impl DelegationKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::SelfDelegation => "this",
            Self::SuperDelegation => "super",
        }
    }
}

/// A first statement that calls another constructor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DelegationCall {
    pub kind: DelegationKind,
    /// `None` when the host could not resolve the call target.
    pub target: Option<ConstructorId>,
}

/// Structural classification of the first statement of a constructor body.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FirstStatement {
    SelfDelegation(DelegationTarget),
    SuperDelegation(DelegationTarget),
    /// Any statement that is not a constructor call.
    Other,
    /// No body, or a body without statements.
    #[default]
    Empty,
}

impl FirstStatement {
    pub const fn this_call(target: ConstructorId) -> Self {
        Self::SelfDelegation(DelegationTarget::Resolved(target))
    }

    pub const fn super_call(target: ConstructorId) -> Self {
        Self::SuperDelegation(DelegationTarget::Resolved(target))
    }

    pub const fn as_delegation(self) -> Option<DelegationCall> {
        match self {
            Self::SelfDelegation(target) => Some(DelegationCall {
                kind: DelegationKind::SelfDelegation,
                target: target.constructor(),
            }),
            Self::SuperDelegation(target) => Some(DelegationCall {
                kind: DelegationKind::SuperDelegation,
                target: target.constructor(),
            }),
            Self::Other | Self::Empty => None,
        }
    }
}
