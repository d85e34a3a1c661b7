//! Constructor Chain Resolution
//!
//! Starting from one `(class, constructor)` pair, follows the constructor
//! that runs next during object initialization until the target
//! constructor is found or the chain ends:
//!
//! 1. a constructor that matches the target ends the walk successfully;
//! 2. an explicit `this(...)`/`super(...)` first statement moves to the
//!    called constructor and its declaring class; an unresolved call ends
//!    the walk with no match;
//! 3. otherwise (no delegation, or no constructor at all) the superclass's
//!    declared no-argument constructor runs next, or the superclass's
//!    compiler-generated default when it declares none;
//! 4. a class without a superclass ends the walk with no match.
//!
//! The walk is an explicit loop with a step limit and a visited set, so a
//! malformed model (cyclic `this(...)` calls, a superclass cycle that slipped
//! past the model) cannot recurse without bound.

use ctorchain_model::{ClassId, ClassModel, ConstructorId};
use rustc_hash::FxHashSet;
use tracing::{trace, warn};

use crate::cache::ChainCache;
use crate::signature::{TargetSignature, matches};
use ctorchain_common::limits::MAX_CONSTRUCTOR_CHAIN_STEPS;

/// One node of a constructor chain.
///
/// `constructor == None` stands for the compiler-generated default
/// constructor of `class`. It can be walked through but never matches.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChainStep {
    pub class: ClassId,
    pub constructor: Option<ConstructorId>,
}

impl ChainStep {
    pub const fn new(class: ClassId, constructor: Option<ConstructorId>) -> Self {
        Self { class, constructor }
    }
}

/// Why a walk stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChainOutcome {
    Matched(ChainStep),
    /// Reached a class without a superclass.
    Exhausted,
    /// An explicit delegation whose target the model could not resolve.
    Unresolved,
    /// A step was visited twice.
    Cycle,
    /// The step limit was reached.
    LimitExceeded,
    /// Joined a path that an earlier walk proved does not match.
    KnownNoMatch,
}

impl ChainOutcome {
    pub const fn matched(self) -> Option<ChainStep> {
        match self {
            Self::Matched(step) => Some(step),
            _ => None,
        }
    }

    /// Whether every visited step shares this result and its step count.
    /// A walk cut short by the step limit says nothing about the steps near
    /// its end, and a cycle is seen at a different step from each entry.
    const fn is_cacheable(self) -> bool {
        !matches!(self, Self::LimitExceeded | Self::Cycle)
    }
}

/// The visited steps of one walk, in order, and how it ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainTrace {
    pub steps: Vec<ChainStep>,
    pub outcome: ChainOutcome,
}

impl ChainTrace {
    pub const fn matched(&self) -> Option<ChainStep> {
        self.outcome.matched()
    }
}

enum Next {
    Matched,
    Advance(ChainStep),
    Exhausted,
    Unresolved,
}

/// The first declared constructor of `class` that takes no parameters.
///
/// `None` means the class relies on a compiler-generated default
/// constructor, or has no parameterless constructor at all.
pub fn find_no_arg_constructor(model: &dyn ClassModel, class: ClassId) -> Option<ConstructorId> {
    model
        .constructors_of(class)
        .iter()
        .copied()
        .find(|&ctor| model.parameter_types_of(ctor).is_empty())
}

pub struct ChainResolver<'a> {
    model: &'a dyn ClassModel,
    target: &'a TargetSignature,
    max_steps: u32,
    cache: Option<&'a ChainCache>,
}

impl<'a> ChainResolver<'a> {
    pub fn new(model: &'a dyn ClassModel, target: &'a TargetSignature) -> Self {
        Self {
            model,
            target,
            max_steps: MAX_CONSTRUCTOR_CHAIN_STEPS,
            cache: None,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Consult and fill `cache`. The cache must have been created for the
    /// same target signature. A walk that joins a cached step stops there,
    /// so its trace holds only the steps walked before the join.
    pub fn with_cache(mut self, cache: &'a ChainCache) -> Self {
        debug_assert_eq!(cache.target(), self.target);
        self.cache = Some(cache);
        self
    }

    pub fn target(&self) -> &TargetSignature {
        self.target
    }

    /// The first step reachable from `(start_class, start_ctor)`, inclusive,
    /// whose constructor matches the target.
    pub fn resolve(
        &self,
        start_class: ClassId,
        start_ctor: Option<ConstructorId>,
    ) -> Option<ChainStep> {
        self.trace_chain(start_class, start_ctor).matched()
    }

    /// Like [`resolve`](Self::resolve), but keeps every visited step and the
    /// reason the walk stopped.
    pub fn trace_chain(&self, start_class: ClassId, start_ctor: Option<ConstructorId>) -> ChainTrace {
        let mut steps = Vec::new();
        let mut visited = FxHashSet::default();
        let mut current = ChainStep::new(start_class, start_ctor);

        let mut joined = 0;

        let outcome = loop {
            if let Some(known) = self.cache.and_then(|cache| cache.get(current)) {
                trace!(?current, ?known, "joined cached chain");
                if steps.len() + known.remaining as usize > self.max_steps as usize {
                    warn!(
                        class = self.model.qualified_name(start_class),
                        max_steps = self.max_steps,
                        "constructor chain exceeds step limit"
                    );
                    break ChainOutcome::LimitExceeded;
                }
                joined = known.remaining;
                break known
                    .result
                    .map_or(ChainOutcome::KnownNoMatch, ChainOutcome::Matched);
            }
            if steps.len() >= self.max_steps as usize {
                warn!(
                    class = self.model.qualified_name(start_class),
                    max_steps = self.max_steps,
                    "constructor chain exceeds step limit"
                );
                break ChainOutcome::LimitExceeded;
            }
            if !visited.insert(current) {
                warn!(
                    class = self.model.qualified_name(current.class),
                    "constructor chain revisits a step"
                );
                break ChainOutcome::Cycle;
            }
            steps.push(current);
            trace!(
                class = self.model.qualified_name(current.class),
                constructor = ?current.constructor,
                "chain step"
            );

            match self.next_step(current) {
                Next::Matched => break ChainOutcome::Matched(current),
                Next::Advance(next) => current = next,
                Next::Exhausted => break ChainOutcome::Exhausted,
                Next::Unresolved => break ChainOutcome::Unresolved,
            }
        };

        if let Some(cache) = self.cache {
            if outcome.is_cacheable() {
                cache.record(&steps, outcome.matched(), joined);
            }
        }
        ChainTrace { steps, outcome }
    }

    fn next_step(&self, step: ChainStep) -> Next {
        if let Some(ctor) = step.constructor {
            if matches(self.model, ctor, self.target) {
                return Next::Matched;
            }
            if let Some(call) = self.model.first_statement_of(ctor).as_delegation() {
                return match call.target {
                    Some(next) => Next::Advance(ChainStep::new(
                        self.model.declaring_class_of(next),
                        Some(next),
                    )),
                    None => {
                        trace!(kind = call.kind.keyword(), "unresolved delegation");
                        Next::Unresolved
                    }
                };
            }
        }

        match self.model.superclass_of(step.class) {
            Some(superclass) => Next::Advance(ChainStep::new(
                superclass,
                find_no_arg_constructor(self.model, superclass),
            )),
            None => Next::Exhausted,
        }
    }
}
