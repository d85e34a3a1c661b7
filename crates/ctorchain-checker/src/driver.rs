//! Lint Driver
//!
//! Runs the chain resolver once per entry point of a class: each declared
//! constructor, or the compiler-generated default constructor when the
//! class declares none. Batches of classes can be checked sequentially or
//! on the rayon pool; the report order always follows the input order.

use ctorchain_model::{ClassId, ClassModel, ConstructorId};
use rayon::prelude::*;
use smallvec::SmallVec;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, debug_span};

use crate::cache::ChainCache;
use crate::candidates::CandidateFilter;
use crate::options::CheckerOptions;
use crate::resolver::{ChainResolver, ChainStep, ChainTrace};
use crate::signature::TargetSignature;

/// An entry point whose chain reaches the target constructor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// The declared constructor, or `None` for the default constructor.
    pub entry_point: Option<ConstructorId>,
    pub matched: ChainStep,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassReport {
    pub class: ClassId,
    pub violations: Vec<Violation>,
}

pub struct LintDriver<'a> {
    model: &'a (dyn ClassModel + Sync),
    target: &'a TargetSignature,
    options: CheckerOptions,
    cache: Option<ChainCache>,
    cancelled: Option<Arc<AtomicBool>>,
}

impl<'a> LintDriver<'a> {
    pub fn new(
        model: &'a (dyn ClassModel + Sync),
        target: &'a TargetSignature,
        options: CheckerOptions,
    ) -> Self {
        let cache = options.memoize.then(|| ChainCache::new(target.clone()));
        Self {
            model,
            target,
            options,
            cache,
            cancelled: None,
        }
    }

    /// Stop between classes once `flag` is set.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = Some(flag);
        self
    }

    pub fn options(&self) -> &CheckerOptions {
        &self.options
    }

    pub fn cache(&self) -> Option<&ChainCache> {
        self.cache.as_ref()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn uncached_resolver(&self) -> ChainResolver<'_> {
        ChainResolver::new(self.model, self.target).with_max_steps(self.options.max_chain_steps)
    }

    fn resolver(&self) -> ChainResolver<'_> {
        match &self.cache {
            Some(cache) => self.uncached_resolver().with_cache(cache),
            None => self.uncached_resolver(),
        }
    }

    /// Declared constructors, or a single `None` for the default constructor.
    pub fn entry_points(&self, class: ClassId) -> SmallVec<[Option<ConstructorId>; 2]> {
        let declared = self.model.constructors_of(class);
        if declared.is_empty() {
            smallvec::smallvec![None]
        } else {
            declared.iter().copied().map(Some).collect()
        }
    }

    pub fn find_violations(&self, class: ClassId) -> Vec<Violation> {
        let _span = debug_span!("find_violations", class = self.model.qualified_name(class))
            .entered();
        let resolver = self.resolver();
        let violations: Vec<Violation> = self
            .entry_points(class)
            .into_iter()
            .filter_map(|entry_point| {
                resolver
                    .resolve(class, entry_point)
                    .map(|matched| Violation {
                        entry_point,
                        matched,
                    })
            })
            .collect();
        debug!(violations = violations.len(), "checked class");
        violations
    }

    /// The full walk for every entry point of `class`.
    ///
    /// Traces never consult the cache: a warm cache would cut each walk
    /// short at its first step.
    pub fn explain(&self, class: ClassId) -> Vec<(Option<ConstructorId>, ChainTrace)> {
        let resolver = self.uncached_resolver();
        self.entry_points(class)
            .into_iter()
            .map(|entry_point| (entry_point, resolver.trace_chain(class, entry_point)))
            .collect()
    }

    /// Check every class `filter` accepts; only classes with violations are reported.
    pub fn check_classes(&self, classes: &[ClassId], filter: &dyn CandidateFilter) -> Vec<ClassReport> {
        let check = |&class: &ClassId| -> Option<ClassReport> {
            if self.is_cancelled() || !filter.is_candidate(self.model, class) {
                return None;
            }
            let violations = self.find_violations(class);
            (!violations.is_empty()).then_some(ClassReport { class, violations })
        };

        let reports: Vec<ClassReport> = if self.options.parallel {
            classes.par_iter().filter_map(check).collect()
        } else {
            classes.iter().filter_map(check).collect()
        };
        if self.is_cancelled() {
            debug!(reported = reports.len(), "check cancelled");
        }
        reports
    }
}
