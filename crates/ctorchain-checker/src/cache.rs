//! Memoized chain results.
//!
//! Where a step leads depends only on the step and the target, so every
//! step of a finished walk shares the walk's result. Many classes of one
//! hierarchy funnel into the same few ancestor constructors; recording all
//! visited steps lets later walks stop where they join an already-resolved
//! path.
//!
//! Each entry also keeps how many steps the walk still needed from that
//! step on. A walk that joins the entry adds them to its own count, so the
//! step limit applies exactly as if the whole chain had been walked.

use dashmap::DashMap;
use rustc_hash::FxBuildHasher;

use crate::resolver::ChainStep;
use crate::signature::TargetSignature;

/// The recorded outcome of a walk through one step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CachedChain {
    pub result: Option<ChainStep>,
    /// Steps from this one (inclusive) to the end of the walk.
    pub remaining: u32,
}

/// Step-to-result map for one target signature. Thread safe.
pub struct ChainCache {
    target: TargetSignature,
    results: DashMap<ChainStep, CachedChain, FxBuildHasher>,
}

impl ChainCache {
    pub fn new(target: TargetSignature) -> Self {
        Self {
            target,
            results: DashMap::with_hasher(FxBuildHasher),
        }
    }

    pub fn target(&self) -> &TargetSignature {
        &self.target
    }

    /// The entry for `step` when it was part of a finished walk.
    pub fn get(&self, step: ChainStep) -> Option<CachedChain> {
        self.results.get(&step).map(|entry| *entry.value())
    }

    /// Record the walked `steps`. `tail` is the `remaining` count of the
    /// cached step the walk joined after its last step, or 0 when it ended
    /// on its own.
    pub fn record(&self, steps: &[ChainStep], result: Option<ChainStep>, tail: u32) {
        let len = steps.len() as u32;
        for (i, &step) in (0u32..).zip(steps) {
            self.results.insert(
                step,
                CachedChain {
                    result,
                    remaining: len - i + tail,
                },
            );
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn clear(&self) {
        self.results.clear();
    }
}
