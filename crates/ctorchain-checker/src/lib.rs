//! Constructor-chain analysis.
//!
//! Decides whether the effective constructor chain of a class (explicit
//! `this(...)`/`super(...)` delegations, implicit calls to the superclass
//! no-argument constructor, and compiler-generated default constructors)
//! reaches one specific ancestor constructor.
//!
//! - [`signature`]: recognizing the ancestor constructor ([`TargetSignature`])
//! - [`resolver`]: walking the chain ([`ChainResolver`])
//! - [`cache`]: optional memoization shared across classes ([`ChainCache`])
//! - [`candidates`]: which classes are inspected ([`CandidateFilter`])
//! - [`driver`]: per-class entry points and batch checking ([`LintDriver`])
//!
//! Every negative or indeterminate outcome is "no match". A chain that
//! cannot be proven to reach the target is never reported.

pub mod options;
pub use options::CheckerOptions;

pub mod signature;
pub use signature::{TargetSignature, matches};

pub mod resolver;
pub use resolver::{ChainOutcome, ChainResolver, ChainStep, ChainTrace, find_no_arg_constructor};

pub mod cache;
pub use cache::{CachedChain, ChainCache};

pub mod candidates;
pub use candidates::{AllClasses, CandidateFilter, NameFilter, RegisteredSubclassFilter, is_inheritor};

pub mod driver;
pub use driver::{ClassReport, LintDriver, Violation};

#[cfg(test)]
#[path = "tests/test_fixtures.rs"]
pub(crate) mod test_fixtures;
#[cfg(test)]
#[path = "tests/signature_tests.rs"]
mod signature_tests;
#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod resolver_tests;
#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod cache_tests;
#[cfg(test)]
#[path = "tests/candidates_tests.rs"]
mod candidates_tests;
#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod driver_tests;
