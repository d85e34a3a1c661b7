//! Centralized limits for the constructor-chain analysis.
//!
//! The class model guarantees an acyclic superclass relation, so a chain
//! walk is normally bounded by the hierarchy height. These limits only
//! matter for malformed or unexpectedly deep snapshots.

/// Maximum number of chain steps a single resolution may take.
///
/// Each step is one `(class, constructor)` pair. Explicit `this(...)`
/// delegations add steps without changing class, so the bound is on steps
/// rather than on hierarchy height. When exceeded the resolver gives up and
/// reports no match.
///
/// # Example
///
/// ```java
/// class A0 { A0() {} }
/// class A1 extends A0 { A1() { this(1); } A1(int x) {} }
/// // ... 300 levels of subclasses ...
/// ```
pub const MAX_CONSTRUCTOR_CHAIN_STEPS: u32 = 256;

/// Maximum number of snapshot files merged into one hierarchy.
pub const MAX_SNAPSHOT_FILES: usize = 10_000;
