//! Common types and utilities for the ctorchain analyzer.
//!
//! This crate provides foundational types used across all ctorchain crates:
//! - Source locations (`SourceLocation`)
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, message templates)
//! - Analysis limits and thresholds

// Line/column source locations
pub mod position;
pub use position::SourceLocation;

// Diagnostics produced by the reporting layer
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation};

// Centralized limits and thresholds
pub mod limits;

#[cfg(test)]
#[path = "tests/diagnostics_tests.rs"]
mod diagnostics_tests;
