//! Command-line front end for the ctorchain analyzer.
//!
//! Loads class snapshots, resolves configuration from `ctorchain.json` and
//! flags, runs the lint driver and renders diagnostics.

pub mod args;
pub mod config;
pub mod driver;
pub mod fs;
pub mod reporter;
pub mod tracing_config;

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod config_tests;
#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod driver_tests;
#[cfg(test)]
#[path = "tests/fs_tests.rs"]
mod fs_tests;
#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod reporter_tests;
