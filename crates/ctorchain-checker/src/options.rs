use ctorchain_common::limits::MAX_CONSTRUCTOR_CHAIN_STEPS;

/// Knobs for [`LintDriver`](crate::LintDriver).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckerOptions {
    /// Upper bound on steps per chain; longer chains report no match.
    pub max_chain_steps: u32,
    /// Share resolved chain suffixes between entry points and classes.
    pub memoize: bool,
    /// Check classes on the rayon thread pool.
    pub parallel: bool,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            max_chain_steps: MAX_CONSTRUCTOR_CHAIN_STEPS,
            memoize: true,
            parallel: false,
        }
    }
}
