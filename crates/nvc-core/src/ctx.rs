//! Evaluation context.

/// The two host-observable toggles `eval`/`bounds_check` take.
///
/// Passed by reference into every entry point rather than read from a
/// global, so a host can run several evaluations with different settings
/// (or in parallel, modulo the identifier interner) without cross-talk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// When set, the evaluator emits best-effort fold-failure explanations
    /// via `tracing::debug!` (gated behind the `tracing` feature; a no-op
    /// otherwise).
    pub debug: bool,
    /// Upper bound on `while`-loop body executions before folding gives up
    /// and leaves the call unfolded. Defaults to 1000; exposed as a field
    /// so tests can shrink it instead of spinning a real 1000-iteration
    /// loop.
    pub max_while_iterations: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            debug: false,
            max_while_iterations: 1000,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_max_while_iterations(mut self, n: u32) -> Self {
        self.max_while_iterations = n;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_iteration_bound_is_1000() {
        assert_eq!(Options::default().max_while_iterations, 1000);
        assert!(!Options::default().debug);
    }

    #[test]
    fn builders_are_chainable() {
        let opts = Options::new().with_debug(true).with_max_while_iterations(3);
        assert!(opts.debug);
        assert_eq!(opts.max_while_iterations, 3);
    }
}
