//! Solver configuration.
//!
//! Provides typed configuration for the search driver with a bon builder and
//! environment variable fallbacks.

use bon::bon;

/// Default depth bound for the search.
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Configuration for the transform search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Maximum number of transforms on any path from the root.
    pub max_depth: usize,
    /// Stop expanding once this many nodes have been created. `None` means unbounded.
    pub max_nodes: Option<usize>,
    /// Stop expanding once a terminal leaf exists.
    pub first_match: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH, max_nodes: None, first_match: false }
    }
}

#[bon]
impl SolverConfig {
    /// Create a solver configuration with builder pattern.
    #[builder(finish_fn = build)]
    pub fn builder(
        #[builder(default = DEFAULT_MAX_DEPTH)] max_depth: usize,
        max_nodes: Option<usize>,
        #[builder(default = false)] first_match: bool,
    ) -> Self {
        Self { max_depth, max_nodes, first_match }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `RESTRUCT_MAX_DEPTH` - Depth bound (default: 4)
    /// * `RESTRUCT_MAX_NODES` - Node budget, unbounded if unset or 0
    /// * `RESTRUCT_FIRST_MATCH` - Stop at the first terminal leaf if set
    pub fn from_env() -> Self {
        let max_depth =
            std::env::var("RESTRUCT_MAX_DEPTH").ok().and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_MAX_DEPTH);
        let max_nodes = std::env::var("RESTRUCT_MAX_NODES").ok().and_then(|s| s.parse().ok()).filter(|n| *n > 0);
        let first_match = std::env::var("RESTRUCT_FIRST_MATCH").is_ok();

        Self { max_depth, max_nodes, first_match }
    }

    /// Replace the depth bound, keeping everything else.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
