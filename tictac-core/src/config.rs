//! Configuration for the automated opponent

use serde::{Deserialize, Serialize};

/// Search settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Open with a random corner instead of searching the empty board
    pub opening_shortcut: bool,
    /// Memoize solved positions (same moves, less work)
    pub use_cache: bool,
    /// Random seed for reproducibility (None = OS entropy)
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            opening_shortcut: true,
            use_cache: false,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Always run the full search, even on the empty board
    pub fn exhaustive(mut self) -> Self {
        self.opening_shortcut = false;
        self
    }

    /// Use the transposition-table solver
    pub fn cached(mut self) -> Self {
        self.use_cache = true;
        self
    }
}
