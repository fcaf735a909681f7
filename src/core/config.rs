/// Default number of directory levels searched by the fallback lookup.
pub const DEFAULT_FALLBACK_MAX_DEPTH: usize = 8;

/// Tuning knobs for [`crate::core::ReferenceWalker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkerConfig {
    /// Search the target's directory tree for names the loader cannot find.
    pub fallback_search: bool,
    /// Directory levels below the target's directory visited by the fallback.
    pub fallback_max_depth: usize,
}

impl WalkerConfig {
    pub fn new() -> Self {
        Self {
            fallback_search: true,
            fallback_max_depth: DEFAULT_FALLBACK_MAX_DEPTH,
        }
    }

    pub fn with_fallback_search(mut self, enabled: bool) -> Self {
        self.fallback_search = enabled;
        self
    }

    pub fn with_fallback_max_depth(mut self, depth: usize) -> Self {
        self.fallback_max_depth = depth;
        self
    }
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self::new()
    }
}
