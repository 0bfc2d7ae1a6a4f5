// Application state module
// Immutable per-process configuration plus the shared resolution cache

use std::path::PathBuf;

use super::types::Config;
use crate::resolve::ResolveCache;

/// Shared application state, one instance per server process.
///
/// The cache is constructed here and injected into every request task
/// rather than living in a global, so tests can run independent instances
/// side by side.
pub struct AppState {
    pub config: Config,
    /// Canonical absolute document root; every resolution is anchored here
    pub root: PathBuf,
    pub cache: ResolveCache,
}

impl AppState {
    pub fn new(config: Config, root: PathBuf) -> Self {
        let cache = ResolveCache::new(config.cache.capacity);
        Self {
            config,
            root,
            cache,
        }
    }
}
