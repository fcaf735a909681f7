use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{LoadError, LoadedModule, ModuleLoader};

/// Loader over a declared reference graph held in memory.
///
/// Useful when the graph is already known (tests, benches, embedders that
/// read references from their own metadata).
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoader {
    modules: HashMap<String, Vec<String>>,
    failures: HashMap<String, LoadError>,
    paths: HashMap<PathBuf, String>,
}

impl InMemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a module and its references, in declaration order.
    pub fn with_module(mut self, identity: &str, references: &[&str]) -> Self {
        self.modules.insert(
            identity.to_string(),
            references.iter().map(|r| r.to_string()).collect(),
        );
        self
    }

    /// Makes every lookup of `name` fail with `error`.
    pub fn with_failure(mut self, name: &str, error: LoadError) -> Self {
        self.failures.insert(name.to_string(), error);
        self
    }

    /// Maps a filesystem path onto a declared module.
    pub fn with_path(mut self, path: impl Into<PathBuf>, identity: &str) -> Self {
        self.paths.insert(path.into(), identity.to_string());
        self
    }
}

impl ModuleLoader for InMemoryLoader {
    fn load_from_path(&self, path: &Path) -> Result<LoadedModule, LoadError> {
        let identity = self
            .paths
            .get(path)
            .ok_or_else(|| LoadError::NotFound(path.display().to_string()))?;
        self.load_by_name(identity)
            .map(|module| module.with_location(path.to_path_buf()))
    }

    fn load_by_name(&self, name: &str) -> Result<LoadedModule, LoadError> {
        if name.trim().is_empty() {
            return Err(LoadError::NullReference);
        }
        if let Some(error) = self.failures.get(name) {
            return Err(error.clone());
        }
        self.modules
            .get(name)
            .map(|references| LoadedModule::new(name, references.clone()))
            .ok_or_else(|| LoadError::NotFound(name.to_string()))
    }
}
