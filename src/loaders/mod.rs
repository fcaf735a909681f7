pub mod memory;
pub mod native;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::ResolutionStatus;

pub use memory::InMemoryLoader;
pub use native::NativeLoader;

/// A successfully loaded module and the names it declares as references,
/// in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedModule {
    pub identity: String,
    pub references: Vec<String>,
    pub location: Option<PathBuf>,
}

impl LoadedModule {
    pub fn new(identity: impl Into<String>, references: Vec<String>) -> Self {
        Self {
            identity: identity.into(),
            references,
            location: None,
        }
    }

    pub fn with_location(mut self, location: PathBuf) -> Self {
        self.location = Some(location);
        self
    }
}

/// Why a module could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("module reference has no usable name")]
    NullReference,
    #[error("module '{0}' was not found on the search path")]
    NotFound(String),
    #[error("module '{name}' is not a loadable image: {reason}")]
    CorruptImage { name: String, reason: String },
    #[error("permission denied while loading '{0}'")]
    NoPermission(String),
}

impl LoadError {
    pub fn status(&self) -> ResolutionStatus {
        match self {
            LoadError::NullReference => ResolutionStatus::NullReference,
            LoadError::NotFound(_) => ResolutionStatus::NotFound,
            LoadError::CorruptImage { .. } => ResolutionStatus::CorruptImage,
            LoadError::NoPermission(_) => ResolutionStatus::NoPermission,
        }
    }
}

/// The environment capability that turns paths and reference names into
/// loaded modules.
pub trait ModuleLoader {
    fn load_from_path(&self, path: &Path) -> Result<LoadedModule, LoadError>;
    fn load_by_name(&self, name: &str) -> Result<LoadedModule, LoadError>;
}

impl<L: ModuleLoader + ?Sized> ModuleLoader for &L {
    fn load_from_path(&self, path: &Path) -> Result<LoadedModule, LoadError> {
        (**self).load_from_path(path)
    }

    fn load_by_name(&self, name: &str) -> Result<LoadedModule, LoadError> {
        (**self).load_by_name(name)
    }
}
