use log::{debug, info};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{ModuleScanner, Node, SequenceBuilder, WalkerConfig};
use crate::loaders::{LoadError, LoadedModule, ModuleLoader};

/// The only failure that aborts a walk: the target itself could not be
/// loaded.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("could not load target module {}", path.display())]
    TargetUnavailable {
        path: PathBuf,
        #[source]
        source: LoadError,
    },
}

/// A reference waiting on the work stack.
struct Pending {
    name: String,
    depth: usize,
}

/// Depth-first walker over the lazily discovered reference graph.
///
/// Produces the visited modules in pre-order, siblings in declaration order,
/// each distinct name at most once. Per-module failures are recorded on the
/// node and never stop the walk.
pub struct ReferenceWalker<L> {
    loader: L,
    config: WalkerConfig,
}

impl<L: ModuleLoader> ReferenceWalker<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            config: WalkerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: WalkerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn walk(&self, target: &Path) -> Result<Vec<Node>, WalkError> {
        let root = self
            .loader
            .load_from_path(target)
            .map_err(|source| WalkError::TargetUnavailable {
                path: target.to_path_buf(),
                source,
            })?;
        info!(
            "Loaded target {} ({} direct references)",
            root.identity,
            root.references.len()
        );

        let mut stack = Vec::new();
        push_references(&mut stack, &root.references, 1);

        let mut sequence = SequenceBuilder::new();
        sequence.push(Node::new(root.identity.as_str(), 0));

        let scanner = self.fallback_scanner(target, &root);

        while let Some(Pending { name, depth }) = stack.pop() {
            if sequence.contains(&name) {
                debug!("Skipping already visited {}", name);
                continue;
            }

            match self.resolve(&name, scanner.as_ref()) {
                Ok(module) => {
                    push_references(&mut stack, &module.references, depth + 1);
                    sequence.push(Node::new(name, depth));
                }
                Err(err) => {
                    debug!("{}", err);
                    let status = err.status();
                    sequence.push(Node::new(name, depth).with_status(status));
                }
            }
        }

        info!("Walk finished with {} modules", sequence.len());
        Ok(sequence.build())
    }

    fn resolve(
        &self,
        name: &str,
        scanner: Option<&ModuleScanner>,
    ) -> Result<LoadedModule, LoadError> {
        let err = match self.loader.load_by_name(name) {
            Ok(module) => return Ok(module),
            Err(err) => err,
        };

        if let (LoadError::NotFound(_), Some(scanner)) = (&err, scanner) {
            if let Some(module) = scanner.locate(name, &self.loader) {
                return Ok(module);
            }
        }
        Err(err)
    }

    fn fallback_scanner(&self, target: &Path, root: &LoadedModule) -> Option<ModuleScanner> {
        if !self.config.fallback_search {
            return None;
        }
        let location = root.location.as_deref().unwrap_or(target);
        let dir = location.parent()?;
        let dir = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        };
        Some(ModuleScanner::new(dir, self.config.fallback_max_depth))
    }
}

/// Pushes in reverse so that the stack pops in declaration order.
fn push_references(stack: &mut Vec<Pending>, references: &[String], depth: usize) {
    for name in references.iter().rev() {
        debug!("Queueing {} at depth {}", name, depth);
        stack.push(Pending {
            name: name.clone(),
            depth,
        });
    }
}
