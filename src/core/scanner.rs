use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::loaders::{LoadedModule, ModuleLoader};

const MODULE_EXTENSIONS: &[&str] = &["dll", "exe", "so", "dylib"];

/// Best-effort lookup of modules below a root directory, used when the
/// loader's own search rules come up empty.
///
/// Files are visited in file name order down to `max_depth` levels and the
/// search stops at the first one whose file name or loaded identity matches.
pub struct ModuleScanner {
    root: PathBuf,
    max_depth: usize,
}

impl ModuleScanner {
    pub fn new(root: impl Into<PathBuf>, max_depth: usize) -> Self {
        Self {
            root: root.into(),
            max_depth,
        }
    }

    /// Lists module-like files under the root.
    pub fn scan_candidates(&self) -> Vec<PathBuf> {
        self.candidates().collect()
    }

    /// Finds a module named `name` below the root and loads it.
    pub fn locate<L: ModuleLoader + ?Sized>(&self, name: &str, loader: &L) -> Option<LoadedModule> {
        for path in self.candidates() {
            let file_matches = path.file_name().and_then(|n| n.to_str()) == Some(name);
            let module = match loader.load_from_path(&path) {
                Ok(module) => module,
                Err(_) => continue,
            };
            if file_matches || module.identity == name {
                debug!("Fallback search found {} at {}", name, path.display());
                return Some(module);
            }
        }
        debug!("Fallback search under {} missed {}", self.root.display(), name);
        None
    }

    fn candidates(&self) -> impl Iterator<Item = PathBuf> {
        WalkDir::new(&self.root)
            .follow_links(false)
            .max_depth(self.max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| is_module_file(path))
    }
}

/// Whether the file name looks like a loadable module, including versioned
/// shared objects such as `libfoo.so.1.2`.
pub fn is_module_file(path: &Path) -> bool {
    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let lower = file_name.to_ascii_lowercase();

    if let Some(extension) = Path::new(&lower).extension().and_then(|e| e.to_str()) {
        if MODULE_EXTENSIONS.contains(&extension) {
            return true;
        }
    }

    match lower.find(".so.") {
        Some(idx) => lower[idx + 4..]
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit())),
        None => false,
    }
}
