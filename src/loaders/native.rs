use goblin::mach::Mach;
use goblin::Object;
use log::{debug, trace};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{LoadError, LoadedModule, ModuleLoader};

/// Extra search directories, in platform path-list syntax.
pub const SEARCH_PATH_ENV: &str = "ASMDEPS_PATH";

const LIBRARY_PATH_ENV: &str = "LD_LIBRARY_PATH";

const SYSTEM_SEARCH_DIRS: &[&str] = &[
    "/lib",
    "/lib64",
    "/usr/lib",
    "/usr/lib64",
    "/usr/local/lib",
    "/lib/x86_64-linux-gnu",
    "/usr/lib/x86_64-linux-gnu",
];

// Mach-O install names relative to the loading image
const LOADER_PREFIXES: &[&str] = &["@rpath/", "@loader_path/", "@executable_path/"];

/// Loader for native binary modules (ELF, PE, Mach-O).
///
/// References come straight from the import tables: `DT_NEEDED` entries,
/// imported DLL names, or dylib load commands. Names are resolved by probing
/// the search directories in order.
#[derive(Debug, Clone)]
pub struct NativeLoader {
    search_dirs: Vec<PathBuf>,
    system_dirs: Vec<PathBuf>,
}

impl NativeLoader {
    /// Creates a loader searching `ASMDEPS_PATH`, `LD_LIBRARY_PATH` and the
    /// system library directories.
    pub fn new() -> Self {
        let mut system_dirs = Vec::new();
        for var in [SEARCH_PATH_ENV, LIBRARY_PATH_ENV] {
            if let Some(value) = env::var_os(var) {
                system_dirs.extend(
                    env::split_paths(&value).filter(|dir| !dir.as_os_str().is_empty()),
                );
            }
        }
        system_dirs.extend(SYSTEM_SEARCH_DIRS.iter().map(PathBuf::from));

        Self {
            search_dirs: Vec::new(),
            system_dirs,
        }
    }

    /// Adds a directory probed before the environment and system directories.
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    /// Restricts lookups to directories added with [`Self::with_search_dir`].
    pub fn without_system_dirs(mut self) -> Self {
        self.system_dirs.clear();
        self
    }

    pub fn search_dirs(&self) -> impl Iterator<Item = &Path> {
        self.search_dirs
            .iter()
            .chain(self.system_dirs.iter())
            .map(PathBuf::as_path)
    }
}

impl Default for NativeLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleLoader for NativeLoader {
    fn load_from_path(&self, path: &Path) -> Result<LoadedModule, LoadError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let bytes = fs::read(path).map_err(|err| classify_io_error(err, path))?;
        let (identity, references) =
            parse_image(&bytes).map_err(|reason| LoadError::CorruptImage {
                name: file_name.clone(),
                reason,
            })?;

        trace!(
            "Parsed {} with {} references",
            path.display(),
            references.len()
        );
        Ok(
            LoadedModule::new(identity.unwrap_or(file_name), references)
                .with_location(path.to_path_buf()),
        )
    }

    fn load_by_name(&self, name: &str) -> Result<LoadedModule, LoadError> {
        if name.trim().is_empty() || name.contains('\0') {
            return Err(LoadError::NullReference);
        }

        let direct = Path::new(name);
        if direct.is_absolute() {
            return self.load_from_path(direct);
        }

        let relative = strip_loader_prefix(name);
        for dir in self.search_dirs() {
            let candidate = dir.join(relative);
            if candidate.is_file() {
                debug!("Resolved {} to {}", name, candidate.display());
                return self.load_from_path(&candidate);
            }
        }

        Err(LoadError::NotFound(name.to_string()))
    }
}

fn strip_loader_prefix(name: &str) -> &str {
    LOADER_PREFIXES
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix))
        .unwrap_or(name)
}

fn classify_io_error(err: io::Error, path: &Path) -> LoadError {
    let name = path.display().to_string();
    match err.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(name),
        io::ErrorKind::PermissionDenied => LoadError::NoPermission(name),
        _ => LoadError::CorruptImage {
            name,
            reason: err.to_string(),
        },
    }
}

/// Returns the image's own name (if it records one) and its imported module
/// names in declaration order.
fn parse_image(bytes: &[u8]) -> Result<(Option<String>, Vec<String>), String> {
    let object = Object::parse(bytes).map_err(|err| err.to_string())?;
    match object {
        Object::Elf(elf) => Ok((elf.soname.map(str::to_string), to_owned(&elf.libraries))),
        Object::PE(pe) => Ok((pe.name.map(str::to_string), to_owned(&pe.libraries))),
        Object::Mach(Mach::Binary(macho)) => {
            let libs: Vec<&str> = macho
                .libs
                .iter()
                .copied()
                .filter(|lib| *lib != "self")
                .collect();
            Ok((macho.name.map(str::to_string), to_owned(&libs)))
        }
        Object::Mach(Mach::Fat(_)) => Err("fat Mach-O binaries are not supported".to_string()),
        Object::Archive(_) => Err("static archives are not loadable modules".to_string()),
        Object::Unknown(magic) => Err(format!("unknown magic {magic:#x}")),
        _ => Err("unsupported object format".to_string()),
    }
}

fn to_owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}
