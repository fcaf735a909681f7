use asmdeps::core::{ReferenceWalker, ResolutionStatus, WalkError};
use asmdeps::loaders::{LoadError, ModuleLoader, NativeLoader};
use std::fs;

fn isolated(dir: &std::path::Path) -> NativeLoader {
    NativeLoader::new().without_system_dirs().with_search_dir(dir)
}

#[test]
fn blank_names_are_null_references() {
    let loader = NativeLoader::new().without_system_dirs();
    assert_eq!(loader.load_by_name(""), Err(LoadError::NullReference));
    assert_eq!(loader.load_by_name("   "), Err(LoadError::NullReference));
    assert_eq!(loader.load_by_name("lib\0x.so"), Err(LoadError::NullReference));
}

#[test]
fn unknown_names_are_not_found() {
    let dir = tempfile::TempDir::new().unwrap();
    let loader = isolated(dir.path());
    assert_eq!(
        loader.load_by_name("libnowhere.so.9"),
        Err(LoadError::NotFound("libnowhere.so.9".to_string()))
    );
}

#[test]
fn garbage_file_is_a_corrupt_image() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("libbad.so"), b"this is not an object file").unwrap();

    let loader = isolated(dir.path());
    let err = loader.load_by_name("libbad.so").unwrap_err();
    assert_eq!(err.status(), ResolutionStatus::CorruptImage);
}

#[test]
fn search_directories_keep_insertion_order() {
    let first = tempfile::TempDir::new().unwrap();
    let second = tempfile::TempDir::new().unwrap();
    let loader = NativeLoader::new()
        .without_system_dirs()
        .with_search_dir(first.path())
        .with_search_dir(second.path());

    let dirs: Vec<_> = loader.search_dirs().collect();
    assert_eq!(dirs, vec![first.path(), second.path()]);
}

#[test]
fn running_test_binary_loads() {
    let exe = std::env::current_exe().unwrap();
    let module = NativeLoader::new().load_from_path(&exe).unwrap();

    assert!(!module.identity.is_empty());
    assert_eq!(module.location.as_deref(), Some(exe.as_path()));
}

#[test]
fn corrupt_target_is_unavailable() {
    let dir = tempfile::TempDir::new().unwrap();
    let target = dir.path().join("broken.exe");
    fs::write(&target, b"MZ but nothing else of a PE header").unwrap();

    let walker = ReferenceWalker::new(isolated(dir.path()));
    match walker.walk(&target) {
        Err(WalkError::TargetUnavailable { source, .. }) => {
            assert_eq!(source.status(), ResolutionStatus::CorruptImage);
        }
        Ok(nodes) => panic!("expected failure, walked {} modules", nodes.len()),
    }
}
