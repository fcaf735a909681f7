use asmdeps::core::{ReferenceWalker, ResolutionStatus, WalkerConfig};
use asmdeps::loaders::{InMemoryLoader, LoadError};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::path::Path;
use std::sync::Mutex;

/// Keeps the level of every record logged in this test binary.
struct LevelRecorder {
    levels: Mutex<Vec<Level>>,
}

impl Log for LevelRecorder {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.levels.lock().unwrap().push(record.level());
    }

    fn flush(&self) {}
}

static RECORDER: LevelRecorder = LevelRecorder {
    levels: Mutex::new(Vec::new()),
};

#[test]
fn per_module_failures_stay_below_warn() {
    log::set_logger(&RECORDER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let loader = InMemoryLoader::new()
        .with_path("/virtual/root.dll", "root")
        .with_module("root", &["missing", "locked"])
        .with_failure("locked", LoadError::NoPermission("locked".to_string()));

    let nodes = ReferenceWalker::new(loader)
        .with_config(WalkerConfig::default().with_fallback_search(false))
        .walk(Path::new("/virtual/root.dll"))
        .unwrap();
    assert_eq!(nodes[1].status, ResolutionStatus::NotFound);
    assert_eq!(nodes[2].status, ResolutionStatus::NoPermission);

    let levels = RECORDER.levels.lock().unwrap();
    assert!(!levels.is_empty());
    assert!(levels.iter().all(|level| *level > Level::Warn));
}
