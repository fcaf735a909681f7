pub mod config;
pub mod graph;
pub mod scanner;
pub mod walker;

pub use config::WalkerConfig;
pub use graph::{Node, ResolutionStatus, SequenceBuilder};
pub use scanner::ModuleScanner;
pub use walker::{ReferenceWalker, WalkError};
