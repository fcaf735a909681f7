//! # ASMDEPS
//!
//! Transitive module reference reporting for binary modules.
//!
//! ASMDEPS loads a target module, walks every module it references (and
//! every module those reference, and so on) and reports the result as an
//! indented tree and as a nested XML document.
//!
//! ## Walk
//!
//! The reference graph is discovered lazily, one module at a time, through a
//! [`loaders::ModuleLoader`]. The walk is depth-first, keeps declaration order
//! among siblings, visits each distinct name once, and records per-module
//! failures (`NullReference`, `NotFound`, `CorruptImage`, `NoPermission`)
//! instead of stopping.
//!
//! ## Output Formats
//!
//! - **Text tree**: two spaces of indentation per level, a module count and
//!   one diagnostic line per failed module
//! - **XML**: `Assemblies` root with nested `Assembly` elements

pub mod core;
pub mod formatters;
pub mod loaders;
