//! Core utilities for pyconcat.
//!
//! This crate provides the building blocks for finding the local modules a
//! Python program depends on:
//! - Parsing import statements from Python files (tree-sitter)
//! - Resolving module names to files inside a project root
//! - Validating the project root and entry files
//! - Path helpers for root containment and relative labels

mod config;
mod constants;
mod error;
mod parser;
mod paths;
mod resolver;
mod types;

// Re-export public API
pub use config::{artifact_name, validate_entries, validate_root};
pub use constants::{
    ARTIFACT_SUFFIX, DELIMITER_WIDTH, PACKAGE_INIT_FILE, SOURCE_EXTENSION, WILDCARD_IMPORT,
};
pub use error::{ConcatError, Result};
pub use parser::{imports_for, parse_imports};
pub use paths::{is_under_root, make_relative, relative_label};
pub use resolver::{ResolveCache, resolve, resolve_declaration};
pub use types::{ImportDeclaration, StatementKind};
