//! File names and formatting constants shared by the resolver and emitter.

/// Extension of importable source files
pub const SOURCE_EXTENSION: &str = "py";

/// Marker file that makes a directory an importable package
pub const PACKAGE_INIT_FILE: &str = "__init__.py";

/// Name used by `from x import *`
pub const WILDCARD_IMPORT: &str = "*";

/// Width of the `=` delimiter line around each artifact section
pub const DELIMITER_WIDTH: usize = 80;

/// Suffix appended to the project root's name to form the artifact file name
pub const ARTIFACT_SUFFIX: &str = "_concatenated.txt";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_init_uses_source_extension() {
        assert!(PACKAGE_INIT_FILE.ends_with(&format!(".{}", SOURCE_EXTENSION)));
    }
}
