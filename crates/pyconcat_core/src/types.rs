/// One import clause as seen by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    /// Dot-separated module path, empty for `from . import x`
    pub module_name: String,
    pub imported_names: Vec<String>,
    /// Number of leading dots (0 = absolute import)
    pub relative_level: usize,
}

impl ImportDeclaration {
    pub fn absolute(module_name: impl Into<String>) -> Self {
        Self { module_name: module_name.into(), imported_names: Vec::new(), relative_level: 0 }
    }
}

/// Syntax nodes the parser cares about, classified by node kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    PlainImport { modules: Vec<String> },
    FromImport { module: String, names: Vec<String>, level: usize },
    Other,
}
