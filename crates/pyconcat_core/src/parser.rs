use log::{debug, trace};
use std::{fs, path::Path};
use tree_sitter::{Node, Parser as TSParser, Tree};

use crate::{
    constants::WILDCARD_IMPORT,
    error::{ConcatError, Result},
    types::{ImportDeclaration, StatementKind},
};

/// Read `file` and return its import declarations in source order.
pub fn imports_for(file: &Path) -> Result<Vec<ImportDeclaration>> {
    trace!("Parsing file for imports: {}", file.display());
    let bytes =
        fs::read(file).map_err(|source| ConcatError::Read { path: file.to_path_buf(), source })?;
    let src = String::from_utf8(bytes)
        .map_err(|_| ConcatError::Decode { path: file.to_path_buf() })?;

    let decls = parse_imports(&src, file)?;
    debug!("Found {} import declarations in {}", decls.len(), file.display());
    Ok(decls)
}

/// Parse Python source text and extract every import declaration, including
/// imports nested in functions, classes and conditional blocks.
///
/// A from-import yields one declaration per imported name (`pkg.name`) plus
/// one for the base module, since either may be the file on disk.
pub fn parse_imports(src: &str, file: &Path) -> Result<Vec<ImportDeclaration>> {
    let tree = parse_tree(src, file)?;
    let root = tree.root_node();
    if root.has_error() {
        let line = first_error_line(root).unwrap_or(0);
        return Err(ConcatError::Parse { path: file.to_path_buf(), line });
    }

    let mut decls = Vec::new();
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        let kind = classify(node, src);
        let is_import = !matches!(kind, StatementKind::Other);
        if is_import {
            trace!("Found import at line {} in {}", node.start_position().row + 1, file.display());
            push_declarations(kind, &mut decls);
        }

        if !is_import && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return Ok(decls);
            }
        }
    }
}

fn parse_tree(src: &str, file: &Path) -> Result<Tree> {
    let mut parser = TSParser::new();
    parser
        .set_language(&tree_sitter_python::language())
        .map_err(|e| ConcatError::Grammar(e.to_string()))?;
    parser.parse(src, None).ok_or_else(|| ConcatError::Parse { path: file.to_path_buf(), line: 0 })
}

/// 1-based line of the first error or missing node
fn first_error_line(node: Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error()
            && let Some(line) = first_error_line(child)
        {
            return Some(line);
        }
    }
    None
}

pub(crate) fn classify(node: Node, src: &str) -> StatementKind {
    match node.kind() {
        "import_statement" => {
            let mut cursor = node.walk();
            let modules = node
                .children_by_field_name("name", &mut cursor)
                .filter_map(|n| imported_name(n, src))
                .collect();
            StatementKind::PlainImport { modules }
        }
        "import_from_statement" => {
            let (module, level) = match node.child_by_field_name("module_name") {
                Some(m) if m.kind() == "relative_import" => relative_module(m, src),
                Some(m) => (dotted_text(m, src), 0),
                None => (String::new(), 0),
            };
            StatementKind::FromImport { module, names: from_import_names(node, src), level }
        }
        "future_import_statement" => StatementKind::FromImport {
            module: "__future__".to_string(),
            names: from_import_names(node, src),
            level: 0,
        },
        _ => StatementKind::Other,
    }
}

fn push_declarations(kind: StatementKind, decls: &mut Vec<ImportDeclaration>) {
    match kind {
        StatementKind::PlainImport { modules } => {
            decls.extend(modules.into_iter().map(ImportDeclaration::absolute));
        }
        StatementKind::FromImport { module, names, level } => {
            for name in names.iter().filter(|n| n.as_str() != WILDCARD_IMPORT) {
                let full = if module.is_empty() {
                    name.clone()
                } else {
                    format!("{}.{}", module, name)
                };
                decls.push(ImportDeclaration {
                    module_name: full,
                    imported_names: vec![name.clone()],
                    relative_level: level,
                });
            }
            decls.push(ImportDeclaration {
                module_name: module,
                imported_names: names,
                relative_level: level,
            });
        }
        StatementKind::Other => {}
    }
}

fn from_import_names(node: Node, src: &str) -> Vec<String> {
    let mut cursor = node.walk();
    let mut names: Vec<String> = node
        .children_by_field_name("name", &mut cursor)
        .filter_map(|n| imported_name(n, src))
        .collect();

    let mut cursor = node.walk();
    if node.children(&mut cursor).any(|c| c.kind() == "wildcard_import") {
        names.push(WILDCARD_IMPORT.to_string());
    }
    names
}

/// Name bound by an import clause, ignoring any `as` alias
fn imported_name(node: Node, src: &str) -> Option<String> {
    match node.kind() {
        "aliased_import" => node.child_by_field_name("name").map(|n| dotted_text(n, src)),
        "dotted_name" | "identifier" => Some(dotted_text(node, src)),
        _ => None,
    }
}

/// `from ..pkg.mod import x` -> ("pkg.mod", 2)
fn relative_module(node: Node, src: &str) -> (String, usize) {
    let mut level = 0;
    let mut module = String::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "import_prefix" => level = text(child, src).chars().filter(|c| *c == '.').count(),
            "dotted_name" => module = dotted_text(child, src),
            _ => {}
        }
    }
    (module, level)
}

// Python allows `a . b`; rebuild the name from its identifiers.
fn dotted_text(node: Node, src: &str) -> String {
    if node.kind() != "dotted_name" {
        return text(node, src).to_string();
    }
    let mut cursor = node.walk();
    node.named_children(&mut cursor).map(|n| text(n, src)).collect::<Vec<_>>().join(".")
}

fn text<'a>(node: Node, src: &'a str) -> &'a str {
    node.utf8_text(src.as_bytes()).unwrap_or_default()
}
