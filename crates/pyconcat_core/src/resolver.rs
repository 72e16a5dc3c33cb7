use dashmap::DashMap;
use log::trace;
use path_clean::clean;
use std::path::{Path, PathBuf};

use crate::{
    constants::{PACKAGE_INIT_FILE, SOURCE_EXTENSION},
    paths::is_under_root,
    types::ImportDeclaration,
};

/// Memoized resolutions keyed by (base directory, module name)
pub type ResolveCache = DashMap<(PathBuf, String), Option<PathBuf>>;

/// Resolve a parsed declaration imported from `from_file`.
pub fn resolve_declaration(
    root: &Path,
    from_file: &Path,
    decl: &ImportDeclaration,
    cache: &ResolveCache,
) -> Option<PathBuf> {
    let current_dir = from_file.parent().unwrap_or(root);
    resolve(root, current_dir, &decl.module_name, decl.relative_level, cache)
}

/// Map a module name to a canonical file under `root`.
///
/// `root` must be canonical. Level 0 resolves from `root`; level 1 from
/// `current_dir`; each further level starts one directory higher. The module
/// file (`a/b.py`) wins over the package (`a/b/__init__.py`). Returns `None`
/// for anything that does not exist or lands outside `root`, which is the
/// normal outcome for stdlib and third-party imports.
pub fn resolve(
    root: &Path,
    current_dir: &Path,
    module_name: &str,
    relative_level: usize,
    cache: &ResolveCache,
) -> Option<PathBuf> {
    let base = base_dir(root, current_dir, relative_level);
    let key = (base.clone(), module_name.to_string());
    if let Some(v) = cache.get(&key) {
        trace!("Cache hit for resolve: '{}' from {}", module_name, base.display());
        return v.clone();
    }
    trace!("Resolving: '{}' (level {}) from {}", module_name, relative_level, base.display());

    let resolved = candidates(&base, module_name)
        .into_iter()
        .find_map(|candidate| resolve_file(&candidate, root));

    match &resolved {
        Some(p) => trace!("Resolved '{}' to {}", module_name, p.display()),
        None => trace!("No local module for '{}'", module_name),
    }
    cache.insert(key, resolved.clone());
    resolved
}

fn base_dir(root: &Path, current_dir: &Path, relative_level: usize) -> PathBuf {
    if relative_level == 0 {
        return root.to_path_buf();
    }
    let mut base = current_dir;
    for _ in 1..relative_level {
        // Above the filesystem root there is nothing left to climb
        match base.parent() {
            Some(parent) => base = parent,
            None => break,
        }
    }
    base.to_path_buf()
}

/// File candidate first, then package candidate. An empty module name
/// denotes the base directory itself, which only has a package form.
fn candidates(base: &Path, module_name: &str) -> Vec<PathBuf> {
    let segments: Vec<&str> = module_name.split('.').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        return vec![base.join(PACKAGE_INIT_FILE)];
    }

    let module_dir = segments.iter().fold(base.to_path_buf(), |acc, seg| acc.join(seg));
    let file = module_dir.with_extension(SOURCE_EXTENSION);
    let package = module_dir.join(PACKAGE_INIT_FILE);
    vec![clean(file), clean(package)]
}

fn resolve_file(candidate: &Path, root: &Path) -> Option<PathBuf> {
    if !candidate.is_file() {
        return None;
    }
    let canonical = candidate.canonicalize().ok()?;
    if !is_under_root(&canonical, root) {
        trace!("Ignoring {} outside project root", canonical.display());
        return None;
    }
    Some(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path.canonicalize().unwrap()
    }

    fn canonical_root(temp_dir: &TempDir) -> PathBuf {
        temp_dir.path().canonicalize().unwrap()
    }

    #[test]
    fn test_resolve_module_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = canonical_root(&temp_dir);
        let util = create_test_file(&root, "pkg/util.py", "");
        let cache = ResolveCache::new();

        assert_eq!(resolve(&root, &root, "pkg.util", 0, &cache), Some(util));
    }

    #[test]
    fn test_resolve_package_init() {
        let temp_dir = TempDir::new().unwrap();
        let root = canonical_root(&temp_dir);
        let init = create_test_file(&root, "pkg/__init__.py", "");
        let cache = ResolveCache::new();

        assert_eq!(resolve(&root, &root, "pkg", 0, &cache), Some(init));
    }

    #[test]
    fn test_file_candidate_wins_over_package() {
        let temp_dir = TempDir::new().unwrap();
        let root = canonical_root(&temp_dir);
        let file = create_test_file(&root, "pkg/mod.py", "");
        create_test_file(&root, "pkg/mod/__init__.py", "");
        let cache = ResolveCache::new();

        assert_eq!(resolve(&root, &root, "pkg.mod", 0, &cache), Some(file));
    }

    #[test]
    fn test_stdlib_name_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let root = canonical_root(&temp_dir);
        let cache = ResolveCache::new();

        assert_eq!(resolve(&root, &root, "os", 0, &cache), None);
        assert_eq!(resolve(&root, &root, "os.path", 0, &cache), None);
    }

    #[test]
    fn test_directory_without_init_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let root = canonical_root(&temp_dir);
        create_test_file(&root, "ns/mod.py", "");
        let cache = ResolveCache::new();

        assert_eq!(resolve(&root, &root, "ns", 0, &cache), None);
    }

    #[test]
    fn test_relative_level_one_is_current_dir() {
        let temp_dir = TempDir::new().unwrap();
        let root = canonical_root(&temp_dir);
        let sibling = create_test_file(&root, "app/sibling.py", "");
        let cache = ResolveCache::new();

        let current_dir = root.join("app");
        assert_eq!(resolve(&root, &current_dir, "sibling", 1, &cache), Some(sibling));
        // level 0 starts from root, where there is no sibling.py
        assert_eq!(resolve(&root, &current_dir, "sibling", 0, &cache), None);
    }

    #[test]
    fn test_relative_level_two_is_parent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let root = canonical_root(&temp_dir);
        let shared = create_test_file(&root, "app/shared.py", "");
        let cache = ResolveCache::new();

        let current_dir = root.join("app").join("sub");
        assert_eq!(resolve(&root, &current_dir, "shared", 2, &cache), Some(shared));
    }

    #[test]
    fn test_empty_module_resolves_package_of_base() {
        let temp_dir = TempDir::new().unwrap();
        let root = canonical_root(&temp_dir);
        let init = create_test_file(&root, "app/__init__.py", "");
        let cache = ResolveCache::new();

        assert_eq!(resolve(&root, &root.join("app"), "", 1, &cache), Some(init));
    }

    #[test]
    fn test_empty_module_without_init_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let root = canonical_root(&temp_dir);
        create_test_file(&root, "app.py", "");
        let cache = ResolveCache::new();

        // zero segments never yields a `<base>.py` candidate
        assert_eq!(resolve(&root, &root.join("app"), "", 1, &cache), None);
    }

    #[test]
    fn test_relative_import_escaping_root_is_discarded() {
        let temp_dir = TempDir::new().unwrap();
        let outer = canonical_root(&temp_dir);
        create_test_file(&outer, "secret.py", "");
        let root = outer.join("project");
        fs::create_dir_all(&root).unwrap();
        let cache = ResolveCache::new();

        // from ..secret import x, written in project/main.py
        assert_eq!(resolve(&root, &root, "secret", 2, &cache), None);
    }

    #[test]
    fn test_sibling_directory_with_shared_prefix_is_outside() {
        let temp_dir = TempDir::new().unwrap();
        let outer = canonical_root(&temp_dir);
        create_test_file(&outer, "app2/evil.py", "");
        let root = outer.join("app");
        fs::create_dir_all(&root).unwrap();
        let cache = ResolveCache::new();

        assert_eq!(resolve(&root, &root, "app2.evil", 2, &cache), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_pointing_outside_root_is_discarded() {
        let temp_dir = TempDir::new().unwrap();
        let outer = canonical_root(&temp_dir);
        let target = create_test_file(&outer, "elsewhere/real.py", "");
        let root = outer.join("project");
        fs::create_dir_all(&root).unwrap();
        std::os::unix::fs::symlink(&target, root.join("linked.py")).unwrap();
        let cache = ResolveCache::new();

        assert_eq!(resolve(&root, &root, "linked", 0, &cache), None);
    }

    #[test]
    fn test_resolve_declaration_uses_file_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = canonical_root(&temp_dir);
        let main = create_test_file(&root, "app/main.py", "");
        let helper = create_test_file(&root, "app/helper.py", "");
        let cache = ResolveCache::new();

        let decl = ImportDeclaration {
            module_name: "helper".to_string(),
            imported_names: vec!["helper".to_string()],
            relative_level: 1,
        };
        assert_eq!(resolve_declaration(&root, &main, &decl, &cache), Some(helper));
    }

    #[test]
    fn test_resolve_cache_populated() {
        let temp_dir = TempDir::new().unwrap();
        let root = canonical_root(&temp_dir);
        create_test_file(&root, "pkg/util.py", "");
        let cache = ResolveCache::new();

        let first = resolve(&root, &root, "pkg.util", 0, &cache);
        let second = resolve(&root, &root, "pkg.util", 0, &cache);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);

        resolve(&root, &root, "json", 0, &cache);
        assert_eq!(cache.len(), 2);
    }
}
