use std::path::{Component, Path, PathBuf};

/// Whether `path` lies inside `root`.
///
/// Both paths are expected to be canonical. The comparison is component-wise,
/// so `/srv/app2/x.py` is not under `/srv/app`.
pub fn is_under_root(path: &Path, root: &Path) -> bool {
    path.starts_with(root)
}

/// Label used for a file in listings and artifact headers: the path relative
/// to `root`, or a `../`-style path when the file sits outside it.
pub fn relative_label(path: &Path, root: &Path) -> String {
    if let Ok(rel) = path.strip_prefix(root) {
        return rel.to_string_lossy().to_string();
    }
    match make_relative(path, root) {
        Some(rel) => rel.to_string_lossy().to_string(),
        None => path.to_string_lossy().to_string(),
    }
}

/// Create a relative path from `base` to `target`
pub fn make_relative(target: &Path, base: &Path) -> Option<PathBuf> {
    let mut target_components = target.components();
    let mut base_components = base.components();

    let mut common_prefix_len = 0;
    let mut target_parts = Vec::new();
    let mut base_parts = Vec::new();

    loop {
        match (target_components.next(), base_components.next()) {
            (Some(t), Some(b)) if t == b => {
                common_prefix_len += 1;
            }
            (Some(t), Some(b)) => {
                target_parts.push(t);
                base_parts.push(b);
                break;
            }
            (Some(t), None) => {
                target_parts.push(t);
                break;
            }
            (None, Some(b)) => {
                // target is an ancestor of base
                base_parts.push(b);
                break;
            }
            (None, None) => {
                return Some(PathBuf::from("."));
            }
        }
    }

    target_parts.extend(target_components);
    base_parts.extend(base_components);

    if common_prefix_len == 0 {
        let target_root = target.components().next();
        let base_root = base.components().next();

        if target_root != base_root {
            return None;
        }
    }

    let mut result = PathBuf::new();
    for _ in &base_parts {
        result.push("..");
    }
    for component in target_parts {
        match component {
            Component::Normal(p) => result.push(p),
            Component::CurDir => {}
            Component::ParentDir => result.push(".."),
            Component::RootDir | Component::Prefix(_) => {}
        }
    }

    if result.as_os_str().is_empty() { Some(PathBuf::from(".")) } else { Some(result) }
}
