//! Mapping between logical adapter paths and absolute MFS paths.

/// Strip the leading and trailing separators from a configured root.
pub fn normalize_root(root: &str) -> String {
    root.trim_matches('/').to_string()
}

/// Resolves logical paths against the configured MFS root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathResolver {
    root: String,
}

impl PathResolver {
    pub fn new(root: &str) -> Self {
        Self {
            root: normalize_root(root),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Absolute MFS path of the root directory itself.
    pub fn root_path(&self) -> String {
        self.resolve("")
    }

    /// Prefix `path` with the root, producing the node's absolute MFS path.
    ///
    /// Exactly one separator is placed between components; an empty logical
    /// path resolves to the root.
    pub fn resolve(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');

        match (self.root.is_empty(), path.is_empty()) {
            (true, true) => "/".to_string(),
            (true, false) => format!("/{path}"),
            (false, true) => format!("/{}", self.root),
            (false, false) => format!("/{}/{path}", self.root),
        }
    }
}

/// Logical parent directory of `path`; empty for top-level names.
pub fn parent(path: &str) -> &str {
    let path = path.trim_end_matches('/');
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Final component of `path`.
pub fn basename(path: &str) -> &str {
    let path = path.trim_end_matches('/');
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Logical path of `name` inside `dir`, as used when re-stating listing
/// entries. The directory is kept as the caller spelled it.
pub fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{name}", dir.trim_end_matches('/'))
    }
}
