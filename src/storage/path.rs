//! Path handling for the simulated filesystem.
//!
//! Paths are plain strings using `/` as separator. A normalized path is absolute, has no empty,
//! `.` or `..` segments and no trailing separator (except for the root itself).

/// The root directory.
pub const ROOT: &str = "/";

/// Normalizes `path`, interpreting relative paths against the root.
///
/// `..` never climbs above the root.
pub fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = vec![];
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    format!("/{}", segments.join("/"))
}

/// Resolves `path` against the directory `base`. Absolute paths ignore `base`.
pub fn join(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        normalize(path)
    } else {
        normalize(&format!("{}/{}", base, path))
    }
}

/// Returns the parent of a normalized path, or `None` for the root.
pub fn parent(path: &str) -> Option<String> {
    if path == ROOT {
        return None;
    }
    match path.rfind('/') {
        Some(0) => Some(ROOT.to_string()),
        Some(idx) => Some(path[..idx].to_string()),
        None => None,
    }
}

/// Returns the last segment of a normalized path. The root's name is `/`.
pub fn name(path: &str) -> &str {
    if path == ROOT {
        return ROOT;
    }
    path.rsplit('/').next().unwrap_or(path)
}

/// Returns true if `path` equals `ancestor` or lies below it.
pub fn is_within(path: &str, ancestor: &str) -> bool {
    if ancestor == ROOT {
        return true;
    }
    path == ancestor || path.strip_prefix(ancestor).is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalize_collapses_segments() {
        assert_eq!(normalize("/a//b/./c/"), "/a/b/c");
        assert_eq!(normalize("/a/b/../c"), "/a/c");
        assert_eq!(normalize("/../.."), "/");
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("x/y"), "/x/y");
    }

    #[test]
    fn join_relative_and_absolute() {
        assert_eq!(join("/home/alice", "docs"), "/home/alice/docs");
        assert_eq!(join("/home/alice", "../bob"), "/home/bob");
        assert_eq!(join("/home/alice", "/etc"), "/etc");
        assert_eq!(join("/", "file name.txt"), "/file name.txt");
    }

    #[test]
    fn parent_and_name() {
        assert_eq!(parent("/"), None);
        assert_eq!(parent("/a"), Some("/".to_string()));
        assert_eq!(parent("/a/b"), Some("/a".to_string()));
        assert_eq!(name("/a/b.txt"), "b.txt");
        assert_eq!(name("/"), "/");
    }

    #[test]
    fn within() {
        assert!(is_within("/a/b", "/a"));
        assert!(is_within("/a", "/a"));
        assert!(!is_within("/ab", "/a"));
        assert!(is_within("/anything", "/"));
    }
}
