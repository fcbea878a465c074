//! Path arithmetic for the mock store.
//!
//! Paths are absolute, slash-delimited logical locations ("/Docs/a.txt").
//! They double as store keys for directories, so every mutation that
//! touches a path goes through these helpers instead of ad-hoc string
//! surgery.

/// The root path.
pub const ROOT_PATH: &str = "/";

/// Normalize a path: trim whitespace, ensure a leading slash, strip the
/// trailing slash (except for the root itself). An empty path is the root.
pub fn normalize(path: &str) -> String {
    let path = path.trim();
    if path.is_empty() || path == ROOT_PATH {
        return ROOT_PATH.to_string();
    }
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        ROOT_PATH.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parent path of a node ("/" for top-level nodes and for the root itself).
pub fn parent(path: &str) -> String {
    let path = normalize(path);
    match path.rfind('/') {
        Some(0) | None => ROOT_PATH.to_string(),
        Some(idx) => path[..idx].to_string(),
    }
}

/// Last path segment ("report.txt" for "/Docs/report.txt").
pub fn basename(path: &str) -> String {
    let path = normalize(path);
    path.rsplit('/').next().unwrap_or_default().to_string()
}

/// Join a child name onto a parent path.
pub fn join(parent: &str, name: &str) -> String {
    if parent == ROOT_PATH {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}

/// Whether `path` is `root` itself or lies beneath it.
///
/// Checks the separator explicitly, so sibling names sharing a prefix
/// ("/Doc" vs "/Docs") never match each other.
pub fn is_under(root: &str, path: &str) -> bool {
    if root == ROOT_PATH {
        return true;
    }
    path == root || path.strip_prefix(root).is_some_and(|rest| rest.starts_with('/'))
}

/// Resolve a shell-style target against the current directory.
///
/// Absolute targets are normalized as-is; relative targets are applied
/// segment by segment, with ".." popping one level and "." ignored.
pub fn resolve(current: &str, target: &str) -> String {
    if target.starts_with('/') {
        return normalize(target);
    }

    let mut segments: Vec<&str> = current.split('/').filter(|s| !s.is_empty()).collect();
    for part in target.split('/') {
        match part {
            ".." => {
                segments.pop();
            }
            "." | "" => {}
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        ROOT_PATH.to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("Docs"), "/Docs");
        assert_eq!(normalize("/Docs/"), "/Docs");
        assert_eq!(normalize("  /Docs/Test  "), "/Docs/Test");
    }

    #[test]
    fn test_parent() {
        assert_eq!(parent("/"), "/");
        assert_eq!(parent("/report.txt"), "/");
        assert_eq!(parent("/Docs/Test"), "/Docs");
        assert_eq!(parent("/Docs/Test/subtest.txt"), "/Docs/Test");
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("/report.txt"), "report.txt");
        assert_eq!(basename("/Docs/Test"), "Test");
    }

    #[test]
    fn test_join() {
        assert_eq!(join("/", "Docs"), "/Docs");
        assert_eq!(join("/Docs", "Test"), "/Docs/Test");
    }

    #[test]
    fn test_is_under_checks_separator() {
        assert!(is_under("/public", "/public"));
        assert!(is_under("/public", "/public/assets/logo.png"));
        // Sibling sharing a name prefix must not match.
        assert!(!is_under("/Doc", "/Docs"));
        assert!(!is_under("/Doc", "/Docs/a.txt"));
        assert!(is_under("/", "/anything"));
    }

    #[test]
    fn test_resolve_absolute() {
        assert_eq!(resolve("/Docs", "/Pictures"), "/Pictures");
        assert_eq!(resolve("/Docs", "/Pictures/"), "/Pictures");
        assert_eq!(resolve("/Docs", "/"), "/");
    }

    #[test]
    fn test_resolve_relative() {
        assert_eq!(resolve("/Docs", "Test"), "/Docs/Test");
        assert_eq!(resolve("/Docs/Test", ".."), "/Docs");
        assert_eq!(resolve("/Docs/Test", "../.."), "/");
        assert_eq!(resolve("/Docs", "../../.."), "/");
        assert_eq!(resolve("/Docs", "./Test"), "/Docs/Test");
        assert_eq!(resolve("/", "Docs/Test"), "/Docs/Test");
    }
}
