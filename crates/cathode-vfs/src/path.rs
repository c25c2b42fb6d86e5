//! Lexical path helpers.
//!
//! All VFS paths are absolute and `/`-separated. Normalization is
//! purely lexical: `.` disappears, `..` pops one component (and is
//! discarded at the root), repeated slashes collapse.

/// Normalize a path into absolute canonical form.
pub fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => {},
            ".." => {
                parts.pop();
            },
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", parts.join("/"))
    }
}

/// Resolve `input` against `base`: absolute inputs stand alone,
/// relative ones append. The result is normalized.
pub fn join(base: &str, input: &str) -> String {
    if input.starts_with('/') {
        normalize(input)
    } else {
        normalize(&format!("{base}/{input}"))
    }
}

/// Parent of a normalized path. The root is its own parent; callers
/// that must refuse at the root check for that case themselves.
pub fn parent(path: &str) -> &str {
    if path == "/" {
        return "/";
    }
    match path.rfind('/') {
        Some(0) => "/",
        Some(i) => &path[..i],
        None => "/",
    }
}

/// Final component of a normalized path (`""` for the root).
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_slashes_and_dots() {
        assert_eq!(normalize("//a//./b/"), "/a/b");
        assert_eq!(normalize("a/b"), "/a/b");
    }

    #[test]
    fn normalize_resolves_dot_dot() {
        assert_eq!(normalize("/a/b/../c"), "/a/c");
        assert_eq!(normalize("/../.."), "/");
    }

    #[test]
    fn join_absolute_overrides_base() {
        assert_eq!(join("/home", "/etc"), "/etc");
    }

    #[test]
    fn join_relative_appends() {
        assert_eq!(join("/home", "user"), "/home/user");
        assert_eq!(join("/", "user"), "/user");
    }

    #[test]
    fn parent_of_nested_and_top_level() {
        assert_eq!(parent("/a/b"), "/a");
        assert_eq!(parent("/a"), "/");
        assert_eq!(parent("/"), "/");
    }

    #[test]
    fn file_name_is_last_component() {
        assert_eq!(file_name("/a/b/c.txt"), "c.txt");
        assert_eq!(file_name("/"), "");
    }

    proptest::proptest! {
        #[test]
        fn normalize_is_idempotent(s in "[a-z/.]{0,40}") {
            let once = normalize(&s);
            proptest::prop_assert_eq!(normalize(&once), once.clone());
        }

        #[test]
        fn normalized_paths_never_contain_dot_dot(s in "[a-z/.]{0,40}") {
            let n = normalize(&s);
            proptest::prop_assert!(!n.split('/').any(|c| c == ".."));
        }
    }
}
