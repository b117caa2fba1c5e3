//! Path resolution and portable module references
//!
//! All path arithmetic here is lexical: nothing touches the filesystem, so
//! the result for a given pair of inputs never depends on what exists yet.

use std::path::{Component, Path, PathBuf};

/// Resolves configuration-relative paths against the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Create resolver anchored at `root`
    #[must_use]
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: normalize(root.as_ref()),
        }
    }

    /// Normalized root directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `relative` from the root; absolute input wins
    #[must_use]
    pub fn resolve_from_root(&self, relative: impl AsRef<Path>) -> PathBuf {
        normalize(&self.root.join(relative.as_ref()))
    }
}

/// Fold `.` and `..` without consulting the disk
///
/// `..` never climbs above the root of an absolute path.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                None | Some(Component::ParentDir) => out.push(".."),
                Some(_) => {}
            },
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Relative path from directory `from` to `to`, both taken lexically
#[must_use]
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from = normalize(from);
    let to = normalize(to);
    let from_parts: Vec<_> = from.components().collect();
    let to_parts: Vec<_> = to.components().collect();

    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..from_parts.len() {
        out.push("..");
    }
    for part in &to_parts[common..] {
        out.push(part.as_os_str());
    }
    out
}

/// Portable module reference from file `from` to file `to`
///
/// The reference is relative to the directory containing `from`, has the
/// last extension of `to` stripped, always begins with `./` or `../`, and
/// uses `/` as separator on every platform. `from == to` yields
/// `./<stem>`.
#[must_use]
pub fn relative_module_reference(from: &Path, to: &Path) -> String {
    let from = normalize(from);
    let to = normalize(to);
    let from_dir = from.parent().unwrap_or(&from);
    let relative = relative_path(from_dir, &to);

    let Some(stem) = relative.file_stem() else {
        // `to` is an ancestor of (or equal to) from's directory
        let name = to.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
        let mut parts = vec![".."; relative.components().count() + 1];
        parts.push(name.as_ref());
        return parts.join("/");
    };

    let dir: Vec<String> = relative
        .parent()
        .map(|parent| {
            parent
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();

    let prefix = match dir.first().map(String::as_str) {
        Some("..") => dir.join("/"),
        None => String::from("."),
        Some(_) => format!("./{}", dir.join("/")),
    };

    format!("{prefix}/{}", stem.to_string_lossy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn resolve_from_root_folds_dots() {
        let resolver = PathResolver::new("/proj/src/");
        assert_eq!(
            resolver.resolve_from_root("./managers/../spec/manager"),
            PathBuf::from("/proj/src/spec/manager")
        );
        assert_eq!(resolver.resolve_from_root("/abs/path"), PathBuf::from("/abs/path"));
        assert_eq!(resolver.resolve_from_root(""), PathBuf::from("/proj/src"));
    }

    #[test]
    fn normalize_stays_below_root() {
        assert_eq!(normalize(Path::new("/a/../../b")), PathBuf::from("/b"));
        assert_eq!(normalize(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(normalize(Path::new("./a/./b/")), PathBuf::from("a/b"));
    }

    #[test]
    fn module_reference_examples() {
        let cases = [
            ("/proj/src/managers/lobby-manager.ts", "/proj/src/spec/manager", "../spec/manager"),
            ("/proj/src/events/index.ts", "/proj/src/events/join-event.ts", "./join-event"),
            ("/proj/src/a.ts", "/proj/src/deep/er/b.ts", "./deep/er/b"),
            ("/proj/src/a/b/c.ts", "/proj/x.d.ts", "../../../x.d"),
        ];
        for (from, to, expected) in cases {
            assert_eq!(
                relative_module_reference(Path::new(from), Path::new(to)),
                expected,
                "{from} -> {to}"
            );
        }
    }

    #[test]
    fn self_reference_is_legal() {
        let path = Path::new("/proj/src/module-export.ts");
        assert_eq!(relative_module_reference(path, path), "./module-export");
    }

    #[test]
    fn reference_to_own_directory() {
        assert_eq!(
            relative_module_reference(Path::new("/proj/src/events/a.ts"), Path::new("/proj/src/events")),
            "../events"
        );
    }

    fn segment() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,6}"
    }

    proptest! {
        #[test]
        fn module_reference_points_at_target(
            from_dirs in prop::collection::vec(segment(), 0..5),
            to_dirs in prop::collection::vec(segment(), 0..5),
            from_name in segment(),
            to_name in segment(),
        ) {
            let mut from = PathBuf::from("/root");
            from.extend(&from_dirs);
            from.push(format!("{from_name}.ts"));

            let mut to = PathBuf::from("/root");
            to.extend(&to_dirs);
            let to_stemmed = to.join(&to_name);
            to.push(format!("{to_name}.ts"));

            let reference = relative_module_reference(&from, &to);

            prop_assert!(!reference.contains('\\'));
            prop_assert!(reference.starts_with("./") || reference.starts_with("../"));

            let from_dir = from.parent().unwrap();
            prop_assert_eq!(normalize(&from_dir.join(&reference)), to_stemmed);
            prop_assert_eq!(relative_module_reference(&from, &to), reference);
        }
    }
}
