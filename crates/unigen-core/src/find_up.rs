//! Bounded upward search for marker files

use crate::fs::FileSystem;
use crate::paths::normalize;
use std::path::{Path, PathBuf};

/// Search bounds: start directory and inclusive stop directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindUp {
    pub start: PathBuf,
    pub stop: PathBuf,
}

impl FindUp {
    /// Create bounds
    #[must_use]
    pub fn new(start: impl AsRef<Path>, stop: impl AsRef<Path>) -> Self {
        Self {
            start: normalize(start.as_ref()),
            stop: normalize(stop.as_ref()),
        }
    }
}

/// Closest `marker` in `start` or one of its ancestors, never above `stop`
///
/// A start directory outside `stop` finds nothing.
pub async fn find_up(fs: &dyn FileSystem, marker: &str, bounds: &FindUp) -> Option<PathBuf> {
    let start = normalize(&bounds.start);
    let stop = normalize(&bounds.stop);

    if !start.starts_with(&stop) {
        tracing::warn!(
            "find_up start {} is outside stop directory {}",
            start.display(),
            stop.display()
        );
        return None;
    }

    let mut current = start.as_path();
    loop {
        let candidate = current.join(marker);
        if fs.exists(&candidate).await {
            tracing::debug!("found {} at {}", marker, candidate.display());
            return Some(candidate);
        }
        if current == stop {
            return None;
        }
        current = current.parent()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFileSystem;

    const MARKER: &str = "module-export.ts";

    #[tokio::test]
    async fn closest_marker_wins() {
        let fs = MemoryFileSystem::new();
        fs.insert_file("/proj/src/lobby-module/module-export.ts", "");
        fs.insert_file("/proj/src/module-export.ts", "");
        fs.insert_dir("/proj/src/lobby-module/managers");

        let found = find_up(
            &fs,
            MARKER,
            &FindUp::new("/proj/src/lobby-module/managers", "/proj/src"),
        )
        .await;

        assert_eq!(found, Some(PathBuf::from("/proj/src/lobby-module/module-export.ts")));
    }

    #[tokio::test]
    async fn stop_directory_is_checked_inclusively() {
        let fs = MemoryFileSystem::new();
        fs.insert_file("/proj/src/module-export.ts", "");

        let found = find_up(&fs, MARKER, &FindUp::new("/proj/src/a/b", "/proj/src")).await;
        assert_eq!(found, Some(PathBuf::from("/proj/src/module-export.ts")));
    }

    #[tokio::test]
    async fn never_escapes_stop_directory() {
        let fs = MemoryFileSystem::new();
        // three levels above the stop point
        fs.insert_file("/proj/module-export.ts", "");

        let found = find_up(&fs, MARKER, &FindUp::new("/proj/src/a/b/c", "/proj/src/a/b")).await;
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn start_outside_stop_finds_nothing() {
        let fs = MemoryFileSystem::new();
        fs.insert_file("/other/module-export.ts", "");

        let found = find_up(&fs, MARKER, &FindUp::new("/other", "/proj/src")).await;
        assert_eq!(found, None);
    }
}
