//! Filesystem capability
//!
//! Generators never touch the disk directly. Every read, write, existence
//! check and directory creation goes through [`FileSystem`], so tests and
//! dry runs can swap in [`MemoryFileSystem`].

use crate::error::{GeneratorError, Result};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

/// Async filesystem primitives consumed by generators
#[async_trait::async_trait]
pub trait FileSystem: Send + Sync + std::fmt::Debug {
    /// Whether a file or directory exists
    async fn exists(&self, path: &Path) -> bool;

    /// Read a whole file
    async fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create or truncate a file; the parent directory must exist
    async fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// Create a directory and all missing ancestors
    async fn ensure_dir(&self, path: &Path) -> io::Result<()>;
}

/// Read a file as UTF-8 text
///
/// # Errors
/// `GeneratorError::Io` on read failure or invalid UTF-8.
pub async fn read_to_string(fs: &dyn FileSystem, path: &Path) -> Result<String> {
    let bytes = fs
        .read(path)
        .await
        .map_err(|e| GeneratorError::io_error(path, e))?;
    String::from_utf8(bytes).map_err(|e| {
        GeneratorError::io_error(path, io::Error::new(io::ErrorKind::InvalidData, e))
    })
}

/// Write text to a file
///
/// # Errors
/// `GeneratorError::Io` on write failure.
pub async fn write_string(fs: &dyn FileSystem, path: &Path, contents: &str) -> Result<()> {
    fs.write(path, contents.as_bytes())
        .await
        .map_err(|e| GeneratorError::io_error(path, e))
}

/// Production adapter over `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

#[async_trait::async_trait]
impl FileSystem for LocalFileSystem {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        tokio::fs::write(path, contents).await
    }

    async fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        tokio::fs::create_dir_all(path).await
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    writes: usize,
}

impl MemoryState {
    fn add_dir_chain(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            if !self.dirs.insert(ancestor.to_path_buf()) {
                break;
            }
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.parent().is_none() || self.dirs.contains(path)
    }
}

/// In-memory filesystem for tests and dry runs
///
/// Paths are compared as given; callers pass normalized absolute paths.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: RwLock<MemoryState>,
}

impl MemoryFileSystem {
    /// Create empty filesystem
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its parent directories
    pub fn insert_file(&self, path: impl AsRef<Path>, contents: impl Into<Vec<u8>>) {
        let path = path.as_ref();
        let mut state = self.state.write();
        if let Some(parent) = path.parent() {
            state.add_dir_chain(parent);
        }
        state.files.insert(path.to_path_buf(), contents.into());
    }

    /// Seed a directory chain
    pub fn insert_dir(&self, path: impl AsRef<Path>) {
        self.state.write().add_dir_chain(path.as_ref());
    }

    /// File contents as text, if present and valid UTF-8
    #[must_use]
    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        let state = self.state.read();
        let bytes = state.files.get(path.as_ref())?;
        String::from_utf8(bytes.clone()).ok()
    }

    /// All file paths in sorted order
    #[must_use]
    pub fn files(&self) -> Vec<PathBuf> {
        self.state.read().files.keys().cloned().collect()
    }

    /// Number of successful writes so far
    #[inline]
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.state.read().writes
    }
}

#[async_trait::async_trait]
impl FileSystem for MemoryFileSystem {
    async fn exists(&self, path: &Path) -> bool {
        let state = self.state.read();
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.state.read().files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no such file: {}", path.display()))
        })
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut state = self.state.write();
        if state.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("is a directory: {}", path.display()),
            ));
        }
        let parent_exists = path.parent().map_or(true, |parent| state.is_dir(parent));
        if !parent_exists {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("parent directory missing: {}", path.display()),
            ));
        }

        state.files.insert(path.to_path_buf(), contents.to_vec());
        state.writes += 1;
        Ok(())
    }

    async fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        let mut state = self.state.write();
        if state.files.contains_key(path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("file exists at {}", path.display()),
            ));
        }
        state.add_dir_chain(path);
        Ok(())
    }
}
