//! Pluggable byte sources.
//!
//! The core never opens files on its own initiative: everything that
//! parses or lints takes `&str` plus a name. Callers that do work with a
//! filesystem inject one of these implementations, which keeps every
//! higher layer testable against [`MemorySource`].

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// A named file's contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub contents: String,
}

/// Metadata for one path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceStat {
    pub is_dir: bool,
    pub len: u64,
}

/// The filesystem capabilities the toolkit needs, and nothing more.
pub trait ByteSource {
    /// Reads a file's full contents.
    fn read(&self, path: &Path) -> io::Result<SourceFile>;

    /// Lists a directory's entries.
    fn children(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Stats a path.
    fn metadata(&self, path: &Path) -> io::Result<SourceStat>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSource;

impl ByteSource for OsSource {
    fn read(&self, path: &Path) -> io::Result<SourceFile> {
        let contents = std::fs::read_to_string(path)?;
        Ok(SourceFile {
            name: path.display().to_string(),
            contents,
        })
    }

    fn children(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            entries.push(entry?.path());
        }
        entries.sort();
        Ok(entries)
    }

    fn metadata(&self, path: &Path) -> io::Result<SourceStat> {
        let meta = std::fs::metadata(path)?;
        Ok(SourceStat {
            is_dir: meta.is_dir(),
            len: meta.len(),
        })
    }
}

/// An in-memory filesystem, the test double for [`OsSource`].
///
/// Directories are implied by the paths of inserted files.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<PathBuf, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, replacing any previous contents at that path.
    pub fn insert(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.insert(path.into(), contents.into());
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files.keys().any(|p| p.parent().is_some_and(|parent| {
            parent == path || parent.starts_with(path)
        }))
    }
}

impl ByteSource for MemorySource {
    fn read(&self, path: &Path) -> io::Result<SourceFile> {
        let contents = self
            .files
            .get(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))?;
        Ok(SourceFile {
            name: path.display().to_string(),
            contents: contents.clone(),
        })
    }

    fn children(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.is_dir(path) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such directory"));
        }
        let mut entries: Vec<PathBuf> = self
            .files
            .keys()
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();
        entries.sort();
        entries.dedup();
        Ok(entries)
    }

    fn metadata(&self, path: &Path) -> io::Result<SourceStat> {
        if let Some(contents) = self.files.get(path) {
            return Ok(SourceStat {
                is_dir: false,
                len: contents.len() as u64,
            });
        }
        if self.is_dir(path) {
            return Ok(SourceStat { is_dir: true, len: 0 });
        }
        Err(io::Error::new(io::ErrorKind::NotFound, "no such path"))
    }
}
