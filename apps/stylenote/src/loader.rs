//! Document loading from a lint root.
//!
//! `Loader::open` expands include globs up front (so order is known and
//! deterministic) but reads file contents lazily, one per `next()`. Files
//! that cannot be read or are not valid UTF-8 are yielded as `LoadError`
//! items; iteration continues with the remaining files.

use crate::error::{Error, LoadError, Result};
use crate::models::Document;
use glob::{glob_with, MatchOptions, Pattern};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Include pattern used when neither CLI nor config provides one.
pub const DEFAULT_INCLUDE: &str = "**/*";

enum Pending {
    Read(PathBuf),
    Failed(LoadError),
}

impl Pending {
    fn path(&self) -> &Path {
        match self {
            Pending::Read(p) => p.as_path(),
            Pending::Failed(e) => e.path.as_path(),
        }
    }
}

/// Entry point for turning a root path into a sequence of documents.
pub struct Loader;

impl Loader {
    /// Resolve `root` and the include globs into a lazy document sequence.
    ///
    /// Fails with `Error::NotFound` when `root` does not exist and with
    /// `Error::Pattern` for a malformed glob.
    pub fn open(root: &Path, include: &[String]) -> Result<Documents> {
        Self::open_excluding(root, include, &[])
    }

    /// Like `open`, but never yields the files in `exclude` (the active
    /// config file, typically). Paths are compared after canonicalization.
    pub fn open_excluding(root: &Path, include: &[String], exclude: &[PathBuf]) -> Result<Documents> {
        if !root.exists() {
            return Err(Error::NotFound(root.to_path_buf()));
        }
        if root.is_file() {
            debug!(root = %root.display(), "root is a single file");
            let base = root.parent().map(Path::to_path_buf).unwrap_or_default();
            return Ok(Documents::new(base, vec![Pending::Read(root.to_path_buf())]));
        }

        let opts = MatchOptions {
            case_sensitive: true,
            require_literal_separator: false,
            require_literal_leading_dot: true,
        };
        let escaped_root = Pattern::escape(&root.to_string_lossy());
        let mut pending: Vec<Pending> = Vec::new();
        for pat in include {
            let full = format!("{}/{}", escaped_root.trim_end_matches('/'), pat);
            let entries = glob_with(&full, opts).map_err(|e| Error::Pattern {
                pattern: pat.clone(),
                message: e.to_string(),
            })?;
            for entry in entries {
                match entry {
                    Ok(path) => {
                        if path.is_file() && !is_hidden(root, &path) {
                            pending.push(Pending::Read(path));
                        }
                    }
                    Err(e) => {
                        let path = e.path().to_path_buf();
                        if is_hidden(root, &path) {
                            continue;
                        }
                        let id = document_id(root, &path);
                        pending.push(Pending::Failed(LoadError {
                            path,
                            id,
                            source: e.into_error(),
                        }));
                    }
                }
            }
        }
        if !exclude.is_empty() {
            let skip: Vec<PathBuf> = exclude.iter().filter_map(|p| fs::canonicalize(p).ok()).collect();
            pending.retain(|item| match item {
                Pending::Read(p) => fs::canonicalize(p).map_or(true, |c| !skip.contains(&c)),
                Pending::Failed(_) => true,
            });
        }
        pending.sort_by(|a, b| a.path().cmp(b.path()));
        pending.dedup_by(|a, b| a.path() == b.path());
        debug!(root = %root.display(), files = pending.len(), "expanded include patterns");
        Ok(Documents::new(root.to_path_buf(), pending))
    }
}

/// Lazy, ordered sequence of loaded documents.
pub struct Documents {
    base: PathBuf,
    pending: std::vec::IntoIter<Pending>,
}

impl Documents {
    fn new(base: PathBuf, pending: Vec<Pending>) -> Self {
        Self {
            base,
            pending: pending.into_iter(),
        }
    }
}

impl Iterator for Documents {
    type Item = std::result::Result<Document, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.pending.next()?;
        Some(match item {
            Pending::Failed(e) => {
                warn!(path = %e.path.display(), error = %e.source, "skipping unreadable entry");
                Err(e)
            }
            Pending::Read(path) => {
                let id = document_id(&self.base, &path);
                match fs::read_to_string(&path) {
                    Ok(text) => {
                        debug!(document = %id, bytes = text.len(), "loaded document");
                        Ok(Document::new(id, text))
                    }
                    Err(source) => {
                        warn!(path = %path.display(), error = %source, "skipping unreadable file");
                        Err(LoadError { path, id, source })
                    }
                }
            }
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pending.size_hint()
    }
}

impl ExactSizeIterator for Documents {}

/// Drop `.` components so `./book` and `book` compare equal.
fn lexical(p: &Path) -> PathBuf {
    p.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// `path` relative to `base`, independent of how `base` is spelled.
fn relative_to(base: &Path, path: &Path) -> PathBuf {
    let base = lexical(base);
    let path = lexical(path);
    match path.strip_prefix(&base) {
        Ok(rel) => rel.to_path_buf(),
        Err(_) => pathdiff::diff_paths(&path, &base).unwrap_or(path),
    }
}

/// Identifier of `path` relative to `base`, always `/`-separated.
fn document_id(base: &Path, path: &Path) -> String {
    let rel = relative_to(base, path);
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        path.to_string_lossy().into_owned()
    } else {
        parts.join("/")
    }
}

/// Whether any component below `root` starts with a dot. Components of the
/// root itself never count.
fn is_hidden(root: &Path, path: &Path) -> bool {
    relative_to(root, path).components().any(|c| match c {
        Component::Normal(s) => s.to_string_lossy().starts_with('.'),
        _ => false,
    })
}
