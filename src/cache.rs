/// Process-wide cache of dependency packages checked from source.
///
/// When a front end cannot load a pre-built artifact for an import it
/// falls back to type-checking the dependency's source.  That result is
/// kept here, keyed by `(import path, source directory)`, for the rest of
/// the process so repeated queries do not check the same dependency
/// again.
///
/// The cache is append-only: entries are never evicted.  A hit is only
/// served when the entry reports itself complete; an incomplete entry is
/// checked again and overwritten.
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::binding::{PackageId, TypeGraph};

/// Freshness predicate for cached packages.
pub trait Completeness {
    /// Whether checking finished without leaving the entry partial.
    fn is_complete(&self) -> bool;
}

/// A failed source-level import.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("no suitable package found (import path {path:?}, dir {dir:?})")]
    NoPackage { path: String, dir: PathBuf },
    #[error("checking {path:?} failed: {reason}")]
    Check { path: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ImportKey {
    path: String,
    src_dir: PathBuf,
}

impl ImportKey {
    fn new(path: &str, src_dir: &Path) -> Self {
        Self {
            path: path.to_string(),
            src_dir: src_dir.to_path_buf(),
        }
    }
}

/// Read-through cache of checked packages.
pub struct ImportCache<P> {
    entries: Mutex<HashMap<ImportKey, Arc<P>>>,
}

impl<P> Default for ImportCache<P> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<P> std::fmt::Debug for ImportCache<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportCache")
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}

impl<P: Completeness> ImportCache<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A complete cached entry, if there is one.
    pub fn lookup(&self, path: &str, src_dir: &Path) -> Option<Arc<P>> {
        let entries = self.entries.lock();
        let entry = entries.get(&ImportKey::new(path, src_dir))?;
        if entry.is_complete() {
            Some(Arc::clone(entry))
        } else {
            debug!(path, "discarding incomplete cache entry");
            None
        }
    }

    /// Insert or overwrite the entry for `(path, src_dir)`.
    pub fn store(&self, path: &str, src_dir: &Path, package: P) -> Arc<P> {
        let package = Arc::new(package);
        self.entries
            .lock()
            .insert(ImportKey::new(path, src_dir), Arc::clone(&package));
        package
    }

    /// Serve a complete entry, or run `check` and store what it returns.
    ///
    /// The lock is not held while `check` runs.
    pub fn get_or_check<E>(
        &self,
        path: &str,
        src_dir: &Path,
        check: impl FnOnce() -> Result<P, E>,
    ) -> Result<Arc<P>, E> {
        if let Some(hit) = self.lookup(path, src_dir) {
            return Ok(hit);
        }
        debug!(path, dir = %src_dir.display(), "checking import from source");
        let package = check()?;
        Ok(self.store(path, src_dir, package))
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A dependency package checked from source: its type graph and the id
/// of the package inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedPackage {
    pub graph: TypeGraph,
    pub package: PackageId,
}

impl CheckedPackage {
    pub fn path(&self) -> &str {
        &self.graph[self.package].path
    }
}

impl Completeness for CheckedPackage {
    fn is_complete(&self) -> bool {
        self.graph[self.package].complete
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
