//! Resolve the Go identifier at a byte offset to its canonical definition.
//!
//! A query takes a type-checked file (syntax tree, binding tables and type
//! graph, all produced by an external Go front end) and an offset, and
//! answers with a [`DefinitionDescriptor`]: the declaring package, the
//! declaring type for methods and fields, and the name.
//!
//! - [`locate`] narrows the offset down to the innermost enclosing node.
//! - [`definition`] turns that node path into a descriptor, following
//!   members promoted through embedded structs and interfaces.
//! - [`cache`] holds dependency packages front ends had to check from
//!   source, shared across the queries of one process.

use std::sync::Arc;

pub mod binding;
pub mod cache;
pub mod config;
pub mod definition;
pub mod locate;
pub mod output;
pub mod snapshot;
pub mod syntax;
pub mod types;

pub use binding::CheckedFile;
pub use cache::{CheckedPackage, Completeness, ImportCache};
pub use config::Config;
pub use locate::{NodePath, path_enclosing_interval, path_enclosing_offset};
pub use snapshot::SnapshotError;
pub use types::{DefinitionDescriptor, NotFound, Span};

/// Any failure of a full query, from loading the dump to resolution.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("{0}")]
    NotFound(#[from] NotFound),
}

/// Owns the settings and the process-wide import cache.
#[derive(Debug)]
pub struct Backend {
    config: Config,
    import_cache: Arc<ImportCache<CheckedPackage>>,
}

impl Backend {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            import_cache: Arc::new(ImportCache::new()),
        }
    }

    /// A backend with default settings.
    pub fn new_test() -> Self {
        Self::new(Config::default())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The dependency cache, for front ends that check imports from
    /// source.
    pub fn import_cache(&self) -> Arc<ImportCache<CheckedPackage>> {
        Arc::clone(&self.import_cache)
    }

    /// Apply the diagnostics policy to `file`, then resolve `offset`.
    pub fn query(&self, file: &CheckedFile, offset: u32) -> Result<DefinitionDescriptor, QueryError> {
        snapshot::check_diagnostics(file, self.config.strict)?;
        Ok(self.resolve_definition(file, offset)?)
    }
}
