use std::sync::Arc;
use std::time::SystemTime;

use super::loader::load_table;
use super::model::SalesTable;
use crate::config::SourceConfig;
use crate::error::LoadResult;

// ---------------------------------------------------------------------------
// TableCache – the loaded table plus its invalidation token
// ---------------------------------------------------------------------------

/// Holds the immutable table for the lifetime of a source.
///
/// `version` increases on every successful reload so views can tell whether
/// their derived data is out of date.
#[derive(Debug, Clone)]
pub struct TableCache {
    source: SourceConfig,
    table: Arc<SalesTable>,
    version: u64,
    modified: Option<SystemTime>,
}

impl TableCache {
    /// Load `source` once.
    pub fn load(source: SourceConfig) -> LoadResult<Self> {
        let table = load_table(&source)?;
        let modified = modified_time(&source);
        Ok(Self {
            source,
            table: Arc::new(table),
            version: 1,
            modified,
        })
    }

    pub fn table(&self) -> Arc<SalesTable> {
        Arc::clone(&self.table)
    }

    pub fn source(&self) -> &SourceConfig {
        &self.source
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether the file on disk changed since the last load.
    pub fn is_stale(&self) -> bool {
        modified_time(&self.source) != self.modified
    }

    /// Re-read the source and bump the version. On failure the current
    /// table stays in place.
    pub fn reload(&mut self) -> LoadResult<u64> {
        let table = load_table(&self.source)?;
        self.table = Arc::new(table);
        self.modified = modified_time(&self.source);
        self.version += 1;
        log::info!(
            "Reloaded {} (version {})",
            self.source.path.display(),
            self.version
        );
        Ok(self.version)
    }
}

fn modified_time(source: &SourceConfig) -> Option<SystemTime> {
    std::fs::metadata(&source.path)
        .and_then(|m| m.modified())
        .ok()
}
