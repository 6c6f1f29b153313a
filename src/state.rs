use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::color::ColorMap;
use crate::config::{DisplayConfig, SourceConfig};
use crate::data::aggregate::Report;
use crate::data::cache::TableCache;
use crate::data::filter::{filtered_indices, Field, Selection};
use crate::data::model::SalesTable;
use crate::error::LoadResult;

/// Minimum time between checks of the source file's modified time.
pub const STALE_CHECK_INTERVAL: Duration = Duration::from_secs(2);

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until a file is loaded).
    pub cache: Option<TableCache>,

    /// Per-field filter selections.
    pub selection: Selection,

    /// Indices of rows passing the current selection (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregates over `visible_indices`.
    pub report: Report,

    /// Stable colour per product line.
    pub product_colors: Option<ColorMap>,

    pub display: DisplayConfig,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Source file changed on disk since load, as of the last check.
    pub stale: bool,
    last_stale_check: Option<Instant>,
}

impl AppState {
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            cache: None,
            selection: Selection::default(),
            visible_indices: Vec::new(),
            report: Report::default(),
            product_colors: None,
            display,
            status_message: None,
            stale: false,
            last_stale_check: None,
        }
    }

    /// The table currently in the cache.
    pub fn table(&self) -> Option<Arc<SalesTable>> {
        self.cache.as_ref().map(TableCache::table)
    }

    /// Ingest a newly loaded cache, reset filters and colours.
    pub fn set_cache(&mut self, cache: TableCache) {
        let table = cache.table();
        self.selection = Selection::all(&table);
        self.product_colors = Some(ColorMap::new(&table.categories().product_lines));
        self.cache = Some(cache);
        self.status_message = None;
        self.stale = false;
        self.last_stale_check = None;
        self.refilter();
    }

    /// Load `source` and make it the current table.
    pub fn open(&mut self, source: SourceConfig) -> LoadResult<()> {
        let cache = TableCache::load(source)?;
        self.set_cache(cache);
        Ok(())
    }

    /// Re-read the current source.
    ///
    /// Fields still selecting every value of the old table select every
    /// value of the new one; narrowed fields keep the values that survive.
    pub fn reload(&mut self) {
        let Some(cache) = self.cache.as_mut() else {
            return;
        };
        let previous = cache.table();
        match cache.reload() {
            Ok(_) => {
                let table = cache.table();
                for field in Field::ALL {
                    let old_options = field.options(&previous);
                    let options = field.options(&table);
                    let selected = self.selection.values_mut(field);
                    if selected.is_empty() {
                        continue;
                    }
                    let had_everything = selected.len() == old_options.len()
                        && old_options.iter().all(|v| selected.contains(v));
                    if had_everything {
                        *selected = options.iter().cloned().collect();
                    } else {
                        selected.retain(|v| options.contains(v));
                    }
                }
                self.product_colors = Some(ColorMap::new(&table.categories().product_lines));
                self.status_message = None;
                self.stale = false;
                self.last_stale_check = None;
                self.refilter();
            }
            Err(e) => {
                log::error!("Failed to reload: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Refresh `stale`, touching the file system at most once per
    /// `STALE_CHECK_INTERVAL`.
    pub fn poll_stale(&mut self, now: Instant) {
        let Some(cache) = &self.cache else {
            return;
        };
        let due = self
            .last_stale_check
            .map_or(true, |last| now.duration_since(last) >= STALE_CHECK_INTERVAL);
        if due {
            self.stale = cache.is_stale();
            self.last_stale_check = Some(now);
        }
    }

    /// Recompute `visible_indices` and the report after a selection change.
    pub fn refilter(&mut self) {
        let Some(table) = self.table() else {
            return;
        };
        self.visible_indices = filtered_indices(&table, &self.selection);
        self.report = Report::compute(self.visible_indices.iter().map(|&i| &table.rows()[i]));
        log::debug!(
            "Selection matches {} of {} rows",
            self.visible_indices.len(),
            table.len()
        );
    }

    /// Toggle a single value in a field's selection.
    pub fn toggle_value(&mut self, field: Field, value: &str) {
        let selected = self.selection.values_mut(field);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Select every value of a field.
    pub fn select_all(&mut self, field: Field) {
        if let Some(table) = self.table() {
            *self.selection.values_mut(field) = field.options(&table).iter().cloned().collect();
            self.refilter();
        }
    }
}
