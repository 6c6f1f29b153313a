use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

// ---------------------------------------------------------------------------
// Source layout
// ---------------------------------------------------------------------------

/// Where the transactions live and how the sheet is laid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Workbook (`.xlsx`, `.xls`, …) or `.csv` file.
    pub path: PathBuf,
    /// Worksheet name (ignored for CSV).
    pub sheet: String,
    /// Rows above the header row (ignored for CSV).
    pub header_rows: u32,
    /// Lettered column range such as `B:R` (ignored for CSV).
    pub columns: String,
    /// Maximum number of data rows read after the header.
    pub row_limit: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("supermarket_sales.xlsx"),
            sheet: "Sales".to_string(),
            header_rows: 3,
            columns: "B:R".to_string(),
            row_limit: 1000,
        }
    }
}

// ---------------------------------------------------------------------------
// Presentation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Prefix for money amounts.
    pub currency: String,
    /// Glyph repeated once per rating star.
    pub star_glyph: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: "CAD $".to_string(),
            star_glyph: "⭐".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config file
// ---------------------------------------------------------------------------

/// Contents of `dashboard.toml`:
///
/// ```toml
/// [source]
/// path = "supermarket_sales.xlsx"
/// sheet = "Sales"
/// header_rows = 3
/// columns = "B:R"
/// row_limit = 1000
///
/// [display]
/// currency = "CAD $"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub source: SourceConfig,
    pub display: DisplayConfig,
}

impl DashboardConfig {
    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Load `explicit` if given, else `dashboard.toml` when present, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    log::debug!("Using config from {}", fallback.display());
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_sales_workbook_layout() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.source.sheet, "Sales");
        assert_eq!(cfg.source.header_rows, 3);
        assert_eq!(cfg.source.columns, "B:R");
        assert_eq!(cfg.source.row_limit, 1000);
        assert_eq!(cfg.display.currency, "CAD $");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg: DashboardConfig = toml::from_str(
            r#"
            [source]
            path = "data/q1.xlsx"
            row_limit = 50
            "#,
        )
        .unwrap();
        assert_eq!(cfg.source.path, PathBuf::from("data/q1.xlsx"));
        assert_eq!(cfg.source.row_limit, 50);
        assert_eq!(cfg.source.sheet, "Sales");
        assert_eq!(cfg.display, DisplayConfig::default());
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let err = DashboardConfig::from_file(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("does/not/exist.toml"));
    }
}
