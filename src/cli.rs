//! Command-line definitions and the headless `report` command.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{DashboardConfig, DisplayConfig};
use crate::data::aggregate::Report;
use crate::data::cache::TableCache;
use crate::data::filter::{filtered_rows, Selection};
use crate::ui::format;

/// Interactive retail sales dashboard.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Workbook or CSV file with the transactions
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Worksheet holding the transactions
    #[arg(long, global = true)]
    pub sheet: Option<String>,

    /// Rows above the header row
    #[arg(long, global = true)]
    pub header_rows: Option<u32>,

    /// Column range to read, e.g. B:R
    #[arg(long, global = true)]
    pub columns: Option<String>,

    /// Maximum number of data rows
    #[arg(long, global = true)]
    pub row_limit: Option<usize>,

    /// TOML config file (defaults to ./dashboard.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the KPIs and grouped totals for a selection, without a window
    Report(ReportArgs),
}

#[derive(Debug, clap::Args)]
pub struct ReportArgs {
    /// Cities to include (repeatable; all when omitted)
    #[arg(long = "city")]
    pub cities: Vec<String>,

    /// Customer types to include (repeatable; all when omitted)
    #[arg(long = "customer-type")]
    pub customer_types: Vec<String>,

    /// Genders to include (repeatable; all when omitted)
    #[arg(long = "gender")]
    pub genders: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn resolve_config(&self) -> Result<DashboardConfig> {
        let mut config = DashboardConfig::discover(self.config.as_deref())?;
        let source = &mut config.source;
        if let Some(path) = &self.file {
            source.path = path.clone();
        }
        if let Some(sheet) = &self.sheet {
            source.sheet = sheet.clone();
        }
        if let Some(rows) = self.header_rows {
            source.header_rows = rows;
        }
        if let Some(columns) = &self.columns {
            source.columns = columns.clone();
        }
        if let Some(limit) = self.row_limit {
            source.row_limit = limit;
        }
        Ok(config)
    }
}

impl ReportArgs {
    pub fn selection(&self) -> Selection {
        Selection {
            cities: self.cities.iter().cloned().collect(),
            customer_types: self.customer_types.iter().cloned().collect(),
            genders: self.genders.iter().cloned().collect(),
        }
    }
}

/// Load, filter, aggregate and print one report.
pub fn run_report(
    cache: &TableCache,
    args: &ReportArgs,
    display: &DisplayConfig,
    out: &mut impl Write,
) -> Result<()> {
    let table = cache.table();
    let report = Report::compute(filtered_rows(&table, &args.selection()));

    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report).context("writing JSON report")?;
            writeln!(out)?;
        }
        OutputFormat::Text => write_text(&report, display, out)?,
    }
    Ok(())
}

fn write_text(report: &Report, display: &DisplayConfig, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Transactions:                 {}", report.row_count)?;
    writeln!(out, "Total Sales:                  {}", format::total_sales(display, report))?;
    writeln!(
        out,
        "Average Rating:               {} {}",
        format::average_rating(report),
        format::stars(display, report)
    )?;
    writeln!(out, "Average Sale Per Transaction: {}", format::average_sale(display, report))?;

    writeln!(out, "\nSales By Product")?;
    for (name, total) in &report.sales_by_product {
        writeln!(out, "  {name:<24} {total:>12.2}")?;
    }
    writeln!(out, "\nHourly Sales")?;
    for (hour, total) in &report.sales_by_hour {
        writeln!(out, "  {hour:>2}:00 {total:>12.2}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn report_flags_become_a_selection() {
        let cli = Cli::parse_from([
            "sales-dashboard",
            "report",
            "--city",
            "Yangon",
            "--city",
            "Mandalay",
            "--gender",
            "Female",
            "--format",
            "json",
        ]);
        let Some(Command::Report(args)) = cli.command else {
            panic!("expected the report subcommand");
        };
        let selection = args.selection();
        assert_eq!(selection.cities.len(), 2);
        assert!(selection.customer_types.is_empty());
        assert!(selection.genders.contains("Female"));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn overrides_replace_config_values() {
        let cli = Cli::parse_from([
            "sales-dashboard",
            "--config",
            "missing-on-purpose.toml",
        ]);
        assert!(cli.resolve_config().is_err());

        let cli = Cli::parse_from([
            "sales-dashboard",
            "--file",
            "q2.csv",
            "--row-limit",
            "25",
            "--columns",
            "A:L",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.source.path, PathBuf::from("q2.csv"));
        assert_eq!(config.source.row_limit, 25);
        assert_eq!(config.source.columns, "A:L");
    }

    #[test]
    fn text_report_lists_groups() {
        let report = Report {
            row_count: 2,
            total_sales: 1234.5,
            average_rating: Some(7.5),
            average_sale: Some(617.25),
            sales_by_product: vec![("Food".into(), 234.5), ("Sports".into(), 1000.0)],
            sales_by_hour: vec![(10, 1234.5)],
        };
        let mut out = Vec::new();
        write_text(&report, &DisplayConfig::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("CAD $ 1,234"));
        assert!(text.contains("CAD $ 617.25"));
        assert!(text.contains("Food"));
        assert!(text.contains("10:00"));
    }
}
