use std::path::Path;

use chrono::Datelike;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, XlsxError};

use super::loader::ColumnRange;
use super::model::{columns, Transaction};
use crate::config::SourceConfig;

/// Headers of the full export, in sheet order. Columns the loader does not
/// need are still written so files look like the real report.
const HEADERS: [&str; 17] = [
    "Invoice ID",
    "Branch",
    columns::CITY,
    columns::CUSTOMER_TYPE,
    columns::GENDER,
    columns::PRODUCT_LINE,
    columns::UNIT_PRICE,
    columns::QUANTITY,
    "Tax 5%",
    columns::TOTAL,
    columns::DATE,
    columns::TIME,
    columns::PAYMENT,
    "cogs",
    "gross margin percentage",
    "gross income",
    columns::RATING,
];

const TAX_RATE: f64 = 0.05;

/// Where to place the table inside the sheet.
#[derive(Debug, Clone)]
pub struct SheetLayout {
    pub sheet: String,
    /// Rows above the header; the first one holds a title.
    pub header_rows: u32,
    /// 0-based column of the first header.
    pub first_column: u16,
}

impl SheetLayout {
    /// Layout matching a source config. Falls back to column B when the
    /// configured range does not parse.
    pub fn for_source(source: &SourceConfig) -> Self {
        let first_column = ColumnRange::parse(&source.columns)
            .map(|r| r.first as u16)
            .unwrap_or(1);
        Self {
            sheet: source.sheet.clone(),
            header_rows: source.header_rows,
            first_column,
        }
    }
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self::for_source(&SourceConfig::default())
    }
}

/// Write `rows` as a sales workbook laid out per `layout`.
pub fn write_workbook(path: &Path, layout: &SheetLayout, rows: &[Transaction]) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(&layout.sheet)?;

    let bold = Format::new().set_bold();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let col = |offset: usize| layout.first_column + offset as u16;

    if layout.header_rows > 0 {
        sheet.write_string_with_format(0, col(0), "Supermarket sales", &bold)?;
    }

    let header_row = layout.header_rows;
    for (i, header) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(header_row, col(i), *header, &bold)?;
    }

    for (i, tx) in rows.iter().enumerate() {
        let row = header_row + 1 + i as u32;
        let subtotal = tx.total / (1.0 + TAX_RATE);
        let tax = tx.total - subtotal;
        let date = ExcelDateTime::from_ymd(
            tx.date.year() as u16,
            tx.date.month() as u8,
            tx.date.day() as u8,
        )?;

        sheet.write_string(row, col(0), format!("INV-{:05}", i + 1))?;
        sheet.write_string(row, col(1), branch_for(&tx.city))?;
        sheet.write_string(row, col(2), &tx.city)?;
        sheet.write_string(row, col(3), &tx.customer_type)?;
        sheet.write_string(row, col(4), &tx.gender)?;
        sheet.write_string(row, col(5), &tx.product_line)?;
        sheet.write_number(row, col(6), tx.unit_price)?;
        sheet.write_number(row, col(7), tx.quantity as f64)?;
        sheet.write_number(row, col(8), tax)?;
        sheet.write_number(row, col(9), tx.total)?;
        sheet.write_datetime_with_format(row, col(10), &date, &date_format)?;
        sheet.write_string(row, col(11), tx.time.format("%H:%M:%S").to_string())?;
        sheet.write_string(row, col(12), &tx.payment)?;
        sheet.write_number(row, col(13), subtotal)?;
        sheet.write_number(row, col(14), TAX_RATE / (1.0 + TAX_RATE) * 100.0)?;
        sheet.write_number(row, col(15), tax)?;
        sheet.write_number(row, col(16), tx.rating)?;
    }

    workbook.save(path)?;
    log::debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn branch_for(city: &str) -> &'static str {
    match city {
        "Yangon" => "A",
        "Mandalay" => "B",
        "Naypyitaw" => "C",
        _ => "-",
    }
}
