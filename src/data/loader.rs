use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use chrono::{NaiveDate, NaiveTime};

use super::model::{columns, SalesTable, Transaction};
use crate::config::SourceConfig;
use crate::error::{LoadError, LoadResult};

static EMPTY: Data = Data::Empty;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];
const TIME_FORMAT: &str = "%H:%M:%S";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the transactions table described by `source`.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xlsm` / `.xlsb` / `.xls` / `.ods` – header on row
///   `header_rows + 1`, columns limited to `source.columns`
/// * `.csv` – header on the first line
pub fn load_table(source: &SourceConfig) -> LoadResult<SalesTable> {
    let path = source.path.as_path();
    if !path.is_file() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => load_workbook(source)?,
        "csv" => load_csv(path, source.row_limit)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    log::info!(
        "Loaded {} transactions from {} ({} cities, {} product lines)",
        table.len(),
        path.display(),
        table.categories().cities.len(),
        table.categories().product_lines.len()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Column ranges ("B:R")
// ---------------------------------------------------------------------------

/// Inclusive range of 0-based column indices parsed from spreadsheet letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    pub first: u32,
    pub last: u32,
}

impl ColumnRange {
    /// Parse `"B:R"` (or a single column such as `"C"`).
    pub fn parse(spec: &str) -> LoadResult<Self> {
        let invalid = || LoadError::InvalidColumnRange(spec.to_string());
        let (a, b) = spec.split_once(':').unwrap_or((spec, spec));
        let first = column_index(a.trim()).ok_or_else(invalid)?;
        let last = column_index(b.trim()).ok_or_else(invalid)?;
        if first > last {
            return Err(invalid());
        }
        Ok(Self { first, last })
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> {
        self.first..=self.last
    }
}

/// `"A"` → 0, `"R"` → 17, `"AA"` → 26.
fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }
    letters.chars().try_fold(0u32, |acc, c| {
        c.is_ascii_alphabetic()
            .then(|| acc * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1))
    })
    .map(|n| n - 1)
}

/// 0-based column index → spreadsheet letters.
fn column_letters(mut index: u32) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

// ---------------------------------------------------------------------------
// Header resolution
// ---------------------------------------------------------------------------

/// Position of every required header, in `columns::REQUIRED` order.
struct ColumnMap {
    positions: [u32; columns::REQUIRED.len()],
}

impl ColumnMap {
    fn resolve(headers: &[(u32, String)]) -> LoadResult<Self> {
        let mut positions = [0u32; columns::REQUIRED.len()];
        for (slot, name) in positions.iter_mut().zip(columns::REQUIRED) {
            *slot = headers
                .iter()
                .find(|(_, h)| h == name)
                .map(|(pos, _)| *pos)
                .ok_or(LoadError::MissingColumn(name))?;
        }
        Ok(Self { positions })
    }
}

fn header_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => Some(s.trim().to_string()),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

fn load_workbook(source: &SourceConfig) -> LoadResult<SalesTable> {
    let columns = ColumnRange::parse(&source.columns)?;
    let mut workbook = open_workbook_auto(&source.path)?;

    let available = workbook.sheet_names().to_vec();
    if !available.iter().any(|name| name == &source.sheet) {
        return Err(LoadError::SheetNotFound {
            sheet: source.sheet.clone(),
            available,
        });
    }
    let range = workbook.worksheet_range(&source.sheet)?;

    let header_row = source.header_rows;
    let headers: Vec<(u32, String)> = columns
        .iter()
        .filter_map(|col| {
            range
                .get_value((header_row, col))
                .and_then(header_text)
                .map(|h| (col, h))
        })
        .collect();
    let map = ColumnMap::resolve(&headers)?;

    let last_row = range.end().map(|(row, _)| row).unwrap_or(header_row);
    let mut rows = Vec::new();
    for row in (header_row + 1..=last_row).take(source.row_limit) {
        if row_is_blank(&range, row, columns) {
            continue;
        }
        let cells: Vec<CellAt> = map
            .positions
            .iter()
            .map(|&col| CellAt {
                row,
                col,
                data: range.get_value((row, col)).unwrap_or(&EMPTY),
            })
            .collect();
        rows.push(parse_transaction(&cells)?);
    }

    log::debug!(
        "Sheet '{}' header on row {}, {} data rows",
        source.sheet,
        header_row + 1,
        rows.len()
    );
    Ok(SalesTable::from_rows(rows))
}

fn row_is_blank(range: &Range<Data>, row: u32, columns: ColumnRange) -> bool {
    columns
        .iter()
        .all(|col| range.get_value((row, col)).map_or(true, is_blank))
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header line with the same column names as the workbook.
/// Every field is read as text and typed with the workbook cell rules.
fn load_csv(path: &Path, row_limit: usize) -> LoadResult<SalesTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers: Vec<(u32, String)> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (i as u32, h.to_string()))
        .collect();
    let map = ColumnMap::resolve(&headers)?;

    let mut rows = Vec::new();
    for (i, result) in reader.records().take(row_limit).enumerate() {
        let record = result?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        // Row 0 is the header line.
        let row = i as u32 + 1;
        let data: Vec<Data> = map
            .positions
            .iter()
            .map(|&col| match record.get(col as usize) {
                Some(field) if !field.is_empty() => Data::String(field.to_string()),
                _ => Data::Empty,
            })
            .collect();
        let cells: Vec<CellAt> = map
            .positions
            .iter()
            .zip(&data)
            .map(|(&col, data)| CellAt { row, col, data })
            .collect();
        rows.push(parse_transaction(&cells)?);
    }

    Ok(SalesTable::from_rows(rows))
}

// ---------------------------------------------------------------------------
// Cell typing
// ---------------------------------------------------------------------------

/// A cell together with its 0-based sheet position, for error messages.
struct CellAt<'a> {
    row: u32,
    col: u32,
    data: &'a Data,
}

impl CellAt<'_> {
    fn reference(&self) -> String {
        format!("{}{}", column_letters(self.col), self.row + 1)
    }

    fn malformed(&self, column: &'static str, expected: &'static str) -> LoadError {
        LoadError::MalformedCell {
            cell: self.reference(),
            column,
            expected,
            found: self.data.to_string(),
        }
    }

    fn text(&self, column: &'static str) -> LoadResult<String> {
        match self.data {
            Data::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
            Data::Int(i) => Ok(i.to_string()),
            Data::Float(f) => Ok(f.to_string()),
            _ => Err(self.malformed(column, "text")),
        }
    }

    fn decimal(&self, column: &'static str) -> LoadResult<f64> {
        let value = match self.data {
            Data::Float(f) => Some(*f),
            Data::Int(i) => Some(*i as f64),
            Data::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        value
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.malformed(column, "a number"))
    }

    fn count(&self, column: &'static str) -> LoadResult<u32> {
        let value = self.decimal(column)?;
        if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
            return Err(self.malformed(column, "a whole number"));
        }
        Ok(value as u32)
    }

    fn date(&self, column: &'static str) -> LoadResult<NaiveDate> {
        let value = match self.data {
            Data::String(s) => DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s.trim(), fmt).ok()),
            Data::DateTime(_) | Data::DateTimeIso(_) => self.data.as_date(),
            _ => None,
        };
        value.ok_or_else(|| self.malformed(column, "a date"))
    }

    fn time(&self, column: &'static str) -> LoadResult<NaiveTime> {
        let value = match self.data {
            Data::String(s) => NaiveTime::parse_from_str(s.trim(), TIME_FORMAT).ok(),
            Data::DateTime(_) | Data::DateTimeIso(_) | Data::DurationIso(_) => {
                self.data.as_time()
            }
            _ => None,
        };
        value.ok_or_else(|| self.malformed(column, "a time HH:MM:SS"))
    }
}

/// `cells` follow `columns::REQUIRED` order.
fn parse_transaction(cells: &[CellAt]) -> LoadResult<Transaction> {
    let [city, customer_type, gender, product_line, unit_price, quantity, total, date, time, payment, rating] =
        cells
    else {
        unreachable!("one cell per required column");
    };

    Ok(Transaction::new(
        city.text(columns::CITY)?,
        customer_type.text(columns::CUSTOMER_TYPE)?,
        gender.text(columns::GENDER)?,
        product_line.text(columns::PRODUCT_LINE)?,
        unit_price.decimal(columns::UNIT_PRICE)?,
        quantity.count(columns::QUANTITY)?,
        total.decimal(columns::TOTAL)?,
        date.date(columns::DATE)?,
        time.time(columns::TIME)?,
        payment.text(columns::PAYMENT)?,
        rating.decimal(columns::RATING)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(data: &Data) -> CellAt<'_> {
        CellAt {
            row: 11,
            col: 7,
            data,
        }
    }

    #[test]
    fn parses_column_ranges() {
        assert_eq!(
            ColumnRange::parse("B:R").unwrap(),
            ColumnRange { first: 1, last: 17 }
        );
        assert_eq!(
            ColumnRange::parse("c").unwrap(),
            ColumnRange { first: 2, last: 2 }
        );
        assert_eq!(
            ColumnRange::parse("A:AB").unwrap(),
            ColumnRange { first: 0, last: 27 }
        );
        assert!(ColumnRange::parse("R:B").is_err());
        assert!(ColumnRange::parse("B:7").is_err());
        assert!(ColumnRange::parse("").is_err());
    }

    #[test]
    fn column_letters_round_trip_indices() {
        for (index, letters) in [(0, "A"), (17, "R"), (25, "Z"), (26, "AA"), (27, "AB"), (701, "ZZ")] {
            assert_eq!(column_letters(index), letters);
            assert_eq!(column_index(letters), Some(index));
        }
    }

    #[test]
    fn malformed_time_names_the_cell() {
        let data = Data::String("1pm".to_string());
        let err = at(&data).time(columns::TIME).unwrap_err();
        match err {
            LoadError::MalformedCell { cell, column, found, .. } => {
                assert_eq!(cell, "H12");
                assert_eq!(column, "Time");
                assert_eq!(found, "1pm");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn time_text_gives_the_hour() {
        let data = Data::String("19:48:10".to_string());
        let time = at(&data).time(columns::TIME).unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(19, 48, 10).unwrap());
    }

    #[test]
    fn dates_accept_iso_and_us_text() {
        let expected = NaiveDate::from_ymd_opt(2019, 3, 8).unwrap();
        for text in ["2019-03-08", "3/8/2019"] {
            let data = Data::String(text.to_string());
            assert_eq!(at(&data).date(columns::DATE).unwrap(), expected);
        }
        assert!(at(&Data::Float(3.5)).date(columns::DATE).is_err());
    }

    #[test]
    fn numbers_accept_numeric_cells_and_text() {
        assert_eq!(at(&Data::Float(548.97)).decimal(columns::TOTAL).unwrap(), 548.97);
        assert_eq!(at(&Data::Int(7)).decimal(columns::TOTAL).unwrap(), 7.0);
        let text = Data::String(" 9.1 ".to_string());
        assert_eq!(at(&text).decimal(columns::RATING).unwrap(), 9.1);
        assert!(at(&Data::Empty).decimal(columns::RATING).is_err());
        assert!(at(&Data::Bool(true)).decimal(columns::RATING).is_err());
    }

    #[test]
    fn quantity_must_be_whole_and_non_negative() {
        assert_eq!(at(&Data::Float(7.0)).count(columns::QUANTITY).unwrap(), 7);
        assert!(at(&Data::Float(7.5)).count(columns::QUANTITY).is_err());
        assert!(at(&Data::Int(-1)).count(columns::QUANTITY).is_err());
    }

    #[test]
    fn categories_must_not_be_blank() {
        let data = Data::String("  Yangon ".to_string());
        assert_eq!(at(&data).text(columns::CITY).unwrap(), "Yangon");
        assert!(at(&Data::String("   ".to_string())).text(columns::CITY).is_err());
        assert!(at(&Data::Empty).text(columns::CITY).is_err());
    }

    #[test]
    fn missing_header_is_reported() {
        let headers: Vec<(u32, String)> = columns::REQUIRED
            .iter()
            .filter(|h| **h != columns::RATING)
            .enumerate()
            .map(|(i, h)| (i as u32, h.to_string()))
            .collect();
        match ColumnMap::resolve(&headers) {
            Err(LoadError::MissingColumn(name)) => assert_eq!(name, "Rating"),
            _ => panic!("expected a missing column error"),
        }
    }
}
