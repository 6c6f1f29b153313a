use std::collections::HashSet;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Column headers expected in the source sheet
// ---------------------------------------------------------------------------

pub mod columns {
    pub const CITY: &str = "City";
    pub const CUSTOMER_TYPE: &str = "Customer_type";
    pub const GENDER: &str = "Gender";
    pub const PRODUCT_LINE: &str = "Product line";
    pub const UNIT_PRICE: &str = "Unit price";
    pub const QUANTITY: &str = "Quantity";
    pub const TOTAL: &str = "Total";
    pub const DATE: &str = "Date";
    pub const TIME: &str = "Time";
    pub const PAYMENT: &str = "Payment";
    pub const RATING: &str = "Rating";

    /// Every header the loader must find, in sheet order.
    pub const REQUIRED: [&str; 11] = [
        CITY,
        CUSTOMER_TYPE,
        GENDER,
        PRODUCT_LINE,
        UNIT_PRICE,
        QUANTITY,
        TOTAL,
        DATE,
        TIME,
        PAYMENT,
        RATING,
    ];
}

// ---------------------------------------------------------------------------
// Transaction – one row of the sheet
// ---------------------------------------------------------------------------

/// A single retail transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub city: String,
    pub customer_type: String,
    pub gender: String,
    pub product_line: String,
    pub unit_price: f64,
    pub quantity: u32,
    /// Price × quantity including tax, as recorded in the sheet.
    pub total: f64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub payment: String,
    pub rating: f64,
    /// Hour of day (0–23) derived from `time`.
    pub hour: u8,
}

impl Transaction {
    /// Build a transaction, deriving `hour` from `time`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        city: String,
        customer_type: String,
        gender: String,
        product_line: String,
        unit_price: f64,
        quantity: u32,
        total: f64,
        date: NaiveDate,
        time: NaiveTime,
        payment: String,
        rating: f64,
    ) -> Self {
        Self {
            city,
            customer_type,
            gender,
            product_line,
            unit_price,
            quantity,
            total,
            date,
            hour: time.hour() as u8,
            time,
            payment,
            rating,
        }
    }
}

// ---------------------------------------------------------------------------
// CategoryIndex – distinct values of the categorical columns
// ---------------------------------------------------------------------------

/// Distinct values per categorical column, in first-appearance order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryIndex {
    pub cities: Vec<String>,
    pub customer_types: Vec<String>,
    pub genders: Vec<String>,
    pub product_lines: Vec<String>,
}

impl CategoryIndex {
    fn from_rows(rows: &[Transaction]) -> Self {
        fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
            let mut seen = HashSet::new();
            values
                .filter(|v| seen.insert(*v))
                .map(str::to_string)
                .collect()
        }

        Self {
            cities: distinct(rows.iter().map(|r| r.city.as_str())),
            customer_types: distinct(rows.iter().map(|r| r.customer_type.as_str())),
            genders: distinct(rows.iter().map(|r| r.gender.as_str())),
            product_lines: distinct(rows.iter().map(|r| r.product_line.as_str())),
        }
    }
}

// ---------------------------------------------------------------------------
// SalesTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full, immutable table of transactions with its category index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesTable {
    rows: Vec<Transaction>,
    categories: CategoryIndex,
}

impl SalesTable {
    /// Build the category index from the loaded rows.
    pub fn from_rows(rows: Vec<Transaction>) -> Self {
        let categories = CategoryIndex::from_rows(&rows);
        Self { rows, categories }
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn categories(&self) -> &CategoryIndex {
        &self.categories
    }

    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
