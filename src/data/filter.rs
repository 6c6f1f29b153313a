use std::collections::BTreeSet;

use super::model::{SalesTable, Transaction};

// ---------------------------------------------------------------------------
// Selection: which values are allowed per categorical field
// ---------------------------------------------------------------------------

/// The three categorical fields a user can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    City,
    CustomerType,
    Gender,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::City, Field::CustomerType, Field::Gender];

    /// Label shown in the filter panel.
    pub fn label(self) -> &'static str {
        match self {
            Field::City => "City",
            Field::CustomerType => "Customer Type",
            Field::Gender => "Gender",
        }
    }

    /// Distinct values for this field, as cached on the table.
    pub fn options(self, table: &SalesTable) -> &[String] {
        let cats = table.categories();
        match self {
            Field::City => &cats.cities,
            Field::CustomerType => &cats.customer_types,
            Field::Gender => &cats.genders,
        }
    }

    fn value(self, tx: &Transaction) -> &str {
        match self {
            Field::City => &tx.city,
            Field::CustomerType => &tx.customer_type,
            Field::Gender => &tx.gender,
        }
    }
}

/// Per-field selected values.
///
/// An empty set means "every value" for that field, so there is no way to
/// hide all rows by deselecting. Values that never occur in the table are
/// allowed and simply match nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub cities: BTreeSet<String>,
    pub customer_types: BTreeSet<String>,
    pub genders: BTreeSet<String>,
}

impl Selection {
    /// Select every distinct value present in the table.
    pub fn all(table: &SalesTable) -> Self {
        let mut selection = Self::default();
        for field in Field::ALL {
            *selection.values_mut(field) = field.options(table).iter().cloned().collect();
        }
        selection
    }

    pub fn values(&self, field: Field) -> &BTreeSet<String> {
        match field {
            Field::City => &self.cities,
            Field::CustomerType => &self.customer_types,
            Field::Gender => &self.genders,
        }
    }

    pub fn values_mut(&mut self, field: Field) -> &mut BTreeSet<String> {
        match field {
            Field::City => &mut self.cities,
            Field::CustomerType => &mut self.customer_types,
            Field::Gender => &mut self.genders,
        }
    }

    /// Whether a row passes: AND across fields, OR within a field.
    pub fn matches(&self, tx: &Transaction) -> bool {
        Field::ALL.iter().all(|&field| {
            let selected = self.values(field);
            selected.is_empty() || selected.contains(field.value(tx))
        })
    }
}

/// Return indices of rows that pass the selection, in table order.
pub fn filtered_indices(table: &SalesTable, selection: &Selection) -> Vec<usize> {
    table
        .rows()
        .iter()
        .enumerate()
        .filter(|(_, tx)| selection.matches(tx))
        .map(|(i, _)| i)
        .collect()
}

/// Borrow the rows that pass the selection, in table order.
pub fn filtered_rows<'a>(table: &'a SalesTable, selection: &Selection) -> Vec<&'a Transaction> {
    table
        .rows()
        .iter()
        .filter(|tx| selection.matches(tx))
        .collect()
}
