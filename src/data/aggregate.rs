use std::collections::BTreeMap;

use serde::Serialize;

use super::model::Transaction;

// ---------------------------------------------------------------------------
// Report – KPIs and grouped totals for one selection
// ---------------------------------------------------------------------------

/// Summary of a filtered set of transactions.
///
/// Averages are `None` when there are no rows; callers present that as
/// "no data" rather than a number.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub row_count: usize,
    pub total_sales: f64,
    /// Mean rating rounded to 1 decimal.
    pub average_rating: Option<f64>,
    /// Mean transaction total rounded to 2 decimals.
    pub average_sale: Option<f64>,
    /// Product line → summed total, ascending by total.
    pub sales_by_product: Vec<(String, f64)>,
    /// Hour of day → summed total, ascending by hour.
    pub sales_by_hour: Vec<(u8, f64)>,
}

impl Report {
    /// Compute every aggregate from scratch over `rows`.
    pub fn compute<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut row_count = 0usize;
        let mut total_sales = 0.0;
        let mut rating_sum = 0.0;
        let mut by_product: BTreeMap<&str, f64> = BTreeMap::new();
        let mut by_hour: BTreeMap<u8, f64> = BTreeMap::new();

        for tx in rows {
            row_count += 1;
            total_sales += tx.total;
            rating_sum += tx.rating;
            *by_product.entry(tx.product_line.as_str()).or_default() += tx.total;
            *by_hour.entry(tx.hour).or_default() += tx.total;
        }

        let mean = |sum: f64| (row_count > 0).then(|| sum / row_count as f64);

        // BTreeMap iteration gives name order; the stable sort keeps it for ties.
        let mut sales_by_product: Vec<(String, f64)> = by_product
            .into_iter()
            .map(|(name, total)| (name.to_string(), total))
            .collect();
        sales_by_product.sort_by(|a, b| a.1.total_cmp(&b.1));

        Report {
            row_count,
            total_sales,
            average_rating: mean(rating_sum).map(|v| round_to(v, 1)),
            average_sale: mean(total_sales).map(|v| round_to(v, 2)),
            sales_by_product,
            sales_by_hour: by_hour.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Whole stars for the rating: the rounded average, zero without data.
    /// Halves round away from zero (6.5 gives 7), not to even.
    pub fn star_count(&self) -> usize {
        self.average_rating
            .map(|r| r.round().max(0.0) as usize)
            .unwrap_or(0)
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filtered_rows, Selection};
    use crate::data::model::tests::row;
    use crate::data::model::SalesTable;

    fn table() -> SalesTable {
        SalesTable::from_rows(vec![
            row("A", "Member", "F", "Health", 10.0, "10:15:00", 8.0),
            row("B", "Normal", "M", "Sports", 20.0, "11:30:00", 6.0),
            row("A", "Normal", "F", "Sports", 5.0, "10:45:00", 7.0),
        ])
    }

    #[test]
    fn scenario_city_a() {
        let table = table();
        let selection = Selection {
            cities: ["A".to_string()].into(),
            ..Selection::all(&table)
        };
        let report = Report::compute(filtered_rows(&table, &selection));

        assert_eq!(report.row_count, 2);
        assert_eq!(report.total_sales, 15.0);
        assert_eq!(report.average_rating, Some(7.5));
        assert_eq!(report.average_sale, Some(7.5));
        assert_eq!(
            report.sales_by_product,
            vec![("Sports".to_string(), 5.0), ("Health".to_string(), 10.0)]
        );
        assert_eq!(report.sales_by_hour, vec![(10, 15.0)]);
    }

    #[test]
    fn product_totals_add_up_to_total_sales() {
        let table = table();
        let report = Report::compute(table.rows());
        let grouped: f64 = report.sales_by_product.iter().map(|(_, v)| v).sum();
        let hourly: f64 = report.sales_by_hour.iter().map(|(_, v)| v).sum();
        assert!((grouped - report.total_sales).abs() < 1e-9);
        assert!((hourly - report.total_sales).abs() < 1e-9);
    }

    #[test]
    fn product_totals_are_ascending_with_ties_in_name_order() {
        let rows = vec![
            row("A", "Member", "F", "Sports", 30.0, "09:00:00", 5.0),
            row("A", "Member", "F", "Food", 10.0, "09:00:00", 5.0),
            row("A", "Member", "F", "Electronic", 10.0, "09:00:00", 5.0),
            row("A", "Member", "F", "Beauty", 40.0, "09:00:00", 5.0),
        ];
        let report = Report::compute(&rows);
        let names: Vec<&str> = report
            .sales_by_product
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(names, vec!["Electronic", "Food", "Sports", "Beauty"]);
        assert!(report
            .sales_by_product
            .windows(2)
            .all(|w| w[0].1 <= w[1].1));
    }

    #[test]
    fn hours_are_in_natural_order_without_gaps_filled() {
        let rows = vec![
            row("A", "Member", "F", "Food", 1.0, "19:00:00", 5.0),
            row("A", "Member", "F", "Food", 2.0, "10:59:59", 5.0),
            row("A", "Member", "F", "Food", 3.0, "19:30:00", 5.0),
        ];
        let report = Report::compute(&rows);
        assert_eq!(report.sales_by_hour, vec![(10, 2.0), (19, 4.0)]);
    }

    #[test]
    fn empty_input_reports_no_data() {
        let report = Report::compute(std::iter::empty::<&Transaction>());
        assert!(report.is_empty());
        assert_eq!(report.total_sales, 0.0);
        assert_eq!(report.average_rating, None);
        assert_eq!(report.average_sale, None);
        assert!(report.sales_by_product.is_empty());
        assert!(report.sales_by_hour.is_empty());
        assert_eq!(report.star_count(), 0);
    }

    #[test]
    fn averages_are_rounded() {
        let rows = vec![
            row("A", "Member", "F", "Food", 10.004, "09:00:00", 6.94),
            row("A", "Member", "F", "Food", 10.0, "09:00:00", 7.0),
        ];
        let report = Report::compute(&rows);
        assert_eq!(report.average_rating, Some(7.0));
        assert_eq!(report.average_sale, Some(10.0));
        assert_eq!(report.star_count(), 7);
    }

    #[test]
    fn round_to_goes_half_away_from_zero() {
        assert_eq!(round_to(6.75, 1), 6.8);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(322.966, 2), 322.97);
    }

    #[test]
    fn half_star_rounds_up() {
        let rows = vec![row("A", "Member", "F", "Food", 1.0, "09:00:00", 6.5)];
        let report = Report::compute(&rows);
        assert_eq!(report.average_rating, Some(6.5));
        assert_eq!(report.star_count(), 7);
    }
}
