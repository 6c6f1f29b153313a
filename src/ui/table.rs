use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const HEADERS: [&str; 11] = [
    "City",
    "Customer type",
    "Gender",
    "Product line",
    "Unit price",
    "Quantity",
    "Total",
    "Date",
    "Time",
    "Payment",
    "Rating",
];

/// Scrollable table of the transactions passing the current selection.
pub fn selected_rows(ui: &mut Ui, state: &AppState) {
    let Some(table) = state.table() else {
        return;
    };
    let rows = table.rows();
    let visible = &state.visible_indices;

    TableBuilder::new(ui)
        .striped(true)
        .max_scroll_height(280.0)
        .columns(Column::auto().at_least(60.0), HEADERS.len())
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, visible.len(), |mut row| {
                let tx = &rows[visible[row.index()]];
                let cells = [
                    tx.city.clone(),
                    tx.customer_type.clone(),
                    tx.gender.clone(),
                    tx.product_line.clone(),
                    format!("{:.2}", tx.unit_price),
                    tx.quantity.to_string(),
                    format!("{:.2}", tx.total),
                    tx.date.format("%Y-%m-%d").to_string(),
                    tx.time.format("%H:%M:%S").to_string(),
                    tx.payment.clone(),
                    format!("{:.1}", tx.rating),
                ];
                for text in cells {
                    row.col(|ui| {
                        ui.label(text);
                    });
                }
            });
        });
}
