//! egui rendering: filter panel, KPIs, charts and the row table.

pub mod format;
pub mod panels;
pub mod plot;
pub mod table;
