//! Interactive sales dashboard over a spreadsheet of retail transactions.
//!
//! The data layer (`data`) loads the sheet once, filters it by city,
//! customer type and gender, and aggregates the selection into a
//! [`data::aggregate::Report`]. The `ui` and `app` modules render that
//! report with egui; `cli` prints it without a window.

pub mod app;
pub mod cli;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;
