use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use super::{format, plot, table};
use crate::data::filter::Field;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Please Filter Here:");
    ui.separator();

    let Some(table) = state.table() else {
        ui.label("No data loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for field in Field::ALL {
                let options = field.options(&table);
                let selected = state.selection.values(field);

                // An empty set selects everything.
                let n_selected = if selected.is_empty() {
                    options.len()
                } else {
                    selected.len()
                };
                let header_text = format!("Select {}  ({n_selected}/{})", field.label(), options.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(field.label())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all(field);
                        }

                        for value in options {
                            let selected = state.selection.values(field);
                            let mut checked = selected.is_empty() || selected.contains(value);
                            if ui.checkbox(&mut checked, value.as_str()).changed() {
                                if state.selection.values(field).is_empty() {
                                    // Leaving the implicit "all" state: keep everything
                                    // except the value just unticked.
                                    state.select_all(field);
                                }
                                state.toggle_value(field, value);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.cache.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(cache) = &state.cache {
            ui.label(format!(
                "{} transactions loaded, {} selected",
                cache.table().len(),
                state.visible_indices.len()
            ));
            if state.stale {
                ui.label(RichText::new("file changed on disk, reload to refresh").italics());
            }
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – KPIs, charts, selected rows
// ---------------------------------------------------------------------------

/// Render the dashboard body.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    if state.cache.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a workbook to view sales  (File → Open…)");
        });
        return;
    }

    ui.heading("📊 Interactive Sales Dashboard");
    ui.add_space(12.0);

    let report = &state.report;
    let display = &state.display;

    ui.columns(3, |cols| {
        kpi(&mut cols[0], "Total Sales:", &format::total_sales(display, report));
        kpi(
            &mut cols[1],
            "Average Rating:",
            &format!(
                "{} {}",
                format::average_rating(report),
                format::stars(display, report)
            ),
        );
        kpi(
            &mut cols[2],
            "Average Sale Per Transaction:",
            &format::average_sale(display, report),
        );
    });

    ui.separator();

    if report.is_empty() {
        ui.label("No transactions match the current selection.");
    }

    ui.columns(2, |cols| {
        plot::hourly_sales(&mut cols[0], state);
        plot::product_sales(&mut cols[1], state);
    });

    ui.separator();

    egui::CollapsingHeader::new("Selected transactions")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            table::selected_rows(ui, state);
        });
}

fn kpi(ui: &mut Ui, title: &str, value: &str) {
    ui.label(RichText::new(title).size(16.0));
    ui.label(RichText::new(value).size(22.0).strong());
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sales data")
        .add_filter("Supported files", &["xlsx", "xlsm", "xlsb", "xls", "ods", "csv"])
        .add_filter("Excel", &["xlsx", "xlsm", "xlsb", "xls"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        // Same sheet layout as the current source, different file.
        let mut source = state
            .cache
            .as_ref()
            .map(|c| c.source().clone())
            .unwrap_or_default();
        source.path = path;

        if let Err(e) = state.open(source) {
            log::error!("Failed to load file: {e}");
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}
