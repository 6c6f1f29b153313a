use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Plot};

use crate::color::ACCENT;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Hourly sales (vertical bars, hour on x)
// ---------------------------------------------------------------------------

/// Render total sales per hour of day.
pub fn hourly_sales(ui: &mut Ui, state: &AppState) {
    ui.strong("Hourly Sales");

    let bars: Vec<Bar> = state
        .report
        .sales_by_hour
        .iter()
        .map(|&(hour, total)| {
            Bar::new(hour as f64, total)
                .name(format!("{hour}:00"))
                .fill(ACCENT)
                .width(0.8)
        })
        .collect();

    Plot::new("hourly_sales")
        .height(320.0)
        .x_axis_label("hour")
        .y_axis_label("Total")
        .show_grid([true, false])
        .x_grid_spacer(egui_plot::uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
        .x_axis_formatter(|mark: GridMark, _range| {
            let hour = mark.value.round();
            if (hour - mark.value).abs() > 1e-6 || !(0.0..24.0).contains(&hour) {
                return String::new();
            }
            format!("{}", hour as i64)
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Total"));
        });
}

// ---------------------------------------------------------------------------
// Sales by product line (horizontal bars, smallest at the top)
// ---------------------------------------------------------------------------

/// Render total sales per product line, ascending from the top.
pub fn product_sales(ui: &mut Ui, state: &AppState) {
    ui.strong("Sales By Product");

    let sales = &state.report.sales_by_product;
    let n = sales.len();

    // Bar i sits at y = n - 1 - i so the first (smallest) entry is on top.
    let bars: Vec<Bar> = sales
        .iter()
        .enumerate()
        .map(|(i, (name, total))| {
            let fill = state
                .product_colors
                .as_ref()
                .map(|cm| cm.color_for(name))
                .unwrap_or(ACCENT);
            Bar::new((n - 1 - i) as f64, *total)
                .name(name)
                .fill(fill)
                .width(0.7)
        })
        .collect();

    let labels: Vec<String> = sales.iter().map(|(name, _)| name.clone()).collect();

    Plot::new("product_sales")
        .height(320.0)
        .x_axis_label("Total")
        .show_grid([false, false])
        .y_grid_spacer(egui_plot::uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
        .y_axis_formatter(move |mark: GridMark, _range| {
            let pos = mark.value.round();
            if pos < 0.0 || (pos - mark.value).abs() > 1e-6 {
                return String::new();
            }
            let pos = pos as usize;
            if pos >= labels.len() {
                return String::new();
            }
            labels[labels.len() - 1 - pos].clone()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Total").horizontal());
        });
}
