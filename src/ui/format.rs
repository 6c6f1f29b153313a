use crate::config::DisplayConfig;
use crate::data::aggregate::Report;

/// Shown in place of an average when the selection is empty.
pub const NO_DATA: &str = "N/A";

/// `322966.4` → `"CAD $ 322,966"` (whole units, truncated).
pub fn total_sales(display: &DisplayConfig, report: &Report) -> String {
    format!(
        "{} {}",
        display.currency,
        thousands(report.total_sales.trunc() as i64)
    )
}

/// Average sale per transaction with two decimals, or `N/A`.
pub fn average_sale(display: &DisplayConfig, report: &Report) -> String {
    match report.average_sale {
        Some(v) => format!("{} {v:.2}", display.currency),
        None => NO_DATA.to_string(),
    }
}

/// Average rating with one decimal, or `N/A`.
pub fn average_rating(report: &Report) -> String {
    match report.average_rating {
        Some(v) => format!("{v:.1}"),
        None => NO_DATA.to_string(),
    }
}

/// One glyph per whole star.
pub fn stars(display: &DisplayConfig, report: &Report) -> String {
    display.star_glyph.repeat(report.star_count())
}

fn thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
