use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveTime};

use sales_dashboard::config::SourceConfig;
use sales_dashboard::data::model::Transaction;
use sales_dashboard::data::sample::{write_workbook, SheetLayout};

const CITIES: [&str; 3] = ["Yangon", "Mandalay", "Naypyitaw"];
const CUSTOMER_TYPES: [&str; 2] = ["Member", "Normal"];
const GENDERS: [&str; 2] = ["Female", "Male"];
const PRODUCT_LINES: [&str; 6] = [
    "Health and beauty",
    "Electronic accessories",
    "Home and lifestyle",
    "Sports and travel",
    "Food and beverages",
    "Fashion accessories",
];
const PAYMENTS: [&str; 3] = ["Ewallet", "Cash", "Credit card"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn main() -> Result<()> {
    let source = SourceConfig::default();
    let output: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| source.path.clone());

    let mut rng = SimpleRng::new(42);
    let first_day = NaiveDate::from_ymd_opt(2019, 1, 1).context("invalid start date")?;

    let rows: Vec<Transaction> = (0..source.row_limit)
        .map(|_| {
            let unit_price = round2(rng.range(10.0, 100.0));
            let quantity = 1 + (rng.next_u64() % 10) as u32;
            let total = round2(unit_price * quantity as f64 * 1.05);
            let date = first_day + Duration::days((rng.next_u64() % 89) as i64);
            // Store hours 10:00–20:59.
            let seconds = 10 * 3600 + (rng.next_u64() % (11 * 3600)) as u32;
            let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
                .unwrap_or(NaiveTime::MIN);
            let rating = (rng.range(4.0, 10.0) * 10.0).round() / 10.0;

            Transaction::new(
                rng.pick(&CITIES).to_string(),
                rng.pick(&CUSTOMER_TYPES).to_string(),
                rng.pick(&GENDERS).to_string(),
                rng.pick(&PRODUCT_LINES).to_string(),
                unit_price,
                quantity,
                total,
                date,
                time,
                rng.pick(&PAYMENTS).to_string(),
                rating,
            )
        })
        .collect();

    write_workbook(&output, &SheetLayout::for_source(&source), &rows)
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "Wrote {} transactions to {} (sheet '{}', columns {})",
        rows.len(),
        output.display(),
        source.sheet,
        source.columns
    );
    Ok(())
}
