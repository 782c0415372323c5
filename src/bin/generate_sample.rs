//! Writes two small deterministic CSVs so the dashboard can be exercised
//! without downloading the original datasets:
//! `wildfires_sample.csv` and `auto_sales_sample.csv` in the working
//! directory.

use anyhow::{Context, Result};

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const REGIONS: [&str; 7] = ["NSW", "NT", "QL", "SA", "TA", "VI", "WA"];
const VEHICLE_TYPES: [&str; 5] = [
    "Supperminicar",
    "Smallfamiliycar",
    "Mediumfamilycar",
    "Executivecar",
    "Sports",
];

/// Southern-hemisphere fire season: hot months get a larger base area.
fn seasonal_factor(month: u32) -> f64 {
    match month {
        12 | 1 | 2 => 3.0,
        3 | 11 => 2.0,
        4 | 10 => 1.2,
        _ => 0.6,
    }
}

fn write_wildfires(rng: &mut SimpleRng) -> Result<usize> {
    let mut writer =
        csv::Writer::from_path("wildfires_sample.csv").context("creating wildfires_sample.csv")?;
    writer.write_record(["Date", "Region", "Estimated_fire_area", "Count"])?;

    let mut rows = 0usize;
    for year in 2004..=2008 {
        for month in 1..=12u32 {
            for (i, region) in REGIONS.iter().enumerate() {
                // Two observations per region per month, on fixed days.
                for day in [7, 21] {
                    let base = seasonal_factor(month) * (4.0 + i as f64);
                    let area = rng.gauss(base, base * 0.3).max(0.1);
                    let count = rng.gauss(area * 2.5, area * 0.5).max(1.0).round();
                    writer.write_record([
                        format!("{year}-{month:02}-{day:02}"),
                        (*region).to_string(),
                        format!("{area:.2}"),
                        format!("{count}"),
                    ])?;
                    rows += 1;
                }
            }
        }
    }
    writer.flush()?;
    Ok(rows)
}

fn write_auto_sales(rng: &mut SimpleRng) -> Result<usize> {
    let mut writer = csv::Writer::from_path("auto_sales_sample.csv")
        .context("creating auto_sales_sample.csv")?;
    writer.write_record([
        "Date",
        "Vehicle_Type",
        "Automobile_Sales",
        "Advertising_Expenditure",
        "Recession",
    ])?;

    let mut rows = 0usize;
    for year in 1980..=1999 {
        let recession = matches!(year, 1980..=1982 | 1991);
        for month in 1..=12u32 {
            for (i, vehicle_type) in VEHICLE_TYPES.iter().enumerate() {
                let base_sales = 400.0 + 120.0 * i as f64;
                let slump = if recession { 0.7 } else { 1.0 };
                let sales = rng.gauss(base_sales * slump, 40.0).max(10.0);
                let expenditure = rng
                    .gauss(1200.0 + 200.0 * i as f64, 150.0)
                    .max(50.0);
                writer.write_record([
                    format!("{month}/28/{year}"),
                    (*vehicle_type).to_string(),
                    format!("{sales:.1}"),
                    format!("{expenditure:.1}"),
                    if recession { "1" } else { "0" }.to_string(),
                ])?;
                rows += 1;
            }
        }
    }
    writer.flush()?;
    Ok(rows)
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let fire_rows = write_wildfires(&mut rng)?;
    let sales_rows = write_auto_sales(&mut rng)?;

    println!(
        "Wrote {fire_rows} fire observations to wildfires_sample.csv and \
         {sales_rows} sales records to auto_sales_sample.csv"
    );
    Ok(())
}
