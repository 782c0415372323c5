use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use super::model::{FireObservation, FireTable, Region, SalesRecord, SalesTable};

// ---------------------------------------------------------------------------
// Schema contract
// ---------------------------------------------------------------------------

/// The supplied table does not match the expected column layout.  Raised
/// before any row is parsed; the loader never substitutes defaults for a
/// missing column.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{table} CSV is missing required column '{column}'")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

const FIRE_COLUMNS: [&str; 4] = ["Date", "Region", "Estimated_fire_area", "Count"];
const SALES_COLUMNS: [&str; 5] = [
    "Date",
    "Vehicle_Type",
    "Automobile_Sales",
    "Advertising_Expenditure",
    "Recession",
];

fn check_columns(
    headers: &csv::StringRecord,
    required: &'static [&'static str],
    table: &'static str,
) -> Result<(), SchemaError> {
    for column in required {
        if !headers.iter().any(|h| h == *column) {
            return Err(SchemaError::MissingColumn { table, column });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Date parsing
// ---------------------------------------------------------------------------

/// The two source datasets use different date notations, so try each known
/// format in turn.  ISO first, then the US slash form, then day-first.
fn parse_date(s: &str) -> Result<NaiveDate> {
    const FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y"];
    for fmt in FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s.trim(), fmt) {
            return Ok(d);
        }
    }
    bail!("'{s}' is not a recognised date")
}

// ---------------------------------------------------------------------------
// Wildfire CSV
// ---------------------------------------------------------------------------

/// Raw row as it appears on disk.  Columns beyond these are ignored.
#[derive(Debug, Deserialize)]
struct RawFireRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Region")]
    region: String,
    #[serde(rename = "Estimated_fire_area")]
    estimated_fire_area: f64,
    #[serde(rename = "Count")]
    pixel_count: f64,
}

/// Load the historical wildfire dataset from a CSV file.
pub fn load_fire_csv(path: &Path) -> Result<FireTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening wildfire CSV {}", path.display()))?;
    read_fire_table(file)
}

/// Parse wildfire rows from any reader (tests feed in-memory strings here).
pub fn read_fire_table<R: Read>(reader: R) -> Result<FireTable> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    check_columns(
        csv_reader.headers().context("reading wildfire CSV headers")?,
        &FIRE_COLUMNS,
        "wildfire",
    )?;

    let mut rows = Vec::new();
    for (row_no, result) in csv_reader.deserialize::<RawFireRow>().enumerate() {
        let raw = result.with_context(|| format!("wildfire CSV row {row_no}"))?;
        let date = parse_date(&raw.date)
            .with_context(|| format!("wildfire CSV row {row_no}: bad Date"))?;
        let region: Region = raw
            .region
            .trim()
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .with_context(|| format!("wildfire CSV row {row_no}: bad Region"))?;

        rows.push(FireObservation::new(
            date,
            region,
            raw.estimated_fire_area,
            raw.pixel_count,
        ));
    }

    Ok(FireTable::from_rows(rows))
}

// ---------------------------------------------------------------------------
// Automobile sales CSV
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawSalesRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Vehicle_Type")]
    vehicle_type: String,
    #[serde(rename = "Automobile_Sales")]
    automobile_sales: f64,
    #[serde(rename = "Advertising_Expenditure")]
    advertising_expenditure: f64,
    /// 0/1 flag in the source data.
    #[serde(rename = "Recession")]
    recession: u8,
}

/// Load the historical automobile sales dataset from a CSV file.
pub fn load_sales_csv(path: &Path) -> Result<SalesTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening sales CSV {}", path.display()))?;
    read_sales_table(file)
}

/// Parse sales rows from any reader.
pub fn read_sales_table<R: Read>(reader: R) -> Result<SalesTable> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    check_columns(
        csv_reader.headers().context("reading sales CSV headers")?,
        &SALES_COLUMNS,
        "sales",
    )?;

    let mut rows = Vec::new();
    for (row_no, result) in csv_reader.deserialize::<RawSalesRow>().enumerate() {
        let raw = result.with_context(|| format!("sales CSV row {row_no}"))?;
        let date = parse_date(&raw.date)
            .with_context(|| format!("sales CSV row {row_no}: bad Date"))?;

        rows.push(SalesRecord {
            date,
            vehicle_type: raw.vehicle_type.trim().to_string(),
            automobile_sales: raw.automobile_sales,
            advertising_expenditure: raw.advertising_expenditure,
            recession: raw.recession != 0,
        });
    }

    Ok(SalesTable::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Month;

    const FIRE_CSV: &str = "\
Date,Region,Estimated_fire_area,Mean_confidence,Count
2005-01-04,NSW,10.5,78.0,24
2005-01-05,TA,3.25,60.1,7
";

    const SALES_CSV: &str = "\
Date,Year,Vehicle_Type,Automobile_Sales,Advertising_Expenditure,Recession
1/31/1980,1980,Supperminicar,551.0,1558.0,1
2/29/1980,1980,Sports,612.5,2100.0,0
";

    #[test]
    fn parses_fire_rows_and_derives_calendar_fields() {
        let table = read_fire_table(FIRE_CSV.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].region, Region::Nsw);
        assert_eq!(table.rows[0].month, Month::January);
        assert_eq!(table.rows[0].year, 2005);
        assert_eq!(table.rows[1].pixel_count, 7.0);
        assert_eq!(table.years, vec![2005]);
    }

    #[test]
    fn parses_sales_rows_with_us_dates() {
        let table = read_sales_table(SALES_CSV.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.rows[0].recession);
        assert!(!table.rows[1].recession);
        assert_eq!(
            table.rows[0].date,
            NaiveDate::from_ymd_opt(1980, 1, 31).unwrap()
        );
        assert_eq!(table.vehicle_types, vec!["Sports", "Supperminicar"]);
    }

    #[test]
    fn missing_column_fails_fast() {
        let csv = "Date,Region,Count\n2005-01-04,NSW,24\n";
        let err = read_fire_table(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Estimated_fire_area"));
    }

    #[test]
    fn unknown_region_is_rejected() {
        let csv = "Date,Region,Estimated_fire_area,Count\n2005-01-04,XX,1.0,1\n";
        assert!(read_fire_table(csv.as_bytes()).is_err());
    }

    #[test]
    fn bad_date_is_rejected() {
        let csv = "Date,Region,Estimated_fire_area,Count\nyesterday,NSW,1.0,1\n";
        assert!(read_fire_table(csv.as_bytes()).is_err());
    }

    #[test]
    fn extra_columns_are_ignored() {
        // FIRE_CSV carries Mean_confidence, which the model does not use.
        let table = read_fire_table(FIRE_CSV.as_bytes()).unwrap();
        assert_eq!(table.rows[0].estimated_fire_area, 10.5);
    }
}
