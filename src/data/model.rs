use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// Region – the 7 fixed Australian region codes
// ---------------------------------------------------------------------------

/// One of the seven region codes used by the wildfire dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Region {
    Nsw,
    Nt,
    Ql,
    Sa,
    Ta,
    Vi,
    Wa,
}

impl Region {
    pub const ALL: [Region; 7] = [
        Region::Nsw,
        Region::Nt,
        Region::Ql,
        Region::Sa,
        Region::Ta,
        Region::Vi,
        Region::Wa,
    ];

    /// Two-letter code as it appears in the CSV.
    pub fn code(&self) -> &'static str {
        match self {
            Region::Nsw => "NSW",
            Region::Nt => "NT",
            Region::Ql => "QL",
            Region::Sa => "SA",
            Region::Ta => "TA",
            Region::Vi => "VI",
            Region::Wa => "WA",
        }
    }

    /// Full name shown next to the radio button.
    pub fn full_name(&self) -> &'static str {
        match self {
            Region::Nsw => "New South Wales",
            Region::Nt => "Northern Territory",
            Region::Ql => "Queensland",
            Region::Sa => "South Australia",
            Region::Ta => "Tasmania",
            Region::Vi => "Victoria",
            Region::Wa => "Western Australia",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.code() == s)
            .ok_or_else(|| format!("unknown region code '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// Month – calendar-ordered month names
// ---------------------------------------------------------------------------

/// Calendar month. The derived `Ord` follows calendar order (January first),
/// which is what the monthly charts sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Month from a 1-based chrono month number.
    pub fn from_number(n: u32) -> Option<Month> {
        Month::ALL.get(n.checked_sub(1)? as usize).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Three-letter abbreviation for bar-chart axis labels.
    pub fn abbrev(&self) -> &'static str {
        &self.name()[..3]
    }

    /// 1-based month number.
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// FireObservation – one row of the wildfire dataset
// ---------------------------------------------------------------------------

/// A single recorded fire observation.
#[derive(Debug, Clone)]
pub struct FireObservation {
    pub date: NaiveDate,
    pub region: Region,
    pub estimated_fire_area: f64,
    /// Count of pixels for presumed vegetation fires.
    pub pixel_count: f64,
    /// Derived from `date`; stored so grouping never re-parses.
    pub month: Month,
    pub year: i32,
}

impl FireObservation {
    pub fn new(
        date: NaiveDate,
        region: Region,
        estimated_fire_area: f64,
        pixel_count: f64,
    ) -> Self {
        // month() is always 1..=12 so from_number cannot fail here
        let month = Month::from_number(date.month()).unwrap_or(Month::January);
        FireObservation {
            date,
            region,
            estimated_fire_area,
            pixel_count,
            month,
            year: date.year(),
        }
    }
}

// ---------------------------------------------------------------------------
// SalesRecord – one row of the automobile sales dataset
// ---------------------------------------------------------------------------

/// A single automobile sales / advertising observation.
#[derive(Debug, Clone)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub vehicle_type: String,
    pub automobile_sales: f64,
    pub advertising_expenditure: f64,
    /// True when the observation falls inside a recession period.
    pub recession: bool,
}

// ---------------------------------------------------------------------------
// Tables – immutable after load, with pre-computed dropdown domains
// ---------------------------------------------------------------------------

/// The full wildfire table with the unique years feeding the year dropdown.
#[derive(Debug, Clone, Default)]
pub struct FireTable {
    pub rows: Vec<FireObservation>,
    /// Sorted unique years present in the data.
    pub years: Vec<i32>,
}

impl FireTable {
    pub fn from_rows(rows: Vec<FireObservation>) -> Self {
        let years: BTreeSet<i32> = rows.iter().map(|r| r.year).collect();
        FireTable {
            rows,
            years: years.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The full sales table with the unique vehicle types feeding the dropdown.
#[derive(Debug, Clone, Default)]
pub struct SalesTable {
    pub rows: Vec<SalesRecord>,
    /// Sorted unique vehicle type labels.
    pub vehicle_types: Vec<String>,
}

impl SalesTable {
    pub fn from_rows(rows: Vec<SalesRecord>) -> Self {
        let vehicle_types: BTreeSet<String> =
            rows.iter().map(|r| r.vehicle_type.clone()).collect();
        SalesTable {
            rows,
            vehicle_types: vehicle_types.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_code_round_trip() {
        for region in Region::ALL {
            assert_eq!(region.code().parse::<Region>().unwrap(), region);
        }
        assert!("QLD".parse::<Region>().is_err());
    }

    #[test]
    fn month_order_is_calendar_order() {
        assert!(Month::January < Month::February);
        assert!(Month::September < Month::December);
        assert_eq!(Month::from_number(1), Some(Month::January));
        assert_eq!(Month::from_number(12), Some(Month::December));
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
    }

    #[test]
    fn fire_observation_derives_calendar_fields() {
        let date = NaiveDate::from_ymd_opt(2005, 9, 17).unwrap();
        let obs = FireObservation::new(date, Region::Nsw, 12.5, 30.0);
        assert_eq!(obs.month, Month::September);
        assert_eq!(obs.year, 2005);
    }

    #[test]
    fn tables_index_unique_values() {
        let d = |y: i32| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
        let fires = FireTable::from_rows(vec![
            FireObservation::new(d(2006), Region::Nsw, 1.0, 1.0),
            FireObservation::new(d(2005), Region::Ta, 1.0, 1.0),
            FireObservation::new(d(2005), Region::Nsw, 1.0, 1.0),
        ]);
        assert_eq!(fires.years, vec![2005, 2006]);

        let sales = SalesTable::from_rows(vec![
            SalesRecord {
                date: d(1980),
                vehicle_type: "Sports".into(),
                automobile_sales: 1.0,
                advertising_expenditure: 1.0,
                recession: false,
            },
            SalesRecord {
                date: d(1981),
                vehicle_type: "Executivecar".into(),
                automobile_sales: 1.0,
                advertising_expenditure: 1.0,
                recession: true,
            },
        ]);
        assert_eq!(sales.vehicle_types, vec!["Executivecar", "Sports"]);
    }
}
