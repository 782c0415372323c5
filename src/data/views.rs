use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::model::{FireTable, Month, Region, SalesTable};

// ---------------------------------------------------------------------------
// Selection – the three control values driving every recompute
// ---------------------------------------------------------------------------

/// Current values of the three filter controls.  Owned by the UI state and
/// passed by reference into [`compute_views`] on every interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub vehicle_type: String,
    pub region: Region,
    pub year: i32,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            // Initial values shown by the dashboard before any interaction.
            // "Supperminicar" is the source dataset's own spelling.
            vehicle_type: "Supperminicar".to_string(),
            region: Region::Nsw,
            year: 2005,
        }
    }
}

// ---------------------------------------------------------------------------
// ViewBundle – the six chart series, fixed slot order
// ---------------------------------------------------------------------------

/// All six chart series produced by one recompute, in the fixed order the
/// dashboard renders them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewBundle {
    /// Total advertising expenditure per vehicle type over recession rows,
    /// sorted by vehicle type (pie chart).
    pub recession_ad_share: Vec<(String, f64)>,
    /// (date, sales) for the selected vehicle type, date ascending (line).
    pub vehicle_sales: Vec<(NaiveDate, f64)>,
    /// Mean estimated fire area per month for (region, year), calendar
    /// order (pie chart).
    pub monthly_fire_area: Vec<(Month, f64)>,
    /// Mean vegetation-fire pixel count per month, calendar order (bars).
    pub monthly_pixel_count: Vec<(Month, f64)>,
    /// Raw (date, advertising expenditure) for the selected vehicle type;
    /// the chart layer bins these (histogram).
    pub ad_expenditure: Vec<(NaiveDate, f64)>,
    /// Raw (date, sales) for the selected vehicle type (scatter).
    pub sales_points: Vec<(NaiveDate, f64)>,
}

// ---------------------------------------------------------------------------
// compute_views – the aggregation & filtering core
// ---------------------------------------------------------------------------

/// Recompute the six chart series for the current selection.
///
/// Pure: no I/O, no state carried between calls, identical inputs always
/// yield identical output.  Filters that match nothing produce empty series;
/// groups with zero rows are absent from the output rather than zeroed.
/// Selection values outside the data's domain are not an error, they simply
/// match no rows.
pub fn compute_views(fires: &FireTable, sales: &SalesTable, selection: &Selection) -> ViewBundle {
    // 1. Advertising expenditure per vehicle type during recessions.
    let mut expenditure_by_type: BTreeMap<&str, f64> = BTreeMap::new();
    for row in sales.rows.iter().filter(|r| r.recession) {
        *expenditure_by_type.entry(&row.vehicle_type).or_default() +=
            row.advertising_expenditure;
    }
    let recession_ad_share: Vec<(String, f64)> = expenditure_by_type
        .into_iter()
        .map(|(vehicle_type, total)| (vehicle_type.to_string(), total))
        .collect();

    // 2. Chronological sales series for the selected vehicle type.  Also the
    //    filtered set reused by the histogram (5) and scatter (6) series.
    let mut vehicle_rows: Vec<_> = sales
        .rows
        .iter()
        .filter(|r| r.vehicle_type == selection.vehicle_type)
        .collect();
    vehicle_rows.sort_by_key(|r| r.date);

    let vehicle_sales: Vec<(NaiveDate, f64)> = vehicle_rows
        .iter()
        .map(|r| (r.date, r.automobile_sales))
        .collect();

    // 3 & 4. Monthly means over the (region, year) slice of the fire table.
    let mut monthly: BTreeMap<Month, (f64, f64, usize)> = BTreeMap::new();
    for row in fires
        .rows
        .iter()
        .filter(|r| r.region == selection.region && r.year == selection.year)
    {
        let entry = monthly.entry(row.month).or_insert((0.0, 0.0, 0));
        entry.0 += row.estimated_fire_area;
        entry.1 += row.pixel_count;
        entry.2 += 1;
    }
    let monthly_fire_area: Vec<(Month, f64)> = monthly
        .iter()
        .map(|(&month, &(area_sum, _, n))| (month, area_sum / n as f64))
        .collect();
    let monthly_pixel_count: Vec<(Month, f64)> = monthly
        .iter()
        .map(|(&month, &(_, pixel_sum, n))| (month, pixel_sum / n as f64))
        .collect();

    // 5 & 6. Raw pairs over the op-2 filtered set.
    let ad_expenditure: Vec<(NaiveDate, f64)> = vehicle_rows
        .iter()
        .map(|r| (r.date, r.advertising_expenditure))
        .collect();
    let sales_points: Vec<(NaiveDate, f64)> = vehicle_rows
        .iter()
        .map(|r| (r.date, r.automobile_sales))
        .collect();

    ViewBundle {
        recession_ad_share,
        vehicle_sales,
        monthly_fire_area,
        monthly_pixel_count,
        ad_expenditure,
        sales_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{FireObservation, SalesRecord};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sales_row(
        date: NaiveDate,
        vehicle_type: &str,
        sales: f64,
        expenditure: f64,
        recession: bool,
    ) -> SalesRecord {
        SalesRecord {
            date,
            vehicle_type: vehicle_type.to_string(),
            automobile_sales: sales,
            advertising_expenditure: expenditure,
            recession,
        }
    }

    fn sample_fires() -> FireTable {
        FireTable::from_rows(vec![
            FireObservation::new(date(2005, 1, 4), Region::Nsw, 10.0, 20.0),
            FireObservation::new(date(2005, 1, 18), Region::Nsw, 20.0, 40.0),
            FireObservation::new(date(2005, 3, 2), Region::Nsw, 7.0, 14.0),
            FireObservation::new(date(2006, 1, 4), Region::Nsw, 99.0, 99.0),
            FireObservation::new(date(2005, 1, 4), Region::Ta, 50.0, 50.0),
        ])
    }

    fn sample_sales() -> SalesTable {
        SalesTable::from_rows(vec![
            sales_row(date(1982, 3, 31), "Supperminicar", 500.0, 900.0, true),
            sales_row(date(1980, 1, 31), "Supperminicar", 551.0, 1558.0, true),
            sales_row(date(1981, 6, 30), "Supperminicar", 620.0, 1200.0, false),
            sales_row(date(1980, 1, 31), "Sports", 300.0, 2100.0, false),
        ])
    }

    #[test]
    fn recession_share_excludes_non_recession_rows_and_sums_groups() {
        let sales = SalesTable::from_rows(vec![
            sales_row(date(1980, 1, 31), "A", 1.0, 10.0, true),
            sales_row(date(1980, 2, 29), "A", 1.0, 5.0, true),
            sales_row(date(1980, 3, 31), "B", 1.0, 100.0, false),
        ]);
        let views = compute_views(&FireTable::default(), &sales, &Selection::default());
        assert_eq!(views.recession_ad_share, vec![("A".to_string(), 15.0)]);
    }

    #[test]
    fn sales_series_is_sorted_by_date_regardless_of_input_order() {
        let views = compute_views(&sample_fires(), &sample_sales(), &Selection::default());
        assert_eq!(
            views.vehicle_sales,
            vec![
                (date(1980, 1, 31), 551.0),
                (date(1981, 6, 30), 620.0),
                (date(1982, 3, 31), 500.0),
            ]
        );
    }

    #[test]
    fn monthly_fire_area_is_mean_per_month() {
        let selection = Selection {
            region: Region::Nsw,
            year: 2005,
            ..Selection::default()
        };
        let views = compute_views(&sample_fires(), &sample_sales(), &selection);
        // January: mean of 10 and 20; March: single row.  2006 and TA rows
        // are filtered out, February is absent rather than zero.
        assert_eq!(
            views.monthly_fire_area,
            vec![(Month::January, 15.0), (Month::March, 7.0)]
        );
        assert_eq!(
            views.monthly_pixel_count,
            vec![(Month::January, 30.0), (Month::March, 14.0)]
        );
    }

    #[test]
    fn no_matching_fire_rows_yields_empty_monthly_series() {
        let selection = Selection {
            region: Region::Wa,
            year: 2005,
            ..Selection::default()
        };
        let views = compute_views(&sample_fires(), &sample_sales(), &selection);
        assert!(views.monthly_fire_area.is_empty());
        assert!(views.monthly_pixel_count.is_empty());

        let selection = Selection {
            region: Region::Nsw,
            year: 1999,
            ..Selection::default()
        };
        let views = compute_views(&sample_fires(), &sample_sales(), &selection);
        assert!(views.monthly_fire_area.is_empty());
    }

    #[test]
    fn unknown_vehicle_type_yields_empty_sales_series() {
        let selection = Selection {
            vehicle_type: "Hovercraft".to_string(),
            ..Selection::default()
        };
        let views = compute_views(&sample_fires(), &sample_sales(), &selection);
        assert!(views.vehicle_sales.is_empty());
        assert!(views.ad_expenditure.is_empty());
        assert!(views.sales_points.is_empty());
    }

    #[test]
    fn no_recession_rows_yields_empty_share() {
        let sales = SalesTable::from_rows(vec![sales_row(
            date(1980, 1, 31),
            "Sports",
            1.0,
            1.0,
            false,
        )]);
        let views = compute_views(&FireTable::default(), &sales, &Selection::default());
        assert!(views.recession_ad_share.is_empty());
    }

    #[test]
    fn empty_tables_are_not_an_error() {
        let views = compute_views(
            &FireTable::default(),
            &SalesTable::default(),
            &Selection::default(),
        );
        assert_eq!(views, ViewBundle::default());
    }

    #[test]
    fn compute_views_is_idempotent() {
        let fires = sample_fires();
        let sales = sample_sales();
        let selection = Selection::default();
        assert_eq!(
            compute_views(&fires, &sales, &selection),
            compute_views(&fires, &sales, &selection)
        );
    }

    #[test]
    fn histogram_and_scatter_reuse_the_vehicle_filter() {
        let views = compute_views(&sample_fires(), &sample_sales(), &Selection::default());
        assert_eq!(
            views.ad_expenditure,
            vec![
                (date(1980, 1, 31), 1558.0),
                (date(1981, 6, 30), 1200.0),
                (date(1982, 3, 31), 900.0),
            ]
        );
        assert_eq!(views.sales_points, views.vehicle_sales);
    }
}
