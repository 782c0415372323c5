use crate::color::ColorMap;
use crate::data::model::{FireTable, Month, Region, SalesTable};
use crate::data::views::{Selection, ViewBundle, compute_views};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Wildfire table (None until loaded).
    pub fire_table: Option<FireTable>,

    /// Automobile sales table (None until loaded).
    pub sales_table: Option<SalesTable>,

    /// Current values of the three filter controls.
    pub selection: Selection,

    /// Chart series for the current selection (cached, rebuilt on change).
    pub views: Option<ViewBundle>,

    /// Colours for pie slices keyed by vehicle type.
    pub vehicle_colors: ColorMap,

    /// Colours for pie slices keyed by month name.
    pub month_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            fire_table: None,
            sales_table: None,
            selection: Selection::default(),
            views: None,
            vehicle_colors: ColorMap::default(),
            month_colors: ColorMap::new(Month::ALL.iter().map(|m| m.name())),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a freshly loaded wildfire table and recompute the charts.
    pub fn set_fire_table(&mut self, table: FireTable) {
        // Keep the current year only while the data actually contains it,
        // otherwise snap to the latest year present.
        if let Some(&latest) = table.years.last() {
            if !table.years.contains(&self.selection.year) {
                self.selection.year = latest;
            }
        }
        self.fire_table = Some(table);
        self.status_message = None;
        self.loading = false;
        self.recompute();
    }

    /// Ingest a freshly loaded sales table, rebuild vehicle colours, recompute.
    pub fn set_sales_table(&mut self, table: SalesTable) {
        self.vehicle_colors = ColorMap::new(table.vehicle_types.iter().cloned());
        if !table.vehicle_types.is_empty()
            && !table.vehicle_types.contains(&self.selection.vehicle_type)
        {
            self.selection.vehicle_type = table.vehicle_types[0].clone();
        }
        self.sales_table = Some(table);
        self.status_message = None;
        self.loading = false;
        self.recompute();
    }

    /// Rebuild the cached [`ViewBundle`] from the current selection.  A table
    /// that has not been loaded yet behaves as an empty one.
    pub fn recompute(&mut self) {
        if self.fire_table.is_none() && self.sales_table.is_none() {
            self.views = None;
            return;
        }
        let empty_fires = FireTable::default();
        let empty_sales = SalesTable::default();
        let fires = self.fire_table.as_ref().unwrap_or(&empty_fires);
        let sales = self.sales_table.as_ref().unwrap_or(&empty_sales);
        self.views = Some(compute_views(fires, sales, &self.selection));
    }

    pub fn set_vehicle_type(&mut self, vehicle_type: String) {
        if self.selection.vehicle_type != vehicle_type {
            self.selection.vehicle_type = vehicle_type;
            self.recompute();
        }
    }

    pub fn set_region(&mut self, region: Region) {
        if self.selection.region != region {
            self.selection.region = region;
            self.recompute();
        }
    }

    pub fn set_year(&mut self, year: i32) {
        if self.selection.year != year {
            self.selection.year = year;
            self.recompute();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{FireObservation, SalesRecord};
    use chrono::NaiveDate;

    fn fire_table() -> FireTable {
        let d = |m: u32| NaiveDate::from_ymd_opt(2005, m, 1).unwrap();
        FireTable::from_rows(vec![
            FireObservation::new(d(1), Region::Nsw, 10.0, 5.0),
            FireObservation::new(d(2), Region::Ta, 4.0, 2.0),
        ])
    }

    fn sales_table() -> SalesTable {
        SalesTable::from_rows(vec![SalesRecord {
            date: NaiveDate::from_ymd_opt(1980, 1, 31).unwrap(),
            vehicle_type: "Supperminicar".to_string(),
            automobile_sales: 551.0,
            advertising_expenditure: 1558.0,
            recession: true,
        }])
    }

    #[test]
    fn no_views_until_a_table_is_loaded() {
        let mut state = AppState::default();
        assert!(state.views.is_none());
        state.recompute();
        assert!(state.views.is_none());
    }

    #[test]
    fn loading_a_table_computes_views() {
        let mut state = AppState::default();
        state.set_fire_table(fire_table());
        let views = state.views.as_ref().unwrap();
        assert_eq!(views.monthly_fire_area.len(), 1);
        // Sales table not loaded yet: sales-driven series are empty.
        assert!(views.vehicle_sales.is_empty());

        state.set_sales_table(sales_table());
        let views = state.views.as_ref().unwrap();
        assert_eq!(views.vehicle_sales.len(), 1);
        assert_eq!(views.recession_ad_share.len(), 1);
    }

    #[test]
    fn changing_a_control_recomputes() {
        let mut state = AppState::default();
        state.set_fire_table(fire_table());
        assert_eq!(state.views.as_ref().unwrap().monthly_fire_area.len(), 1);

        state.set_region(Region::Ta);
        let views = state.views.as_ref().unwrap();
        assert_eq!(views.monthly_fire_area, vec![(Month::February, 4.0)]);

        state.set_region(Region::Wa);
        assert!(state.views.as_ref().unwrap().monthly_fire_area.is_empty());
    }

    #[test]
    fn default_year_is_replaced_when_absent_from_the_data() {
        let mut state = AppState::default();
        let d = NaiveDate::from_ymd_opt(2012, 6, 1).unwrap();
        state.set_fire_table(FireTable::from_rows(vec![FireObservation::new(
            d,
            Region::Nsw,
            1.0,
            1.0,
        )]));
        assert_eq!(state.selection.year, 2012);
    }
}
