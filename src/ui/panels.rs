use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::loader;
use crate::data::model::Region;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter controls
// ---------------------------------------------------------------------------

/// Render the control panel: vehicle-type dropdown, region radio group and
/// year dropdown.  Each change triggers one synchronous recompute.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            vehicle_type_dropdown(ui, state);
            ui.separator();
            region_radio_group(ui, state);
            ui.separator();
            year_dropdown(ui, state);
        });
}

fn vehicle_type_dropdown(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Select Vehicle Type");

    let vehicle_types = match &state.sales_table {
        Some(table) => table.vehicle_types.clone(),
        None => {
            ui.label("No sales data loaded.");
            return;
        }
    };

    let current = state.selection.vehicle_type.clone();
    egui::ComboBox::from_id_salt("vehicle_type")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for vehicle_type in &vehicle_types {
                if ui
                    .selectable_label(current == *vehicle_type, vehicle_type)
                    .clicked()
                {
                    state.set_vehicle_type(vehicle_type.clone());
                }
            }
        });
}

fn region_radio_group(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Select Region");

    let mut selected = state.selection.region;
    for region in Region::ALL {
        ui.radio_value(&mut selected, region, region.full_name());
    }
    if selected != state.selection.region {
        state.set_region(selected);
    }
}

fn year_dropdown(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Select Year");

    let years = match &state.fire_table {
        Some(table) => table.years.clone(),
        None => {
            ui.label("No wildfire data loaded.");
            return;
        }
    };

    let current = state.selection.year;
    egui::ComboBox::from_id_salt("year")
        .selected_text(current.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for year in years {
                if ui
                    .selectable_label(current == year, year.to_string())
                    .clicked()
                {
                    state.set_year(year);
                }
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
            if ui.button("Open wildfire CSV…").clicked() {
                open_fire_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open sales CSV…").clicked() {
                open_sales_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("Australia Wildfire Dashboard");
        ui.separator();

        if let Some(table) = &state.fire_table {
            ui.label(format!("{} fire observations", table.len()));
        }
        if let Some(table) = &state.sales_table {
            ui.label(format!("{} sales records", table.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

fn open_fire_dialog(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Open historical wildfire data")
        .add_filter("CSV", &["csv"])
        .pick_file()
    else {
        return;
    };

    state.loading = true;
    match loader::load_fire_csv(&path) {
        Ok(table) => {
            log::info!(
                "Loaded {} fire observations across years {:?}",
                table.len(),
                table.years
            );
            state.set_fire_table(table);
        }
        Err(e) => {
            log::error!("Failed to load wildfire CSV: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
            state.loading = false;
        }
    }
}

fn open_sales_dialog(state: &mut AppState) {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Open historical automobile sales data")
        .add_filter("CSV", &["csv"])
        .pick_file()
    else {
        return;
    };

    state.loading = true;
    match loader::load_sales_csv(&path) {
        Ok(table) => {
            log::info!(
                "Loaded {} sales records, vehicle types {:?}",
                table.len(),
                table.vehicle_types
            );
            state.set_sales_table(table);
        }
        Err(e) => {
            log::error!("Failed to load sales CSV: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
            state.loading = false;
        }
    }
}
