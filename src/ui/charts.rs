use std::collections::BTreeMap;
use std::f32::consts::TAU;

use chrono::{Datelike, NaiveDate};
use eframe::egui::{
    self, Color32, Pos2, RichText, ScrollArea, Sense, Shape, Stroke, Ui, Vec2, vec2,
};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::data::model::Month;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Dashboard grid (central panel)
// ---------------------------------------------------------------------------

/// Render all six charts in a 3×2 grid, in the fixed slot order of the
/// [`ViewBundle`](crate::data::views::ViewBundle).
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(views) = &state.views else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open the wildfire and sales CSVs to begin  (File → Open…)");
        });
        return;
    };
    let selection = &state.selection;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.columns(2, |cols: &mut [Ui]| {
                pie_chart(
                    &mut cols[0],
                    "Share of Each Vehicle Type in Total Expenditure during Recessions",
                    &views.recession_ad_share,
                    &state.vehicle_colors,
                );
                sales_line_chart(
                    &mut cols[1],
                    &format!("Automobile Sales for {}", selection.vehicle_type),
                    &views.vehicle_sales,
                );
            });
            ui.separator();
            ui.columns(2, |cols: &mut [Ui]| {
                month_pie_chart(
                    &mut cols[0],
                    &format!(
                        "{} : Monthly Average Estimated Fire Area in year {}",
                        selection.region, selection.year
                    ),
                    &views.monthly_fire_area,
                    &state.month_colors,
                );
                monthly_bar_chart(
                    &mut cols[1],
                    &format!(
                        "{} : Average Count of Pixels for Presumed Vegetation Fires in year {}",
                        selection.region, selection.year
                    ),
                    &views.monthly_pixel_count,
                );
            });
            ui.separator();
            ui.columns(2, |cols: &mut [Ui]| {
                expenditure_histogram(
                    &mut cols[0],
                    &format!("Advertising Expenditure for {}", selection.vehicle_type),
                    &views.ad_expenditure,
                );
                sales_scatter_chart(
                    &mut cols[1],
                    &format!("Automobile Sales Scatter for {}", selection.vehicle_type),
                    &views.sales_points,
                );
            });
        });
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Fractional-year x coordinate so date axes read as calendar years.
fn date_to_x(date: NaiveDate) -> f64 {
    let days_in_year = NaiveDate::from_ymd_opt(date.year(), 12, 31)
        .map(|d| d.ordinal() as f64)
        .unwrap_or(365.0);
    date.year() as f64 + (date.ordinal0() as f64) / days_in_year
}

fn chart_title(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).strong());
}

/// Decision for selections that match nothing: show an explicit placeholder
/// instead of an empty plot.
fn no_data_placeholder(ui: &mut Ui) {
    let (rect, _) = ui.allocate_exact_size(
        vec2(ui.available_width(), CHART_HEIGHT),
        Sense::hover(),
    );
    ui.painter_at(rect).text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "No data for this selection",
        egui::FontId::proportional(14.0),
        ui.visuals().weak_text_color(),
    );
}

// ---------------------------------------------------------------------------
// Pie chart (painter-drawn: egui_plot has no pie primitive)
// ---------------------------------------------------------------------------

/// Draw a pie chart with a legend underneath.  Slices are proportional to
/// their value's share of the total.
pub fn pie_chart(ui: &mut Ui, title: &str, slices: &[(String, f64)], colors: &ColorMap) {
    chart_title(ui, title);

    let total: f64 = slices.iter().map(|(_, v)| v.max(0.0)).sum();
    if slices.is_empty() || total <= 0.0 || !total.is_finite() {
        no_data_placeholder(ui);
        return;
    }

    let (rect, _) = ui.allocate_exact_size(
        vec2(ui.available_width(), CHART_HEIGHT * 0.75),
        Sense::hover(),
    );
    let painter = ui.painter_at(rect);
    let center = rect.center();
    let radius = rect.width().min(rect.height()) * 0.45;

    let mut start_angle = -TAU / 4.0; // twelve o'clock
    for (label, value) in slices {
        let sweep = ((value.max(0.0) / total) as f32) * TAU;
        painter.add(pie_slice(center, radius, start_angle, sweep, colors.color_for(label)));
        start_angle += sweep;
    }

    // Legend: swatch, label, share.
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (label, value) in slices {
            let (swatch, _) = ui.allocate_exact_size(Vec2::splat(10.0), Sense::hover());
            ui.painter_at(swatch)
                .rect_filled(swatch, 2, colors.color_for(label));
            let share = 100.0 * value.max(0.0) / total;
            ui.label(RichText::new(format!("{label} {share:.1}%")).small());
            ui.add_space(6.0);
        }
    });
}

/// One filled slice as a fan of points from the centre.
fn pie_slice(center: Pos2, radius: f32, start_angle: f32, sweep: f32, color: Color32) -> Shape {
    let steps = ((sweep / 0.05).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for i in 0..=steps {
        let angle = start_angle + sweep * i as f32 / steps as f32;
        points.push(center + vec2(angle.cos(), angle.sin()) * radius);
    }
    Shape::convex_polygon(points, color, Stroke::NONE)
}

/// Pie chart keyed by month.
pub fn month_pie_chart(ui: &mut Ui, title: &str, slices: &[(Month, f64)], colors: &ColorMap) {
    let labelled: Vec<(String, f64)> = slices
        .iter()
        .map(|&(month, value)| (month.name().to_string(), value))
        .collect();
    pie_chart(ui, title, &labelled, colors);
}

// ---------------------------------------------------------------------------
// Line chart – sales over time
// ---------------------------------------------------------------------------

pub fn sales_line_chart(ui: &mut Ui, title: &str, series: &[(NaiveDate, f64)]) {
    chart_title(ui, title);
    if series.is_empty() {
        no_data_placeholder(ui);
        return;
    }

    let points: PlotPoints = series
        .iter()
        .map(|&(date, sales)| [date_to_x(date), sales])
        .collect();

    Plot::new(title.to_string())
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Automobile sales")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).color(Color32::LIGHT_BLUE).width(1.5));
        });
}

// ---------------------------------------------------------------------------
// Bar chart – monthly mean pixel count
// ---------------------------------------------------------------------------

pub fn monthly_bar_chart(ui: &mut Ui, title: &str, series: &[(Month, f64)]) {
    chart_title(ui, title);
    if series.is_empty() {
        no_data_placeholder(ui);
        return;
    }

    let bars: Vec<Bar> = series
        .iter()
        .map(|&(month, mean)| {
            Bar::new(month.number() as f64, mean)
                .width(0.6)
                .name(month.name())
        })
        .collect();

    Plot::new(title.to_string())
        .height(CHART_HEIGHT)
        .x_axis_label("Month")
        .y_axis_label("Mean pixel count")
        .x_axis_formatter(|mark, _range| {
            let n = mark.value.round();
            if (mark.value - n).abs() > 1e-6 {
                return String::new();
            }
            Month::from_number(n as u32)
                .map(|m| m.abbrev().to_string())
                .unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::from_rgb(220, 120, 70)));
        });
}

// ---------------------------------------------------------------------------
// Histogram – advertising expenditure binned by year
// ---------------------------------------------------------------------------

/// The view layer hands over raw (date, expenditure) pairs; binning is the
/// chart's job.  One bin per calendar year, bar height = summed expenditure.
pub fn expenditure_histogram(ui: &mut Ui, title: &str, series: &[(NaiveDate, f64)]) {
    chart_title(ui, title);
    if series.is_empty() {
        no_data_placeholder(ui);
        return;
    }

    let mut by_year: BTreeMap<i32, f64> = BTreeMap::new();
    for &(date, expenditure) in series {
        *by_year.entry(date.year()).or_default() += expenditure;
    }

    let bars: Vec<Bar> = by_year
        .into_iter()
        .map(|(year, total)| Bar::new(year as f64, total).width(0.8))
        .collect();

    Plot::new(title.to_string())
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Advertising expenditure")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::from_rgb(110, 170, 110)));
        });
}

// ---------------------------------------------------------------------------
// Scatter – sales points
// ---------------------------------------------------------------------------

pub fn sales_scatter_chart(ui: &mut Ui, title: &str, series: &[(NaiveDate, f64)]) {
    chart_title(ui, title);
    if series.is_empty() {
        no_data_placeholder(ui);
        return;
    }

    let points: PlotPoints = series
        .iter()
        .map(|&(date, sales)| [date_to_x(date), sales])
        .collect();

    Plot::new(title.to_string())
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Automobile sales")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.points(Points::new(points).radius(2.5).color(Color32::GOLD));
        });
}
