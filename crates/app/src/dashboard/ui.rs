//! egui layout for the dashboard views.

use std::time::Duration;

use eframe::egui;
use egui::{Color32, RichText};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use neo_core::risk::{HIGH_TIER_COLOR, LOW_TIER_COLOR, MEDIUM_TIER_COLOR};
use neo_core::{Rgb8, ScatterPlotModel};

use super::state::DashboardApp;

fn to_color32(color: Rgb8) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_feed_results();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls_ui(ui));
        egui::SidePanel::left("table_panel")
            .default_width(420.0)
            .show(ctx, |ui| self.table_ui(ui));
        egui::CentralPanel::default().show(ctx, |ui| {
            let half = (ui.available_height() - 12.0) / 2.0;
            self.bar_chart_ui(ui, half);
            ui.separator();
            self.scatter_ui(ui);
        });

        // Keep draining the feed worker even without input events.
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}

impl DashboardApp {
    fn controls_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Start date");
            ui.add(egui::TextEdit::singleline(&mut self.start_date).desired_width(90.0));
            ui.label("End date");
            ui.add(egui::TextEdit::singleline(&mut self.end_date).desired_width(90.0));
            if ui.button("Load").clicked() {
                self.request_load();
            }
            if ui.button("Open 3D view").clicked() {
                self.open_scene_view();
            }
        });
        ui.horizontal(|ui| {
            ui.label("Risk threshold");
            if ui
                .add(egui::Slider::new(&mut self.threshold, 0.0..=100.0))
                .changed()
            {
                self.rerender_current();
            }
            ui.label(format!("{:.0}", self.threshold));
        });
        if let Some(status) = &self.status {
            ui.colored_label(to_color32(HIGH_TIER_COLOR), status);
        } else if let Some(range) = &self.loaded_range {
            ui.label(format!(
                "Showing {} records for {} → {}",
                self.views.table.rows.len(),
                range.start,
                range.end
            ));
        }
    }

    fn table_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Asteroids");
        if self.views.empty {
            ui.label("No renderable records for this range.");
            return;
        }
        TableBuilder::new(ui)
            .column(Column::remainder())
            .column(Column::auto())
            .column(Column::auto())
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Name");
                });
                header.col(|ui| {
                    ui.strong("PAIR score");
                });
                header.col(|ui| {
                    ui.strong("Hazardous");
                });
            })
            .body(|mut body| {
                for row in &self.views.table.rows {
                    let fill = to_color32(row.fill);
                    body.row(20.0, |mut table_row| {
                        table_row.col(|ui| {
                            ui.label(highlighted_text(&row.name, fill));
                        });
                        table_row.col(|ui| {
                            ui.label(highlighted_text(&format!("{:.2}", row.risk_score), fill));
                        });
                        table_row.col(|ui| {
                            let text = if row.hazardous { "yes" } else { "no" };
                            ui.label(highlighted_text(text, fill));
                        });
                    });
                }
            });
    }

    fn bar_chart_ui(&mut self, ui: &mut egui::Ui, height: f32) {
        ui.heading("PAIR risk score");
        if self.views.empty {
            ui.label("No data.");
            return;
        }

        let bars: Vec<Bar> = self
            .views
            .bars
            .bars
            .iter()
            .enumerate()
            .map(|(index, bar)| {
                Bar::new(index as f64, bar.value)
                    .name(&bar.label)
                    .fill(to_color32(bar.fill))
            })
            .collect();
        let labels: Vec<String> = self
            .views
            .bars
            .bars
            .iter()
            .map(|bar| bar.label.clone())
            .collect();

        Plot::new("risk_bars")
            .height(height)
            .include_y(0.0)
            .y_axis_label("PAIR Risk Score")
            .x_axis_formatter(move |mark, _range| {
                let index = mark.value.round();
                if index < 0.0 || (mark.value - index).abs() > 0.25 {
                    return String::new();
                }
                labels.get(index as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new("PAIR Risk Score", bars));
            });
    }

    fn scatter_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Impact probability vs severity");
        if self.views.empty {
            ui.label("No data.");
            return;
        }

        let series = tier_series(&self.views.scatter);
        Plot::new("risk_scatter")
            .legend(Legend::default())
            .x_axis_label("Impact Probability")
            .y_axis_label("Impact Severity (log10)")
            .show(ui, |plot_ui| {
                for (name, color, points) in series {
                    if points.is_empty() {
                        continue;
                    }
                    plot_ui.points(
                        Points::new(name, PlotPoints::new(points))
                            .color(color)
                            .radius(3.0),
                    );
                }
            });
    }
}

fn highlighted_text(text: &str, fill: Color32) -> RichText {
    RichText::new(text)
        .background_color(fill)
        .color(Color32::BLACK)
}

/// Severity spans orders of magnitude, so the y values are log10 to
/// give the axis a logarithmic reading.
fn tier_series(model: &ScatterPlotModel) -> Vec<(&'static str, Color32, Vec<[f64; 2]>)> {
    let mut groups: Vec<(&'static str, Rgb8, Vec<[f64; 2]>)> = vec![
        ("high", HIGH_TIER_COLOR, Vec::new()),
        ("medium", MEDIUM_TIER_COLOR, Vec::new()),
        ("low", LOW_TIER_COLOR, Vec::new()),
    ];
    for point in &model.points {
        let y = point.severity.max(f64::MIN_POSITIVE).log10();
        for (_, fill, points) in groups.iter_mut() {
            if *fill == point.fill {
                points.push([point.probability, y]);
            }
        }
    }
    groups
        .into_iter()
        .map(|(name, fill, points)| (name, to_color32(fill), points))
        .collect()
}
