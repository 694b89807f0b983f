use eframe::egui::{self, Align, Align2, Button, Layout, RichText, Stroke, vec2};

use crate::action::Action;
use crate::app::Prompt;
use crate::ui::theme::{HEADER_BG, KILL_BUTTON, PANEL_BG, PANEL_BORDER, TABLE_BG, TEXT};
use crate::ui::tray::TRAY_TITLE;
use crate::ui::view::PopupView;

const TABLE_MIN_HEIGHT: f32 = 300.0;

/// Paints the popup panel and returns what the user clicked, if anything.
///
/// While a prompt is open the panel underneath is disabled.
pub fn render(ctx: &egui::Context, view: Option<&PopupView>, prompt: Option<&Prompt>) -> Option<Action> {
    let mut action = None;

    let frame = egui::Frame::none()
        .fill(PANEL_BG)
        .stroke(Stroke::new(1.0, PANEL_BORDER))
        .rounding(8.0)
        .inner_margin(10.0);

    egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
        ui.add_enabled_ui(prompt.is_none(), |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(TRAY_TITLE).size(16.0).strong().color(TEXT));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.add(Button::new("X").min_size(vec2(24.0, 24.0))).clicked() {
                        action = Some(Action::HidePopup);
                    }
                });
            });
            ui.separator();

            let Some(view) = view else {
                ui.label("Collecting…");
                return;
            };

            ui.horizontal(|ui| {
                ui.label(RichText::new(view.cpu.as_str()).strong());
                ui.label(RichText::new(view.ram.as_str()).strong());
                ui.label(
                    RichText::new(view.cpu_temp.as_str())
                        .strong()
                        .color(view.cpu_temp_level.color()),
                );
            });

            egui::Frame::none().fill(TABLE_BG).show(ui, |ui| {
                ui.set_min_height(TABLE_MIN_HEIGHT);
                ui.set_width(ui.available_width());
                egui::Grid::new("process_table")
                    .num_columns(4)
                    .striped(true)
                    .spacing(vec2(12.0, 4.0))
                    .show(ui, |ui| {
                        for header in ["Process", "CPU", "RAM", ""] {
                            ui.label(RichText::new(header).strong().background_color(HEADER_BG));
                        }
                        ui.end_row();

                        for row in &view.rows {
                            ui.label(row.name.as_str());
                            ui.label(row.cpu.as_str());
                            ui.label(row.ram.as_str());
                            let kill = Button::new(RichText::new("X").small().color(TEXT))
                                .fill(KILL_BUTTON)
                                .min_size(vec2(30.0, 20.0));
                            if ui.add(kill).clicked() {
                                action = Some(Action::Kill(row.row));
                            }
                            ui.end_row();
                        }
                    });
            });

            ui.horizontal(|ui| {
                ui.label(RichText::new("Temperatures:").strong());
                for readout in &view.readouts {
                    ui.label(readout.as_str());
                }
            });
        });
    });

    if let Some(prompt) = prompt {
        let title = match prompt {
            Prompt::ConfirmKill { .. } => "Confirm",
            Prompt::Warning(_) => "Error",
        };
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(prompt.message());
                ui.horizontal(|ui| match prompt {
                    Prompt::ConfirmKill { .. } => {
                        if ui.button("Yes").clicked() {
                            action = Some(Action::ConfirmKill);
                        }
                        if ui.button("No").clicked() {
                            action = Some(Action::CancelKill);
                        }
                    }
                    Prompt::Warning(_) => {
                        if ui.button("OK").clicked() {
                            action = Some(Action::DismissWarning);
                        }
                    }
                });
            });
    }

    action
}
