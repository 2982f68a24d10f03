//! Die selection and classification buttons.

use super::UiApp;
use eframe::egui;
use sorter_core::{Label, LabelMode};

const LABEL_BUTTON_SIZE: egui::Vec2 = egui::vec2(56.0, 32.0);

fn button_text(label: Label) -> String {
    match label {
        Label::Face(value) => value.to_string(),
        Label::Invalid => "Invalid".to_string(),
    }
}

impl UiApp {
    /// Shows the die picker until a die type is chosen. Returns true while it is shown.
    pub(super) fn render_die_selector(&mut self, ui: &mut egui::Ui) -> bool {
        if self.session.mode() != LabelMode::DieSelect || self.session.die_type().is_some() {
            return false;
        }
        ui.heading("Which die are you sorting?");
        ui.add_space(8.0);
        let mut chosen = None;
        ui.horizontal_wrapped(|ui| {
            for &sides in &self.config.die_types {
                if ui
                    .add_sized(LABEL_BUTTON_SIZE, egui::Button::new(format!("d{sides}")))
                    .clicked()
                {
                    chosen = Some(sides);
                }
            }
        });
        if let Some(sides) = chosen {
            self.run("selecting die type", |s| s.select_die_type(sides));
        }
        true
    }

    /// One button per offered label; nothing before a die type is chosen.
    pub(super) fn render_label_buttons(&mut self, ui: &mut egui::Ui) {
        let labels = self.session.labels();
        if labels.is_empty() {
            return;
        }
        let has_image = self.session.current_image().is_some();
        let mut clicked = None;
        ui.add_space(4.0);
        ui.horizontal_wrapped(|ui| {
            for label in labels {
                let button = egui::Button::new(button_text(label)).min_size(LABEL_BUTTON_SIZE);
                if ui.add_enabled(has_image, button).clicked() {
                    clicked = Some(label);
                }
            }
        });
        ui.add_space(4.0);
        if let Some(label) = clicked {
            self.run("classifying image", |s| s.classify_image(label));
        }
    }
}
