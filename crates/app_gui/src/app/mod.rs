//! Desktop front end for the classifier session.

mod controls;
mod preview;

use eframe::{App, Frame, egui};
use rfd::FileDialog;
use sorter_core::{ClassifierSession, SorterConfig, SorterError};
use std::path::PathBuf;

pub(crate) struct UiApp {
    session: ClassifierSession,
    config: SorterConfig,
    /// Pending error message; blocks the UI until dismissed.
    alert: Option<String>,
    shown: Option<ShownImage>,
}

/// Texture for the image currently on screen.
struct ShownImage {
    path: PathBuf,
    texture: Option<egui::TextureHandle>,
}

impl UiApp {
    pub(crate) fn new(config: SorterConfig) -> Self {
        Self {
            session: ClassifierSession::from_config(&config),
            config,
            alert: None,
            shown: None,
        }
    }

    /// Runs one session operation, turning a failure into a logged alert.
    fn run<F>(&mut self, what: &str, op: F)
    where
        F: FnOnce(&mut ClassifierSession) -> Result<(), SorterError>,
    {
        if let Err(e) = op(&mut self.session) {
            tracing::error!("Error {what}: {e}");
            self.alert = Some(format!("Error {what}. Please try again.\n\n{e}"));
        }
    }

    fn pick_directory(&mut self) {
        let start = self
            .config
            .start_directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        self.run("selecting directory", |session| {
            session.select_directory(|| FileDialog::new().set_directory(start).pick_folder())
        });
        self.shown = None;
    }

    /// Rescans the folder; the head may be the same file with new contents.
    fn reload(&mut self) {
        self.run("reloading directory", |s| s.load_uncategorized_images());
        self.shown = None;
    }

    fn render_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = &self.alert else {
            return;
        };
        let response = egui::Modal::new(egui::Id::new("alert")).show(ctx, |ui| {
            ui.set_max_width(360.0);
            ui.label(message.as_str());
            ui.add_space(8.0);
            ui.button("OK").clicked()
        });
        if response.inner || response.should_close() {
            self.alert = None;
        }
    }
}

impl App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Choose folder...").clicked() {
                    self.pick_directory();
                }
                match self.session.root() {
                    Some(root) => ui.label(root.name.as_str()),
                    None => ui.weak("No folder selected"),
                };

                let can_reload = self.session.root().is_some();
                if ui
                    .add_enabled(can_reload, egui::Button::new("Reload"))
                    .clicked()
                {
                    self.reload();
                }

                ui.separator();
                ui.label(format!("Remaining: {}", self.session.remaining()));

                if ui
                    .add_enabled(self.session.can_undo(), egui::Button::new("Undo"))
                    .clicked()
                {
                    self.run("undoing last action", |s| s.undo_last_action());
                }
            });
        });

        egui::TopBottomPanel::bottom("labels").show(ctx, |ui| {
            self.render_label_buttons(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.render_die_selector(ui) {
                return;
            }
            self.render_current_image(ctx, ui);
        });

        self.render_alert(ctx);
    }
}
