use super::{ShownImage, UiApp};
use anyhow::{Context, Result};
use eframe::egui;
use sorter_core::ImageEntry;

/// Larger images are downscaled before upload to keep texture memory bounded.
const MAX_SIDE: u32 = 2048;

/// Decodes raw file bytes into something egui can upload.
fn decode_preview(bytes: &[u8]) -> Result<egui::ColorImage> {
    let mut img = image::load_from_memory(bytes).context("unsupported or corrupt image")?;
    if img.width() > MAX_SIDE || img.height() > MAX_SIDE {
        img = img.thumbnail(MAX_SIDE, MAX_SIDE);
    }
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let pixels = rgba.into_raw();
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &pixels))
}

impl UiApp {
    fn sync_texture(&mut self, ctx: &egui::Context) {
        let Some(entry) = self.session.current_image() else {
            self.shown = None;
            return;
        };
        let path = entry.path();
        if self.shown.as_ref().is_some_and(|s| s.path == path) {
            return;
        }

        let texture = match self.session.preview().map(decode_preview) {
            Some(Ok(color)) => {
                let name = format!("preview:{}", path.display());
                Some(ctx.load_texture(name, color, egui::TextureOptions::LINEAR))
            }
            Some(Err(e)) => {
                tracing::warn!("Failed to decode {}: {e:#}", path.display());
                None
            }
            None => None,
        };
        self.shown = Some(ShownImage { path, texture });
    }

    pub(super) fn render_current_image(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        self.sync_texture(ctx);

        if self.session.root().is_none() {
            ui.centered_and_justified(|ui| ui.heading("Choose a folder to start sorting"));
            return;
        }
        let Some(entry) = self.session.current_image().map(ImageEntry::clone) else {
            ui.centered_and_justified(|ui| ui.heading("No images left to sort"));
            return;
        };

        ui.label(entry.name.as_str());
        ui.add_space(6.0);
        match self.shown.as_ref().and_then(|s| s.texture.as_ref()) {
            Some(texture) => {
                let available = ui.available_size();
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Image::new(texture).max_size(available));
                });
            }
            None => {
                ui.colored_label(egui::Color32::LIGHT_RED, "Cannot display this image");
            }
        }
    }
}
