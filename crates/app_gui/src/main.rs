mod app;

use anyhow::{Context, Result};
use app::UiApp;
use directories_next::ProjectDirs;
use eframe::NativeOptions;
use sorter_core::SorterConfig;
use std::path::PathBuf;

fn main() {
    tracing_subscriber::fmt::init();
    let config = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("using default settings: {e:#}");
            SorterConfig::default()
        }
    };

    let title = format!("Dice Sorter {}", env!("SORTER_VERSION"));
    let options = NativeOptions::default();
    if let Err(e) = eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| {
            Ok::<_, Box<dyn std::error::Error + Send + Sync>>(Box::new(UiApp::new(config)))
        }),
    ) {
        tracing::error!("application stopped with error: {e}");
    }
}

fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "DiceSorter").map(|dirs| dirs.config_dir().join("config.toml"))
}

fn load_config() -> Result<SorterConfig> {
    let Some(path) = config_path() else {
        tracing::debug!("no config directory on this platform");
        return Ok(SorterConfig::default());
    };
    SorterConfig::load(&path).with_context(|| format!("loading {}", path.display()))
}
