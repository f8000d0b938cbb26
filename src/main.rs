//! Noksu Launcher entry point
//!
//! Opens the five-slot launcher window.

#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use log::info;
use noksu_launcher::{gui, logging, LauncherSettings};

fn main() -> noksu_launcher::Result<()> {
    logging::init();

    let settings = LauncherSettings::default();
    info!(
        "Noksu Launcher v{} starting, config at {}",
        noksu_launcher::VERSION,
        settings.config_path.display()
    );

    gui::run(settings)
}
