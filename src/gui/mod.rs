pub mod app;
pub mod dialogs;

use crate::LauncherSettings;

/// Window title
pub const WINDOW_TITLE: &str = "Program Launcher";

/// Fixed window size
pub const WINDOW_SIZE: [f32; 2] = [840.0, 480.0];

/// Entry point: launch the native GUI window
pub fn run(settings: LauncherSettings) -> crate::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(WINDOW_SIZE)
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "Noksu Launcher",
        native_options,
        Box::new(|cc| Ok(Box::new(app::LauncherApp::new(cc, settings)))),
    )
    .map_err(|e| crate::LauncherError::Gui(e.to_string()))
}
