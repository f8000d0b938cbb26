use std::path::PathBuf;

use crate::launcher::LaunchFailure;

// ============================================================================
// Native dialogs
// ============================================================================

/// Title of the browse dialog
pub const BROWSE_TITLE: &str = "Select a Program or Shortcut";

/// Title of the launch error box
pub const LAUNCH_ERROR_TITLE: &str = "Launch Error";

/// Native open-file dialog. `None` when the user cancels.
pub fn pick_launch_target() -> Option<PathBuf> {
    rfd::FileDialog::new().set_title(BROWSE_TITLE).pick_file()
}

/// Body text of the launch error box
pub fn launch_error_text(failure: &LaunchFailure) -> String {
    format!(
        "Failed to launch:\n{}\n\n{}",
        failure.path(),
        failure.message()
    )
}

/// Modal error box for one failed row. Blocks until dismissed.
pub fn show_launch_error(failure: &LaunchFailure) {
    let _ = rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title(LAUNCH_ERROR_TITLE)
        .set_description(launch_error_text(failure))
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
