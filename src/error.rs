//! Error types for the launcher
//!
//! Most of these never reach the user: config and network errors are logged
//! and swallowed at the component boundary. Launch errors are the exception
//! and end up in a dialog.

use thiserror::Error;

/// Main error type for launcher operations
#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config document: {0}")]
    ConfigFormat(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to launch '{path}': {source}")]
    Launch {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Slot index {0} out of range")]
    InvalidSlot(usize),

    #[error("GUI error: {0}")]
    Gui(String),
}

/// Result type alias for launcher operations
pub type Result<T> = std::result::Result<T, LauncherError>;

impl LauncherError {
    /// Wrap an OS failure for a specific launch target
    pub fn launch(path: impl Into<String>, source: std::io::Error) -> Self {
        LauncherError::Launch {
            path: path.into(),
            source,
        }
    }

    /// Whether this error is reported to the user rather than only logged
    pub fn is_user_facing(&self) -> bool {
        matches!(self, LauncherError::Launch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_launch_errors_are_user_facing() {
        let launch = LauncherError::launch("C:\\nope.exe", std::io::Error::other("denied"));
        assert!(launch.is_user_facing());

        let io = LauncherError::from(std::io::Error::other("disk"));
        assert!(!io.is_user_facing());
        assert!(!LauncherError::InvalidSlot(7).is_user_facing());
    }

    #[test]
    fn launch_error_names_the_path() {
        let err = LauncherError::launch("/opt/game", std::io::Error::other("not found"));
        let text = err.to_string();
        assert!(text.contains("/opt/game"));
        assert!(text.contains("not found"));
    }
}
