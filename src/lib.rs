//! Noksu Launcher - five-slot desktop launcher
//!
//! Pick up to five programs, files, folders, URLs or Steam game links and
//! start the checked ones with one click.
//!
//! # Features
//!
//! - **Launch Dispatch**: Steam links and URLs go to the default scheme handler,
//!   files are started in their own directory, everything else is opened
//! - **Persistence**: Slots are saved to `noksuLauncherConfig.json` and
//!   restored on the next start
//! - **Steam Titles**: `steam://rungameid/<id>` rows show the store title,
//!   looked up in the background
//!
//! # Example
//!
//! ```no_run
//! use noksu_launcher::{LauncherPanel, LauncherSettings, NativeShell};
//!
//! let settings = LauncherSettings::default();
//! let mut panel = LauncherPanel::new(
//!     settings.config_store(),
//!     NativeShell,
//!     settings.launch_options(),
//! );
//! panel.startup();
//! panel.browse_selected(0, "https://store.steampowered.com").unwrap();
//! panel.slot_mut(0).unwrap().checked = true;
//!
//! let report = panel.launch_selected(|failure| eprintln!("{}", failure.error));
//! println!("launched {} rows", report.launched.len());
//! ```

pub mod config;
pub mod error;
pub mod gui;
pub mod launcher;
pub mod logging;
pub mod panel;
pub mod slots;
pub mod steam;

use std::path::PathBuf;
use std::time::Duration;

// Re-export main types
pub use config::{ConfigDocument, ConfigStore, CONFIG_FILE_NAME};
pub use error::{LauncherError, Result};
pub use launcher::{LaunchFailure, LaunchOptions, LaunchReport, LaunchTarget, NativeShell, SystemShell};
pub use panel::LauncherPanel;
pub use slots::{resolve_label, LabelResolution, Slot, SLOT_COUNT};
pub use steam::{LookupOutcome, LookupRequest, SteamResolver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application configuration. There are no flags or environment variables;
/// these are the built-in values, overridable from code.
#[derive(Debug, Clone)]
pub struct LauncherSettings {
    /// Config document location
    pub config_path: PathBuf,
    /// Steam `appdetails` endpoint
    pub steam_endpoint: String,
    /// Timeout for one Steam lookup
    pub lookup_timeout: Duration,
    /// Pause after handing a Steam link to the OS
    pub steam_handoff: Duration,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(CONFIG_FILE_NAME),
            steam_endpoint: steam::DEFAULT_STEAM_ENDPOINT.to_string(),
            lookup_timeout: steam::DEFAULT_LOOKUP_TIMEOUT,
            steam_handoff: launcher::DEFAULT_STEAM_HANDOFF,
        }
    }
}

impl LauncherSettings {
    pub fn config_store(&self) -> ConfigStore {
        ConfigStore::new(&self.config_path)
    }

    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            steam_handoff: self.steam_handoff,
        }
    }

    pub fn steam_resolver(&self) -> SteamResolver {
        SteamResolver::new(&self.steam_endpoint, self.lookup_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let settings = LauncherSettings::default();
        assert_eq!(settings.config_path, PathBuf::from("noksuLauncherConfig.json"));
        assert_eq!(
            settings.steam_endpoint,
            "https://store.steampowered.com/api/appdetails"
        );
        assert_eq!(settings.lookup_timeout, Duration::from_secs(3));
        assert_eq!(settings.launch_options().steam_handoff, Duration::from_secs(3));
        assert_eq!(settings.steam_resolver().endpoint(), settings.steam_endpoint);
    }
}
