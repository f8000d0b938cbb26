//! Launcher slots and display label resolution

/// Number of launcher rows. Fixed for the life of the process.
pub const SLOT_COUNT: usize = 5;

/// Label for an empty path
pub const LABEL_NOTHING_SELECTED: &str = "(Nothing selected)";
/// Label for a path whose final component is empty (e.g. a bare root)
pub const LABEL_NO_FILE: &str = "(No file selected)";
/// Placeholder while a Steam title lookup is in flight
pub const LABEL_FETCHING_STEAM: &str = "Fetching Steam name…";

/// Prefix of Steam launch links that carry an app ID
pub const STEAM_RUN_PREFIX: &str = "steam://rungameid/";

/// One launcher row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Path field text
    pub path: String,
    /// Whether the row takes part in "Launch Selected"
    pub checked: bool,
    /// Derived from `path`, never persisted
    pub label: String,
    /// Bumped on every path change so stale lookups can be told apart
    pub generation: u64,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            path: String::new(),
            checked: false,
            label: LABEL_NOTHING_SELECTED.to_string(),
            generation: 0,
        }
    }
}

impl Slot {
    /// Reset path, checked state and label. The generation keeps counting so
    /// lookups started before the reset are still recognised as stale.
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Slot {
            generation,
            ..Slot::default()
        };
    }
}

/// Outcome of resolving a label for a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelResolution {
    /// Final label, known immediately
    Ready(String),
    /// Steam link: show the placeholder and look up this app ID
    Steam { appid: String },
}

impl LabelResolution {
    /// Text to show right now
    pub fn immediate_text(&self) -> &str {
        match self {
            LabelResolution::Ready(text) => text,
            LabelResolution::Steam { .. } => LABEL_FETCHING_STEAM,
        }
    }
}

/// Work out the label for a path
pub fn resolve_label(path: &str) -> LabelResolution {
    if path.is_empty() {
        return LabelResolution::Ready(LABEL_NOTHING_SELECTED.to_string());
    }

    if path.starts_with(STEAM_RUN_PREFIX) {
        return LabelResolution::Steam {
            appid: steam_appid(path).to_string(),
        };
    }

    LabelResolution::Ready(file_label(path))
}

/// App ID of a `steam://rungameid/<id>` link: the final `/` segment
pub fn steam_appid(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or_default()
}

/// Final label for a finished Steam lookup
pub fn steam_label(appid: &str, title: Option<&str>) -> String {
    match title {
        Some(title) => format!("{} (Steam)", title),
        None => format!("Steam App {}", appid),
    }
}

/// Final path component, accepting both `/` and `\` separators so Windows
/// paths read the same on every platform
fn file_label(path: &str) -> String {
    match path.rsplit(['/', '\\']).next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => LABEL_NO_FILE.to_string(),
    }
}
