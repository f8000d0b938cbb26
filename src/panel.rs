//! Launcher panel state
//!
//! Owns the five slots and implements every user action independently of
//! the window toolkit. Actions that change a path hand back the Steam lookups
//! they need; the GUI runs those off-thread and feeds the outcomes back in
//! through [`LauncherPanel::apply_lookup`].

use log::{info, warn};

use crate::config::ConfigStore;
use crate::launcher::{launch_checked, LaunchFailure, LaunchOptions, LaunchReport, SystemShell};
use crate::slots::{resolve_label, LabelResolution, Slot, SLOT_COUNT};
use crate::steam::{LookupOutcome, LookupRequest};
use crate::{LauncherError, Result};

pub struct LauncherPanel<S: SystemShell> {
    slots: [Slot; SLOT_COUNT],
    store: ConfigStore,
    shell: S,
    options: LaunchOptions,
}

impl<S: SystemShell> LauncherPanel<S> {
    pub fn new(store: ConfigStore, shell: S, options: LaunchOptions) -> Self {
        Self {
            slots: Default::default(),
            store,
            shell,
            options,
        }
    }

    pub fn slots(&self) -> &[Slot; SLOT_COUNT] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    /// Mutable access for direct field binding (path text, checkbox)
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(index)
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Populate slots from the saved config, if any
    pub fn startup(&mut self) -> Vec<LookupRequest> {
        let Some(doc) = self.store.load() else {
            return Vec::new();
        };

        let mut lookups = Vec::new();
        for index in 0..doc.len() {
            let (path, checked) = doc.slot(index);
            self.slots[index].checked = checked;
            lookups.extend(self.assign_path(index, path.to_string()));
        }
        lookups
    }

    /// Set a row's path and recompute its label. Does not save.
    pub fn set_path(&mut self, index: usize, path: impl Into<String>) -> Result<Option<LookupRequest>> {
        if index >= SLOT_COUNT {
            return Err(LauncherError::InvalidSlot(index));
        }
        Ok(self.assign_path(index, path.into()))
    }

    /// Path picked in the file dialog
    pub fn browse_selected(&mut self, index: usize, path: impl Into<String>) -> Result<Option<LookupRequest>> {
        let lookup = self.set_path(index, path)?;
        self.save();
        Ok(lookup)
    }

    /// Enter pressed in a row's path field
    pub fn commit(&mut self, index: usize) -> Result<Option<LookupRequest>> {
        let text = self
            .slot(index)
            .ok_or(LauncherError::InvalidSlot(index))?
            .path
            .trim()
            .to_string();
        let lookup = self.set_path(index, text)?;
        self.save();
        Ok(lookup)
    }

    /// Launch every checked row in order, then save regardless of outcome
    pub fn launch_selected(&mut self, on_failure: impl FnMut(&LaunchFailure)) -> LaunchReport {
        let report = launch_checked(&self.slots, &self.shell, &self.options, on_failure);
        info!(
            "Launch batch: {} attempted, {} launched, {} failed",
            report.attempted,
            report.launched.len(),
            report.failures.len()
        );
        self.save();
        report
    }

    /// Reset every row and delete the saved config. Nothing is re-saved.
    pub fn clear_all(&mut self) {
        for slot in &mut self.slots {
            slot.reset();
        }
        if let Err(e) = self.store.clear() {
            warn!("Failed to delete config: {}", e);
        }
        info!("Cleared all slots");
    }

    /// Apply a finished Steam lookup. Outcomes for a row whose path changed
    /// since the lookup started are dropped; returns whether the label moved.
    pub fn apply_lookup(&mut self, outcome: &LookupOutcome) -> bool {
        let Some(slot) = self.slots.get_mut(outcome.index) else {
            return false;
        };
        if slot.generation != outcome.generation {
            return false;
        }
        slot.label = outcome.label();
        true
    }

    /// Write the config, logging failures
    pub fn save(&self) -> bool {
        match self.store.save(&self.slots) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to save config: {}", e);
                false
            }
        }
    }

    fn assign_path(&mut self, index: usize, path: String) -> Option<LookupRequest> {
        let slot = &mut self.slots[index];
        let resolution = resolve_label(&path);
        slot.generation += 1;
        slot.label = resolution.immediate_text().to_string();
        slot.path = path;

        match resolution {
            LabelResolution::Ready(_) => None,
            LabelResolution::Steam { appid } => Some(LookupRequest {
                index,
                generation: slot.generation,
                appid,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE_NAME;
    use crate::launcher::tests::{RecordingShell, ShellCall};
    use crate::slots::{LABEL_FETCHING_STEAM, LABEL_NOTHING_SELECTED};
    use std::time::Duration;

    fn panel_in(dir: &tempfile::TempDir, shell: RecordingShell) -> LauncherPanel<RecordingShell> {
        LauncherPanel::new(
            ConfigStore::new(dir.path().join(CONFIG_FILE_NAME)),
            shell,
            LaunchOptions {
                steam_handoff: Duration::ZERO,
            },
        )
    }

    fn outcome(index: usize, generation: u64, title: Option<&str>) -> LookupOutcome {
        LookupOutcome {
            index,
            generation,
            appid: "440".to_string(),
            title: title.map(str::to_string),
        }
    }

    #[test]
    fn fresh_panel_has_five_empty_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut panel = panel_in(&dir, RecordingShell::default());
        assert!(panel.startup().is_empty());
        assert_eq!(panel.slots().len(), SLOT_COUNT);
        for slot in panel.slots() {
            assert_eq!(slot.path, "");
            assert!(!slot.checked);
            assert_eq!(slot.label, LABEL_NOTHING_SELECTED);
        }
    }

    #[test]
    fn browse_saves_and_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let mut panel = panel_in(&dir, RecordingShell::default());
        panel.browse_selected(0, "C:\\Games\\app.exe").unwrap();
        panel.slot_mut(0).unwrap().checked = true;
        panel.browse_selected(4, "/home/me/docs").unwrap();

        let mut reloaded = panel_in(&dir, RecordingShell::default());
        let lookups = reloaded.startup();
        assert!(lookups.is_empty());

        let slot = reloaded.slot(0).unwrap();
        assert_eq!(slot.path, "C:\\Games\\app.exe");
        assert!(slot.checked);
        assert_eq!(slot.label, "app.exe");
        assert_eq!(reloaded.slot(4).unwrap().label, "docs");
        assert_eq!(reloaded.slot(2).unwrap().label, LABEL_NOTHING_SELECTED);
    }

    #[test]
    fn commit_trims_field_text_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let mut panel = panel_in(&dir, RecordingShell::default());
        panel.slot_mut(1).unwrap().path = "  /opt/tool/run.sh \n".to_string();

        assert!(panel.commit(1).unwrap().is_none());
        assert_eq!(panel.slot(1).unwrap().path, "/opt/tool/run.sh");
        assert_eq!(panel.slot(1).unwrap().label, "run.sh");
        assert!(panel.store().path().exists());
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut panel = panel_in(&dir, RecordingShell::default());
        assert!(matches!(panel.commit(5), Err(LauncherError::InvalidSlot(5))));
        assert!(matches!(
            panel.browse_selected(9, "x"),
            Err(LauncherError::InvalidSlot(9))
        ));
    }

    #[test]
    fn steam_path_requests_lookup_and_shows_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let mut panel = panel_in(&dir, RecordingShell::default());
        let lookup = panel
            .browse_selected(2, "steam://rungameid/440")
            .unwrap()
            .unwrap();

        assert_eq!(lookup.index, 2);
        assert_eq!(lookup.appid, "440");
        assert_eq!(panel.slot(2).unwrap().label, LABEL_FETCHING_STEAM);

        assert!(panel.apply_lookup(&outcome(2, lookup.generation, Some("Team Fortress 2"))));
        assert_eq!(panel.slot(2).unwrap().label, "Team Fortress 2 (Steam)");
    }

    #[test]
    fn failed_lookup_falls_back_to_app_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut panel = panel_in(&dir, RecordingShell::default());
        let lookup = panel.set_path(0, "steam://rungameid/440").unwrap().unwrap();

        panel.apply_lookup(&outcome(0, lookup.generation, None));
        assert_eq!(panel.slot(0).unwrap().label, "Steam App 440");
    }

    #[test]
    fn stale_lookup_never_overwrites_newer_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut panel = panel_in(&dir, RecordingShell::default());
        let old = panel.set_path(0, "steam://rungameid/440").unwrap().unwrap();
        panel.set_path(0, "/usr/bin/vim").unwrap();

        assert!(!panel.apply_lookup(&outcome(0, old.generation, Some("Team Fortress 2"))));
        assert_eq!(panel.slot(0).unwrap().label, "vim");
    }

    #[test]
    fn startup_requests_lookups_for_saved_steam_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut panel = panel_in(&dir, RecordingShell::default());
        panel.browse_selected(1, "steam://rungameid/440").unwrap();
        panel.browse_selected(3, "steam://rungameid/570").unwrap();

        let mut reloaded = panel_in(&dir, RecordingShell::default());
        let lookups = reloaded.startup();
        let wanted: Vec<(usize, &str)> = lookups.iter().map(|l| (l.index, l.appid.as_str())).collect();
        assert_eq!(wanted, vec![(1, "440"), (3, "570")]);
        assert_eq!(reloaded.slot(1).unwrap().label, LABEL_FETCHING_STEAM);
    }

    #[test]
    fn launch_with_nothing_checked_still_saves() {
        let dir = tempfile::tempdir().unwrap();
        let mut panel = panel_in(&dir, RecordingShell::default());
        panel.set_path(0, "https://example.com").unwrap();
        assert!(!panel.store().path().exists());

        let mut dialogs = 0;
        let report = panel.launch_selected(|_| dialogs += 1);

        assert_eq!(report.attempted, 0);
        assert_eq!(dialogs, 0);
        assert!(panel.shell.calls().is_empty());
        assert!(panel.store().path().exists());
    }

    #[test]
    fn bad_row_reports_once_and_batch_continues() {
        let dir = tempfile::tempdir().unwrap();
        let mut panel = panel_in(&dir, RecordingShell::failing_on(&["https://row2"]));
        for index in 0..SLOT_COUNT {
            panel.set_path(index, format!("https://row{index}")).unwrap();
            panel.slot_mut(index).unwrap().checked = true;
        }

        let mut dialogs = Vec::new();
        let report = panel.launch_selected(|failure| dialogs.push(failure.index));

        assert_eq!(dialogs, vec![2]);
        assert_eq!(report.launched, vec![0, 1, 3, 4]);
        assert_eq!(
            panel.shell.calls().last(),
            Some(&ShellCall::Uri("https://row4".to_string()))
        );
        assert!(panel.store().path().exists());
    }

    #[test]
    fn clear_all_resets_rows_and_deletes_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut panel = panel_in(&dir, RecordingShell::default());
        panel.browse_selected(0, "/bin/sh").unwrap();
        panel.slot_mut(0).unwrap().checked = true;
        let pending = panel.browse_selected(1, "steam://rungameid/440").unwrap().unwrap();

        panel.clear_all();

        assert!(!panel.store().path().exists());
        for slot in panel.slots() {
            assert_eq!(slot.path, "");
            assert!(!slot.checked);
            assert_eq!(slot.label, LABEL_NOTHING_SELECTED);
        }
        // A lookup finishing after the clear must not resurrect the label
        assert!(!panel.apply_lookup(&outcome(1, pending.generation, Some("Team Fortress 2"))));

        let mut reloaded = panel_in(&dir, RecordingShell::default());
        assert!(reloaded.startup().is_empty());
        assert!(reloaded.slots().iter().all(|s| *s == Slot {
            generation: s.generation,
            ..Slot::default()
        }));
    }

    #[test]
    fn malformed_config_leaves_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "not json").unwrap();

        let mut panel = panel_in(&dir, RecordingShell::default());
        assert!(panel.startup().is_empty());
        assert!(panel.slots().iter().all(|s| s.path.is_empty() && !s.checked));
    }
}
