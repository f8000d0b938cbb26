//! Main launcher window

use crate::gui::dialogs;
use crate::launcher::NativeShell;
use crate::panel::LauncherPanel;
use crate::slots::SLOT_COUNT;
use crate::steam::{spawn_lookup, LookupOutcome, LookupRequest, SteamResolver};
use crate::LauncherSettings;
use crossbeam_channel::{unbounded, Receiver, Sender};
use eframe::egui;
use log::warn;

const LABEL_WIDTH: f32 = 190.0;
const ROW_HEIGHT: f32 = 22.0;

const LAUNCH_GREEN: egui::Color32 = egui::Color32::from_rgb(0x4C, 0xAF, 0x50);
const CLEAR_RED: egui::Color32 = egui::Color32::from_rgb(0xF4, 0x43, 0x36);

/// Something a row asked for during rendering
enum RowAction {
    Browse(usize),
    Commit(usize),
}

/// Main application state
pub struct LauncherApp {
    /// Slots and every action on them
    panel: LauncherPanel<NativeShell>,
    /// Shared HTTP client for Steam lookups
    resolver: SteamResolver,
    /// Handed to lookup threads
    lookup_tx: Sender<LookupOutcome>,
    /// Drained once per frame on the UI thread
    lookup_rx: Receiver<LookupOutcome>,
    /// Status bar message
    status_message: String,
}

impl LauncherApp {
    /// Create the app and load the saved slots before the first frame
    pub fn new(cc: &eframe::CreationContext<'_>, settings: LauncherSettings) -> Self {
        let (lookup_tx, lookup_rx) = unbounded();
        let mut app = Self {
            panel: LauncherPanel::new(
                settings.config_store(),
                NativeShell,
                settings.launch_options(),
            ),
            resolver: settings.steam_resolver(),
            lookup_tx,
            lookup_rx,
            status_message: "Ready".to_string(),
        };

        let lookups = app.panel.startup();
        app.spawn_lookups(&cc.egui_ctx, lookups);
        app
    }

    /// One background thread per lookup; each wakes the UI when done
    fn spawn_lookups(&self, ctx: &egui::Context, lookups: impl IntoIterator<Item = LookupRequest>) {
        for request in lookups {
            let ctx = ctx.clone();
            spawn_lookup(&self.resolver, request, self.lookup_tx.clone(), move || {
                ctx.request_repaint()
            });
        }
    }

    /// Apply finished lookups
    fn process_messages(&mut self) {
        while let Ok(outcome) = self.lookup_rx.try_recv() {
            self.panel.apply_lookup(&outcome);
        }
    }

    fn handle_row_action(&mut self, ctx: &egui::Context, action: RowAction) {
        let result = match action {
            RowAction::Browse(index) => match dialogs::pick_launch_target() {
                Some(path) => self
                    .panel
                    .browse_selected(index, path.to_string_lossy().into_owned()),
                None => return,
            },
            RowAction::Commit(index) => self.panel.commit(index),
        };

        match result {
            Ok(lookup) => {
                self.status_message = "Saved".to_string();
                self.spawn_lookups(ctx, lookup);
            }
            Err(e) => warn!("Row action failed: {}", e),
        }
    }

    fn launch_selected(&mut self) {
        let report = self.panel.launch_selected(dialogs::show_launch_error);
        self.status_message = if report.attempted == 0 {
            "Nothing selected to launch".to_string()
        } else {
            format!(
                "Launched {} of {} selected",
                report.launched.len(),
                report.attempted
            )
        };
    }

    fn clear_all(&mut self) {
        self.panel.clear_all();
        self.status_message = "Cleared".to_string();
    }

    /// Render the five slot rows
    fn render_rows(&mut self, ui: &mut egui::Ui) -> Option<RowAction> {
        let mut action = None;

        for index in 0..SLOT_COUNT {
            let Some(slot) = self.panel.slot_mut(index) else {
                continue;
            };

            ui.horizontal(|ui| {
                ui.checkbox(&mut slot.checked, "");

                ui.add_sized(
                    [LABEL_WIDTH, ROW_HEIGHT],
                    egui::Label::new(slot.label.as_str()).truncate(),
                );

                let browse_width = 70.0;
                let response = ui.add(
                    egui::TextEdit::singleline(&mut slot.path)
                        .desired_width(ui.available_width() - browse_width)
                        .hint_text("Program, file, folder, URL or steam:// link"),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    action = Some(RowAction::Commit(index));
                }

                if ui.button("Browse").clicked() {
                    action = Some(RowAction::Browse(index));
                }
            });
            ui.add_space(6.0);
        }

        action
    }

    /// Render Launch / Clear buttons
    fn render_actions(&mut self, ui: &mut egui::Ui) {
        let launch = egui::Button::new(
            egui::RichText::new("Launch Selected")
                .size(18.0)
                .strong()
                .color(egui::Color32::WHITE),
        )
        .fill(LAUNCH_GREEN)
        .min_size(egui::vec2(220.0, 48.0));

        let clear = egui::Button::new(
            egui::RichText::new("Clear All")
                .size(15.0)
                .color(egui::Color32::WHITE),
        )
        .fill(CLEAR_RED)
        .min_size(egui::vec2(150.0, 40.0));

        ui.horizontal(|ui| {
            ui.add_space(((ui.available_width() - 390.0) / 2.0).max(0.0));
            if ui.add(launch).clicked() {
                self.launch_selected();
            }
            ui.add_space(20.0);
            if ui.add(clear).clicked() {
                self.clear_all();
            }
        });
    }

    /// Render status bar
    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(format!("v{}", crate::VERSION));
                });
            });
        });
    }
}

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_messages();

        self.render_status_bar(ctx);

        let mut row_action = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            row_action = self.render_rows(ui);
            ui.add_space(16.0);
            self.render_actions(ui);
        });

        if let Some(action) = row_action {
            self.handle_row_action(ctx, action);
        }
    }
}
