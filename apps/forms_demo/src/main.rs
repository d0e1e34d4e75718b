//! Demo shell for the dialog and edit-form crates: an eframe app plus a
//! backend worker thread that opens dialogs across the thread boundary.

use std::thread;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use eframe::egui;
use forms_core::{
    choice_of, parse_choice, ConstrainedChoice, DialogButtons, DialogIcon, DialogOutcome,
    DialogTicket, EditMode, Editable, FieldDef, FieldValue, FormOptions, FormTicket, NumberValue,
};
use forms_egui::{build_edit_form, show_dialog, DialogHandle, DialogHost};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

const SETTINGS_STORAGE_KEY: &str = "forms_demo_settings";

#[derive(Debug, Parser)]
#[command(about = "Asynchronous dialog and edit form demo")]
struct Args {
    /// Text scale applied to dialog and form windows.
    #[arg(long)]
    text_scale: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, EnumString)]
enum AccountStatus {
    Active,
    Suspended,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    status: AccountStatus,
    region: ConstrainedChoice,
    seats: i64,
    rating: f64,
    renews_at: NaiveDateTime,
    tags: Vec<String>,
}

impl Profile {
    fn sample() -> Self {
        Self {
            name: "alice".to_string(),
            status: AccountStatus::Active,
            region: ConstrainedChoice::new(
                "eu-west",
                vec![
                    "eu-west".to_string(),
                    "us-east".to_string(),
                    "ap-south".to_string(),
                ],
            ),
            seats: 5,
            rating: 4.5,
            renews_at: NaiveDate::from_ymd_opt(2027, 1, 1)
                .and_then(|d| d.and_hms_opt(9, 0, 0))
                .unwrap_or_default(),
            tags: vec!["beta".to_string(), "priority".to_string()],
        }
    }

    fn blank() -> Self {
        Self {
            name: String::new(),
            status: AccountStatus::Active,
            region: ConstrainedChoice::new(
                "eu-west",
                vec![
                    "eu-west".to_string(),
                    "us-east".to_string(),
                    "ap-south".to_string(),
                ],
            ),
            seats: 1,
            rating: 0.0,
            renews_at: NaiveDate::from_ymd_opt(2027, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or_default(),
            tags: Vec::new(),
        }
    }

    /// Everything except `tags`, which is view-only.
    fn editable_fields() -> Vec<String> {
        ["name", "status", "region", "seats", "rating", "renews_at"]
            .into_iter()
            .map(String::from)
            .collect()
    }
}

impl Editable for Profile {
    fn fields() -> Vec<FieldDef<Self>> {
        vec![
            FieldDef {
                name: "name",
                get: |p| FieldValue::Text(p.name.clone()),
                set: Some(|p, v| {
                    p.name = v.into_text()?;
                    Ok(())
                }),
            },
            FieldDef {
                name: "status",
                get: |p| choice_of(p.status),
                set: Some(|p, v| {
                    p.status = parse_choice(&v.into_choice_label()?)?;
                    Ok(())
                }),
            },
            FieldDef {
                name: "region",
                get: |p| FieldValue::Constrained(p.region.clone()),
                set: Some(|p, v| {
                    p.region = v.into_constrained()?;
                    Ok(())
                }),
            },
            FieldDef {
                name: "seats",
                get: |p| FieldValue::Number(NumberValue::Int(p.seats)),
                set: Some(|p, v| {
                    p.seats = v.into_int()?;
                    Ok(())
                }),
            },
            FieldDef {
                name: "rating",
                get: |p| FieldValue::Number(NumberValue::Float(p.rating)),
                set: Some(|p, v| {
                    p.rating = v.into_float()?;
                    Ok(())
                }),
            },
            FieldDef {
                name: "renews_at",
                get: |p| FieldValue::DateTime(p.renews_at),
                set: Some(|p, v| {
                    p.renews_at = v.into_date_time()?;
                    Ok(())
                }),
            },
            FieldDef {
                name: "tags",
                get: |p| FieldValue::Opaque(serde_json::json!(p.tags)),
                set: None,
            },
        ]
    }
}

enum WorkerCommand {
    ConfirmMaintenance,
    ProbeUiThread,
}

enum UiEvent {
    WorkerReady,
    Info(String),
    MaintenanceDecision(DialogOutcome),
}

fn command_label(cmd: &WorkerCommand) -> &'static str {
    match cmd {
        WorkerCommand::ConfirmMaintenance => "confirm_maintenance",
        WorkerCommand::ProbeUiThread => "probe_ui_thread",
    }
}

fn dispatch_worker_command(cmd_tx: &Sender<WorkerCommand>, cmd: WorkerCommand, status: &mut String) {
    let cmd_name = command_label(&cmd);
    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->worker command"),
        Err(TrySendError::Full(_)) => {
            *status = "Worker command queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Worker is gone (startup or runtime failure); restart the app".to_string();
        }
    }
}

fn spawn_worker_thread(
    cmd_rx: Receiver<WorkerCommand>,
    ui_tx: Sender<UiEvent>,
    handle: DialogHandle,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Info(format!(
                    "worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build worker runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::WorkerReady);
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    WorkerCommand::ConfirmMaintenance => {
                        let outcome = show_dialog(
                            &handle,
                            "Run housekeeping now? Open sessions will be paused.",
                            "Maintenance",
                            DialogButtons::YesNoCancel,
                            DialogIcon::Question,
                        )
                        .outcome()
                        .await;
                        if outcome == DialogOutcome::Yes {
                            tokio::time::sleep(Duration::from_millis(750)).await;
                            let _ = ui_tx.try_send(UiEvent::Info(
                                "Housekeeping finished".to_string(),
                            ));
                        }
                        let _ = ui_tx.try_send(UiEvent::MaintenanceDecision(outcome));
                    }
                    WorkerCommand::ProbeUiThread => {
                        let worker_thread = format!("{:?}", thread::current().id());
                        let probe = handle
                            .dispatcher()
                            .invoke(move || {
                                format!(
                                    "closure ran on {:?}, sent from {worker_thread}",
                                    thread::current().id()
                                )
                            })
                            .wait()
                            .await;
                        match probe {
                            Ok(report) => {
                                let _ = ui_tx.try_send(UiEvent::Info(report));
                            }
                            Err(err) => tracing::warn!("ui probe failed: {err}"),
                        }
                    }
                }
            }
        });
    });
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PersistedDemoSettings {
    text_scale: f32,
}

struct DemoApp {
    host: DialogHost,
    cmd_tx: Sender<WorkerCommand>,
    ui_rx: Receiver<UiEvent>,
    profile: Profile,
    text_scale: Option<f32>,
    status: String,
    log: Vec<String>,
    pending_dialogs: Vec<(&'static str, DialogTicket)>,
    pending_forms: Vec<(EditMode, FormTicket<Profile>)>,
}

impl DemoApp {
    fn new(
        host: DialogHost,
        cmd_tx: Sender<WorkerCommand>,
        ui_rx: Receiver<UiEvent>,
        text_scale: Option<f32>,
    ) -> Self {
        Self {
            host,
            cmd_tx,
            ui_rx,
            profile: Profile::sample(),
            text_scale,
            status: "Starting worker...".to_string(),
            log: Vec::new(),
            pending_dialogs: Vec::new(),
            pending_forms: Vec::new(),
        }
    }

    fn form_options(&self, filtered: bool) -> FormOptions {
        FormOptions {
            text_scale: self.text_scale,
            field_filter: filtered.then(Profile::editable_fields),
            name_overrides: [
                ("renews_at".to_string(), "Renews at".to_string()),
                ("name".to_string(), "Display name".to_string()),
            ]
            .into(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::WorkerReady => self.status = "Worker ready".to_string(),
                UiEvent::Info(message) => {
                    self.log.push(message);
                }
                UiEvent::MaintenanceDecision(outcome) => {
                    self.log.push(format!("maintenance decision: {outcome:?}"));
                }
            }
        }
    }

    fn poll_tickets(&mut self) {
        let mut resolved = Vec::new();
        self.pending_dialogs.retain_mut(|(label, ticket)| {
            if let Some(outcome) = ticket.try_outcome() {
                resolved.push(format!("{label}: {outcome:?}"));
                false
            } else {
                true
            }
        });
        self.log.extend(resolved);

        let mut saved_profile = None;
        self.pending_forms.retain_mut(|(mode, ticket)| {
            let Some(result) = ticket.try_result() else {
                return true;
            };
            match result {
                Some(result) if result.saved && *mode != EditMode::View => {
                    saved_profile = Some(result.value);
                }
                Some(_) | None => {}
            }
            false
        });
        if let Some(profile) = saved_profile {
            self.log.push(format!("profile saved: {}", profile.name));
            self.profile = profile;
        }
    }

    fn show_dialog_buttons(&mut self, ui: &mut egui::Ui) {
        ui.heading("Message boxes");
        ui.horizontal_wrapped(|ui| {
            let sets = [
                ("OK", DialogButtons::Ok, DialogIcon::Information),
                ("OK / Cancel", DialogButtons::OkCancel, DialogIcon::None),
                ("Yes / No", DialogButtons::YesNo, DialogIcon::Question),
                (
                    "Yes / No / Cancel",
                    DialogButtons::YesNoCancel,
                    DialogIcon::Question,
                ),
                ("Retry / Cancel", DialogButtons::RetryCancel, DialogIcon::Warning),
                (
                    "Abort / Retry / Ignore",
                    DialogButtons::AbortRetryIgnore,
                    DialogIcon::Error,
                ),
            ];
            for (label, buttons, icon) in sets {
                if ui.button(label).clicked() {
                    let ticket = show_dialog(
                        &self.host.handle(),
                        format!("This dialog carries the {label} button set."),
                        label,
                        buttons,
                        icon,
                    );
                    self.pending_dialogs.push((label, ticket));
                }
            }
        });
    }

    fn show_form_buttons(&mut self, ui: &mut egui::Ui) {
        ui.heading("Edit forms");
        ui.horizontal(|ui| {
            if ui.button("View profile").clicked() {
                self.open_form(EditMode::View, self.profile.clone(), "Profile", false);
            }
            if ui.button("Edit profile").clicked() {
                self.open_form(EditMode::Edit, self.profile.clone(), "Edit profile", true);
            }
            if ui.button("Add profile").clicked() {
                self.open_form(EditMode::Add, Profile::blank(), "Add profile", true);
            }
        });
        ui.label(format!(
            "current: {} ({:?}, {} seats, renews {})",
            self.profile.name, self.profile.status, self.profile.seats, self.profile.renews_at
        ));
    }

    fn open_form(&mut self, mode: EditMode, value: Profile, caption: &str, filtered: bool) {
        match build_edit_form(
            &self.host.handle(),
            mode,
            value,
            caption,
            self.form_options(filtered),
        ) {
            Ok(ticket) => self.pending_forms.push((mode, ticket)),
            Err(err) => {
                tracing::error!(%err, "failed to build edit form");
                self.status = err.to_string();
            }
        }
    }

    fn show_worker_buttons(&mut self, ui: &mut egui::Ui) {
        ui.heading("Worker thread");
        ui.horizontal(|ui| {
            if ui.button("Ask for maintenance").clicked() {
                dispatch_worker_command(
                    &self.cmd_tx,
                    WorkerCommand::ConfirmMaintenance,
                    &mut self.status,
                );
            }
            if ui.button("Probe UI thread").clicked() {
                dispatch_worker_command(
                    &self.cmd_tx,
                    WorkerCommand::ProbeUiThread,
                    &mut self.status,
                );
            }
        });
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.poll_tickets();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_dialog_buttons(ui);
            ui.separator();
            self.show_form_buttons(ui);
            ui.separator();
            self.show_worker_buttons(ui);
            ui.separator();
            ui.label(&self.status);
            egui::ScrollArea::vertical().show(ui, |ui| {
                for line in self.log.iter().rev() {
                    ui.monospace(line.as_str());
                }
            });
        });

        self.host.run(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedDemoSettings {
            text_scale: self.text_scale.unwrap_or(1.0),
        };
        if let Ok(serialized) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<WorkerCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);

    // Created on the main thread, which eframe uses as the UI thread.
    let (host, handle) = DialogHost::new(Default::default());
    spawn_worker_thread(cmd_rx, ui_tx, handle);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Dialog & edit form demo")
            .with_inner_size([720.0, 560.0])
            .with_min_inner_size([560.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "forms_demo",
        options,
        Box::new(move |cc| {
            let persisted = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| serde_json::from_str::<PersistedDemoSettings>(&text).ok())
            });
            let text_scale = args
                .text_scale
                .or(persisted.map(|settings| settings.text_scale));
            Ok(Box::new(DemoApp::new(host, cmd_tx, ui_rx, text_scale)))
        }),
    )
}

#[cfg(test)]
mod tests {
    use forms_core::{build_bindings, EditorState};
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn profile_schema_covers_every_widget_archetype() {
        let bindings = build_bindings(
            &Profile::sample(),
            EditMode::Edit,
            Some(&Profile::editable_fields()),
            &HashMap::new(),
        )
        .expect("bindings");
        let kinds: Vec<_> = bindings
            .iter()
            .map(|b| match b.editor() {
                EditorState::Text(_) => "text",
                EditorState::Choice { constrained, .. } => {
                    if *constrained {
                        "constrained"
                    } else {
                        "choice"
                    }
                }
                EditorState::Number { float, .. } => {
                    if *float {
                        "float"
                    } else {
                        "int"
                    }
                }
                EditorState::DateTime(_) => "datetime",
                EditorState::ViewText(_) => "view",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["text", "choice", "constrained", "int", "float", "datetime"]
        );
    }

    #[test]
    fn tags_stay_view_only() {
        let err = build_bindings(&Profile::sample(), EditMode::Edit, None, &HashMap::new())
            .map(|_| ())
            .expect_err("tags have no editor");
        assert!(err.to_string().contains("tags"));
    }

    #[test]
    fn persisted_settings_round_trip() {
        let settings = PersistedDemoSettings { text_scale: 1.25 };
        let json = serde_json::to_string(&settings).expect("serialize");
        let back: PersistedDemoSettings = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.text_scale, 1.25);
    }

    #[test]
    fn worker_commands_have_stable_labels() {
        assert_eq!(
            command_label(&WorkerCommand::ConfirmMaintenance),
            "confirm_maintenance"
        );
        assert_eq!(command_label(&WorkerCommand::ProbeUiThread), "probe_ui_thread");
    }
}
