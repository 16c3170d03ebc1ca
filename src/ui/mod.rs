// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for the certificate client.
//! Handles layout, dialogs, and wiring between the views and the command workers.

pub mod components;

use std::collections::VecDeque;
use std::time::Instant;

use eframe::egui;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::mvu::{self, AppModel, Command, Msg, UiMode};
use crate::ui::components::{certificates, edit, login, preview, public_view, share, upload};
use crate::ui::components::upload::UploadMsg;

/// Stateful egui application talking to one CertHub server.
pub struct CertHubApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl CertHubApp {
    /// Spawn the command workers and queue the startup request for the configured route.
    pub fn new(ctx: &egui::Context, config: &ClientConfig, api: ApiClient) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get().clamp(2, 4))
            .unwrap_or(2);
        for _ in 0..threads {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let api = api.clone();
            let ctx = ctx.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd, &api);
                    if msg_tx.send(msg).is_err() {
                        break;
                    }
                    // Workers finish between frames; wake the UI to pick up the reply.
                    ctx.request_repaint();
                }
            });
        }

        let mut app = Self {
            model: AppModel::new(config.origin.clone()),
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
        };

        let mut commands = Vec::new();
        mvu::start(&mut app.model, &config.route, &mut commands);
        app.dispatch(commands);
        app
    }

    fn dispatch(&mut self, commands: Vec<Command>) {
        for cmd in commands {
            if self.cmd_tx.send(cmd).is_ok() {
                self.model.pending_commands += 1;
            }
        }
    }
}

impl eframe::App for CertHubApp {
    // Required by eframe 0.34; drawing still happens in `update`, which eframe
    // invokes right before `ui` on every frame.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    /// Drain worker replies, apply queued messages, then draw the frame.
    ///
    /// Decoded images are turned into textures here since that needs the context.
    /// Messages produced while drawing are handled on the next frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_spacing(ctx);

        // Pull messages produced by the command workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        let mut msgs: VecDeque<Msg> = std::mem::take(&mut self.inbox).into();
        while let Some(msg) = msgs.pop_front() {
            match msg {
                Msg::ImageDecoded { key, image } => {
                    let texture = ctx.load_texture(
                        format!("certificate-{:?}-{:?}", key.source, key.variant),
                        image,
                        egui::TextureOptions::default(),
                    );
                    msgs.push_back(Msg::ImageReady { key, texture });
                }
                other => {
                    let mut commands = Vec::new();
                    mvu::update(&mut self.model, other, &mut commands);
                    self.dispatch(commands);
                }
            }
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                self.render_home_button(ui);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.render_theme_controls(ui);
                    if self.model.mode == UiMode::Dashboard {
                        ui.separator();
                        self.render_session_controls(ui);
                    }
                });
            });
            ui.add_space(4.0);
        });

        if self.model.mode == UiMode::Dashboard {
            self.render_dialogs(ctx);
        }
        self.render_error_modal(ctx);

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            egui::ScrollArea::vertical().show(ui, |ui| match self.model.mode {
                UiMode::LoggedOut if self.model.auth_pending => {
                    ui.vertical_centered(|ui| {
                        ui.add_space(48.0);
                        ui.add(egui::Spinner::new().size(24.0));
                        ui.label("Checking session…");
                    });
                }
                UiMode::LoggedOut => {
                    let msgs = login::view(ui, &self.model.login);
                    self.inbox.extend(msgs.into_iter().map(Msg::Login));
                }
                UiMode::Dashboard => {
                    let actions = certificates::view(
                        ui,
                        &self.model.certificates,
                        &self.model.images,
                        &self.model.share,
                    );
                    self.inbox.extend(actions.into_iter().map(Msg::from));
                }
                UiMode::PublicView => {
                    if let Some(public) = &self.model.public_view {
                        let actions = public_view::view(ui, public, &self.model.images);
                        self.inbox.extend(actions.into_iter().map(Msg::from));
                    }
                }
            });
        });

        if let Some(remaining) = self.model.share.notice_remaining(Instant::now()) {
            ctx.request_repaint_after(remaining);
        }
        if !self.inbox.is_empty() {
            ctx.request_repaint();
        }
    }
}

impl CertHubApp {
    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    fn render_theme_controls(&mut self, ui: &mut egui::Ui) {
        ui.add_space(2.0);
        egui::widgets::global_theme_preference_switch(ui);
    }

    /// App title doubling as the Home button.
    fn render_home_button(&mut self, ui: &mut egui::Ui) {
        let title = egui::RichText::new(format!(
            "{} CertHub",
            egui_phosphor::regular::CERTIFICATE
        ))
        .heading();
        if ui
            .add(egui::Button::new(title).frame(false))
            .on_hover_text("Home")
            .clicked()
        {
            self.inbox.push(Msg::HomeRequested);
        }
    }

    /// Upload and logout buttons plus the signed-in user (right-to-left layout).
    fn render_session_controls(&mut self, ui: &mut egui::Ui) {
        if ui
            .button(format!("{} Logout", egui_phosphor::regular::SIGN_OUT))
            .clicked()
        {
            self.inbox.push(Msg::LogoutRequested);
        }
        if ui
            .button(format!("{} Upload", egui_phosphor::regular::UPLOAD_SIMPLE))
            .clicked()
        {
            self.inbox.push(Msg::Upload(UploadMsg::Open));
        }
        if let Some(name) = &self.model.username {
            ui.label(
                egui::RichText::new(format!("{} {name}", egui_phosphor::regular::USER))
                    .color(egui::Color32::from_gray(110)),
            );
        }
    }

    /// Dashboard windows layered over the central panel.
    fn render_dialogs(&mut self, ctx: &egui::Context) {
        let msgs = upload::view(ctx, &self.model.upload);
        self.inbox.extend(msgs.into_iter().map(Msg::Upload));

        let msgs = edit::view(ctx, &self.model.edit);
        self.inbox.extend(msgs.into_iter().map(Msg::Edit));

        let actions = preview::view(ctx, &self.model.preview, &self.model.images);
        self.inbox.extend(actions.into_iter().map(Msg::from));

        if share::view_manual_copy(ctx, &self.model.share) {
            self.inbox.push(Msg::DismissManualCopy);
        }

        self.render_delete_confirmation(ctx);
    }

    fn render_delete_confirmation(&mut self, ctx: &egui::Context) {
        let Some(id) = self.model.pending_delete else {
            return;
        };
        let title = self
            .model
            .certificates
            .find(id)
            .map(|cert| cert.title.clone())
            .unwrap_or_else(|| "this certificate".to_string());

        egui::Window::new("Delete certificate")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(format!("Are you sure you want to delete \"{title}\"?"));
                ui.label(
                    egui::RichText::new("This cannot be undone.")
                        .small()
                        .color(egui::Color32::from_gray(110)),
                );
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let delete = egui::Button::new(
                        egui::RichText::new(format!(
                            "{} Delete",
                            egui_phosphor::regular::TRASH_SIMPLE
                        ))
                        .color(egui::Color32::from_rgb(200, 45, 45)),
                    );
                    if ui.add(delete).clicked() {
                        self.inbox.push(Msg::DeleteConfirmed);
                    }
                    if ui.button("Cancel").clicked() {
                        self.inbox.push(Msg::DeleteCancelled);
                    }
                });
            });
    }

    /// Render a simple modal window for error messages.
    fn render_error_modal(&mut self, ctx: &egui::Context) {
        if let Some(message) = self.model.error.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
                .show(ctx, |ui| {
                    ui.label(message);
                    ui.add_space(8.0);
                    if ui.button("OK").clicked() {
                        self.inbox.push(Msg::DismissError);
                    }
                });
        }
    }

    /// Render latest status message and the background work indicator.
    fn render_status(&self, ui: &mut egui::Ui) {
        let pending = self.model.pending_commands;
        if self.model.status.is_none() && pending == 0 {
            return;
        }
        let text = self.model.status.as_deref().unwrap_or("Working");
        let display = if pending > 0 {
            format!("{text}  ({pending} working…)")
        } else {
            text.to_string()
        };
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(display).color(egui::Color32::from_gray(68)));
            if pending > 0 {
                ui.add(egui::Spinner::new().size(14.0))
                    .on_hover_text(format!("{pending} task(s) running in background"));
            }
        });
    }
}
