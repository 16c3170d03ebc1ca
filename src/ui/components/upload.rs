// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Upload dialog: title, credential link and one file.

use eframe::egui;

use crate::models::upload::{self, MAX_UPLOAD_BYTES, PickedFile, UploadPlan};
use crate::ui::components::{FormMessage, form_message, hint};
use crate::utils::{format_megabytes, icon_for};

/// Dialog state. Field values survive closing until a successful upload resets them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadModel {
    pub open: bool,
    pub title: String,
    pub credential_link: String,
    pub file: Option<PickedFile>,
    pub message: Option<FormMessage>,
    pub submitting: bool,
}

/// Messages emitted by the upload dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadMsg {
    Open,
    Close,
    TitleChanged(String),
    CredentialLinkChanged(String),
    RequestPickFile,
    FilePicked(Option<PickedFile>),
    FilePickFailed(String),
    Submit,
}

/// Side effects requested by the upload dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadCommand {
    PickFile,
    Submit(UploadPlan),
}

/// Apply a message to the upload dialog.
pub fn update(model: &mut UploadModel, msg: UploadMsg, cmds: &mut Vec<UploadCommand>) {
    match msg {
        UploadMsg::Open => {
            model.open = true;
            model.message = None;
        }
        UploadMsg::Close => {
            model.open = false;
            model.message = None;
        }
        UploadMsg::TitleChanged(text) => model.title = text,
        UploadMsg::CredentialLinkChanged(text) => model.credential_link = text,
        UploadMsg::RequestPickFile => cmds.push(UploadCommand::PickFile),
        UploadMsg::FilePicked(Some(file)) => {
            // Warn right away; Submit still refuses the file.
            model.message = (file.size > MAX_UPLOAD_BYTES)
                .then(|| FormMessage::error(upload::UploadError::TooLarge { size: file.size }.to_string()));
            model.file = Some(file);
        }
        UploadMsg::FilePicked(None) => {}
        UploadMsg::FilePickFailed(err) => model.message = Some(FormMessage::error(err)),
        UploadMsg::Submit => {
            match upload::validate(&model.title, &model.credential_link, model.file.as_ref()) {
                Ok(plan) => {
                    model.submitting = true;
                    model.message = Some(FormMessage::info("Uploading…"));
                    cmds.push(UploadCommand::Submit(plan));
                }
                Err(err) => model.message = Some(FormMessage::error(err.to_string())),
            }
        }
    }
}

/// Record the outcome of an upload request. Success resets and closes the dialog.
pub fn finish(model: &mut UploadModel, result: Result<(), String>) {
    model.submitting = false;
    match result {
        Ok(()) => *model = UploadModel::default(),
        Err(message) => model.message = Some(FormMessage::error(message)),
    }
}

/// Render the upload window when open.
pub fn view(ctx: &egui::Context, model: &UploadModel) -> Vec<UploadMsg> {
    let mut msgs = Vec::new();
    if !model.open {
        return msgs;
    }

    egui::Window::new("Upload certificate")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.set_min_width(360.0);

            ui.label("Title");
            let mut title = model.title.clone();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut title)
                        .hint_text("e.g., AWS Solutions Architect")
                        .desired_width(f32::INFINITY),
                )
                .changed()
            {
                msgs.push(UploadMsg::TitleChanged(title));
            }

            ui.add_space(6.0);
            ui.label("Credential link (optional)");
            let mut link = model.credential_link.clone();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut link)
                        .hint_text("https://")
                        .desired_width(f32::INFINITY),
                )
                .changed()
            {
                msgs.push(UploadMsg::CredentialLinkChanged(link));
            }

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui
                    .button(format!("{} Choose file…", egui_phosphor::regular::FOLDER_OPEN))
                    .clicked()
                {
                    msgs.push(UploadMsg::RequestPickFile);
                }
                match &model.file {
                    Some(file) => {
                        ui.label(format!(
                            "{} {} ({})",
                            icon_for(&guess_mime(file), &file.name),
                            file.name,
                            format_megabytes(file.size)
                        ));
                    }
                    None => hint(ui, "No file selected"),
                }
            });
            hint(ui, "PDF or JPEG, up to 15 MB.");

            if let Some(message) = &model.message {
                ui.add_space(6.0);
                form_message(ui, message);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let upload = egui::Button::new(format!(
                    "{} Upload",
                    egui_phosphor::regular::UPLOAD_SIMPLE
                ));
                if ui.add_enabled(!model.submitting, upload).clicked() {
                    msgs.push(UploadMsg::Submit);
                }
                if ui.button("Cancel").clicked() {
                    msgs.push(UploadMsg::Close);
                }
            });
        });

    msgs
}

fn guess_mime(file: &PickedFile) -> String {
    mime_guess::from_path(&file.path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
