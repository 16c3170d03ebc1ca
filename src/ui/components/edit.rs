// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Edit dialog for a certificate's title and credential link.

use eframe::egui;

use crate::models::certificate::{Certificate, UpdateRequest};
use crate::ui::components::{FormMessage, form_message};

/// Dialog state. `target` is the id being edited; at most one at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditModel {
    target: Option<u64>,
    pub title: String,
    pub credential_link: String,
    pub message: Option<FormMessage>,
    pub submitting: bool,
}

/// Messages emitted by the edit dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditMsg {
    TitleChanged(String),
    CredentialLinkChanged(String),
    Submit,
    Close,
}

/// Side effects requested by the edit dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditCommand {
    Save { id: u64, request: UpdateRequest },
}

impl EditModel {
    /// Id of the certificate being edited, if the dialog is open.
    pub fn target(&self) -> Option<u64> {
        self.target
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    /// Open the dialog with the server's current values, replacing anything typed before.
    pub fn open_with(&mut self, cert: &Certificate) {
        *self = EditModel {
            target: Some(cert.id),
            title: cert.title.clone(),
            credential_link: cert.credential_link.clone().unwrap_or_default(),
            message: None,
            submitting: false,
        };
    }

    pub fn close(&mut self) {
        *self = EditModel::default();
    }
}

/// Apply a message to the edit dialog.
pub fn update(model: &mut EditModel, msg: EditMsg, cmds: &mut Vec<EditCommand>) {
    match msg {
        EditMsg::TitleChanged(text) => model.title = text,
        EditMsg::CredentialLinkChanged(text) => model.credential_link = text,
        EditMsg::Close => model.close(),
        EditMsg::Submit => {
            let Some(id) = model.target else {
                return;
            };
            let title = model.title.trim();
            if title.is_empty() {
                model.message = Some(FormMessage::error("Please enter a title"));
                return;
            }
            model.submitting = true;
            model.message = Some(FormMessage::info("Saving…"));
            cmds.push(EditCommand::Save {
                id,
                request: UpdateRequest {
                    title: title.to_string(),
                    credential_link: model.credential_link.trim().to_string(),
                },
            });
        }
    }
}

/// Record the outcome of saving certificate `id`. Success closes the dialog and clears the target.
///
/// Replies for a certificate other than the current target are ignored, so a late
/// answer never touches a dialog opened afterwards.
pub fn finish(model: &mut EditModel, id: u64, result: Result<(), String>) {
    if model.target != Some(id) {
        return;
    }
    match result {
        Ok(()) => model.close(),
        Err(message) => {
            model.submitting = false;
            model.message = Some(FormMessage::error(message));
        }
    }
}

/// Render the edit window while a target is set.
pub fn view(ctx: &egui::Context, model: &EditModel) -> Vec<EditMsg> {
    let mut msgs = Vec::new();
    if !model.is_open() {
        return msgs;
    }

    egui::Window::new("Edit certificate")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.set_min_width(360.0);

            ui.label("Title");
            let mut title = model.title.clone();
            if ui
                .add(egui::TextEdit::singleline(&mut title).desired_width(f32::INFINITY))
                .changed()
            {
                msgs.push(EditMsg::TitleChanged(title));
            }

            ui.add_space(6.0);
            ui.label("Credential link");
            let mut link = model.credential_link.clone();
            if ui
                .add(
                    egui::TextEdit::singleline(&mut link)
                        .hint_text("https://")
                        .desired_width(f32::INFINITY),
                )
                .changed()
            {
                msgs.push(EditMsg::CredentialLinkChanged(link));
            }

            if let Some(message) = &model.message {
                ui.add_space(6.0);
                form_message(ui, message);
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let save = egui::Button::new(format!(
                    "{} Save",
                    egui_phosphor::regular::FLOPPY_DISK
                ));
                if ui.add_enabled(!model.submitting, save).clicked() {
                    msgs.push(EditMsg::Submit);
                }
                if ui.button("Cancel").clicked() {
                    msgs.push(EditMsg::Close);
                }
            });
        });

    msgs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::route::ShareId;

    fn server_copy() -> Certificate {
        Certificate {
            id: 5,
            title: "Server title".into(),
            credential_link: Some("https://cred/5".into()),
            file_name: "x.pdf".into(),
            file_type: "application/pdf".into(),
            file_size: 1,
            uploaded_at: None,
            shareable_id: ShareId::new("s5"),
        }
    }

    #[test]
    fn open_with_discards_stale_input() {
        let mut model = EditModel {
            title: "typed earlier".into(),
            message: Some(FormMessage::error("old")),
            ..Default::default()
        };

        model.open_with(&server_copy());

        assert_eq!(model.target(), Some(5));
        assert_eq!(model.title, "Server title");
        assert_eq!(model.credential_link, "https://cred/5");
        assert!(model.message.is_none());
    }

    #[test]
    fn submit_sends_trimmed_fields_for_target() {
        let mut model = EditModel::default();
        model.open_with(&server_copy());
        let mut cmds = Vec::new();

        update(&mut model, EditMsg::TitleChanged("  New  ".into()), &mut cmds);
        update(&mut model, EditMsg::Submit, &mut cmds);

        assert_eq!(
            cmds,
            vec![EditCommand::Save {
                id: 5,
                request: UpdateRequest {
                    title: "New".into(),
                    credential_link: "https://cred/5".into(),
                },
            }]
        );
    }

    #[test]
    fn submit_without_target_does_nothing() {
        let mut model = EditModel::default();
        let mut cmds = Vec::new();
        update(&mut model, EditMsg::Submit, &mut cmds);
        assert!(cmds.is_empty());
    }

    #[test]
    fn close_clears_target() {
        let mut model = EditModel::default();
        model.open_with(&server_copy());
        update(&mut model, EditMsg::Close, &mut Vec::new());
        assert_eq!(model.target(), None);
    }

    #[test]
    fn late_reply_for_previous_target_is_ignored() {
        let mut model = EditModel::default();
        model.open_with(&server_copy());
        update(&mut model, EditMsg::Submit, &mut Vec::new());
        update(&mut model, EditMsg::Close, &mut Vec::new());

        let other = Certificate {
            id: 3,
            title: "Other".into(),
            ..server_copy()
        };
        model.open_with(&other);
        update(&mut model, EditMsg::TitleChanged("typing B".into()), &mut Vec::new());

        finish(&mut model, 5, Err("Certificate not found".into()));
        assert_eq!(model.target(), Some(3));
        assert!(model.message.is_none());

        finish(&mut model, 5, Ok(()));
        assert_eq!(model.target(), Some(3));
        assert_eq!(model.title, "typing B");
    }

    #[test]
    fn failed_save_keeps_dialog_open() {
        let mut model = EditModel::default();
        model.open_with(&server_copy());
        update(&mut model, EditMsg::Submit, &mut Vec::new());

        finish(&mut model, 5, Err("Title too long".into()));

        assert_eq!(model.target(), Some(5));
        assert!(!model.submitting);
        assert_eq!(model.message, Some(FormMessage::error("Title too long")));
    }
}
