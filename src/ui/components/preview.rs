// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Full-size certificate preview, used by the dashboard modal and the public view.

use eframe::egui;

use crate::models::certificate::{Certificate, FileKind, FileSource};
use crate::ui::components::images::{ImageCache, ImageKey, ImageState, show_texture};
use crate::ui::components::{Action, download_action, hint};
use crate::utils::{format_megabytes, format_upload_date, icon_for};

/// The certificate shown in the preview modal, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreviewModel {
    certificate: Option<Certificate>,
}

impl PreviewModel {
    pub fn certificate(&self) -> Option<&Certificate> {
        self.certificate.as_ref()
    }

    pub fn show(&mut self, cert: Certificate) {
        self.certificate = Some(cert);
    }

    pub fn close(&mut self) {
        self.certificate = None;
    }
}

/// Render the preview modal for an owned certificate.
pub fn view(ctx: &egui::Context, model: &PreviewModel, images: &ImageCache) -> Vec<Action> {
    let mut actions = Vec::new();
    let Some(cert) = model.certificate() else {
        return actions;
    };

    let mut open = true;
    egui::Window::new(cert.title.as_str())
        .id(egui::Id::new("certificate_preview"))
        .collapsible(false)
        .resizable(true)
        .default_size(egui::vec2(720.0, 640.0))
        .open(&mut open)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                render_details(ui, cert, FileSource::Owned(cert.id), images, &mut actions);
            });
        });

    if !open {
        actions.push(Action::ClosePreview);
    }
    actions
}

/// Credential link, inline preview, file facts and a download button.
pub(crate) fn render_details(
    ui: &mut egui::Ui,
    cert: &Certificate,
    source: FileSource,
    images: &ImageCache,
    actions: &mut Vec<Action>,
) {
    if let Some(link) = cert.credential_link() {
        ui.hyperlink_to(
            format!("{} View Credential", egui_phosphor::regular::LINK),
            link,
        );
        ui.add_space(8.0);
    }

    render_inline_preview(ui, cert, &source, images, actions);

    ui.add_space(8.0);
    egui::Grid::new(("certificate_facts", cert.id))
        .num_columns(2)
        .spacing(egui::vec2(12.0, 4.0))
        .show(ui, |ui| {
            ui.strong("File");
            ui.label(&cert.file_name);
            ui.end_row();
            ui.strong("Size");
            ui.label(format_megabytes(cert.file_size));
            ui.end_row();
            ui.strong("Uploaded");
            ui.label(format_upload_date(cert));
            ui.end_row();
        });

    ui.add_space(8.0);
    if ui
        .button(format!(
            "{} Download Certificate",
            egui_phosphor::regular::DOWNLOAD_SIMPLE
        ))
        .clicked()
    {
        actions.push(download_action(source, &cert.file_name));
    }
}

fn render_inline_preview(
    ui: &mut egui::Ui,
    cert: &Certificate,
    source: &FileSource,
    images: &ImageCache,
    actions: &mut Vec<Action>,
) {
    let max = egui::vec2(ui.available_width().max(200.0), 600.0);

    match cert.kind() {
        FileKind::Image => {
            let key = ImageKey::full(source.clone());
            match images.state(&key) {
                ImageState::Ready(texture) => {
                    ui.vertical_centered(|ui| {
                        show_texture(ui, texture, max);
                    });
                }
                ImageState::Loading => {
                    ui.add(egui::Spinner::new().size(24.0));
                }
                ImageState::Failed => hint(ui, "Preview could not be loaded."),
                ImageState::Missing => actions.push(Action::LoadImage(key)),
            }
        }
        FileKind::Pdf => {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(icon_for(&cert.file_type, &cert.file_name))
                        .size(64.0)
                        .color(egui::Color32::from_gray(150)),
                );
                if ui
                    .button(format!(
                        "{} Open PDF preview",
                        egui_phosphor::regular::ARROW_SQUARE_OUT
                    ))
                    .on_hover_text("Opens the document in your PDF viewer")
                    .clicked()
                {
                    actions.push(Action::OpenExternally {
                        source: source.clone(),
                        file_name: cert.file_name.clone(),
                    });
                }
            });
        }
        FileKind::Other => {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(egui_phosphor::regular::FILE)
                        .size(64.0)
                        .color(egui::Color32::from_gray(190)),
                );
                hint(ui, "Preview not available for this file type");
            });
        }
    }
}
