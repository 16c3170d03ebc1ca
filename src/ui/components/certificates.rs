// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Dashboard grid of certificate tiles.

use std::time::Instant;

use eframe::egui;

use crate::models::certificate::{Certificate, FileKind, FileSource};
use crate::ui::components::images::{ImageCache, ImageKey, ImageState, show_texture};
use crate::ui::components::share::ShareModel;
use crate::ui::components::{Action, download_action, hint};
use crate::utils::{format_upload_date, icon_for};

const TILE_WIDTH: f32 = 220.0;
const PREVIEW_HEIGHT: f32 = 150.0;

/// The certificate list as last received from the server.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CertificatesModel {
    /// `None` until the first successful load.
    items: Option<Vec<Certificate>>,
    /// A list request is in flight.
    pub loading: bool,
}

impl CertificatesModel {
    pub fn items(&self) -> &[Certificate] {
        self.items.as_deref().unwrap_or_default()
    }

    pub fn replace(&mut self, items: Vec<Certificate>) {
        self.items = Some(items);
        self.loading = false;
    }

    pub fn find(&self, id: u64) -> Option<&Certificate> {
        self.items().iter().find(|cert| cert.id == id)
    }

    /// True once a list was loaded and it holds no certificates.
    pub fn shows_empty_state(&self) -> bool {
        self.items.as_ref().is_some_and(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        self.items = None;
        self.loading = false;
    }
}

/// Render the dashboard: header row plus either the empty state or the tile grid.
pub fn view(
    ui: &mut egui::Ui,
    model: &CertificatesModel,
    images: &ImageCache,
    share: &ShareModel,
) -> Vec<Action> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.heading("My certificates");
        if model.loading {
            ui.add(egui::Spinner::new().size(14.0));
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .button(format!("{} Refresh", egui_phosphor::regular::ARROWS_CLOCKWISE))
                .clicked()
            {
                actions.push(Action::Refresh);
            }
        });
    });
    ui.add_space(8.0);

    if model.shows_empty_state() {
        render_empty_state(ui);
        return actions;
    }

    let available = ui.available_width();
    let cols = ((available + 8.0) / (TILE_WIDTH + 8.0)).floor().max(1.0) as usize;
    let now = Instant::now();

    egui::Grid::new("certificate_grid")
        .num_columns(cols)
        .spacing(egui::vec2(8.0, 8.0))
        .show(ui, |ui| {
            for (i, cert) in model.items().iter().enumerate() {
                render_tile(ui, cert, images, share.shows_notice(&cert.shareable_id, now), &mut actions);
                if (i + 1) % cols == 0 {
                    ui.end_row();
                }
            }
        });

    actions
}

fn render_empty_state(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(
            egui::RichText::new(egui_phosphor::regular::CERTIFICATE)
                .size(48.0)
                .color(egui::Color32::from_gray(150)),
        );
        ui.label(egui::RichText::new("No certificates yet").strong());
        hint(ui, "Upload your first certificate to get started.");
    });
}

fn render_tile(
    ui: &mut egui::Ui,
    cert: &Certificate,
    images: &ImageCache,
    show_share_notice: bool,
    actions: &mut Vec<Action>,
) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(TILE_WIDTH);
        ui.vertical(|ui| {
            let preview = render_tile_preview(ui, cert, images, actions);
            if preview
                .on_hover_cursor(egui::CursorIcon::PointingHand)
                .on_hover_text("Open preview")
                .clicked()
            {
                actions.push(Action::Preview(cert.id));
            }

            ui.add_space(4.0);
            ui.add(egui::Label::new(egui::RichText::new(&cert.title).strong()).truncate());
            match cert.credential_link() {
                Some(link) => {
                    ui.hyperlink_to(
                        format!("{} View Credential", egui_phosphor::regular::LINK),
                        link,
                    );
                }
                None => hint(ui, "No credential link"),
            }
            hint(ui, format!("Uploaded: {}", format_upload_date(cert)));

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui
                    .button(egui_phosphor::regular::PENCIL_SIMPLE)
                    .on_hover_text("Edit")
                    .clicked()
                {
                    actions.push(Action::Edit(cert.id));
                }
                if ui
                    .button(egui_phosphor::regular::SHARE_NETWORK)
                    .on_hover_text("Copy share link")
                    .clicked()
                {
                    actions.push(Action::Share(cert.shareable_id.clone()));
                }
                if ui
                    .button(egui_phosphor::regular::DOWNLOAD_SIMPLE)
                    .on_hover_text("Download")
                    .clicked()
                {
                    actions.push(download_action(FileSource::Owned(cert.id), &cert.file_name));
                }
                if ui
                    .button(
                        egui::RichText::new(egui_phosphor::regular::TRASH_SIMPLE)
                            .color(egui::Color32::from_rgb(200, 45, 45)),
                    )
                    .on_hover_text("Delete")
                    .clicked()
                {
                    actions.push(Action::Delete(cert.id));
                }
            });

            if show_share_notice {
                ui.label(
                    egui::RichText::new(format!(
                        "{} Share link copied!",
                        egui_phosphor::regular::CHECK
                    ))
                    .small()
                    .color(egui::Color32::from_rgb(40, 140, 70)),
                );
            }
        });
    });
}

/// Thumbnail for images, a large type glyph for everything else.
fn render_tile_preview(
    ui: &mut egui::Ui,
    cert: &Certificate,
    images: &ImageCache,
    actions: &mut Vec<Action>,
) -> egui::Response {
    let max = egui::vec2(TILE_WIDTH, PREVIEW_HEIGHT);

    if cert.kind() == FileKind::Image {
        let key = ImageKey::thumbnail(FileSource::Owned(cert.id));
        match images.state(&key) {
            ImageState::Ready(texture) => {
                let resp = show_texture(ui, texture, max);
                return ui.interact(resp.rect, resp.id.with("tile_preview"), egui::Sense::click());
            }
            ImageState::Missing => actions.push(Action::LoadImage(key)),
            ImageState::Loading | ImageState::Failed => {}
        }
    }

    let label = match cert.kind() {
        FileKind::Pdf => "PDF",
        FileKind::Image => "IMAGE",
        FileKind::Other => "FILE",
    };
    let (rect, response) = ui.allocate_exact_size(max, egui::Sense::click());
    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        painter.rect_filled(rect, 4.0, ui.visuals().faint_bg_color);
        painter.text(
            rect.center() - egui::vec2(0.0, 10.0),
            egui::Align2::CENTER_CENTER,
            icon_for(&cert.file_type, &cert.file_name),
            egui::FontId::proportional(48.0),
            ui.visuals().weak_text_color(),
        );
        painter.text(
            rect.center() + egui::vec2(0.0, 30.0),
            egui::Align2::CENTER_CENTER,
            label,
            egui::FontId::proportional(12.0),
            ui.visuals().weak_text_color(),
        );
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::route::ShareId;

    fn cert(id: u64) -> Certificate {
        Certificate {
            id,
            title: format!("Cert {id}"),
            credential_link: None,
            file_name: "c.pdf".into(),
            file_type: "application/pdf".into(),
            file_size: 1,
            uploaded_at: None,
            shareable_id: ShareId::new(format!("tok-{id}")),
        }
    }

    #[test]
    fn empty_state_only_after_an_empty_load() {
        let mut model = CertificatesModel::default();
        assert!(!model.shows_empty_state(), "nothing loaded yet");

        model.replace(Vec::new());
        assert!(model.shows_empty_state());

        model.replace(vec![cert(1)]);
        assert!(!model.shows_empty_state());
        assert_eq!(model.find(1).map(|c| c.title.as_str()), Some("Cert 1"));
    }

    #[test]
    fn clear_forgets_loaded_items() {
        let mut model = CertificatesModel::default();
        model.replace(vec![cert(1), cert(2)]);
        model.clear();
        assert!(model.items().is_empty());
        assert!(!model.shows_empty_state());
    }
}
