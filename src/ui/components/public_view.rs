// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared-link page: title first, full details after an explicit reveal.

use eframe::egui;

use crate::models::certificate::{Certificate, FileSource};
use crate::models::route::ShareId;
use crate::ui::components::images::ImageCache;
use crate::ui::components::preview::render_details;
use crate::ui::components::{Action, FormMessage, form_message, hint};

/// State of the public view for one share token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicViewModel {
    share_id: ShareId,
    /// Title from the metadata prefetch.
    pub title: Option<String>,
    /// Full record, present once revealed.
    pub certificate: Option<Certificate>,
    /// A reveal request is in flight.
    pub loading: bool,
    pub message: Option<FormMessage>,
}

impl PublicViewModel {
    pub fn new(share_id: ShareId) -> Self {
        Self {
            share_id,
            title: None,
            certificate: None,
            loading: false,
            message: None,
        }
    }

    pub fn share_id(&self) -> &ShareId {
        &self.share_id
    }

    pub fn is_revealed(&self) -> bool {
        self.certificate.is_some()
    }

    /// Collapse back to the title-only state.
    pub fn collapse(&mut self) {
        self.certificate = None;
        self.loading = false;
        self.message = None;
    }

    pub fn revealed(&mut self, result: Result<Certificate, String>) {
        self.loading = false;
        match result {
            Ok(cert) => {
                self.title = Some(cert.title.clone());
                self.certificate = Some(cert);
                self.message = None;
            }
            Err(message) => self.message = Some(FormMessage::error(message)),
        }
    }
}

/// Render the public page.
pub fn view(ui: &mut egui::Ui, model: &PublicViewModel, images: &ImageCache) -> Vec<Action> {
    let mut actions = Vec::new();

    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.label(
            egui::RichText::new(egui_phosphor::regular::CERTIFICATE)
                .size(40.0)
                .color(egui::Color32::from_gray(150)),
        );
        match &model.title {
            Some(title) => ui.heading(title),
            None => ui.heading("Shared certificate"),
        };
        hint(ui, "Someone shared this certificate with you.");
        ui.add_space(12.0);

        if !model.is_revealed() {
            let button = egui::Button::new(format!(
                "{} View certificate",
                egui_phosphor::regular::EYE
            ));
            if ui.add_enabled(!model.loading, button).clicked() {
                actions.push(Action::Reveal);
            }
            if model.loading {
                ui.add(egui::Spinner::new().size(16.0));
            }
        }

        if let Some(message) = &model.message {
            ui.add_space(6.0);
            form_message(ui, message);
        }
    });

    if let Some(cert) = &model.certificate {
        ui.add_space(12.0);
        ui.separator();
        egui::ScrollArea::vertical().show(ui, |ui| {
            render_details(
                ui,
                cert,
                FileSource::Shared(model.share_id.clone()),
                images,
                &mut actions,
            );
        });
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cert() -> Certificate {
        Certificate {
            id: 9,
            title: "Shared".into(),
            credential_link: None,
            file_name: "s.jpg".into(),
            file_type: "image/jpeg".into(),
            file_size: 2048,
            uploaded_at: None,
            shareable_id: ShareId::new("tok"),
        }
    }

    #[test]
    fn reveal_success_stores_record_and_title() {
        let mut model = PublicViewModel::new(ShareId::new("tok"));
        model.loading = true;

        model.revealed(Ok(cert()));

        assert!(model.is_revealed());
        assert_eq!(model.title.as_deref(), Some("Shared"));
        assert!(!model.loading);
    }

    #[test]
    fn reveal_failure_keeps_button_and_shows_message() {
        let mut model = PublicViewModel::new(ShareId::new("tok"));
        model.loading = true;

        model.revealed(Err("Certificate not found".into()));

        assert!(!model.is_revealed());
        assert_eq!(model.message, Some(FormMessage::error("Certificate not found")));
    }

    #[test]
    fn collapse_hides_details_but_keeps_title() {
        let mut model = PublicViewModel::new(ShareId::new("tok"));
        model.revealed(Ok(cert()));

        model.collapse();

        assert!(!model.is_revealed());
        assert_eq!(model.title.as_deref(), Some("Shared"));
    }
}
