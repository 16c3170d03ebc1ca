// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Reusable egui components structured for MVU-style updates.

pub mod certificates;
pub mod edit;
pub mod images;
pub mod login;
pub mod preview;
pub mod public_view;
pub mod share;
pub mod upload;

use std::path::PathBuf;

use eframe::egui;

use crate::models::certificate::FileSource;
use crate::models::route::ShareId;
use crate::ui::components::images::ImageKey;
use crate::utils::sanitize_component;

/// User intents raised by the certificate grid, the preview modal and the public view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Preview(u64),
    Edit(u64),
    Share(ShareId),
    Delete(u64),
    Download { source: FileSource, path: PathBuf },
    DownloadCancelled,
    LoadImage(ImageKey),
    OpenExternally { source: FileSource, file_name: String },
    Reveal,
    ClosePreview,
    Refresh,
}

/// Ask where to save a certificate file and turn the answer into an [`Action`].
pub(crate) fn download_action(source: FileSource, file_name: &str) -> Action {
    let dialog = rfd::FileDialog::new()
        .set_title("Save certificate")
        .set_file_name(sanitize_component(file_name));

    match dialog.save_file() {
        Some(path) => Action::Download { source, path },
        None => Action::DownloadCancelled,
    }
}

/// Inline feedback shown inside a form or dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormMessage {
    /// Text shown under the form.
    pub text: String,
    /// Whether the message represents an error.
    pub is_error: bool,
}

impl FormMessage {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }
}

/// Render a form message with a status glyph.
pub(crate) fn form_message(ui: &mut egui::Ui, message: &FormMessage) {
    let (icon, color) = if message.is_error {
        (
            egui_phosphor::regular::WARNING_CIRCLE,
            egui::Color32::from_rgb(200, 45, 45),
        )
    } else {
        (egui_phosphor::regular::INFO, egui::Color32::from_gray(110))
    };
    ui.label(egui::RichText::new(format!("{icon} {}", message.text)).color(color));
}

/// Small grey helper text.
pub(crate) fn hint(ui: &mut egui::Ui, text: impl Into<String>) {
    ui.label(
        egui::RichText::new(text)
            .small()
            .color(egui::Color32::from_gray(110)),
    );
}
