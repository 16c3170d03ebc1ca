// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges
//! Phosphor file-icon mapping based on MIME type and filename.
//!
//! Certificates are PDFs or images in practice, but the server may report
//! anything, so unknown types fall back to the generic file glyph.

use std::path::Path;

/// Return a Phosphor file icon matching the MIME type or filename.
pub fn icon_for(mime: &str, file_name: &str) -> &'static str {
    let mime = mime
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    if mime.contains("pdf") || ext == "pdf" {
        return egui_phosphor::regular::FILE_PDF;
    }
    if mime.starts_with("image/") || matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "svg") {
        return match ext.as_str() {
            "png" => egui_phosphor::regular::FILE_PNG,
            "jpg" | "jpeg" => egui_phosphor::regular::FILE_JPG,
            "svg" => egui_phosphor::regular::FILE_SVG,
            _ => egui_phosphor::regular::FILE_IMAGE,
        };
    }
    if ext == "txt" || mime.starts_with("text/") {
        return egui_phosphor::regular::FILE_TXT;
    }

    egui_phosphor::regular::FILE
}
