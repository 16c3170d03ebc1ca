// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by UI and worker logic.

pub mod clipboard;
pub mod file_icons;
pub mod format;
pub mod sanitize_component;

/// Select a Phosphor icon for the given MIME/file name.
pub use file_icons::icon_for;
/// Human-readable sizes and upload dates.
pub use format::{format_megabytes, format_upload_date};
/// Sanitize server-provided names into filesystem-safe path components.
pub use sanitize_component::sanitize_component;
