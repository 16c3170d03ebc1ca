// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Turn server-provided file names into names that are safe to save locally.
//!
//! File names come from whoever uploaded the certificate, so they may carry
//! path separators, control characters, or Windows device names.

/// Basenames Windows refuses to create regardless of extension.
const RESERVED_BASENAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Name used when nothing usable survives sanitization.
const FALLBACK_NAME: &str = "certificate";

/// Produce a filesystem-safe file name from an arbitrary string.
///
/// Unicode is transliterated to ASCII, anything outside `[A-Za-z0-9._-]`
/// becomes `_`, runs of `_` or `.` collapse, and trailing dots are dropped.
/// The extension is kept so the saved file still opens in the right viewer.
pub fn sanitize_component(value: &str) -> String {
    let ascii = deunicode::deunicode(value);

    let mut out = String::with_capacity(ascii.len());
    for ch in ascii.chars() {
        let mapped = match ch {
            c if c.is_ascii_alphanumeric() || c == '-' => c,
            '.' => '.',
            _ => '_',
        };
        let repeat = matches!(mapped, '_' | '.') && out.ends_with(mapped);
        if !repeat {
            out.push(mapped);
        }
    }

    let mut out = out.replace("_.", ".");
    let trimmed_len = out.trim_end_matches(['.', '_']).len();
    out.truncate(trimmed_len);
    let out = out.trim_start_matches(['.', '_']).to_string();

    if out.is_empty() {
        return FALLBACK_NAME.to_string();
    }

    let (base, ext) = match out.split_once('.') {
        Some((base, ext)) if !base.is_empty() => (base, Some(ext)),
        _ => (out.as_str(), None),
    };
    if RESERVED_BASENAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(base))
    {
        return match ext {
            Some(ext) => format!("{base}_.{ext}"),
            None => format!("{base}_"),
        };
    }

    out
}
