// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Display formatting for certificate metadata.

use time::macros::format_description;

use crate::models::certificate::Certificate;

/// Size in megabytes with two decimals, e.g. `1.50 MB`.
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Upload date as `YYYY-MM-DD`; the raw server string when it cannot be parsed.
pub fn format_upload_date(cert: &Certificate) -> String {
    let format = format_description!("[year]-[month]-[day]");
    match cert.uploaded_at() {
        Some(at) => at
            .format(&format)
            .unwrap_or_else(|_| at.date().to_string()),
        None => cert
            .uploaded_at
            .clone()
            .unwrap_or_else(|| "unknown".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::route::ShareId;

    fn cert(uploaded_at: Option<&str>) -> Certificate {
        Certificate {
            id: 1,
            title: "t".into(),
            credential_link: None,
            file_name: "a.pdf".into(),
            file_type: "application/pdf".into(),
            file_size: 0,
            uploaded_at: uploaded_at.map(str::to_string),
            shareable_id: ShareId::new("s"),
        }
    }

    #[test]
    fn megabytes_use_two_decimals() {
        assert_eq!(format_megabytes(0), "0.00 MB");
        assert_eq!(format_megabytes(1024 * 1024 * 3 / 2), "1.50 MB");
        assert_eq!(format_megabytes(15 * 1024 * 1024), "15.00 MB");
    }

    #[test]
    fn upload_date_drops_time_of_day() {
        assert_eq!(
            format_upload_date(&cert(Some("2024-12-01 23:59:59"))),
            "2024-12-01"
        );
    }

    #[test]
    fn unparsable_upload_date_is_shown_verbatim() {
        assert_eq!(format_upload_date(&cert(Some("yesterday"))), "yesterday");
        assert_eq!(format_upload_date(&cert(None)), "unknown");
    }
}
