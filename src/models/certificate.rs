// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Certificate records as returned by the server, plus helpers to classify the stored file.

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;
use time::macros::format_description;

use crate::models::route::ShareId;

/// Certificate metadata owned by the server. The client only keeps transient copies.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: u64,
    pub title: String,
    /// Optional link to an external credential page. Older servers call this `description`.
    #[serde(default, alias = "description")]
    pub credential_link: Option<String>,
    pub file_name: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub file_size: u64,
    /// Raw `yyyy-MM-dd HH:mm:ss` timestamp as sent by the server.
    #[serde(default)]
    pub uploaded_at: Option<String>,
    pub shareable_id: ShareId,
}

impl Certificate {
    /// Preview category derived from the stored MIME type.
    pub fn kind(&self) -> FileKind {
        FileKind::from_mime(&self.file_type)
    }

    /// Credential link when present and not blank.
    pub fn credential_link(&self) -> Option<&str> {
        self.credential_link
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
    }

    /// Upload timestamp parsed from the server format, if well-formed.
    pub fn uploaded_at(&self) -> Option<PrimitiveDateTime> {
        let raw = self.uploaded_at.as_deref()?;
        let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
        PrimitiveDateTime::parse(raw.trim(), &format)
            .or_else(|_| {
                // Tolerate ISO-8601 style `T` separators from other server builds.
                let iso = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
                PrimitiveDateTime::parse(raw.trim(), &iso)
            })
            .ok()
    }
}

/// How a stored file can be previewed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Image,
    Other,
}

impl FileKind {
    /// Classify by substring, so `application/pdf` and `image/jpeg; charset=...` both resolve.
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.to_ascii_lowercase();
        if mime.contains("pdf") {
            FileKind::Pdf
        } else if mime.contains("image") {
            FileKind::Image
        } else {
            FileKind::Other
        }
    }
}

/// Where a certificate's bytes are fetched from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FileSource {
    /// Authenticated endpoints addressed by numeric id.
    Owned(u64),
    /// Public endpoints addressed by share token.
    Shared(ShareId),
}

/// Whether the server should serve the file inline or as an attachment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileDisposition {
    Preview,
    Download,
}

/// Body of `PUT /api/certificates/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub title: String,
    pub credential_link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": 7,
            "title": "AWS Solutions Architect",
            "credentialLink": "https://example.org/cred/7",
            "fileName": "aws.pdf",
            "fileType": "application/pdf",
            "fileSize": 1048576,
            "shareableId": "3f1c2a9e-0000-4000-8000-000000000007",
            "uploadedAt": "2025-03-14 09:26:53",
            "shareableUrl": "/view/3f1c2a9e-0000-4000-8000-000000000007"
        }"#
    }

    #[test]
    fn deserializes_server_payload_and_ignores_unknown_fields() {
        let cert: Certificate = serde_json::from_str(sample_json()).unwrap();

        assert_eq!(cert.id, 7);
        assert_eq!(cert.kind(), FileKind::Pdf);
        assert_eq!(cert.credential_link(), Some("https://example.org/cred/7"));
        assert_eq!(cert.shareable_id.as_str(), "3f1c2a9e-0000-4000-8000-000000000007");
    }

    #[test]
    fn legacy_description_key_maps_to_credential_link() {
        let json = r#"{"id":1,"title":"t","description":"first aid","fileName":"a.jpg",
            "fileType":"image/jpeg","fileSize":10,"shareableId":"abc"}"#;
        let cert: Certificate = serde_json::from_str(json).unwrap();

        assert_eq!(cert.credential_link(), Some("first aid"));
        assert_eq!(cert.kind(), FileKind::Image);
        assert!(cert.uploaded_at().is_none());
    }

    #[test]
    fn blank_credential_link_is_treated_as_missing() {
        let mut cert: Certificate = serde_json::from_str(sample_json()).unwrap();
        cert.credential_link = Some("   ".into());
        assert_eq!(cert.credential_link(), None);
    }

    #[test]
    fn uploaded_at_parses_server_format() {
        let cert: Certificate = serde_json::from_str(sample_json()).unwrap();
        let at = cert.uploaded_at().expect("timestamp parses");

        assert_eq!(at.year(), 2025);
        assert_eq!(u8::from(at.month()), 3);
        assert_eq!(at.day(), 14);
    }

    #[test]
    fn file_kind_falls_back_to_other() {
        assert_eq!(FileKind::from_mime("APPLICATION/PDF"), FileKind::Pdf);
        assert_eq!(FileKind::from_mime("image/png"), FileKind::Image);
        assert_eq!(FileKind::from_mime("text/plain"), FileKind::Other);
        assert_eq!(FileKind::from_mime(""), FileKind::Other);
    }
}
