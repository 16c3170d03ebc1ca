// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Upload validation and request encoding (UI-agnostic).
//!
//! Validation runs twice: once on the draft before any command is queued,
//! and once more on the bytes actually read from disk, since the file may
//! have changed between picking and submitting.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use thiserror::Error;

/// Largest file the server accepts (15 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 15 * 1024 * 1024;

/// File extensions offered in the upload picker.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg"];

/// Local upload failures; none of these reach the network.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Please enter a title")]
    MissingTitle,
    #[error("Please select a file")]
    NoFile,
    #[error("File size exceeds 15MB limit")]
    TooLarge { size: u64 },
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A file chosen in the picker, with the size observed at pick time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickedFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl PickedFile {
    /// Stat a path into a picked file.
    pub fn from_path(path: PathBuf) -> Result<Self, UploadError> {
        let size = path
            .metadata()
            .map_err(|source| UploadError::Read {
                path: path.clone(),
                source,
            })?
            .len();
        let name = file_name_of(&path);
        Ok(Self { path, name, size })
    }
}

/// Validated upload ready to be encoded on a worker thread.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadPlan {
    pub title: String,
    pub credential_link: String,
    pub file: PickedFile,
}

/// Body of `POST /api/certificates/upload`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub title: String,
    pub credential_link: String,
    pub file_name: String,
    /// Base64 (standard alphabet, padded) file content.
    pub file_data: String,
}

/// Check the form fields and build a plan, or explain why the upload cannot start.
pub fn validate(
    title: &str,
    credential_link: &str,
    file: Option<&PickedFile>,
) -> Result<UploadPlan, UploadError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(UploadError::MissingTitle);
    }
    let file = file.ok_or(UploadError::NoFile)?;
    check_size(file.size)?;

    Ok(UploadPlan {
        title: title.to_string(),
        credential_link: credential_link.trim().to_string(),
        file: file.clone(),
    })
}

/// Read the planned file and encode it for the JSON upload body.
pub fn encode(plan: &UploadPlan) -> Result<UploadRequest, UploadError> {
    let bytes = std::fs::read(&plan.file.path).map_err(|source| UploadError::Read {
        path: plan.file.path.clone(),
        source,
    })?;
    check_size(bytes.len() as u64)?;

    Ok(UploadRequest {
        title: plan.title.clone(),
        credential_link: plan.credential_link.clone(),
        file_name: plan.file.name.clone(),
        file_data: STANDARD.encode(&bytes),
    })
}

fn check_size(size: u64) -> Result<(), UploadError> {
    if size > MAX_UPLOAD_BYTES {
        Err(UploadError::TooLarge { size })
    } else {
        Ok(())
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "certificate".to_string())
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use tempfile::TempDir;

    use super::*;

    fn picked(size: u64) -> PickedFile {
        PickedFile {
            path: PathBuf::from("/nonexistent/cert.pdf"),
            name: "cert.pdf".into(),
            size,
        }
    }

    #[test]
    fn validate_requires_a_file() {
        let err = validate("Title", "", None).unwrap_err();
        assert!(matches!(err, UploadError::NoFile));
        assert_eq!(err.to_string(), "Please select a file");
    }

    #[test]
    fn validate_requires_a_title() {
        let err = validate("   ", "", Some(&picked(10))).unwrap_err();
        assert!(matches!(err, UploadError::MissingTitle));
    }

    #[test]
    fn validate_accepts_exactly_the_limit() {
        let plan = validate(" Title ", " https://x ", Some(&picked(MAX_UPLOAD_BYTES))).unwrap();
        assert_eq!(plan.title, "Title");
        assert_eq!(plan.credential_link, "https://x");
    }

    #[test]
    fn validate_rejects_one_byte_over_the_limit() {
        let err = validate("Title", "", Some(&picked(MAX_UPLOAD_BYTES + 1))).unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { .. }));
        assert_eq!(err.to_string(), "File size exceeds 15MB limit");
    }

    #[test]
    fn encode_base64s_file_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("cert.pdf");
        fs::write(&path, b"%PDF-1.4 hello").unwrap();

        let file = PickedFile::from_path(path).unwrap();
        assert_eq!(file.name, "cert.pdf");
        assert_eq!(file.size, 14);

        let plan = validate("Title", "", Some(&file)).unwrap();
        let request = encode(&plan).unwrap();

        assert_eq!(request.file_name, "cert.pdf");
        assert_eq!(STANDARD.decode(&request.file_data).unwrap(), b"%PDF-1.4 hello");

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("fileData").is_some());
        assert!(json.get("credentialLink").is_some());
    }

    #[test]
    fn encode_rechecks_size_of_grown_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("grown.pdf");
        File::create(&path).unwrap();

        let file = PickedFile::from_path(path.clone()).unwrap();
        let plan = validate("Title", "", Some(&file)).unwrap();

        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_len(MAX_UPLOAD_BYTES + 1)
            .unwrap();

        assert!(matches!(encode(&plan), Err(UploadError::TooLarge { .. })));
    }

    #[test]
    fn encode_reports_missing_file() {
        let plan = validate("Title", "", Some(&picked(3))).unwrap();
        assert!(matches!(encode(&plan), Err(UploadError::Read { .. })));
    }
}
