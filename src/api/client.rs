// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Blocking client for the CertHub JSON API.

use std::fmt;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::api::ApiError;
use crate::models::certificate::{Certificate, FileDisposition, FileSource, UpdateRequest};
use crate::models::route::ShareId;
use crate::models::upload::UploadRequest;

/// Sent in place of a bot-verification response; the server only checks that it is non-blank.
pub const LOGIN_CHALLENGE_PLACEHOLDER: &str = "disabled";

/// Answer of `GET /api/auth/status`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AuthStatus {
    pub authenticated: bool,
    #[serde(default)]
    pub username: Option<String>,
}

/// Body of `POST /api/auth/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub recaptcha_response: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            recaptcha_response: LOGIN_CHALLENGE_PLACEHOLDER.to_string(),
        }
    }
}

// Commands are logged at debug level; keep the password out of the log.
impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Answer of `POST /api/auth/login`, sent for both accepted and rejected credentials.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Cookie-keeping HTTP client bound to one server origin.
///
/// Cloning is cheap and clones share the cookie jar, so every worker thread
/// sees the same session.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    /// Create a client for the server at `base` (only scheme, host and port are used).
    ///
    /// # Errors
    ///
    /// Returns an error when `base` cannot carry a path or the HTTP client cannot be built.
    pub fn new(base: Url) -> Result<Self, ApiError> {
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base.to_string()));
        }
        let http = Client::builder()
            .cookie_store(true)
            .user_agent(concat!("certhub-desk/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base })
    }

    /// Client that ignores proxy environment variables, for tests against a loopback server.
    #[cfg(test)]
    pub fn local(base: Url) -> Self {
        let http = Client::builder()
            .cookie_store(true)
            .no_proxy()
            .build()
            .expect("loopback client builds");
        Self { http, base }
    }

    /// Server base URL this client talks to.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `GET /api/auth/status`.
    pub fn auth_status(&self) -> Result<AuthStatus, ApiError> {
        let url = self.endpoint(&["api", "auth", "status"])?;
        self.send_json(self.http.get(url))
    }

    /// `POST /api/auth/login`.
    ///
    /// Rejected credentials come back as `Ok` with `success == false` when the
    /// server sends a login body (it does so with status 401), so callers see
    /// its message either way.
    pub fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let url = self.endpoint(&["api", "auth", "login"])?;
        let response = self.http.post(url).json(request).send()?;
        let status = response.status();
        let body = response.text()?;

        let parsed = serde_json::from_str::<LoginResponse>(&body);
        if status.is_success() {
            return Ok(parsed?);
        }
        match parsed {
            Ok(parsed) if parsed.message.is_some() => Ok(parsed),
            _ => Err(ApiError::from_status(status.as_u16(), &body)),
        }
    }

    /// `POST /api/auth/logout`.
    pub fn logout(&self) -> Result<(), ApiError> {
        let url = self.endpoint(&["api", "auth", "logout"])?;
        self.send_empty(self.http.post(url))
    }

    /// `GET /api/certificates`.
    pub fn list_certificates(&self) -> Result<Vec<Certificate>, ApiError> {
        let url = self.endpoint(&["api", "certificates"])?;
        self.send_json(self.http.get(url))
    }

    /// `POST /api/certificates/upload` with base64 file content.
    pub fn upload(&self, request: &UploadRequest) -> Result<Certificate, ApiError> {
        let url = self.endpoint(&["api", "certificates", "upload"])?;
        self.send_json(self.http.post(url).json(request))
    }

    /// `GET /api/certificates/{id}`.
    pub fn certificate(&self, id: u64) -> Result<Certificate, ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&["api", "certificates", &id])?;
        self.send_json(self.http.get(url))
    }

    /// `PUT /api/certificates/{id}`.
    pub fn update_certificate(
        &self,
        id: u64,
        request: &UpdateRequest,
    ) -> Result<Certificate, ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&["api", "certificates", &id])?;
        self.send_json(self.http.put(url).json(request))
    }

    /// `DELETE /api/certificates/{id}`.
    pub fn delete_certificate(&self, id: u64) -> Result<(), ApiError> {
        let id = id.to_string();
        let url = self.endpoint(&["api", "certificates", &id])?;
        self.send_empty(self.http.delete(url))
    }

    /// `GET /api/public/certificate/{shareableId}`, no session required.
    pub fn public_certificate(&self, share_id: &ShareId) -> Result<Certificate, ApiError> {
        let url = self.endpoint(&["api", "public", "certificate", share_id.as_str()])?;
        self.send_json(self.http.get(url))
    }

    /// Fetch file bytes from the preview or download endpoint of `source`.
    pub fn file_bytes(
        &self,
        source: &FileSource,
        disposition: FileDisposition,
    ) -> Result<Vec<u8>, ApiError> {
        let url = self.file_url(source, disposition)?;
        let response = check(self.http.get(url).send()?)?;
        Ok(response.bytes()?.to_vec())
    }

    /// URL of the preview or download endpoint for `source`.
    pub fn file_url(
        &self,
        source: &FileSource,
        disposition: FileDisposition,
    ) -> Result<Url, ApiError> {
        let tail = match disposition {
            FileDisposition::Preview => "preview",
            FileDisposition::Download => "download",
        };
        match source {
            FileSource::Owned(id) => {
                let id = id.to_string();
                self.endpoint(&["api", "certificates", &id, tail])
            }
            FileSource::Shared(share_id) => {
                self.endpoint(&["api", "public", "certificate", share_id.as_str(), tail])
            }
        }
    }

    /// Build an absolute endpoint URL; segments are percent-encoded individually.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?
            .clear()
            .extend(segments);
        Ok(url)
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = check(request.send()?)?;
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        check(request.send()?)?;
        Ok(())
    }
}

/// Turn non-2xx responses into [`ApiError::Server`].
fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ApiError::from_status(status.as_u16(), &body))
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use super::*;
    use crate::api::test_support::serve_once;

    fn cert_json(id: u64) -> String {
        format!(
            r#"{{"id":{id},"title":"Cert {id}","credentialLink":null,"fileName":"c{id}.pdf","fileType":"application/pdf","fileSize":2048,"uploadedAt":"2025-01-02 03:04:05","shareableId":"tok-{id}"}}"#
        )
    }

    #[test]
    fn list_certificates_parses_array() {
        let body = format!("[{},{}]", cert_json(1), cert_json(2));
        let (base, server) = serve_once("200 OK", &body);

        let client = ApiClient::local(base);
        let certs = client.list_certificates().unwrap();
        let captured = server.join().unwrap();

        assert_eq!(captured.request_line, "GET /api/certificates HTTP/1.1");
        assert_eq!(certs.len(), 2);
        assert_eq!(certs[1].shareable_id, ShareId::new("tok-2"));
    }

    #[test]
    fn empty_list_is_not_an_error() {
        let (base, server) = serve_once("200 OK", "[]");
        let certs = ApiClient::local(base).list_certificates().unwrap();
        server.join().unwrap();
        assert!(certs.is_empty());
    }

    #[test]
    fn login_sends_placeholder_challenge_and_surfaces_rejection() {
        let (base, server) = serve_once(
            "401 Unauthorized",
            r#"{"token":null,"message":"Invalid credentials","success":false}"#,
        );

        let client = ApiClient::local(base);
        let response = client
            .login(&LoginRequest::new("admin", "wrong"))
            .unwrap();
        let captured = server.join().unwrap();

        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("Invalid credentials"));
        assert_eq!(captured.request_line, "POST /api/auth/login HTTP/1.1");

        let sent: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
        assert_eq!(sent["username"], "admin");
        assert_eq!(sent["recaptchaResponse"], LOGIN_CHALLENGE_PLACEHOLDER);
    }

    #[test]
    fn server_error_message_is_extracted() {
        let (base, server) = serve_once(
            "400 Bad Request",
            r#"{"message":"Only PDF and JPEG files are allowed"}"#,
        );

        let request = UploadRequest {
            title: "t".into(),
            credential_link: String::new(),
            file_name: "x.png".into(),
            file_data: "AAAA".into(),
        };
        let err = ApiClient::local(base).upload(&request).unwrap_err();
        let captured = server.join().unwrap();

        assert!(
            captured
                .headers
                .iter()
                .any(|h| h.to_ascii_lowercase().starts_with("content-type: application/json"))
        );
        assert_eq!(
            err.user_message("Upload failed"),
            "Only PDF and JPEG files are allowed"
        );
    }

    #[test]
    fn delete_accepts_no_content() {
        let (base, server) = serve_once("204 No Content", "");
        ApiClient::local(base).delete_certificate(9).unwrap();
        let captured = server.join().unwrap();
        assert_eq!(captured.request_line, "DELETE /api/certificates/9 HTTP/1.1");
    }

    #[test]
    fn update_sends_put_with_camel_case_body() {
        let (base, server) = serve_once("200 OK", &cert_json(7));

        let request = UpdateRequest {
            title: "Renamed".into(),
            credential_link: "https://cred/7".into(),
        };
        let updated = ApiClient::local(base)
            .update_certificate(7, &request)
            .unwrap();
        let captured = server.join().unwrap();

        assert_eq!(captured.request_line, "PUT /api/certificates/7 HTTP/1.1");
        let sent: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
        assert_eq!(
            sent,
            serde_json::json!({"title": "Renamed", "credentialLink": "https://cred/7"})
        );
        assert_eq!(updated.id, 7);
    }

    #[test]
    fn public_certificate_uses_share_token_path() {
        let (base, server) = serve_once("200 OK", &cert_json(3));

        let cert = ApiClient::local(base)
            .public_certificate(&ShareId::new("tok-3"))
            .unwrap();
        let captured = server.join().unwrap();

        assert_eq!(
            captured.request_line,
            "GET /api/public/certificate/tok-3 HTTP/1.1"
        );
        assert_eq!(cert.title, "Cert 3");
        assert_eq!(cert.shareable_id, ShareId::new("tok-3"));
    }

    #[test]
    fn auth_status_accepts_null_username() {
        let (base, server) = serve_once("200 OK", r#"{"authenticated":true,"username":null}"#);

        let status = ApiClient::local(base).auth_status().unwrap();
        let captured = server.join().unwrap();

        assert_eq!(captured.request_line, "GET /api/auth/status HTTP/1.1");
        assert_eq!(
            status,
            AuthStatus {
                authenticated: true,
                username: None,
            }
        );
    }

    #[test]
    fn transport_failure_maps_to_transport_error() {
        // Bind then drop to get a port with nothing listening.
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let base = Url::parse(&format!("http://127.0.0.1:{port}")).unwrap();

        let err = ApiClient::local(base).auth_status().unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(
            err.user_message("Failed to load certificates"),
            "Failed to load certificates. Please try again."
        );
    }

    #[test]
    fn file_urls_follow_owned_and_shared_layout() {
        let client = ApiClient::new(Url::parse("https://certs.example.org/ignored?q=1").unwrap())
            .unwrap();

        let owned = client
            .file_url(&FileSource::Owned(4), FileDisposition::Preview)
            .unwrap();
        assert_eq!(owned.as_str(), "https://certs.example.org/api/certificates/4/preview");

        let shared = client
            .file_url(
                &FileSource::Shared(ShareId::new("a b")),
                FileDisposition::Download,
            )
            .unwrap();
        assert_eq!(
            shared.as_str(),
            "https://certs.example.org/api/public/certificate/a%20b/download"
        );
    }

    #[test]
    fn login_request_debug_hides_password() {
        let shown = format!("{:?}", LoginRequest::new("admin", "hunter2"));
        assert!(shown.contains("admin"));
        assert!(!shown.contains("hunter2"));
    }
}
