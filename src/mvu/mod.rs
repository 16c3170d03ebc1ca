// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring component state, messages, and commands.

use std::path::PathBuf;
use std::time::Instant;

use crate::api::{ApiClient, ApiError, AuthStatus, LoginRequest};
use crate::models::certificate::{Certificate, FileDisposition, FileSource, UpdateRequest};
use crate::models::route::{Route, ShareId, share_url};
use crate::models::upload::{self, ACCEPTED_EXTENSIONS, PickedFile, UploadPlan};
use crate::ui::components::Action;
use crate::ui::components::certificates::CertificatesModel;
use crate::ui::components::edit::{self, EditCommand, EditModel, EditMsg};
use crate::ui::components::images::{ImageCache, ImageKey, decode_preview};
use crate::ui::components::login::{self, LoginCommand, LoginModel, LoginMsg};
use crate::ui::components::preview::PreviewModel;
use crate::ui::components::public_view::PublicViewModel;
use crate::ui::components::share::ShareModel;
use crate::ui::components::upload::{self as upload_form, UploadCommand, UploadModel, UploadMsg};
use crate::utils::{clipboard, sanitize_component};

/// Which top-level view is visible. Exactly one at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UiMode {
    #[default]
    LoggedOut,
    Dashboard,
    PublicView,
}

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    pub mode: UiMode,
    /// Scheme, host and port of the server; prefix of share links.
    pub origin: String,
    /// The session check is in flight; the login form stays hidden meanwhile.
    pub auth_pending: bool,
    /// Signed-in user, when the server told us.
    pub username: Option<String>,
    pub login: LoginModel,
    pub certificates: CertificatesModel,
    pub upload: UploadModel,
    pub edit: EditModel,
    pub preview: PreviewModel,
    /// Present only in [`UiMode::PublicView`].
    pub public_view: Option<PublicViewModel>,
    pub share: ShareModel,
    pub images: ImageCache,
    /// Certificate waiting for delete confirmation.
    pub pending_delete: Option<u64>,
    /// Latest status message to display.
    pub status: Option<String>,
    /// Latest error message to display in modal.
    pub error: Option<String>,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl AppModel {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            ..Default::default()
        }
    }
}

/// Application messages routed through the update function.
pub enum Msg {
    AuthStatusLoaded(Result<AuthStatus, String>),
    HomeRequested,
    Login(LoginMsg),
    LoginCompleted(Result<(), String>),
    LogoutRequested,
    LogoutCompleted,
    RefreshRequested,
    CertificatesLoaded(Result<Vec<Certificate>, String>),
    Upload(UploadMsg),
    UploadCompleted(Result<(), String>),
    EditRequested(u64),
    EditLoaded {
        id: u64,
        result: Result<Certificate, String>,
    },
    Edit(EditMsg),
    EditCompleted {
        id: u64,
        result: Result<(), String>,
    },
    DeleteRequested(u64),
    DeleteConfirmed,
    DeleteCancelled,
    DeleteCompleted(Result<u64, String>),
    ShareRequested(ShareId),
    ShareCopied(ShareId),
    ShareCopyFailed {
        url: String,
    },
    DismissManualCopy,
    PreviewRequested(u64),
    PreviewLoaded(Result<Certificate, String>),
    ClosePreview,
    PublicTitleLoaded(Result<Certificate, String>),
    RevealRequested,
    PublicCertificateLoaded(Result<Certificate, String>),
    ImageRequested(ImageKey),
    ImageDecoded {
        key: ImageKey,
        image: eframe::egui::ColorImage,
    },
    ImageReady {
        key: ImageKey,
        texture: eframe::egui::TextureHandle,
    },
    ImageFailed {
        key: ImageKey,
    },
    OpenExternallyRequested {
        source: FileSource,
        file_name: String,
    },
    ExternalOpenCompleted(Result<PathBuf, String>),
    DownloadRequested {
        source: FileSource,
        path: PathBuf,
    },
    DownloadCancelled,
    DownloadCompleted(Result<PathBuf, String>),
    DismissError,
}

impl From<Action> for Msg {
    fn from(action: Action) -> Self {
        match action {
            Action::Preview(id) => Msg::PreviewRequested(id),
            Action::Edit(id) => Msg::EditRequested(id),
            Action::Share(share_id) => Msg::ShareRequested(share_id),
            Action::Delete(id) => Msg::DeleteRequested(id),
            Action::Download { source, path } => Msg::DownloadRequested { source, path },
            Action::DownloadCancelled => Msg::DownloadCancelled,
            Action::LoadImage(key) => Msg::ImageRequested(key),
            Action::OpenExternally { source, file_name } => {
                Msg::OpenExternallyRequested { source, file_name }
            }
            Action::Reveal => Msg::RevealRequested,
            Action::ClosePreview => Msg::ClosePreview,
            Action::Refresh => Msg::RefreshRequested,
        }
    }
}

/// Commands represent side-effects executed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    CheckAuthStatus,
    Login(LoginRequest),
    Logout,
    LoadCertificates,
    PickUploadFile,
    Upload(UploadPlan),
    FetchForEdit(u64),
    UpdateCertificate { id: u64, request: UpdateRequest },
    DeleteCertificate(u64),
    FetchForPreview(u64),
    CopyToClipboard { share_id: ShareId, url: String },
    LoadPublicTitle(ShareId),
    LoadPublicCertificate(ShareId),
    LoadImage(ImageKey),
    OpenExternally { source: FileSource, file_name: String },
    Download { source: FileSource, path: PathBuf },
}

/// Pick the initial view for the start location and queue the first request.
///
/// A share link goes straight to the public view; the session is never checked there.
pub fn start(model: &mut AppModel, route: &Route, cmds: &mut Vec<Command>) {
    match route {
        Route::PublicView(share_id) => {
            model.mode = UiMode::PublicView;
            model.public_view = Some(PublicViewModel::new(share_id.clone()));
            cmds.push(Command::LoadPublicTitle(share_id.clone()));
        }
        Route::Dashboard => {
            model.mode = UiMode::LoggedOut;
            model.auth_pending = true;
            cmds.push(Command::CheckAuthStatus);
        }
    }
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::DismissError => model.error = None,
        Msg::AuthStatusLoaded(result) => {
            model.auth_pending = false;
            match result {
                Ok(status) if status.authenticated => enter_dashboard(model, status.username, cmds),
                Ok(_) => leave_dashboard(model),
                Err(err) => {
                    leave_dashboard(model);
                    surface_event(model, err, false);
                }
            }
        }
        Msg::HomeRequested => match model.public_view.as_mut() {
            Some(public) if model.mode == UiMode::PublicView => {
                public.collapse();
                cmds.push(Command::LoadPublicTitle(public.share_id().clone()));
            }
            _ => {
                model.auth_pending = true;
                cmds.push(Command::CheckAuthStatus);
            }
        },
        Msg::Login(m) => {
            let mut login_cmds = Vec::new();
            login::update(&mut model.login, m, &mut login_cmds);
            for c in login_cmds {
                match c {
                    LoginCommand::Submit(request) => cmds.push(Command::Login(request)),
                }
            }
        }
        Msg::LoginCompleted(result) => {
            login::finish(&mut model.login, &result);
            if result.is_ok() {
                let username = model.login.username.trim().to_string();
                enter_dashboard(model, Some(username), cmds);
            } else {
                model.mode = UiMode::LoggedOut;
            }
        }
        Msg::LogoutRequested => cmds.push(Command::Logout),
        Msg::LogoutCompleted => {
            leave_dashboard(model);
            surface_event(model, "Signed out.".to_string(), false);
        }
        Msg::RefreshRequested => {
            if model.mode == UiMode::Dashboard {
                request_list(model, cmds);
            }
        }
        Msg::CertificatesLoaded(result) => match result {
            Ok(items) => model.certificates.replace(items),
            Err(err) => {
                model.certificates.loading = false;
                surface_event(model, err, false);
            }
        },
        Msg::Upload(m) => {
            let mut upload_cmds = Vec::new();
            upload_form::update(&mut model.upload, m, &mut upload_cmds);
            for c in upload_cmds {
                match c {
                    UploadCommand::PickFile => cmds.push(Command::PickUploadFile),
                    UploadCommand::Submit(plan) => cmds.push(Command::Upload(plan)),
                }
            }
        }
        Msg::UploadCompleted(result) => {
            let ok = result.is_ok();
            upload_form::finish(&mut model.upload, result);
            if ok {
                surface_event(model, "Certificate uploaded.".to_string(), false);
                request_list(model, cmds);
            }
        }
        Msg::EditRequested(id) => cmds.push(Command::FetchForEdit(id)),
        Msg::EditLoaded { id, result } => match result {
            Ok(cert) => model.edit.open_with(&cert),
            Err(err) => surface_event(model, format!("Could not open certificate {id}: {err}"), false),
        },
        Msg::Edit(m) => {
            let mut edit_cmds = Vec::new();
            edit::update(&mut model.edit, m, &mut edit_cmds);
            for c in edit_cmds {
                match c {
                    EditCommand::Save { id, request } => {
                        cmds.push(Command::UpdateCertificate { id, request })
                    }
                }
            }
        }
        Msg::EditCompleted { id, result } => {
            let ok = result.is_ok();
            edit::finish(&mut model.edit, id, result);
            if ok {
                surface_event(model, "Certificate updated.".to_string(), false);
                request_list(model, cmds);
            }
        }
        Msg::DeleteRequested(id) => model.pending_delete = Some(id),
        Msg::DeleteCancelled => model.pending_delete = None,
        Msg::DeleteConfirmed => {
            if let Some(id) = model.pending_delete.take() {
                cmds.push(Command::DeleteCertificate(id));
            }
        }
        Msg::DeleteCompleted(result) => match result {
            Ok(id) => {
                model.images.forget(&FileSource::Owned(id));
                if model.preview.certificate().is_some_and(|c| c.id == id) {
                    model.preview.close();
                }
                if model.edit.target() == Some(id) {
                    model.edit.close();
                }
                surface_event(model, "Certificate deleted.".to_string(), false);
                request_list(model, cmds);
            }
            Err(err) => surface_event(model, err, false),
        },
        Msg::ShareRequested(share_id) => {
            let url = share_url(&model.origin, &share_id);
            cmds.push(Command::CopyToClipboard { share_id, url });
        }
        Msg::ShareCopied(share_id) => model.share.copied(share_id, Instant::now()),
        Msg::ShareCopyFailed { url } => model.share.copy_failed(url),
        Msg::DismissManualCopy => model.share.dismiss_manual_copy(),
        Msg::PreviewRequested(id) => cmds.push(Command::FetchForPreview(id)),
        Msg::PreviewLoaded(result) => match result {
            Ok(cert) => model.preview.show(cert),
            Err(err) => surface_event(model, err, false),
        },
        Msg::ClosePreview => model.preview.close(),
        Msg::PublicTitleLoaded(result) => {
            // Prefetch failures were logged by the worker; the page keeps its generic heading.
            if let (Ok(cert), Some(public)) = (result, model.public_view.as_mut()) {
                public.title = Some(cert.title);
            }
        }
        Msg::RevealRequested => {
            if let Some(public) = model.public_view.as_mut() {
                if !public.loading {
                    public.loading = true;
                    public.message = None;
                    cmds.push(Command::LoadPublicCertificate(public.share_id().clone()));
                }
            }
        }
        Msg::PublicCertificateLoaded(result) => {
            if let Some(public) = model.public_view.as_mut() {
                public.revealed(result);
            }
        }
        Msg::ImageRequested(key) => {
            if model.images.begin(&key) {
                cmds.push(Command::LoadImage(key));
            }
        }
        // The UI turns decoded images into textures before they get here.
        Msg::ImageDecoded { key, .. } => model.images.fail(key),
        Msg::ImageReady { key, texture } => model.images.insert(key, texture),
        Msg::ImageFailed { key } => model.images.fail(key),
        Msg::OpenExternallyRequested { source, file_name } => {
            cmds.push(Command::OpenExternally { source, file_name })
        }
        Msg::ExternalOpenCompleted(result) => match result {
            Ok(path) => surface_event(model, format!("Opened {}", path.display()), false),
            Err(err) => surface_event(model, format!("Failed to open preview:\n\n{err}"), true),
        },
        Msg::DownloadRequested { source, path } => cmds.push(Command::Download { source, path }),
        Msg::DownloadCancelled => surface_event(model, "Download cancelled.".to_string(), false),
        Msg::DownloadCompleted(result) => match result {
            Ok(path) => surface_event(model, format!("Saved {}", path.display()), false),
            Err(err) => {
                surface_event(model, format!("Failed to download certificate:\n\n{err}"), true)
            }
        },
    }
}

/// Execute a command on a worker thread and return the resulting message.
pub fn run_command(cmd: Command, api: &ApiClient) -> Msg {
    log::debug!("running {cmd:?}");
    match cmd {
        Command::CheckAuthStatus => Msg::AuthStatusLoaded(
            api.auth_status()
                .map_err(report("Could not check the session")),
        ),
        Command::Login(request) => {
            let result = match api.login(&request) {
                Ok(response) if response.success => Ok(()),
                Ok(response) => {
                    log::warn!("login rejected for {}", request.username);
                    Err(response
                        .message
                        .unwrap_or_else(|| "Login failed".to_string()))
                }
                Err(err) => Err(report("Login failed")(err)),
            };
            Msg::LoginCompleted(result)
        }
        Command::Logout => {
            if let Err(err) = api.logout() {
                log::warn!("logout request failed: {err}");
            }
            Msg::LogoutCompleted
        }
        Command::LoadCertificates => Msg::CertificatesLoaded(
            api.list_certificates()
                .map_err(report("Failed to load certificates")),
        ),
        Command::PickUploadFile => {
            let file = rfd::FileDialog::new()
                .set_title("Select certificate")
                .add_filter("Certificates", ACCEPTED_EXTENSIONS)
                .pick_file();

            match file {
                Some(path) => match PickedFile::from_path(path) {
                    Ok(file) => Msg::Upload(UploadMsg::FilePicked(Some(file))),
                    Err(err) => Msg::Upload(UploadMsg::FilePickFailed(err.to_string())),
                },
                None => Msg::Upload(UploadMsg::FilePicked(None)),
            }
        }
        Command::Upload(plan) => {
            let result = match upload::encode(&plan) {
                Ok(request) => api
                    .upload(&request)
                    .map(|cert| log::info!("uploaded certificate {}", cert.id))
                    .map_err(report("Upload failed")),
                Err(err) => {
                    log::warn!("upload refused before sending: {err}");
                    Err(err.to_string())
                }
            };
            Msg::UploadCompleted(result)
        }
        Command::FetchForEdit(id) => Msg::EditLoaded {
            id,
            result: api
                .certificate(id)
                .map_err(report("Failed to load certificate")),
        },
        Command::UpdateCertificate { id, request } => Msg::EditCompleted {
            id,
            result: api
                .update_certificate(id, &request)
                .map(drop)
                .map_err(report("Failed to update certificate")),
        },
        Command::DeleteCertificate(id) => Msg::DeleteCompleted(
            api.delete_certificate(id)
                .map(|()| id)
                .map_err(report("Failed to delete certificate")),
        ),
        Command::FetchForPreview(id) => Msg::PreviewLoaded(
            api.certificate(id)
                .map_err(report("Failed to load certificate")),
        ),
        Command::CopyToClipboard { share_id, url } => match clipboard::system().copy(&url) {
            Ok(()) => Msg::ShareCopied(share_id),
            Err(err) => {
                log::warn!("clipboard unavailable: {err}");
                Msg::ShareCopyFailed { url }
            }
        },
        Command::LoadPublicTitle(share_id) => Msg::PublicTitleLoaded(
            api.public_certificate(&share_id)
                .map_err(report("Failed to load shared certificate")),
        ),
        Command::LoadPublicCertificate(share_id) => Msg::PublicCertificateLoaded(
            api.public_certificate(&share_id)
                .map_err(report("Failed to load certificate")),
        ),
        Command::LoadImage(key) => {
            let decoded = api
                .file_bytes(&key.source, FileDisposition::Preview)
                .map_err(|e| e.to_string())
                .and_then(|bytes| decode_preview(&bytes, key.variant));
            match decoded {
                Ok(image) => Msg::ImageDecoded { key, image },
                Err(err) => {
                    log::warn!("preview for {:?} unavailable: {err}", key.source);
                    Msg::ImageFailed { key }
                }
            }
        }
        Command::OpenExternally { source, file_name } => {
            Msg::ExternalOpenCompleted(open_externally(api, &source, &file_name))
        }
        Command::Download { source, path } => {
            let result = api
                .file_bytes(&source, FileDisposition::Download)
                .map_err(report("Download failed"))
                .and_then(|bytes| {
                    std::fs::write(&path, bytes).map_err(|err| {
                        log::error!("writing {} failed: {err}", path.display());
                        format!("Failed to write {}: {err}", path.display())
                    })
                })
                .map(|()| path);
            Msg::DownloadCompleted(result)
        }
    }
}

/// Log an API failure and turn it into the text shown to the user.
fn report(context: &'static str) -> impl Fn(ApiError) -> String {
    move |err| {
        log::error!("{context}: {err}");
        err.user_message(context)
    }
}

/// Fetch the preview bytes into the temp directory and hand them to the system viewer.
fn open_externally(api: &ApiClient, source: &FileSource, file_name: &str) -> Result<PathBuf, String> {
    let bytes = api
        .file_bytes(source, FileDisposition::Preview)
        .map_err(report("Failed to load preview"))?;
    let path = std::env::temp_dir().join(format!("certhub-{}", sanitize_component(file_name)));
    std::fs::write(&path, bytes).map_err(|err| format!("Failed to write {}: {err}", path.display()))?;
    open::that(&path).map_err(|err| {
        log::error!("opening {} failed: {err}", path.display());
        format!("No application could open {}: {err}", path.display())
    })?;
    Ok(path)
}

fn enter_dashboard(model: &mut AppModel, username: Option<String>, cmds: &mut Vec<Command>) {
    model.mode = UiMode::Dashboard;
    model.username = username.filter(|name| !name.is_empty());
    request_list(model, cmds);
}

/// Back to the login view with nothing from the signed-in session left open.
fn leave_dashboard(model: &mut AppModel) {
    model.mode = UiMode::LoggedOut;
    model.username = None;
    login::reset(&mut model.login);
    model.certificates.clear();
    model.upload = UploadModel::default();
    model.edit.close();
    model.preview.close();
    model.share.clear();
    model.images.clear();
    model.pending_delete = None;
}

fn request_list(model: &mut AppModel, cmds: &mut Vec<Command>) {
    model.certificates.loading = true;
    cmds.push(Command::LoadCertificates);
}

/// Update status/error fields consistently for user feedback.
fn surface_event(model: &mut AppModel, message: String, is_error: bool) {
    if is_error {
        model.error = Some(message.clone());
    }
    model.status = Some(message);
}
