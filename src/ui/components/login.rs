// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Sign-in form.

use eframe::egui;

use crate::api::LoginRequest;
use crate::ui::components::{FormMessage, form_message};

/// Form state for the login view.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct LoginModel {
    pub username: String,
    pub password: String,
    /// Inline feedback under the form (server rejection, validation).
    pub message: Option<FormMessage>,
    /// A login request is in flight.
    pub submitting: bool,
}

/// Messages emitted by the login view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginMsg {
    UsernameChanged(String),
    PasswordChanged(String),
    Submit,
}

/// Side effects requested by the login form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginCommand {
    Submit(LoginRequest),
}

/// Apply a message to the login form.
pub fn update(model: &mut LoginModel, msg: LoginMsg, cmds: &mut Vec<LoginCommand>) {
    match msg {
        LoginMsg::UsernameChanged(text) => model.username = text,
        LoginMsg::PasswordChanged(text) => model.password = text,
        LoginMsg::Submit => {
            let username = model.username.trim();
            if username.is_empty() || model.password.is_empty() {
                model.message = Some(FormMessage::error(
                    "Please enter your username and password.",
                ));
                return;
            }
            model.message = Some(FormMessage::info("Signing in…"));
            model.submitting = true;
            cmds.push(LoginCommand::Submit(LoginRequest::new(
                username,
                model.password.clone(),
            )));
        }
    }
}

/// Record the outcome of a login request.
pub fn finish(model: &mut LoginModel, result: &Result<(), String>) {
    model.submitting = false;
    match result {
        Ok(()) => {
            model.password.clear();
            model.message = None;
        }
        Err(message) => model.message = Some(FormMessage::error(message.clone())),
    }
}

/// Forget typed credentials, e.g. after logout.
pub fn reset(model: &mut LoginModel) {
    model.password.clear();
    model.message = None;
    model.submitting = false;
}

/// Render the centered login card.
pub fn view(ui: &mut egui::Ui, model: &LoginModel) -> Vec<LoginMsg> {
    let mut msgs = Vec::new();

    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        egui::Frame::group(ui.style())
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_max_width(320.0);
                ui.heading(format!("{} Sign in", egui_phosphor::regular::LOCK_KEY));
                ui.add_space(8.0);

                let mut username = model.username.clone();
                let user_resp = ui.add(
                    egui::TextEdit::singleline(&mut username)
                        .hint_text("Username")
                        .desired_width(f32::INFINITY),
                );
                if user_resp.changed() {
                    msgs.push(LoginMsg::UsernameChanged(username));
                }

                let mut password = model.password.clone();
                let pass_resp = ui.add(
                    egui::TextEdit::singleline(&mut password)
                        .password(true)
                        .hint_text("Password")
                        .desired_width(f32::INFINITY),
                );
                if pass_resp.changed() {
                    msgs.push(LoginMsg::PasswordChanged(password));
                }

                let submit_via_enter = (user_resp.lost_focus() || pass_resp.lost_focus())
                    && ui.input(|inp| inp.key_pressed(egui::Key::Enter));

                ui.add_space(8.0);
                let button = egui::Button::new(format!(
                    "{} Sign in",
                    egui_phosphor::regular::SIGN_IN
                ));
                let clicked = ui.add_enabled(!model.submitting, button).clicked();
                if (clicked || submit_via_enter) && !model.submitting {
                    msgs.push(LoginMsg::Submit);
                }

                if let Some(message) = &model.message {
                    ui.add_space(6.0);
                    form_message(ui, message);
                }
            });
    });

    msgs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_with_missing_fields_sets_error_and_no_command() {
        let mut model = LoginModel::default();
        let mut cmds = Vec::new();

        update(&mut model, LoginMsg::UsernameChanged("admin".into()), &mut cmds);
        update(&mut model, LoginMsg::Submit, &mut cmds);

        assert!(cmds.is_empty());
        assert!(model.message.as_ref().is_some_and(|m| m.is_error));
        assert!(!model.submitting);
    }

    #[test]
    fn submit_trims_username_and_enqueues_request() {
        let mut model = LoginModel::default();
        let mut cmds = Vec::new();

        update(&mut model, LoginMsg::UsernameChanged(" admin ".into()), &mut cmds);
        update(&mut model, LoginMsg::PasswordChanged("s3cret".into()), &mut cmds);
        update(&mut model, LoginMsg::Submit, &mut cmds);

        assert_eq!(
            cmds,
            vec![LoginCommand::Submit(LoginRequest::new("admin", "s3cret"))]
        );
        assert!(model.submitting);
    }

    #[test]
    fn finish_clears_password_only_on_success() {
        let mut model = LoginModel {
            username: "admin".into(),
            password: "pw".into(),
            submitting: true,
            ..Default::default()
        };

        finish(&mut model, &Err("Invalid credentials".into()));
        assert_eq!(model.password, "pw");
        assert_eq!(
            model.message,
            Some(FormMessage::error("Invalid credentials"))
        );

        finish(&mut model, &Ok(()));
        assert!(model.password.is_empty());
        assert!(model.message.is_none());
        assert!(!model.submitting);
    }
}
