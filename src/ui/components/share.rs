// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Feedback for copying share links: a short per-tile notice, or a manual-copy window
//! when the system clipboard cannot be reached.

use std::time::{Duration, Instant};

use crate::models::route::ShareId;

/// How long the "copied" notice stays on a tile.
pub const NOTICE_DURATION: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, PartialEq, Eq)]
struct ShareNotice {
    share_id: ShareId,
    shown_at: Instant,
}

/// Share feedback state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShareModel {
    notice: Option<ShareNotice>,
    manual_copy: Option<String>,
}

impl ShareModel {
    /// The link for `share_id` landed on the clipboard at `now`.
    pub fn copied(&mut self, share_id: ShareId, now: Instant) {
        self.notice = Some(ShareNotice {
            share_id,
            shown_at: now,
        });
    }

    /// Clipboard unavailable: ask the user to copy `url` by hand.
    pub fn copy_failed(&mut self, url: String) {
        self.manual_copy = Some(url);
    }

    pub fn dismiss_manual_copy(&mut self) {
        self.manual_copy = None;
    }

    /// URL waiting for a manual copy, if any.
    pub fn manual_copy(&self) -> Option<&str> {
        self.manual_copy.as_deref()
    }

    /// Whether the tile for `share_id` should show the notice at `now`.
    pub fn shows_notice(&self, share_id: &ShareId, now: Instant) -> bool {
        self.notice
            .as_ref()
            .is_some_and(|n| &n.share_id == share_id && now.duration_since(n.shown_at) < NOTICE_DURATION)
    }

    /// Time until the current notice expires, to schedule a repaint.
    pub fn notice_remaining(&self, now: Instant) -> Option<Duration> {
        let notice = self.notice.as_ref()?;
        NOTICE_DURATION.checked_sub(now.duration_since(notice.shown_at))
    }

    pub fn clear(&mut self) {
        self.notice = None;
        self.manual_copy = None;
    }
}

/// Render the manual-copy window. Returns true when the user closed it.
pub fn view_manual_copy(ctx: &egui::Context, model: &ShareModel) -> bool {
    let Some(url) = model.manual_copy() else {
        return false;
    };

    let mut closed = false;
    egui::Window::new("Share link")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label("Copy this link to share:");
            let mut text = url;
            ui.add(
                egui::TextEdit::singleline(&mut text)
                    .desired_width(360.0)
                    .font(egui::TextStyle::Monospace),
            );
            ui.add_space(8.0);
            if ui.button("Close").clicked() {
                closed = true;
            }
        });
    closed
}
