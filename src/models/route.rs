// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Start-location routing and share-link construction.

use std::fmt;

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

/// Path prefix of public share links.
const VIEW_PREFIX: &str = "/view/";

/// Opaque token granting public read access to one certificate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareId(String);

impl ShareId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShareId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which top-level view a start location selects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// Anything that is not a share link: sign in or show the owner's dashboard.
    Dashboard,
    /// `/view/{token}`: public read-only view of one certificate.
    PublicView(ShareId),
}

impl Route {
    /// Classify a URL path. Only a non-empty token after `/view/` selects the public view.
    ///
    /// The path arrives percent-encoded; the token is kept decoded since the
    /// API client encodes it again per segment.
    pub fn from_path(path: &str) -> Self {
        let Some((_, rest)) = path.split_once(VIEW_PREFIX) else {
            return Route::Dashboard;
        };
        let token = percent_decode_str(rest.trim_end_matches('/')).decode_utf8_lossy();
        if token.is_empty() {
            Route::Dashboard
        } else {
            Route::PublicView(ShareId::new(token))
        }
    }
}

/// Public URL for a share token. Depends on nothing but the origin and the token.
pub fn share_url(origin: &str, share_id: &ShareId) -> String {
    format!(
        "{}{}{}",
        origin.trim_end_matches('/'),
        VIEW_PREFIX,
        share_id.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_paths_select_public_route() {
        assert_eq!(
            Route::from_path("/view/abc-123"),
            Route::PublicView(ShareId::new("abc-123"))
        );
        assert_eq!(
            Route::from_path("/view/abc-123/"),
            Route::PublicView(ShareId::new("abc-123"))
        );
    }

    #[test]
    fn view_token_is_percent_decoded() {
        assert_eq!(
            Route::from_path("/view/a%20b"),
            Route::PublicView(ShareId::new("a b"))
        );
        assert_eq!(
            Route::from_path("/view/caf%C3%A9/"),
            Route::PublicView(ShareId::new("café"))
        );
    }

    #[test]
    fn other_paths_select_dashboard() {
        assert_eq!(Route::from_path("/"), Route::Dashboard);
        assert_eq!(Route::from_path(""), Route::Dashboard);
        assert_eq!(Route::from_path("/view/"), Route::Dashboard);
        assert_eq!(Route::from_path("/dashboard"), Route::Dashboard);
    }

    #[test]
    fn share_url_is_origin_plus_view_path() {
        let id = ShareId::new("3f1c2a9e");
        assert_eq!(
            share_url("https://certs.example.org", &id),
            "https://certs.example.org/view/3f1c2a9e"
        );
        assert_eq!(
            share_url("http://localhost:8080/", &id),
            "http://localhost:8080/view/3f1c2a9e"
        );
    }
}
