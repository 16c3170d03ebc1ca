// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Command line and the server location derived from it.

use anyhow::Context;
use clap::{ArgAction, Parser};
use url::Url;

use crate::models::route::Route;

/// Server used when neither the argument nor `CERTHUB_URL` is given.
pub const DEFAULT_LOCATION: &str = "http://localhost:8080";

#[derive(Debug, Parser)]
#[command(name = "certhub")]
#[command(version)]
#[command(
    about = "Desktop client for a CertHub certificate store",
    long_about = "Sign in to a CertHub server to upload, edit, share and preview certificates.\n\nPass a share link (https://host/view/<token>) to open a shared certificate without signing in."
)]
pub struct Cli {
    /// Server address, or a share link of the form {origin}/view/{token}.
    #[arg(value_name = "URL", env = "CERTHUB_URL", default_value = DEFAULT_LOCATION)]
    pub location: String,
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Resolved startup settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base: the origin with an empty path.
    pub base: Url,
    /// `scheme://host[:port]` without trailing slash, used for share links.
    pub origin: String,
    /// View selected by the location's path.
    pub route: Route,
}

impl ClientConfig {
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        Self::from_location(&cli.location)
    }

    /// Split a start location into server origin and route.
    pub fn from_location(location: &str) -> anyhow::Result<Self> {
        let url = Url::parse(location.trim())
            .with_context(|| format!("'{location}' is not a valid URL"))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("'{location}' must use http or https");
        }
        let origin = url.origin();
        if !origin.is_tuple() {
            anyhow::bail!("'{location}' has no host");
        }
        let origin = origin.ascii_serialization();
        let base = Url::parse(&origin).with_context(|| format!("invalid origin '{origin}'"))?;

        Ok(Self {
            route: Route::from_path(url.path()),
            base,
            origin,
        })
    }
}
