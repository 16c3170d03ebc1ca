// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! HTTP access to the CertHub server.
//!
//! Every call is blocking and meant to run on a command worker thread, never
//! on the UI thread. The client keeps the session cookie between calls.

pub mod client;
pub mod error;
#[cfg(test)]
pub(crate) mod test_support;

pub use client::{ApiClient, AuthStatus, LoginRequest};
pub use error::ApiError;
