// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Domain layer: wire types, routing and upload validation shared between UI and API logic.

pub mod certificate;
pub mod route;
pub mod upload;
