// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

mod api;
mod app;
mod config;
mod models;
mod mvu;
mod ui;
mod utils;

use std::io::Write;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use crate::api::ApiClient;
use crate::config::{Cli, ClientConfig};

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    Builder::new()
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{} {style}{}{style:#}] {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if std::env::var("RUST_LOG").is_err() {
        init_logger(cli.verbose);
    } else {
        env_logger::init();
    }

    let config = ClientConfig::from_cli(&cli)?;
    let api = ApiClient::new(config.base.clone())?;
    log::info!("using server {}", api.base());

    app::run(config, api).map_err(|err| anyhow::anyhow!("UI failed: {err}"))
}
