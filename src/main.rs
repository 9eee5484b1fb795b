mod api;
mod config;
mod credentials;
mod database;
mod error;
mod security;
mod server;
mod users;

use crate::config::{Config, RawConfig};
use anyhow::anyhow;
use clap::{Arg, Command, crate_description, crate_version, value_parser};
use std::env;
use tracing::info;

fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    if env::var("RUST_LOG_FORMAT").is_ok_and(|format| format == "json") {
        tracing_subscriber::fmt().json().flatten_event(true).init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let matches = Command::new("Credvault API server")
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::new("CONFIG")
                .env("CREDVAULT_CONFIG")
                .short('c')
                .long("config")
                .default_value("credvault.toml")
                .help("Path to the application configuration file."),
        )
        .arg(
            Arg::new("PORT")
                .env("CREDVAULT_PORT")
                .short('p')
                .long("port")
                .value_parser(value_parser!(u16))
                .help("Defines a TCP port to listen on."),
        )
        .get_matches();

    let raw_config = RawConfig::read_from_file(
        matches
            .get_one::<String>("CONFIG")
            .ok_or_else(|| anyhow!("<CONFIG> argument is not provided."))?,
    )?;

    info!("Credvault raw configuration: {raw_config:?}.");

    // CLI argument takes precedence.
    let http_port = matches
        .get_one::<u16>("PORT")
        .copied()
        .unwrap_or(raw_config.port);
    server::run(Config::from(raw_config), http_port)
}
