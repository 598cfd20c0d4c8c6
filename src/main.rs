#![allow(non_snake_case)]

mod cli;
mod clients;
mod config;
mod extract;
mod models;
mod runtime;
mod service;
mod tasks;

use std::env;

use crate::config::{AppConfig, Settings};

const DEFAULT_RUN_MODE: &str = "cli";

#[tokio::main]
async fn main() {
    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    };

    let run_mode = config.prop("RUN_MODE").unwrap_or(DEFAULT_RUN_MODE.to_string());
    if run_mode == "daemon" {
        match Settings::load(&config) {
            Ok(settings) => runtime::run_daemon(settings).await,
            Err(e) => eprintln!("Invalid configuration: {}", e),
        }
    } else if run_mode == "cli" {
        cli::cli(&config).await;
    } else {
        println!("Invalid run mode {}", run_mode);
    }
}
