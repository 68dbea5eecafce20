#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![allow(clippy::new_without_default)]

mod cmd;
mod controller;
mod data;
mod delegate;
mod error;
mod ui;
mod widget;

use druid::AppLauncher;
use env_logger::{Builder, Env};

use explorer_core::loader::{HttpFetcher, ImageLoader};

use crate::{
    data::{AppState, Config},
    delegate::Delegate,
};

const ENV_LOG: &str = "EXPLORER_LOG";
const ENV_LOG_STYLE: &str = "EXPLORER_LOG_STYLE";

fn main() {
    // Setup logging from the env variables, with defaults.
    Builder::from_env(
        Env::new()
            .filter_or(ENV_LOG, "info")
            .write_style(ENV_LOG_STYLE),
    )
    .init();

    // Load configuration
    let config = Config::load().unwrap_or_default();

    let images = ImageLoader::new(HttpFetcher::new(
        Config::proxy().as_deref(),
        config.image_timeout(),
    ));
    let state = AppState::default_with_config(config);

    let window = ui::main_window(&state.config);
    let delegate = Delegate::with_main(window.id, images);

    AppLauncher::with_window(window)
        .configure_env(ui::theme::setup)
        .delegate(delegate)
        .launch(state)
        .expect("Application launch");
}
