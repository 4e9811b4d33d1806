//! Marketplace Console Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod error;
mod forms;
mod http;
mod list;
mod logging;
mod markdown;
mod models;
mod screens;
mod session;
mod store;
mod tree;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logging::init(AppConfig::from_env().log_level);
    mount_to_body(App);
}
