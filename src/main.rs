//! src/main.rs
//!
//! Entrypoint: parse options, start logging, delegate to `app::run()`.

mod app;
mod cli;
mod logging;
mod menu;
mod monitor;
mod panels;
mod sampling;
mod sensor;
mod series;
mod ui;

use clap::Parser;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = cli::Cli::parse();
    let log_path = cli.log_path();
    logging::init(&log_path, &cli.log_level)?;
    log::debug!("logging to {}", log_path.display());
    app::run(cli)
}
