//! src/logging.rs
//!
//! env_logger setup. Records go to a file because the terminal is in raw mode
//! for the lifetime of the UI.

use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Env, Target};

pub fn init(path: &Path, default_level: &str) -> color_eyre::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;
    Ok(())
}
