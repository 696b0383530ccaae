//! talisman_tui - Interactive TUI for building talisman loadouts

pub mod app;
pub mod ui;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use talisman_core::config::{bundled_master_data, load_master_dir, load_settings};
use talisman_core::{Session, SimulatorSettings};

/// Environment variable naming a directory with master tables and `settings.toml`
pub const DATA_DIR_ENV: &str = "TALISMAN_DATA_DIR";

/// Session over the tables in `dir`, or over the bundled data when `None`
pub fn load_session(dir: Option<&Path>) -> Result<Session> {
    let (index, settings) = match dir {
        Some(dir) => {
            let index = load_master_dir(dir)
                .with_context(|| format!("loading master data from {}", dir.display()))?;
            let settings = load_settings(dir)
                .with_context(|| format!("loading settings from {}", dir.display()))?;
            tracing::info!(dir = %dir.display(), "using master data directory");
            (index, settings)
        }
        None => (
            bundled_master_data().context("loading bundled master data")?,
            SimulatorSettings::default(),
        ),
    };
    Ok(Session::new(Arc::new(index), settings))
}
