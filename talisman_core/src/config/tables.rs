//! Master table files: `[[rows]]` TOML, or JSON arrays of row objects

use super::{parse_toml, ConfigError};
use crate::master::{MasterDataIndex, RawRow};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const STATS_TABLE: &str = "stats";
pub const STONES_TABLE: &str = "stones";
pub const TALISMANS_TABLE: &str = "talismans";

/// Container for one master table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableFile {
    #[serde(default)]
    pub rows: Vec<RawRow>,
}

/// Rows of a `[[rows]]` TOML table
pub fn parse_toml_rows(content: &str) -> Result<Vec<RawRow>, ConfigError> {
    let table: TableFile = parse_toml(content)?;
    Ok(table.rows)
}

/// Rows of a JSON array of objects
pub fn parse_json_rows(content: &str) -> Result<Vec<RawRow>, ConfigError> {
    let rows: Vec<RawRow> = serde_json::from_str(content)?;
    Ok(rows)
}

/// Load a table file, picking the format from its extension
pub fn load_rows(path: &Path) -> Result<Vec<RawRow>, ConfigError> {
    let content = fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => parse_toml_rows(&content),
        Some("json") => parse_json_rows(&content),
        _ => Err(ConfigError::ValidationError(format!(
            "{}: expected a .toml or .json table",
            path.display()
        ))),
    }
}

fn find_table(dir: &Path, name: &str) -> Result<PathBuf, ConfigError> {
    ["toml", "json"]
        .iter()
        .map(|ext| dir.join(format!("{}.{}", name, ext)))
        .find(|path| path.is_file())
        .ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "no {}.toml or {}.json in {}",
                name,
                name,
                dir.display()
            ))
        })
}

/// Load `stats`, `stones` and `talismans` tables from a directory.
/// TOML wins when both formats are present.
pub fn load_master_dir(dir: &Path) -> Result<MasterDataIndex, ConfigError> {
    let stats = load_rows(&find_table(dir, STATS_TABLE)?)?;
    let stones = load_rows(&find_table(dir, STONES_TABLE)?)?;
    let talismans = load_rows(&find_table(dir, TALISMANS_TABLE)?)?;
    tracing::debug!(dir = %dir.display(), "master tables read");
    Ok(MasterDataIndex::build(&stats, &stones, &talismans)?)
}

/// Build an index from three TOML table strings
pub fn parse_master_data(
    stats: &str,
    stones: &str,
    talismans: &str,
) -> Result<MasterDataIndex, ConfigError> {
    let stats = parse_toml_rows(stats)?;
    let stones = parse_toml_rows(stones)?;
    let talismans = parse_toml_rows(talismans)?;
    Ok(MasterDataIndex::build(&stats, &stones, &talismans)?)
}

/// The data set compiled into the crate
pub fn bundled_master_data() -> Result<MasterDataIndex, ConfigError> {
    parse_master_data(
        include_str!("../../config/stats.toml"),
        include_str!("../../config/stones.toml"),
        include_str!("../../config/talismans.toml"),
    )
}
