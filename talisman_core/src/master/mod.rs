//! MasterDataIndex - Lookup tables built from the raw stat, stone and talisman tables

mod definition;
mod row;

pub use definition::{LevelValues, PowerStoneDefinition, StatDefinition, TalismanDefinition};
pub use row::{Cell, RawRow};

use crate::types::{Level, Rarity, SetTier};
use std::collections::HashMap;
use thiserror::Error;

/// Canonical stat name column of the stat table
pub const STAT_NAME_COLUMN: &str = "正式名称";
/// Power stone name column of the stone table
pub const STONE_NAME_COLUMN: &str = "パワーストーン";
/// Short display label column (stat and stone tables)
pub const LABEL_COLUMN: &str = "UI略称";
/// Tooltip column (stat and stone tables)
pub const TOOLTIP_COLUMN: &str = "ツールチップ（hoverで表示）";
/// Japanese talisman name column of the talisman table
pub const TALISMAN_NAME_COLUMN: &str = "Talisman";
/// English talisman name column of the talisman table
pub const TALISMAN_NAME_EN_COLUMN: &str = "Talisman_en";

/// Master data that cannot be indexed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MasterDataError {
    #[error("{table} row {row}: missing identity column {column:?}")]
    MissingIdentity {
        table: &'static str,
        row: usize,
        column: &'static str,
    },
    #[error("{table} row {row}: column {column:?} is not a supported level")]
    UnsupportedLevel {
        table: &'static str,
        row: usize,
        column: String,
    },
    #[error("talisman row {row}: column {column:?} is not of the form rarity;tier")]
    MalformedSetColumn { row: usize, column: String },
}

/// Definitions keyed by name, kept in first-seen order
#[derive(Debug, Clone)]
struct Catalog<T> {
    entries: Vec<T>,
    by_name: HashMap<String, usize>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Catalog {
            entries: Vec::new(),
            by_name: HashMap::new(),
        }
    }
}

impl<T> Catalog<T> {
    /// Insert or overwrite; an overwritten entry keeps its original position
    fn upsert(&mut self, name: String, entry: T) {
        match self.by_name.get(&name) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.by_name.insert(name, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    fn get(&self, name: &str) -> Option<&T> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }
}

/// Read-only index over the three master tables
#[derive(Debug, Clone, Default)]
pub struct MasterDataIndex {
    stats: Catalog<StatDefinition>,
    stones: Catalog<PowerStoneDefinition>,
    talismans: Catalog<TalismanDefinition>,
}

impl MasterDataIndex {
    /// Build the index from raw rows.
    ///
    /// Fails when a row lacks its identity column, carries a level column
    /// for an unsupported level, or (talisman table) has a bonus column
    /// without a `rarity;tier` key.
    pub fn build(
        stat_rows: &[RawRow],
        stone_rows: &[RawRow],
        talisman_rows: &[RawRow],
    ) -> Result<Self, MasterDataError> {
        let mut index = MasterDataIndex::default();

        for (i, row) in stat_rows.iter().enumerate() {
            let name = identity(row, "stat", i, STAT_NAME_COLUMN)?;
            let definition = StatDefinition {
                name: name.to_string(),
                label: row.text(LABEL_COLUMN).unwrap_or(name).to_string(),
                tooltip: row.text(TOOLTIP_COLUMN).unwrap_or_default().to_string(),
                values: level_values(row, "stat", i)?,
            };
            index.stats.upsert(definition.name.clone(), definition);
        }

        for (i, row) in stone_rows.iter().enumerate() {
            let name = identity(row, "stone", i, STONE_NAME_COLUMN)?;
            let definition = PowerStoneDefinition {
                name: name.to_string(),
                label: row.text(LABEL_COLUMN).unwrap_or(name).to_string(),
                tooltip: row.text(TOOLTIP_COLUMN).unwrap_or_default().to_string(),
                values: level_values(row, "stone", i)?,
            };
            index.stones.upsert(definition.name.clone(), definition);
        }

        for (i, row) in talisman_rows.iter().enumerate() {
            let definition = talisman_from_row(row, i)?;
            index.talismans.upsert(definition.name.clone(), definition);
        }

        tracing::info!(
            stats = index.stats.entries.len(),
            stones = index.stones.entries.len(),
            talismans = index.talismans.entries.len(),
            "master data indexed"
        );

        Ok(index)
    }

    pub fn stat(&self, name: &str) -> Option<&StatDefinition> {
        self.stats.get(name)
    }

    pub fn stone(&self, name: &str) -> Option<&PowerStoneDefinition> {
        self.stones.get(name)
    }

    pub fn talisman(&self, name: &str) -> Option<&TalismanDefinition> {
        self.talismans.get(name)
    }

    /// Stat value at a level, `None` when the stat or the level is missing
    pub fn stat_value(&self, name: &str, level: Level) -> Option<f64> {
        self.stat(name).and_then(|def| def.value_at(level))
    }

    pub fn stone_value(&self, name: &str, level: Level) -> Option<f64> {
        self.stone(name).and_then(|def| def.value_at(level))
    }

    /// Display label of a stat, falling back to the name itself
    pub fn stat_label<'a>(&'a self, name: &'a str) -> &'a str {
        self.stat(name).map(|def| def.label.as_str()).unwrap_or(name)
    }

    pub fn stats(&self) -> &[StatDefinition] {
        &self.stats.entries
    }

    /// All stones in table order
    pub fn stones(&self) -> &[PowerStoneDefinition] {
        &self.stones.entries
    }

    /// All talismans in table order
    pub fn talismans(&self) -> &[TalismanDefinition] {
        &self.talismans.entries
    }
}

fn identity<'a>(
    row: &'a RawRow,
    table: &'static str,
    index: usize,
    column: &'static str,
) -> Result<&'a str, MasterDataError> {
    row.text(column).ok_or(MasterDataError::MissingIdentity {
        table,
        row: index,
        column,
    })
}

fn level_values(
    row: &RawRow,
    table: &'static str,
    index: usize,
) -> Result<LevelValues, MasterDataError> {
    let mut values = LevelValues::new();
    for (key, cell) in row.iter() {
        let Some(level) = Level::from_column_key(key) else {
            continue;
        };
        let level = level.map_err(|_| MasterDataError::UnsupportedLevel {
            table,
            row: index,
            column: key.to_string(),
        })?;
        if let Some(value) = cell.as_number() {
            values.insert(level, value);
        }
    }
    Ok(values)
}

fn talisman_from_row(row: &RawRow, index: usize) -> Result<TalismanDefinition, MasterDataError> {
    let name = identity(row, "talisman", index, TALISMAN_NAME_COLUMN)?;
    let name_en = row.text(TALISMAN_NAME_EN_COLUMN).unwrap_or_default();
    let mut talisman = TalismanDefinition::new(name, name_en);

    for (key, cell) in row.iter() {
        if key == TALISMAN_NAME_COLUMN || key == TALISMAN_NAME_EN_COLUMN {
            continue;
        }
        let Some(stat) = cell.as_text() else {
            continue;
        };
        let Some((rarity, tier_spec)) = key.split_once(';') else {
            return Err(MasterDataError::MalformedSetColumn {
                row: index,
                column: key.to_string(),
            });
        };
        let tier = tier_spec.split('-').next().unwrap_or(tier_spec);

        match (rarity.parse::<Rarity>(), tier.parse::<SetTier>()) {
            (Ok(rarity), Ok(tier)) => talisman.push_stat(rarity, tier, stat),
            _ => tracing::warn!(talisman = name, column = key, "skipping unknown rarity or tier"),
        }
    }

    Ok(talisman)
}
