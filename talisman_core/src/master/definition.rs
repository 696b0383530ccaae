//! Immutable master-data definitions

use crate::types::{Level, Rarity, SetTier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Values of a stat or stone per supported level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelValues(BTreeMap<Level, f64>);

impl LevelValues {
    pub fn new() -> Self {
        LevelValues::default()
    }

    pub fn insert(&mut self, level: Level, value: f64) {
        self.0.insert(level, value);
    }

    /// Value at a level; `None` means no contribution at that level
    pub fn at(&self, level: Level) -> Option<f64> {
        self.0.get(&level).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Level, f64)> + '_ {
        self.0.iter().map(|(level, value)| (*level, *value))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Level, f64)> for LevelValues {
    fn from_iter<I: IntoIterator<Item = (Level, f64)>>(iter: I) -> Self {
        LevelValues(iter.into_iter().collect())
    }
}

/// A character stat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatDefinition {
    /// Canonical name, unique across the stat table
    pub name: String,
    /// Short display label
    pub label: String,
    pub tooltip: String,
    pub values: LevelValues,
}

impl StatDefinition {
    pub fn value_at(&self, level: Level) -> Option<f64> {
        self.values.at(level)
    }
}

/// A power stone that can be socketed into any of a slot's three positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerStoneDefinition {
    pub name: String,
    pub label: String,
    pub tooltip: String,
    pub values: LevelValues,
}

impl PowerStoneDefinition {
    pub fn value_at(&self, level: Level) -> Option<f64> {
        self.values.at(level)
    }

    /// Text for the stone picker: `label (name)`
    pub fn option_text(&self) -> String {
        format!("{} ({})", self.label, self.name)
    }
}

/// A talisman and the stat names each rarity/tier grants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TalismanDefinition {
    /// Japanese name, the unique key
    pub name: String,
    pub name_en: String,
    pub sets: BTreeMap<Rarity, BTreeMap<SetTier, Vec<String>>>,
}

impl TalismanDefinition {
    pub fn new(name: impl Into<String>, name_en: impl Into<String>) -> Self {
        TalismanDefinition {
            name: name.into(),
            name_en: name_en.into(),
            sets: BTreeMap::new(),
        }
    }

    /// Append a stat to a rarity/tier list, preserving insertion order
    pub fn push_stat(&mut self, rarity: Rarity, tier: SetTier, stat: impl Into<String>) {
        self.sets
            .entry(rarity)
            .or_default()
            .entry(tier)
            .or_default()
            .push(stat.into());
    }

    /// Stat names granted at a rarity/tier; empty when undefined
    pub fn tier_stats(&self, rarity: Rarity, tier: SetTier) -> &[String] {
        self.sets
            .get(&rarity)
            .and_then(|tiers| tiers.get(&tier))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Tiers defined for a rarity, lowest first
    pub fn tiers(&self, rarity: Rarity) -> impl Iterator<Item = (SetTier, &[String])> + '_ {
        self.sets
            .get(&rarity)
            .into_iter()
            .flat_map(|tiers| tiers.iter().map(|(tier, stats)| (*tier, stats.as_slice())))
    }
}
