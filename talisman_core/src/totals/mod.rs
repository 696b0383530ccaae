//! StatTotals - The result of aggregating a loadout at a level

mod accumulator;
pub mod format;

pub use accumulator::{Contribution, StatAccumulator};

use crate::classify::StatKind;
use crate::master::MasterDataIndex;
use crate::types::{Rarity, SetTier};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Shown when no stat has a non-zero total
pub const NO_STATS_MESSAGE: &str = "まだ何も選択されていません";
/// Shown when no set bonus is active
pub const NO_SET_BONUS_MESSAGE: &str = "セット効果は発動していません";
/// Shown when no power stone is socketed
pub const NO_STONES_MESSAGE: &str = "パワーストーンは未設定です";

/// One bonus line of an active talisman set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusLine {
    pub stat: String,
    pub label: String,
    pub value: f64,
    pub kind: StatKind,
}

impl BonusLine {
    /// `label +N` or `label +N.N%`
    pub fn text(&self) -> String {
        format!("{} {}", self.label, format::kind_text(self.kind, self.value))
    }
}

/// A talisman whose set bonus is active
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TalismanActivation {
    pub name: String,
    pub name_en: String,
    /// Rarity the tier was looked up with
    pub rarity: Rarity,
    /// Copies worn across all slots
    pub worn: usize,
    pub tier: SetTier,
    pub lines: Vec<BonusLine>,
}

impl TalismanActivation {
    /// `(N個 → SET3)`
    pub fn summary(&self) -> String {
        format!("（{}個 → {}）", self.worn, self.tier.label())
    }
}

/// How often a power stone is socketed, with its per-unit value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoneUsage {
    pub stone: String,
    pub count: usize,
    /// Stone display label, the stone name when it is not in the table
    pub label: String,
    pub tooltip: String,
    /// Canonical stat the stone raises, if it maps to one
    pub stat: Option<String>,
    pub kind: StatKind,
    /// Value of one stone at the current level
    pub unit_value: Option<f64>,
}

impl StoneUsage {
    /// `name（N個）`
    pub fn heading(&self) -> String {
        format!("{}（{}個）", self.stone, self.count)
    }

    /// `+V × N`
    pub fn value_text(&self) -> String {
        match self.unit_value {
            Some(value) => format!("{} × {}", format::kind_text(self.kind, value), self.count),
            None => format!("- × {}", self.count),
        }
    }
}

/// A rendered totals row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRow {
    pub stat: String,
    pub label: String,
    pub tooltip: String,
    pub flat: Option<f64>,
    pub percent: Option<f64>,
}

impl StatRow {
    pub fn value_text(&self) -> String {
        format::value_text(self.flat, self.percent)
    }
}

/// Flat and percent totals plus the detail behind them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatTotals {
    /// Stat name to flat total
    pub flat: BTreeMap<String, f64>,
    /// Stat name to percent total, as a fraction
    pub percent: BTreeMap<String, f64>,
    /// Active set bonuses, in order of first appearance in the loadout
    pub talismans: Vec<TalismanActivation>,
    /// Stone usage, in order of first appearance in the loadout
    pub stones: Vec<StoneUsage>,
}

impl StatTotals {
    /// True when there is no stat row to show
    pub fn is_empty(&self) -> bool {
        self.flat.is_empty() && self.percent.is_empty()
    }

    pub fn flat(&self, stat: &str) -> f64 {
        self.flat.get(stat).copied().unwrap_or(0.0)
    }

    pub fn percent(&self, stat: &str) -> f64 {
        self.percent.get(stat).copied().unwrap_or(0.0)
    }

    /// Every stat with a non-zero total, sorted by name
    pub fn stat_names(&self) -> BTreeSet<&str> {
        self.flat
            .keys()
            .chain(self.percent.keys())
            .map(String::as_str)
            .collect()
    }

    pub fn activation(&self, talisman: &str) -> Option<&TalismanActivation> {
        self.talismans.iter().find(|a| a.name == talisman)
    }

    pub fn stone_usage(&self, stone: &str) -> Option<&StoneUsage> {
        self.stones.iter().find(|s| s.stone == stone)
    }

    /// Rows sorted by stat name, labelled from the stat table
    pub fn rows(&self, index: &MasterDataIndex) -> Vec<StatRow> {
        self.stat_names()
            .into_iter()
            .map(|stat| {
                let definition = index.stat(stat);
                StatRow {
                    stat: stat.to_string(),
                    label: definition.map_or(stat, |d| d.label.as_str()).to_string(),
                    tooltip: definition
                        .map(|d| d.tooltip.as_str())
                        .filter(|t| !t.is_empty())
                        .unwrap_or(stat)
                        .to_string(),
                    flat: self.flat.get(stat).copied(),
                    percent: self.percent.get(stat).copied(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::master::{RawRow, LABEL_COLUMN, STAT_NAME_COLUMN, TOOLTIP_COLUMN};

    #[test]
    fn test_rows_sorted_and_labelled() {
        let index = MasterDataIndex::build(
            &[RawRow::new()
                .with(STAT_NAME_COLUMN, "物理攻撃力")
                .with(LABEL_COLUMN, "物攻")
                .with(TOOLTIP_COLUMN, "物理ダメージが上がる")],
            &[],
            &[],
        )
        .unwrap();
        let mut totals = StatTotals::default();
        totals.flat.insert("物理攻撃力".to_string(), 30.0);
        totals.flat.insert("HP".to_string(), 120.0);
        totals.percent.insert("HP".to_string(), 0.1);

        let rows = totals.rows(&index);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].stat, "HP");
        assert_eq!(rows[0].label, "HP");
        assert_eq!(rows[0].tooltip, "HP");
        assert_eq!(rows[0].value_text(), "+120 / +10.0%");
        assert_eq!(rows[1].label, "物攻");
        assert_eq!(rows[1].tooltip, "物理ダメージが上がる");
        assert_eq!(rows[1].value_text(), "+30");
    }

    #[test]
    fn test_bonus_line_text() {
        let line = BonusLine {
            stat: "クリティカル発生率".to_string(),
            label: "クリ率".to_string(),
            value: 0.05,
            kind: StatKind::Percent,
        };
        assert_eq!(line.text(), "クリ率 +5.0%");
    }

    #[test]
    fn test_stone_value_text() {
        let usage = StoneUsage {
            stone: "HP".to_string(),
            count: 3,
            label: "HP".to_string(),
            tooltip: String::new(),
            stat: Some("HP".to_string()),
            kind: StatKind::Flat,
            unit_value: Some(40.0),
        };
        assert_eq!(usage.value_text(), "+40 × 3");
        assert_eq!(usage.heading(), "HP（3個）");
    }
}
