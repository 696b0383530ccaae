//! Stat classification and power stone name normalization

use crate::master::MasterDataIndex;
use serde::{Deserialize, Serialize};

/// Markers that make a stat percentage-valued: "rate" and "multiplier"
const PERCENT_MARKERS: &[&str] = &["率", "倍率"];

/// Stones whose names differ from the stat they raise.
/// Checked before the stat table is consulted.
const STONE_ALIASES: &[(&str, &str)] = &[
    ("HP回復", "HP再生"),
    ("MP回復", "MP再生"),
    ("命中率", "命中"),
    ("回避率", "回避"),
    ("クリティカル率", "クリティカル発生率"),
    ("クリティカル防御率", "クリティカル倍率"),
];

/// Short attack/defense names, only used when no stat matches directly
const STONE_LONG_FORMS: &[(&str, &str)] = &[
    ("物理攻撃", "物理攻撃力"),
    ("魔法攻撃", "魔法攻撃力"),
    ("物理防御", "物理防御力"),
    ("魔法防御", "魔法防御力"),
];

/// How a stat's values combine and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    /// Added as-is, shown as `+N`
    Flat,
    /// Stored as a fraction, shown as `+N.N%`
    Percent,
}

/// Classify a stat by name
pub fn stat_kind(stat: &str) -> StatKind {
    if is_percent(stat) {
        StatKind::Percent
    } else {
        StatKind::Flat
    }
}

pub fn is_percent(stat: &str) -> bool {
    PERCENT_MARKERS.iter().any(|marker| stat.contains(marker))
}

/// Map a power stone name to the canonical stat it raises.
///
/// Returns `None` when neither the alias tables nor the stat table know the
/// name; such a stone contributes nothing.
pub fn normalize_stone_stat<'a>(index: &MasterDataIndex, stone: &'a str) -> Option<&'a str> {
    if let Some(stat) = lookup(STONE_ALIASES, stone) {
        return Some(stat);
    }
    if index.stat(stone).is_some() {
        return Some(stone);
    }
    lookup(STONE_LONG_FORMS, stone)
}

fn lookup(table: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(from, _)| *from == key).map(|(_, to)| *to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::master::{RawRow, LABEL_COLUMN, STAT_NAME_COLUMN};

    fn index_with_stats(names: &[&str]) -> MasterDataIndex {
        let rows: Vec<RawRow> = names
            .iter()
            .map(|n| RawRow::new().with(STAT_NAME_COLUMN, *n).with(LABEL_COLUMN, *n))
            .collect();
        MasterDataIndex::build(&rows, &[], &[]).unwrap()
    }

    #[test]
    fn test_percent_markers() {
        assert!(is_percent("クリティカル発生率"));
        assert!(is_percent("クリティカル倍率"));
        assert!(!is_percent("HP"));
        assert!(!is_percent("物理攻撃力"));
        assert_eq!(stat_kind("移動速度率"), StatKind::Percent);
        assert_eq!(stat_kind("HP再生"), StatKind::Flat);
    }

    #[test]
    fn test_alias_stones() {
        let index = index_with_stats(&["HP", "HP再生"]);
        assert_eq!(normalize_stone_stat(&index, "HP回復"), Some("HP再生"));
        assert_eq!(normalize_stone_stat(&index, "クリティカル防御率"), Some("クリティカル倍率"));
        assert_eq!(normalize_stone_stat(&index, "クリティカル率"), Some("クリティカル発生率"));
        assert_eq!(normalize_stone_stat(&index, "命中率"), Some("命中"));
    }

    #[test]
    fn test_direct_match_before_long_form() {
        let index = index_with_stats(&["物理攻撃", "HP"]);
        assert_eq!(normalize_stone_stat(&index, "物理攻撃"), Some("物理攻撃"));
        assert_eq!(normalize_stone_stat(&index, "魔法攻撃"), Some("魔法攻撃力"));
        assert_eq!(normalize_stone_stat(&index, "HP"), Some("HP"));
    }

    #[test]
    fn test_unknown_stone_is_none() {
        let index = index_with_stats(&["HP"]);
        assert_eq!(normalize_stone_stat(&index, "幸運"), None);
    }
}
