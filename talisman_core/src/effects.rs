//! EffectTable - Reference listing of every talisman's set bonuses

use crate::master::MasterDataIndex;
use crate::types::{Rarity, SetTier};
use serde::{Deserialize, Serialize};

/// A stat granted by a tier, with its display text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectStat {
    pub stat: String,
    pub label: String,
    pub tooltip: String,
}

/// One tier of one rarity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTier {
    pub tier: SetTier,
    pub stats: Vec<EffectStat>,
}

/// A talisman's tiers, per rarity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectRow {
    pub talisman: String,
    pub talisman_en: String,
    /// Rarities in `Rarity::all()` order; a rarity with no tiers has an empty list
    pub rarities: Vec<(Rarity, Vec<EffectTier>)>,
}

impl EffectRow {
    pub fn tiers(&self, rarity: Rarity) -> &[EffectTier] {
        self.rarities
            .iter()
            .find(|(r, _)| *r == rarity)
            .map_or(&[], |(_, tiers)| tiers.as_slice())
    }
}

/// Every talisman, in master-data order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectTable {
    pub rows: Vec<EffectRow>,
}

impl EffectTable {
    pub fn from_index(index: &MasterDataIndex) -> Self {
        let rows = index
            .talismans()
            .iter()
            .map(|talisman| EffectRow {
                talisman: talisman.name.clone(),
                talisman_en: talisman.name_en.clone(),
                rarities: Rarity::all()
                    .iter()
                    .map(|rarity| {
                        let tiers = talisman
                            .tiers(*rarity)
                            .map(|(tier, stats)| EffectTier {
                                tier,
                                stats: stats.iter().map(|s| effect_stat(index, s)).collect(),
                            })
                            .collect();
                        (*rarity, tiers)
                    })
                    .collect(),
            })
            .collect();
        EffectTable { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, talisman: &str) -> Option<&EffectRow> {
        self.rows.iter().find(|r| r.talisman == talisman)
    }
}

fn effect_stat(index: &MasterDataIndex, stat: &str) -> EffectStat {
    let definition = index.stat(stat);
    EffectStat {
        stat: stat.to_string(),
        label: definition.map_or(stat, |d| d.label.as_str()).to_string(),
        tooltip: definition
            .map(|d| d.tooltip.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or(stat)
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::master::{RawRow, LABEL_COLUMN, STAT_NAME_COLUMN, TALISMAN_NAME_COLUMN};

    #[test]
    fn test_table_follows_master_order() {
        let stats = [RawRow::new()
            .with(STAT_NAME_COLUMN, "物理攻撃力")
            .with(LABEL_COLUMN, "物攻")];
        let talismans = [
            RawRow::new()
                .with(TALISMAN_NAME_COLUMN, "炎の護符")
                .with("rare;set4-1", "物理攻撃力")
                .with("rare;set4-2", "未知の能力")
                .with("rare;set3-1", "物理攻撃力"),
            RawRow::new().with(TALISMAN_NAME_COLUMN, "空の護符"),
        ];
        let index = MasterDataIndex::build(&stats, &[], &talismans).unwrap();
        let table = EffectTable::from_index(&index);

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].talisman, "炎の護符");
        let rare = table.rows[0].tiers(Rarity::Rare);
        assert_eq!(rare.len(), 2);
        assert_eq!(rare[0].tier, SetTier::Set3);
        assert_eq!(rare[1].tier, SetTier::Set4);
        let labels: Vec<&str> = rare[1].stats.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["物攻", "未知の能力"]);
        assert!(table.rows[0].tiers(Rarity::Legendary).is_empty());

        assert!(table.row("空の護符").unwrap().rarities.iter().all(|(_, t)| t.is_empty()));
    }
}
