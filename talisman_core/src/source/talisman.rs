//! TalismanSetSource - Set bonus from wearing several copies of a talisman

use crate::master::MasterDataIndex;
use crate::set_bonus::{resolve_stats, resolve_tier};
use crate::source::StatSource;
use crate::totals::{BonusLine, Contribution, TalismanActivation};
use crate::types::{Level, Rarity};

/// How many slots carry a talisman, and the rarity used for its thresholds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalismanUsage {
    pub name: String,
    pub worn: usize,
    /// Rarity of the last slot seen with this talisman
    pub rarity: Rarity,
}

/// Set bonus of one talisman across the loadout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalismanSetSource {
    pub usage: TalismanUsage,
}

impl TalismanSetSource {
    pub fn new(usage: TalismanUsage) -> Self {
        TalismanSetSource { usage }
    }
}

impl StatSource for TalismanSetSource {
    fn id(&self) -> &str {
        &self.usage.name
    }

    fn priority(&self) -> i32 {
        100
    }

    fn contributions(&self, index: &MasterDataIndex, level: Level) -> Vec<Contribution> {
        let Some(talisman) = index.talisman(&self.usage.name) else {
            return Vec::new();
        };
        let Some(tier) = resolve_tier(self.usage.rarity, self.usage.worn) else {
            return Vec::new();
        };
        resolve_stats(index, talisman, self.usage.rarity, tier, level)
            .into_iter()
            .map(|bonus| Contribution::new(bonus.stat, bonus.value))
            .collect()
    }

    fn activation(
        &self,
        index: &MasterDataIndex,
        contributions: &[Contribution],
    ) -> Option<TalismanActivation> {
        let talisman = index.talisman(&self.usage.name)?;
        let tier = resolve_tier(self.usage.rarity, self.usage.worn)?;
        // A tier the talisman does not define at this rarity activates nothing.
        if talisman.tier_stats(self.usage.rarity, tier).is_empty() {
            return None;
        }

        let lines = contributions
            .iter()
            .map(|c| BonusLine {
                stat: c.stat.clone(),
                label: index.stat_label(&c.stat).to_string(),
                value: c.value,
                kind: c.kind,
            })
            .collect();

        Some(TalismanActivation {
            name: talisman.name.clone(),
            name_en: talisman.name_en.clone(),
            rarity: self.usage.rarity,
            worn: self.usage.worn,
            tier,
            lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::master::{RawRow, LABEL_COLUMN, STAT_NAME_COLUMN, TALISMAN_NAME_COLUMN};
    use crate::types::SetTier;

    fn index() -> MasterDataIndex {
        let stats = [
            RawRow::new()
                .with(STAT_NAME_COLUMN, "HP")
                .with(LABEL_COLUMN, "HP")
                .with("lv.60", 100.0),
            RawRow::new()
                .with(STAT_NAME_COLUMN, "回避率")
                .with(LABEL_COLUMN, "回避")
                .with("lv.60", 0.03),
        ];
        let talismans = [RawRow::new()
            .with(TALISMAN_NAME_COLUMN, "風の護符")
            .with("legendary;set2-1", "HP")
            .with("legendary;set2-2", "回避率")
            .with("rare;set4-1", "HP")];
        MasterDataIndex::build(&stats, &[], &talismans).unwrap()
    }

    fn source(worn: usize, rarity: Rarity) -> TalismanSetSource {
        TalismanSetSource::new(TalismanUsage {
            name: "風の護符".to_string(),
            worn,
            rarity,
        })
    }

    #[test]
    fn test_active_tier_contributes_and_reports() {
        let index = index();
        let source = source(2, Rarity::Legendary);
        let contributions = source.contributions(&index, Level::Lv60);
        assert_eq!(contributions.len(), 2);

        let activation = source.activation(&index, &contributions).unwrap();
        assert_eq!(activation.tier, SetTier::Set2);
        assert_eq!(activation.worn, 2);
        let texts: Vec<String> = activation.lines.iter().map(BonusLine::text).collect();
        assert_eq!(texts, vec!["HP +100", "回避 +3.0%"]);
    }

    #[test]
    fn test_undefined_tier_is_inactive() {
        let index = index();
        // legendary set3 is not defined for this talisman
        let source = source(3, Rarity::Legendary);
        let contributions = source.contributions(&index, Level::Lv60);
        assert!(contributions.is_empty());
        assert!(source.activation(&index, &contributions).is_none());
    }

    #[test]
    fn test_below_threshold_is_inactive() {
        let index = index();
        let source = source(3, Rarity::Rare);
        assert!(source.contributions(&index, Level::Lv60).is_empty());
        assert!(source.activation(&index, &[]).is_none());
    }
}
