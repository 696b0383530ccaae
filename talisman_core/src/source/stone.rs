//! StoneSource - Stats from one socketed power stone

use crate::classify::normalize_stone_stat;
use crate::master::MasterDataIndex;
use crate::source::StatSource;
use crate::totals::Contribution;
use crate::types::Level;

/// A single socketed stone occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoneSource {
    pub stone: String,
}

impl StoneSource {
    pub fn new(stone: impl Into<String>) -> Self {
        StoneSource { stone: stone.into() }
    }
}

impl StatSource for StoneSource {
    fn id(&self) -> &str {
        &self.stone
    }

    fn contributions(&self, index: &MasterDataIndex, level: Level) -> Vec<Contribution> {
        let Some(value) = index.stone_value(&self.stone, level) else {
            return Vec::new();
        };
        match normalize_stone_stat(index, &self.stone) {
            Some(stat) => vec![Contribution::new(stat, value)],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::StatKind;
    use crate::master::{RawRow, STAT_NAME_COLUMN, STONE_NAME_COLUMN};

    fn index() -> MasterDataIndex {
        let stats = [RawRow::new().with(STAT_NAME_COLUMN, "クリティカル倍率").with("lv.60", 0.1)];
        let stones = [
            RawRow::new().with(STONE_NAME_COLUMN, "クリティカル防御率").with("lv.60", 0.02),
            RawRow::new().with(STONE_NAME_COLUMN, "幸運").with("lv.60", 5.0),
        ];
        MasterDataIndex::build(&stats, &stones, &[]).unwrap()
    }

    #[test]
    fn test_stone_maps_to_canonical_stat() {
        let contributions = StoneSource::new("クリティカル防御率").contributions(&index(), Level::Lv60);
        assert_eq!(contributions.len(), 1);
        assert_eq!(contributions[0].stat, "クリティカル倍率");
        assert_eq!(contributions[0].kind, StatKind::Percent);
        assert!((contributions[0].value - 0.02).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unmapped_or_missing_contributes_nothing() {
        let index = index();
        assert!(StoneSource::new("幸運").contributions(&index, Level::Lv60).is_empty());
        assert!(StoneSource::new("不明").contributions(&index, Level::Lv60).is_empty());
        assert!(StoneSource::new("クリティカル防御率")
            .contributions(&index, Level::Lv110)
            .is_empty());
    }
}
