//! Set bonus tier thresholds and tier stat resolution

use crate::master::{MasterDataIndex, TalismanDefinition};
use crate::types::{Level, Rarity, SetTier};
use serde::{Deserialize, Serialize};

/// A stat granted by an active tier, with its value at the current level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusStat {
    pub stat: String,
    pub value: f64,
}

/// Tier unlocked by wearing `worn` copies of one talisman at `rarity`.
///
/// | rarity    | 2    | 3    | 4+   |
/// |-----------|------|------|------|
/// | uncommon  | -    | -    | set4 |
/// | rare      | -    | set3 | set4 |
/// | legendary | set2 | set3 | set4 |
pub fn resolve_tier(rarity: Rarity, worn: usize) -> Option<SetTier> {
    match (rarity, worn) {
        (_, n) if n >= 4 => Some(SetTier::Set4),
        (Rarity::Rare | Rarity::Legendary, 3) => Some(SetTier::Set3),
        (Rarity::Legendary, 2) => Some(SetTier::Set2),
        _ => None,
    }
}

/// Stats of a talisman tier at a level, in table order.
/// Stats without a value at `level` are left out.
pub fn resolve_stats(
    index: &MasterDataIndex,
    talisman: &TalismanDefinition,
    rarity: Rarity,
    tier: SetTier,
    level: Level,
) -> Vec<BonusStat> {
    talisman
        .tier_stats(rarity, tier)
        .iter()
        .filter_map(|stat| {
            index.stat_value(stat, level).map(|value| BonusStat {
                stat: stat.clone(),
                value,
            })
        })
        .collect()
}
