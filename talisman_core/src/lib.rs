//! talisman_core - Stat aggregation engine for talisman and power stone loadouts
//!
//! This library provides:
//! - MasterDataIndex: Stat, power stone and talisman tables indexed by name
//! - Loadout: Equipment slots with talismans, rarities and socketed stones
//! - LoadoutAggregator: Flat and percent totals plus set bonus detail
//! - Session: Edit-time rules and recomputation over a shared index

pub mod aggregator;
pub mod classify;
pub mod config;
pub mod effects;
pub mod loadout;
pub mod master;
pub mod session;
pub mod set_bonus;
pub mod source;
pub mod totals;
pub mod types;

// Re-export core types for convenience
pub use aggregator::LoadoutAggregator;
pub use classify::{is_percent, normalize_stone_stat, stat_kind, StatKind};
pub use config::{bundled_master_data, load_master_dir, ConfigError, SimulatorSettings};
pub use effects::{EffectRow, EffectTable, EffectTier};
pub use loadout::{Loadout, Slot, StoneUniquenessRule, WeaponStoneBroadcast};
pub use master::{MasterDataError, MasterDataIndex, RawRow};
pub use session::{Session, StoneOption};
pub use set_bonus::resolve_tier;
pub use source::{StatSource, StoneSource, TalismanSetSource};
pub use totals::{BonusLine, StatRow, StatTotals, StoneUsage, TalismanActivation};
pub use types::{EquipmentSlot, Level, Rarity, SetTier, StonePosition};
