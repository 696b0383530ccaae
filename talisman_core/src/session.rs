//! Session - A loadout being edited, with totals kept current
//!
//! Every edit applies the loadout rules and recomputes the totals before
//! returning, so readers always see a consistent state.

use crate::aggregator::LoadoutAggregator;
use crate::config::SimulatorSettings;
use crate::effects::EffectTable;
use crate::loadout::Loadout;
use crate::master::MasterDataIndex;
use crate::totals::{StatRow, StatTotals};
use crate::types::{EquipmentSlot, Level, Rarity, StonePosition};
use std::sync::Arc;

/// A selectable power stone for one slot position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoneOption {
    pub stone: String,
    /// `label (name)`
    pub text: String,
    /// Socketed in another position of the same slot
    pub disabled: bool,
    pub selected: bool,
}

/// Editing state over shared master data
#[derive(Debug, Clone)]
pub struct Session {
    index: Arc<MasterDataIndex>,
    settings: SimulatorSettings,
    loadout: Loadout,
    level: Level,
    totals: StatTotals,
}

impl Session {
    pub fn new(index: Arc<MasterDataIndex>, settings: SimulatorSettings) -> Self {
        let mut session = Session {
            loadout: Loadout::new(settings.shield),
            level: settings.default_level,
            index,
            settings,
            totals: StatTotals::default(),
        };
        session.recompute();
        session
    }

    pub fn index(&self) -> &MasterDataIndex {
        &self.index
    }

    pub fn settings(&self) -> &SimulatorSettings {
        &self.settings
    }

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn totals(&self) -> &StatTotals {
        &self.totals
    }

    /// Name-sorted stat rows of the current totals
    pub fn rows(&self) -> Vec<StatRow> {
        self.totals.rows(&self.index)
    }

    pub fn effect_table(&self) -> EffectTable {
        EffectTable::from_index(&self.index)
    }

    /// Equip or clear a talisman. Unknown talisman names are refused.
    pub fn set_talisman(&mut self, slot: EquipmentSlot, talisman: Option<String>) -> bool {
        if let Some(name) = talisman.as_deref() {
            if self.index.talisman(name).is_none() {
                tracing::debug!(talisman = name, "refusing unknown talisman");
                return false;
            }
        }
        let changed = self.loadout.set_talisman(slot, talisman);
        self.recompute_if(changed)
    }

    pub fn set_rarity(&mut self, slot: EquipmentSlot, rarity: Rarity) -> bool {
        let changed = self.loadout.set_rarity(slot, rarity);
        self.recompute_if(changed)
    }

    /// Socket or clear a stone.
    ///
    /// Refuses unknown stones and stones disabled at this position. A weapon
    /// edit triggers the one-shot broadcast when enabled in the settings.
    pub fn set_stone(
        &mut self,
        slot: EquipmentSlot,
        position: StonePosition,
        stone: Option<String>,
    ) -> bool {
        let Some(current) = self.loadout.slot(slot) else {
            return false;
        };
        if let Some(name) = stone.as_deref() {
            if self.index.stone(name).is_none() || current.is_disabled(position, name) {
                tracing::debug!(stone = name, %slot, "refusing stone");
                return false;
            }
        }

        self.loadout.set_stone(slot, position, stone);
        if slot.is_weapon() && self.settings.broadcast_weapon_stones {
            self.loadout.broadcast_weapon_stones();
        }
        self.recompute_if(true)
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
        self.recompute();
    }

    /// Add or remove the shield slot; the whole roster is rebuilt
    pub fn set_shield(&mut self, shield: bool) {
        self.loadout.set_shield(shield);
        self.recompute();
    }

    /// Clear every selection and re-arm the weapon broadcast
    pub fn reset(&mut self) {
        self.loadout.rebuild();
        self.recompute();
    }

    /// Stones in master-data order, flagged for one slot position
    pub fn stone_options(&self, slot: EquipmentSlot, position: StonePosition) -> Vec<StoneOption> {
        let Some(current) = self.loadout.slot(slot) else {
            return Vec::new();
        };
        self.index
            .stones()
            .iter()
            .map(|definition| StoneOption {
                stone: definition.name.clone(),
                text: definition.option_text(),
                disabled: current.is_disabled(position, &definition.name),
                selected: current.stone(position) == Some(definition.name.as_str()),
            })
            .collect()
    }

    fn recompute_if(&mut self, changed: bool) -> bool {
        if changed {
            self.recompute();
        }
        changed
    }

    fn recompute(&mut self) {
        self.totals = LoadoutAggregator::new(&self.index).compute_totals(&self.loadout, self.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::master::{
        RawRow, LABEL_COLUMN, STAT_NAME_COLUMN, STONE_NAME_COLUMN, TALISMAN_NAME_COLUMN,
    };

    fn index() -> Arc<MasterDataIndex> {
        let stats = [
            RawRow::new().with(STAT_NAME_COLUMN, "HP").with("lv.60", 100.0).with("lv.110", 300.0),
            RawRow::new().with(STAT_NAME_COLUMN, "命中").with("lv.60", 10.0),
        ];
        let stones = [
            RawRow::new()
                .with(STONE_NAME_COLUMN, "HP")
                .with(LABEL_COLUMN, "体力")
                .with("lv.60", 40.0)
                .with("lv.110", 80.0),
            RawRow::new().with(STONE_NAME_COLUMN, "命中率").with("lv.60", 3.0),
        ];
        let talismans = [RawRow::new()
            .with(TALISMAN_NAME_COLUMN, "大地の護符")
            .with("legendary;set2-1", "HP")];
        Arc::new(MasterDataIndex::build(&stats, &stones, &talismans).unwrap())
    }

    fn session() -> Session {
        Session::new(index(), SimulatorSettings::default())
    }

    fn stone(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_new_session_uses_settings() {
        let session = session();
        assert_eq!(session.level(), Level::Lv110);
        assert!(!session.loadout().has_shield());
        assert!(session.totals().is_empty());

        let settings = SimulatorSettings {
            default_level: Level::Lv60,
            shield: true,
            broadcast_weapon_stones: true,
        };
        let session = Session::new(index(), settings);
        assert_eq!(session.level(), Level::Lv60);
        assert_eq!(session.loadout().slots().len(), 13);
    }

    #[test]
    fn test_edits_recompute() {
        let mut session = session();
        assert!(session.set_talisman(EquipmentSlot::Head, Some("大地の護符".to_string())));
        assert!(session.set_talisman(EquipmentSlot::Body, Some("大地の護符".to_string())));
        assert!((session.totals().flat("HP") - 300.0).abs() < f64::EPSILON);

        session.set_level(Level::Lv60);
        assert!((session.totals().flat("HP") - 100.0).abs() < f64::EPSILON);

        assert!(session.set_rarity(EquipmentSlot::Body, Rarity::Rare));
        assert!(session.totals().is_empty());
    }

    #[test]
    fn test_unknown_names_refused() {
        let mut session = session();
        assert!(!session.set_talisman(EquipmentSlot::Head, Some("謎の護符".to_string())));
        assert!(!session.set_stone(EquipmentSlot::Head, StonePosition::First, stone("謎")));
        assert!(!session.set_stone(EquipmentSlot::Shield, StonePosition::First, stone("HP")));
        assert!(session.loadout().slot(EquipmentSlot::Head).unwrap().talisman.is_none());
    }

    #[test]
    fn test_disabled_stone_refused() {
        let mut session = session();
        assert!(session.set_stone(EquipmentSlot::Head, StonePosition::First, stone("HP")));
        assert!(!session.set_stone(EquipmentSlot::Head, StonePosition::Second, stone("HP")));

        let options = session.stone_options(EquipmentSlot::Head, StonePosition::Second);
        let hp = options.iter().find(|o| o.stone == "HP").unwrap();
        assert!(hp.disabled);
        assert!(!hp.selected);
        assert_eq!(hp.text, "体力 (HP)");

        let options = session.stone_options(EquipmentSlot::Head, StonePosition::First);
        assert!(options.iter().any(|o| o.stone == "HP" && o.selected && !o.disabled));
    }

    #[test]
    fn test_weapon_edit_broadcasts_once() {
        let mut session = session();
        session.set_stone(EquipmentSlot::Weapon, StonePosition::First, stone("HP"));
        // 12 slots, one HP stone each
        assert!((session.totals().flat("HP") - 80.0 * 12.0).abs() < f64::EPSILON);
        assert_eq!(session.totals().stone_usage("HP").unwrap().count, 12);

        session.set_stone(EquipmentSlot::Weapon, StonePosition::Second, stone("命中率"));
        assert_eq!(
            session.loadout().slot(EquipmentSlot::Bag).unwrap().stone(StonePosition::Second),
            None
        );
    }

    #[test]
    fn test_broadcast_disabled_by_settings() {
        let settings = SimulatorSettings {
            broadcast_weapon_stones: false,
            ..SimulatorSettings::default()
        };
        let mut session = Session::new(index(), settings);
        session.set_stone(EquipmentSlot::Weapon, StonePosition::First, stone("HP"));
        assert_eq!(session.totals().stone_usage("HP").unwrap().count, 1);
    }

    #[test]
    fn test_reset_and_shield_clear_selections() {
        let mut session = session();
        session.set_stone(EquipmentSlot::Weapon, StonePosition::First, stone("HP"));
        session.reset();
        assert!(session.totals().is_empty());
        assert!(session.totals().stones.is_empty());

        // broadcast is armed again after a reset
        session.set_stone(EquipmentSlot::Weapon, StonePosition::First, stone("HP"));
        assert_eq!(session.totals().stone_usage("HP").unwrap().count, 12);

        session.set_shield(true);
        assert!(session.totals().is_empty());
        assert_eq!(session.loadout().slots().len(), 13);
        session.set_stone(EquipmentSlot::Shield, StonePosition::First, stone("HP"));
        assert_eq!(session.totals().stone_usage("HP").unwrap().count, 1);
    }
}
