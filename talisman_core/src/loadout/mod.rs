//! Loadout - Slots with their talisman, rarity and power stones

mod rules;

pub use rules::{StoneUniquenessRule, WeaponStoneBroadcast};

use crate::types::{EquipmentSlot, Rarity, StonePosition};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One equipment slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub kind: EquipmentSlot,
    pub talisman: Option<String>,
    pub rarity: Rarity,
    stones: [Option<String>; StonePosition::COUNT],
    /// Stones that cannot be picked per position, maintained by `StoneUniquenessRule`
    #[serde(skip)]
    disabled: [BTreeSet<String>; StonePosition::COUNT],
}

impl Slot {
    pub fn new(kind: EquipmentSlot) -> Self {
        Slot {
            kind,
            talisman: None,
            rarity: Rarity::default(),
            stones: Default::default(),
            disabled: Default::default(),
        }
    }

    pub fn stone(&self, position: StonePosition) -> Option<&str> {
        self.stones[position.index()].as_deref()
    }

    /// All three positions in order
    pub fn stones(&self) -> impl Iterator<Item = (StonePosition, Option<&str>)> + '_ {
        StonePosition::all().iter().map(move |p| (*p, self.stone(*p)))
    }

    /// Non-empty stones in position order
    pub fn socketed(&self) -> impl Iterator<Item = &str> + '_ {
        self.stones.iter().filter_map(|s| s.as_deref())
    }

    pub fn has_stones(&self) -> bool {
        self.socketed().next().is_some()
    }

    /// Set a position; this does not re-run the uniqueness rule
    pub fn set_stone(&mut self, position: StonePosition, stone: Option<String>) {
        self.stones[position.index()] = stone.filter(|s| !s.is_empty());
    }

    /// Whether `stone` is currently disabled at `position`
    pub fn is_disabled(&self, position: StonePosition, stone: &str) -> bool {
        self.disabled[position.index()].contains(stone)
    }

    pub fn disabled(&self, position: StonePosition) -> &BTreeSet<String> {
        &self.disabled[position.index()]
    }
}

/// The set of slots being configured, plus the per-build broadcast flag
#[derive(Debug, Clone)]
pub struct Loadout {
    slots: Vec<Slot>,
    shield: bool,
    broadcast: WeaponStoneBroadcast,
}

impl Default for Loadout {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Loadout {
    /// Fresh loadout: the fixed roster, plus the shield slot when requested
    pub fn new(shield: bool) -> Self {
        let mut slots: Vec<Slot> = EquipmentSlot::roster().iter().map(|k| Slot::new(*k)).collect();
        if shield {
            slots.push(Slot::new(EquipmentSlot::Shield));
        }
        Loadout {
            slots,
            shield,
            broadcast: WeaponStoneBroadcast::new(),
        }
    }

    /// Start over with empty slots; the broadcast flag is re-armed
    pub fn rebuild(&mut self) {
        *self = Loadout::new(self.shield);
    }

    /// Add or remove the shield slot. The roster is rebuilt either way.
    pub fn set_shield(&mut self, shield: bool) {
        self.shield = shield;
        self.rebuild();
    }

    pub fn has_shield(&self) -> bool {
        self.shield
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, kind: EquipmentSlot) -> Option<&Slot> {
        self.slots.iter().find(|s| s.kind == kind)
    }

    pub fn slot_mut(&mut self, kind: EquipmentSlot) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|s| s.kind == kind)
    }

    /// Returns false when the slot is not part of the roster
    pub fn set_talisman(&mut self, kind: EquipmentSlot, talisman: Option<String>) -> bool {
        match self.slot_mut(kind) {
            Some(slot) => {
                slot.talisman = talisman.filter(|t| !t.is_empty());
                true
            }
            None => false,
        }
    }

    pub fn set_rarity(&mut self, kind: EquipmentSlot, rarity: Rarity) -> bool {
        match self.slot_mut(kind) {
            Some(slot) => {
                slot.rarity = rarity;
                true
            }
            None => false,
        }
    }

    /// Set a stone and re-run the uniqueness rule on that slot
    pub fn set_stone(
        &mut self,
        kind: EquipmentSlot,
        position: StonePosition,
        stone: Option<String>,
    ) -> bool {
        match self.slot_mut(kind) {
            Some(slot) => {
                slot.set_stone(position, stone);
                StoneUniquenessRule::apply(slot);
                true
            }
            None => false,
        }
    }

    /// Run the one-shot weapon stone broadcast; true if it fired
    pub fn broadcast_weapon_stones(&mut self) -> bool {
        self.broadcast.maybe_broadcast(&mut self.slots)
    }

    pub fn broadcast_done(&self) -> bool {
        self.broadcast.is_done()
    }

    /// Talismans worn at more than one rarity.
    ///
    /// Aggregation uses the rarity of the last such slot; this reports the
    /// ambiguity without changing that.
    pub fn rarity_conflicts(&self) -> Vec<(&str, BTreeSet<Rarity>)> {
        let mut seen: Vec<(&str, BTreeSet<Rarity>)> = Vec::new();
        for slot in &self.slots {
            let Some(name) = slot.talisman.as_deref() else {
                continue;
            };
            match seen.iter().position(|(n, _)| *n == name) {
                Some(i) => {
                    seen[i].1.insert(slot.rarity);
                }
                None => seen.push((name, BTreeSet::from([slot.rarity]))),
            }
        }
        seen.retain(|(_, rarities)| rarities.len() > 1);
        seen
    }
}
