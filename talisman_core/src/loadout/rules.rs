//! Edit-time rules over loadout slots

use super::Slot;
use crate::types::{EquipmentSlot, StonePosition};
use std::collections::BTreeSet;

/// A stone may occupy at most one position of a slot.
///
/// Conflicting choices are disabled per position; selections are never
/// cleared.
pub struct StoneUniquenessRule;

impl StoneUniquenessRule {
    /// Recompute the disabled stones of every position of `slot`.
    /// Idempotent for unchanged selections.
    pub fn apply(slot: &mut Slot) {
        for position in StonePosition::all() {
            let current = slot.stone(*position);
            let taken: BTreeSet<String> = slot
                .stones()
                .filter(|(other, _)| other != position)
                .filter_map(|(_, stone)| stone)
                .filter(|stone| Some(*stone) != current)
                .map(str::to_string)
                .collect();
            slot.disabled[position.index()] = taken;
        }
    }
}

/// One-shot copy of the weapon's stones into the empty positions of every
/// other slot. Scoped to one loadout build.
#[derive(Debug, Clone, Default)]
pub struct WeaponStoneBroadcast {
    done: bool,
}

impl WeaponStoneBroadcast {
    pub fn new() -> Self {
        WeaponStoneBroadcast::default()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Fire once, the first time the weapon slot has any stone.
    ///
    /// Only empty target positions are filled, and a stone already socketed
    /// elsewhere in the target slot is not copied a second time. A slot never
    /// holds the same stone twice, and that rule wins over filling every empty
    /// position, so such a position stays empty. Returns true if the broadcast
    /// fired on this call.
    pub fn maybe_broadcast(&mut self, slots: &mut [Slot]) -> bool {
        if self.done {
            return false;
        }
        let Some(weapon) = slots.iter().find(|s| s.kind == EquipmentSlot::Weapon) else {
            return false;
        };
        if !weapon.has_stones() {
            return false;
        }
        let weapon_stones = weapon.stones.clone();

        let mut filled = 0usize;
        for slot in slots.iter_mut().filter(|s| !s.kind.is_weapon()) {
            for position in StonePosition::all() {
                let Some(stone) = &weapon_stones[position.index()] else {
                    continue;
                };
                let already_socketed = slot.socketed().any(|s| s == stone);
                if slot.stone(*position).is_none() && !already_socketed {
                    slot.set_stone(*position, Some(stone.clone()));
                    filled += 1;
                }
            }
            StoneUniquenessRule::apply(slot);
        }

        self.done = true;
        tracing::debug!(filled, "weapon stones broadcast");
        true
    }
}
