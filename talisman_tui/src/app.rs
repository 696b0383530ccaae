//! Application state

use talisman_core::{EquipmentSlot, Session, StonePosition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Loadout,
    Totals,
    Effects,
    Help,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Loadout, Tab::Totals, Tab::Effects, Tab::Help]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tab::Loadout => "Loadout",
            Tab::Totals => "Totals",
            Tab::Effects => "Effects",
            Tab::Help => "Help",
        }
    }
}

/// Editable field of a slot row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Talisman,
    Rarity,
    Stone(StonePosition),
}

impl Field {
    pub fn all() -> &'static [Field] {
        &[
            Field::Talisman,
            Field::Rarity,
            Field::Stone(StonePosition::First),
            Field::Stone(StonePosition::Second),
            Field::Stone(StonePosition::Third),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Field::Talisman => "Talisman",
            Field::Rarity => "Rarity",
            Field::Stone(StonePosition::First) => "Stone 1",
            Field::Stone(StonePosition::Second) => "Stone 2",
            Field::Stone(StonePosition::Third) => "Stone 3",
        }
    }
}

pub struct App {
    pub current_tab: Tab,
    pub session: Session,
    pub selected_slot: usize,
    pub selected_field: usize,
    pub totals_scroll: usize,
    pub effects_scroll: usize,
    /// Last action feedback, shown under the slot list
    pub status: Option<String>,
    /// Highlighted row of the open stone picker; row 0 is "no stone"
    pub stone_cursor: Option<usize>,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            current_tab: Tab::Loadout,
            session,
            selected_slot: 0,
            selected_field: 0,
            totals_scroll: 0,
            effects_scroll: 0,
            status: None,
            stone_cursor: None,
        }
    }

    pub fn next_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let next_idx = (current_idx + 1) % tabs.len();
        self.current_tab = tabs[next_idx];
        self.stone_cursor = None;
    }

    pub fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let current_idx = tabs.iter().position(|t| *t == self.current_tab).unwrap_or(0);
        let prev_idx = if current_idx == 0 {
            tabs.len() - 1
        } else {
            current_idx - 1
        };
        self.current_tab = tabs[prev_idx];
        self.stone_cursor = None;
    }

    pub fn set_tab(&mut self, index: usize) {
        let tabs = Tab::all();
        if index < tabs.len() {
            self.current_tab = tabs[index];
            self.stone_cursor = None;
        }
    }

    pub fn on_up(&mut self) {
        if self.stone_cursor.is_some() {
            self.move_stone_cursor(false);
            return;
        }
        match self.current_tab {
            Tab::Loadout => {
                if self.selected_slot > 0 {
                    self.selected_slot -= 1;
                }
            }
            Tab::Totals => self.totals_scroll = self.totals_scroll.saturating_sub(1),
            Tab::Effects => self.effects_scroll = self.effects_scroll.saturating_sub(1),
            Tab::Help => {}
        }
    }

    pub fn on_down(&mut self) {
        if self.stone_cursor.is_some() {
            self.move_stone_cursor(true);
            return;
        }
        match self.current_tab {
            Tab::Loadout => {
                let max_slots = self.session.loadout().slots().len();
                if self.selected_slot < max_slots.saturating_sub(1) {
                    self.selected_slot += 1;
                }
            }
            Tab::Totals => self.totals_scroll += 1,
            Tab::Effects => self.effects_scroll += 1,
            Tab::Help => {}
        }
    }

    pub fn on_left(&mut self) {
        if self.current_tab == Tab::Loadout && self.selected_field > 0 {
            self.stone_cursor = None;
            self.selected_field -= 1;
        }
    }

    pub fn on_right(&mut self) {
        if self.current_tab == Tab::Loadout && self.selected_field < Field::all().len() - 1 {
            self.stone_cursor = None;
            self.selected_field += 1;
        }
    }

    pub fn on_enter(&mut self) {
        if self.current_tab != Tab::Loadout {
            return;
        }
        if self.stone_cursor.is_some() {
            self.confirm_stone();
        } else {
            self.cycle_field();
        }
    }

    /// Close the stone picker without changing the slot
    pub fn on_escape(&mut self) {
        self.stone_cursor = None;
    }

    pub fn on_space(&mut self) {
        self.on_enter();
    }

    /// Get the currently selected equipment slot
    pub fn current_slot(&self) -> EquipmentSlot {
        let slots = self.session.loadout().slots();
        slots
            .get(self.selected_slot.min(slots.len().saturating_sub(1)))
            .map_or(EquipmentSlot::Weapon, |s| s.kind)
    }

    pub fn current_field(&self) -> Field {
        let fields = Field::all();
        fields[self.selected_field.min(fields.len() - 1)]
    }

    /// Advance the selected field to its next value.
    /// Talismans wrap through "none". Stone fields open the picker instead.
    pub fn cycle_field(&mut self) {
        let slot = self.current_slot();
        let Some(current) = self.session.loadout().slot(slot) else {
            return;
        };

        match self.current_field() {
            Field::Talisman => {
                let names: Vec<String> = self
                    .session
                    .index()
                    .talismans()
                    .iter()
                    .map(|t| t.name.clone())
                    .collect();
                let next = next_choice(&names, current.talisman.as_deref());
                self.session.set_talisman(slot, next);
            }
            Field::Rarity => {
                let next = current.rarity.next();
                self.session.set_rarity(slot, next);
            }
            Field::Stone(position) => {
                let row = self
                    .session
                    .stone_options(slot, position)
                    .iter()
                    .position(|o| o.selected)
                    .map_or(0, |i| i + 1);
                self.stone_cursor = Some(row);
            }
        }
    }

    /// Stone under the picker cursor; `Some(None)` is the "no stone" row
    pub fn stone_under_cursor(&self) -> Option<Option<String>> {
        let row = self.stone_cursor?;
        let Field::Stone(position) = self.current_field() else {
            return None;
        };
        if row == 0 {
            return Some(None);
        }
        self.session
            .stone_options(self.current_slot(), position)
            .into_iter()
            .nth(row - 1)
            .map(|o| Some(o.stone))
    }

    /// Step the picker cursor, skipping stones socketed elsewhere in the slot
    fn move_stone_cursor(&mut self, down: bool) {
        let (Some(row), Field::Stone(position)) = (self.stone_cursor, self.current_field()) else {
            return;
        };
        let options = self.session.stone_options(self.current_slot(), position);
        let enabled = |r: usize| r == 0 || options.get(r - 1).is_some_and(|o| !o.disabled);

        let mut next = row;
        loop {
            next = if down {
                next + 1
            } else if next == 0 {
                return;
            } else {
                next - 1
            };
            if next > options.len() {
                return;
            }
            if enabled(next) {
                self.stone_cursor = Some(next);
                return;
            }
        }
    }

    /// Socket the stone under the cursor and close the picker
    fn confirm_stone(&mut self) {
        let choice = self.stone_under_cursor();
        self.stone_cursor = None;
        let (Some(stone), Field::Stone(position)) = (choice, self.current_field()) else {
            return;
        };

        let slot = self.current_slot();
        let broadcast_pending = slot.is_weapon() && !self.session.loadout().broadcast_done();
        self.session.set_stone(slot, position, stone);
        if broadcast_pending && self.session.loadout().broadcast_done() {
            self.status = Some("Weapon stones copied to the other slots.".to_string());
        }
    }

    /// Clear the selected field; rarity goes back to the default
    pub fn clear_field(&mut self) {
        self.stone_cursor = None;
        let slot = self.current_slot();
        match self.current_field() {
            Field::Talisman => {
                self.session.set_talisman(slot, None);
            }
            Field::Rarity => {
                self.session.set_rarity(slot, Default::default());
            }
            Field::Stone(position) => {
                self.session.set_stone(slot, position, None);
            }
        }
    }

    pub fn cycle_level(&mut self) {
        let next = self.session.level().next();
        self.session.set_level(next);
        self.status = Some(format!("Level set to {}.", next));
    }

    /// Add or remove the shield slot. Clears every selection.
    pub fn toggle_shield(&mut self) {
        let shield = !self.session.loadout().has_shield();
        self.session.set_shield(shield);
        self.stone_cursor = None;
        let max_slots = self.session.loadout().slots().len();
        self.selected_slot = self.selected_slot.min(max_slots.saturating_sub(1));
        self.status = Some(if shield {
            "Shield slot added, loadout cleared.".to_string()
        } else {
            "Shield slot removed, loadout cleared.".to_string()
        });
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.stone_cursor = None;
        self.totals_scroll = 0;
        self.status = Some("Loadout reset.".to_string());
    }
}

/// The entry after `current` in `choices`, with `None` before the first and after the last
fn next_choice(choices: &[String], current: Option<&str>) -> Option<String> {
    match current.and_then(|c| choices.iter().position(|s| s == c)) {
        Some(i) => choices.get(i + 1).cloned(),
        None => choices.first().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choices() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    #[test]
    fn test_next_choice_wraps_through_none() {
        let choices = choices();
        assert_eq!(next_choice(&choices, None), Some("a".to_string()));
        assert_eq!(next_choice(&choices, Some("a")), Some("b".to_string()));
        assert_eq!(next_choice(&choices, Some("b")), None);
        assert_eq!(next_choice(&[], None), None);
    }

    #[test]
    fn test_next_choice_unknown_current_restarts() {
        assert_eq!(next_choice(&choices(), Some("z")), Some("a".to_string()));
    }
}
