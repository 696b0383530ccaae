//! Core types shared across the loadout engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a string does not name a known level, rarity or tier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseKindError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseKindError {
    fn new(kind: &'static str, value: &str) -> Self {
        ParseKindError {
            kind,
            value: value.to_string(),
        }
    }
}

/// Character level a value table can be looked up at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "60")]
    Lv60,
    #[serde(rename = "75")]
    Lv75,
    #[serde(rename = "100")]
    Lv100,
    #[serde(rename = "110")]
    Lv110,
}

impl Level {
    /// Prefix marking a level/value column in the master tables
    pub const COLUMN_MARKER: &'static str = "lv";

    pub fn all() -> &'static [Level] {
        &[Level::Lv60, Level::Lv75, Level::Lv100, Level::Lv110]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Lv60 => "60",
            Level::Lv75 => "75",
            Level::Lv100 => "100",
            Level::Lv110 => "110",
        }
    }

    /// Extract the level from a column key such as `lv.60` or `lv110`.
    ///
    /// Returns `None` when the key is not a level column at all, and
    /// `Some(Err(_))` when it is one but names an unsupported level.
    pub fn from_column_key(key: &str) -> Option<Result<Level, ParseKindError>> {
        let rest = key.strip_prefix(Self::COLUMN_MARKER)?;
        let token = rest.strip_prefix('.').unwrap_or(rest);
        Some(token.parse())
    }

    /// The level after this one, wrapping around
    pub fn next(&self) -> Level {
        match self {
            Level::Lv60 => Level::Lv75,
            Level::Lv75 => Level::Lv100,
            Level::Lv100 => Level::Lv110,
            Level::Lv110 => Level::Lv60,
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::Lv110
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lv.{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "60" => Ok(Level::Lv60),
            "75" => Ok(Level::Lv75),
            "100" => Ok(Level::Lv100),
            "110" => Ok(Level::Lv110),
            other => Err(ParseKindError::new("level", other)),
        }
    }
}

/// Talisman rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    pub fn all() -> &'static [Rarity] {
        &[Rarity::Uncommon, Rarity::Rare, Rarity::Legendary]
    }

    /// Key used in master data column names
    pub fn key(&self) -> &'static str {
        match self {
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Legendary => "legendary",
        }
    }

    /// Short badge text
    pub fn alias(&self) -> &'static str {
        match self {
            Rarity::Uncommon => "UNC",
            Rarity::Rare => "RARE",
            Rarity::Legendary => "LEG",
        }
    }

    pub fn label_jp(&self) -> &'static str {
        match self {
            Rarity::Uncommon => "アンコモン",
            Rarity::Rare => "レア",
            Rarity::Legendary => "レジェンダリー",
        }
    }

    /// Selection order used by the rarity picker (legendary first)
    pub fn next(&self) -> Rarity {
        match self {
            Rarity::Legendary => Rarity::Rare,
            Rarity::Rare => Rarity::Uncommon,
            Rarity::Uncommon => Rarity::Legendary,
        }
    }
}

impl Default for Rarity {
    fn default() -> Self {
        Rarity::Legendary
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias())
    }
}

impl FromStr for Rarity {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "uncommon" => Ok(Rarity::Uncommon),
            "rare" => Ok(Rarity::Rare),
            "legendary" => Ok(Rarity::Legendary),
            other => Err(ParseKindError::new("rarity", other)),
        }
    }
}

/// Set bonus tier unlocked by wearing several copies of a talisman
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetTier {
    Set2,
    Set3,
    Set4,
}

impl SetTier {
    pub fn all() -> &'static [SetTier] {
        &[SetTier::Set2, SetTier::Set3, SetTier::Set4]
    }

    pub fn key(&self) -> &'static str {
        match self {
            SetTier::Set2 => "set2",
            SetTier::Set3 => "set3",
            SetTier::Set4 => "set4",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SetTier::Set2 => "SET2",
            SetTier::Set3 => "SET3",
            SetTier::Set4 => "SET4",
        }
    }
}

impl fmt::Display for SetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SetTier {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "set2" => Ok(SetTier::Set2),
            "set3" => Ok(SetTier::Set3),
            "set4" => Ok(SetTier::Set4),
            other => Err(ParseKindError::new("set tier", other)),
        }
    }
}

/// Equipment slot in the loadout roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Head,
    Body,
    Arms,
    Legs,
    Necklace,
    Ring1,
    Ring2,
    Earring1,
    Earring2,
    Bracelet,
    Bag,
    Shield,
}

impl EquipmentSlot {
    /// The fixed roster, without the optional shield
    pub fn roster() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Weapon,
            EquipmentSlot::Head,
            EquipmentSlot::Body,
            EquipmentSlot::Arms,
            EquipmentSlot::Legs,
            EquipmentSlot::Necklace,
            EquipmentSlot::Ring1,
            EquipmentSlot::Ring2,
            EquipmentSlot::Earring1,
            EquipmentSlot::Earring2,
            EquipmentSlot::Bracelet,
            EquipmentSlot::Bag,
        ]
    }

    /// Display name as shown on the slot row
    pub fn label(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "武器",
            EquipmentSlot::Head => "頭",
            EquipmentSlot::Body => "胴体",
            EquipmentSlot::Arms => "腕",
            EquipmentSlot::Legs => "足",
            EquipmentSlot::Necklace => "首飾り",
            EquipmentSlot::Ring1 => "指輪1",
            EquipmentSlot::Ring2 => "指輪2",
            EquipmentSlot::Earring1 => "イヤリング1",
            EquipmentSlot::Earring2 => "イヤリング2",
            EquipmentSlot::Bracelet => "腕輪",
            EquipmentSlot::Bag => "かばん",
            EquipmentSlot::Shield => "盾",
        }
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self, EquipmentSlot::Weapon)
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the three power stone positions on a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StonePosition {
    First,
    Second,
    Third,
}

impl StonePosition {
    pub const COUNT: usize = 3;

    pub fn all() -> &'static [StonePosition] {
        &[StonePosition::First, StonePosition::Second, StonePosition::Third]
    }

    pub fn index(&self) -> usize {
        match self {
            StonePosition::First => 0,
            StonePosition::Second => 1,
            StonePosition::Third => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<StonePosition> {
        Self::all().get(index).copied()
    }
}
