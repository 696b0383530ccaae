//! LoadoutAggregator - Full recomputation of totals from a loadout

use crate::classify::{normalize_stone_stat, stat_kind};
use crate::loadout::Loadout;
use crate::master::MasterDataIndex;
use crate::source::{StatSource, StoneSource, TalismanSetSource, TalismanUsage};
use crate::totals::{StatAccumulator, StatTotals, StoneUsage};
use crate::types::Level;

/// Stateless engine over read-only master data
#[derive(Debug, Clone, Copy)]
pub struct LoadoutAggregator<'a> {
    index: &'a MasterDataIndex,
}

impl<'a> LoadoutAggregator<'a> {
    pub fn new(index: &'a MasterDataIndex) -> Self {
        LoadoutAggregator { index }
    }

    /// Compute totals for a loadout at a level.
    ///
    /// Pure: the same loadout and level always give the same result.
    pub fn compute_totals(&self, loadout: &Loadout, level: Level) -> StatTotals {
        let mut talismans: Vec<TalismanUsage> = Vec::new();
        let mut stone_counts: Vec<(String, usize)> = Vec::new();
        let mut sources: Vec<Box<dyn StatSource>> = Vec::new();

        for slot in loadout.slots() {
            if let Some(name) = slot.talisman.as_deref() {
                match talismans.iter_mut().find(|t| t.name == name) {
                    Some(usage) => {
                        usage.worn += 1;
                        usage.rarity = slot.rarity;
                    }
                    None => talismans.push(TalismanUsage {
                        name: name.to_string(),
                        worn: 1,
                        rarity: slot.rarity,
                    }),
                }
            }

            for stone in slot.socketed() {
                match stone_counts.iter_mut().find(|(s, _)| s == stone) {
                    Some((_, count)) => *count += 1,
                    None => stone_counts.push((stone.to_string(), 1)),
                }
                sources.push(Box::new(StoneSource::new(stone)));
            }
        }

        for (name, rarities) in loadout.rarity_conflicts() {
            tracing::warn!(
                talisman = name,
                ?rarities,
                "talisman worn at mixed rarities, using the last slot's"
            );
        }

        sources.extend(
            talismans
                .into_iter()
                .map(|usage| Box::new(TalismanSetSource::new(usage)) as Box<dyn StatSource>),
        );

        let mut totals = self.compute_from_sources(&sources, level);
        totals.stones = stone_counts
            .into_iter()
            .map(|(stone, count)| self.stone_usage(stone, count, level))
            .collect();

        tracing::debug!(
            level = level.as_str(),
            stats = totals.stat_names().len(),
            active_sets = totals.talismans.len(),
            "totals recomputed"
        );
        totals
    }

    /// Totals from arbitrary sources, applied in priority order.
    ///
    /// Stone usage is left empty; it only exists for loadouts.
    pub fn compute_from_sources(
        &self,
        sources: &[Box<dyn StatSource>],
        level: Level,
    ) -> StatTotals {
        let mut sorted: Vec<&dyn StatSource> = sources.iter().map(|s| s.as_ref()).collect();
        sorted.sort_by_key(|s| s.priority());

        let mut accumulator = StatAccumulator::new();
        let mut activations = Vec::new();
        for source in sorted {
            let contributions = source.contributions(self.index, level);
            for contribution in &contributions {
                accumulator.add(contribution);
            }
            if let Some(activation) = source.activation(self.index, &contributions) {
                activations.push(activation);
            }
        }

        let (flat, percent) = accumulator.finish();
        StatTotals {
            flat,
            percent,
            talismans: activations,
            stones: Vec::new(),
        }
    }

    fn stone_usage(&self, stone: String, count: usize, level: Level) -> StoneUsage {
        let definition = self.index.stone(&stone);
        let stat = normalize_stone_stat(self.index, &stone).map(str::to_string);
        let kind = stat_kind(stat.as_deref().unwrap_or(stone.as_str()));
        StoneUsage {
            label: definition.map_or(stone.as_str(), |d| d.label.as_str()).to_string(),
            tooltip: match definition {
                Some(d) if !d.tooltip.is_empty() => format!("{} / {}", stone, d.tooltip),
                _ => stone.clone(),
            },
            unit_value: definition.and_then(|d| d.value_at(level)),
            stat,
            kind,
            count,
            stone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::master::{
        RawRow, LABEL_COLUMN, STAT_NAME_COLUMN, STONE_NAME_COLUMN, TALISMAN_NAME_COLUMN,
        TALISMAN_NAME_EN_COLUMN,
    };
    use crate::totals::format;
    use crate::types::{EquipmentSlot, Rarity, SetTier, StonePosition};
    use proptest::prelude::*;

    fn stat(name: &str, label: &str, lv60: f64) -> RawRow {
        RawRow::new()
            .with(STAT_NAME_COLUMN, name)
            .with(LABEL_COLUMN, label)
            .with("lv.60", lv60)
    }

    fn stone(name: &str, lv60: f64) -> RawRow {
        RawRow::new()
            .with(STONE_NAME_COLUMN, name)
            .with(LABEL_COLUMN, name)
            .with("lv.60", lv60)
    }

    fn index() -> MasterDataIndex {
        let stats = [
            stat("HP", "HP", 100.0),
            stat("HP再生", "HP再生", 5.0),
            stat("物理攻撃力", "物攻", 20.0),
            stat("クリティカル発生率", "クリ率", 0.1),
        ];
        let stones = [
            stone("HP", 40.0),
            stone("HP回復", 2.0),
            stone("クリティカル率", 0.05),
            stone("幸運", 3.0),
        ];
        let talismans = [RawRow::new()
            .with(TALISMAN_NAME_COLUMN, "炎の護符")
            .with(TALISMAN_NAME_EN_COLUMN, "Flame Charm")
            .with("legendary;set2-1", "クリティカル発生率")
            .with("rare;set3-1", "物理攻撃力")
            .with("rare;set4-1", "HP")
            .with("rare;set4-2", "クリティカル発生率")];
        MasterDataIndex::build(&stats, &stones, &talismans).unwrap()
    }

    fn wear(loadout: &mut Loadout, slots: &[EquipmentSlot], rarity: Rarity) {
        for kind in slots {
            loadout.set_talisman(*kind, Some("炎の護符".to_string()));
            loadout.set_rarity(*kind, rarity);
        }
    }

    #[test]
    fn test_empty_loadout_has_no_rows() {
        let index = index();
        let totals =
            LoadoutAggregator::new(&index).compute_totals(&Loadout::new(false), Level::Lv60);
        assert!(totals.is_empty());
        assert!(totals.rows(&index).is_empty());
        assert!(totals.talismans.is_empty());
        assert!(totals.stones.is_empty());
    }

    #[test]
    fn test_set3_then_set4_replaces() {
        let index = index();
        let aggregator = LoadoutAggregator::new(&index);
        let mut loadout = Loadout::new(false);
        wear(
            &mut loadout,
            &[EquipmentSlot::Ring1, EquipmentSlot::Ring2, EquipmentSlot::Earring1],
            Rarity::Rare,
        );

        let totals = aggregator.compute_totals(&loadout, Level::Lv60);
        let activation = totals.activation("炎の護符").unwrap();
        assert_eq!(activation.tier, SetTier::Set3);
        assert_eq!(activation.worn, 3);
        assert_eq!(activation.name_en, "Flame Charm");
        assert!((totals.flat("物理攻撃力") - 20.0).abs() < f64::EPSILON);

        wear(&mut loadout, &[EquipmentSlot::Earring2], Rarity::Rare);
        let totals = aggregator.compute_totals(&loadout, Level::Lv60);
        let activation = totals.activation("炎の護符").unwrap();
        assert_eq!(activation.tier, SetTier::Set4);
        assert_eq!(activation.worn, 4);
        assert_eq!(totals.flat("物理攻撃力"), 0.0);
        assert!(!totals.flat.contains_key("物理攻撃力"));
        assert!((totals.flat("HP") - 100.0).abs() < f64::EPSILON);
        assert!((totals.percent("クリティカル発生率") - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_stone_and_set_percent_accumulate() {
        let index = index();
        let mut loadout = Loadout::new(false);
        wear(&mut loadout, &[EquipmentSlot::Head, EquipmentSlot::Body], Rarity::Legendary);
        loadout.set_stone(EquipmentSlot::Head, StonePosition::First, Some("クリティカル率".to_string()));

        let totals = LoadoutAggregator::new(&index).compute_totals(&loadout, Level::Lv60);
        assert!((totals.percent("クリティカル発生率") - 0.15).abs() < 1e-12);
        let rows = totals.rows(&index);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "クリ率");
        assert_eq!(rows[0].value_text(), "+15.0%");

        let activation = totals.activation("炎の護符").unwrap();
        assert_eq!(activation.tier, SetTier::Set2);
        assert_eq!(activation.lines[0].text(), "クリ率 +10.0%");
    }

    #[test]
    fn test_detail_lines_match_totals() {
        let index = index();
        let mut loadout = Loadout::new(false);
        wear(
            &mut loadout,
            &[EquipmentSlot::Head, EquipmentSlot::Body, EquipmentSlot::Arms, EquipmentSlot::Legs],
            Rarity::Rare,
        );
        let totals = LoadoutAggregator::new(&index).compute_totals(&loadout, Level::Lv60);

        let mut from_lines = StatAccumulator::new();
        for line in &totals.talismans[0].lines {
            from_lines.add_stat(&line.stat, line.value);
        }
        let (flat, percent) = from_lines.finish();
        assert_eq!(flat, totals.flat);
        assert_eq!(percent, totals.percent);
    }

    #[test]
    fn test_rarity_is_last_write_wins() {
        let index = index();
        let aggregator = LoadoutAggregator::new(&index);
        let mut loadout = Loadout::new(false);
        wear(&mut loadout, &[EquipmentSlot::Ring1, EquipmentSlot::Ring2], Rarity::Legendary);
        wear(&mut loadout, &[EquipmentSlot::Earring1], Rarity::Rare);

        // Earring1 comes after the rings in the roster, so rare decides: 3 rare copies.
        let totals = aggregator.compute_totals(&loadout, Level::Lv60);
        let activation = totals.activation("炎の護符").unwrap();
        assert_eq!(activation.rarity, Rarity::Rare);
        assert_eq!(activation.tier, SetTier::Set3);

        loadout.set_rarity(EquipmentSlot::Earring1, Rarity::Legendary);
        loadout.set_rarity(EquipmentSlot::Ring1, Rarity::Rare);
        // Legendary decides now, and legendary defines no SET3.
        let totals = aggregator.compute_totals(&loadout, Level::Lv60);
        assert!(totals.activation("炎の護符").is_none());
        assert!(totals.is_empty());
    }

    #[test]
    fn test_stone_usage_detail() {
        let index = index();
        let mut loadout = Loadout::new(false);
        for kind in [EquipmentSlot::Head, EquipmentSlot::Body] {
            loadout.set_stone(kind, StonePosition::First, Some("HP".to_string()));
            loadout.set_stone(kind, StonePosition::Second, Some("HP回復".to_string()));
        }
        loadout.set_stone(EquipmentSlot::Bag, StonePosition::Third, Some("幸運".to_string()));

        let totals = LoadoutAggregator::new(&index).compute_totals(&loadout, Level::Lv60);
        assert!((totals.flat("HP") - 80.0).abs() < f64::EPSILON);
        assert!((totals.flat("HP再生") - 4.0).abs() < f64::EPSILON);
        assert!(!totals.flat.contains_key("幸運"));

        let names: Vec<&str> = totals.stones.iter().map(|s| s.stone.as_str()).collect();
        assert_eq!(names, vec!["HP", "HP回復", "幸運"]);
        let hp = totals.stone_usage("HP").unwrap();
        assert_eq!(hp.count, 2);
        assert_eq!(hp.value_text(), "+40 × 2");
        let luck = totals.stone_usage("幸運").unwrap();
        assert_eq!(luck.count, 1);
        assert_eq!(luck.stat, None);
    }

    #[test]
    fn test_missing_level_contributes_nothing() {
        let index = index();
        let mut loadout = Loadout::new(false);
        loadout.set_stone(EquipmentSlot::Head, StonePosition::First, Some("HP".to_string()));
        wear(&mut loadout, &[EquipmentSlot::Ring1, EquipmentSlot::Ring2], Rarity::Legendary);

        let totals = LoadoutAggregator::new(&index).compute_totals(&loadout, Level::Lv110);
        assert!(totals.is_empty());
        assert_eq!(totals.stone_usage("HP").unwrap().unit_value, None);
        assert_eq!(totals.stone_usage("HP").unwrap().value_text(), "- × 1");
        // The tier is defined, so the set still reports as active with no lines.
        assert!(totals.activation("炎の護符").unwrap().lines.is_empty());
    }

    #[test]
    fn test_percent_row_format() {
        assert_eq!(format::value_text(None, Some(0.05 + 0.1)), "+15.0%");
    }

    const STONES: &[&str] = &["HP", "HP回復", "クリティカル率", "幸運"];

    fn slot_strategy() -> impl Strategy<Value = (Option<bool>, usize, [Option<&'static str>; 3])> {
        (
            prop::option::of(any::<bool>()),
            0usize..3,
            [
                prop::option::of(prop::sample::select(STONES)),
                prop::option::of(prop::sample::select(STONES)),
                prop::option::of(prop::sample::select(STONES)),
            ],
        )
    }

    proptest! {
        #[test]
        fn compute_totals_is_deterministic(slots in prop::collection::vec(slot_strategy(), 12)) {
            let index = index();
            let mut loadout = Loadout::new(false);
            for (kind, (talisman, rarity, stones)) in EquipmentSlot::roster().iter().zip(slots) {
                if talisman.is_some() {
                    loadout.set_talisman(*kind, Some("炎の護符".to_string()));
                }
                loadout.set_rarity(*kind, Rarity::all()[rarity]);
                for (position, stone) in StonePosition::all().iter().zip(stones) {
                    loadout.set_stone(*kind, *position, stone.map(str::to_string));
                }
            }

            let aggregator = LoadoutAggregator::new(&index);
            let first = aggregator.compute_totals(&loadout, Level::Lv60);
            let second = aggregator.compute_totals(&loadout, Level::Lv60);
            prop_assert_eq!(&first, &second);
            prop_assert!(first.flat.values().chain(first.percent.values()).all(|v| *v != 0.0));
        }
    }
}
