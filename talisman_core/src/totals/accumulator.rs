//! StatAccumulator - Collects stat contributions before they become totals

use crate::classify::{stat_kind, StatKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single addition to a stat, already classified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    /// Canonical stat name
    pub stat: String,
    /// Flat amount, or a fraction for percent stats
    pub value: f64,
    pub kind: StatKind,
}

impl Contribution {
    pub fn new(stat: impl Into<String>, value: f64) -> Self {
        let stat = stat.into();
        let kind = stat_kind(&stat);
        Contribution { stat, value, kind }
    }
}

/// Accumulates flat and percent contributions keyed by stat name
#[derive(Debug, Clone, Default)]
pub struct StatAccumulator {
    flat: BTreeMap<String, f64>,
    percent: BTreeMap<String, f64>,
}

impl StatAccumulator {
    pub fn new() -> Self {
        StatAccumulator::default()
    }

    /// Add a contribution to the flat or percent side depending on its kind
    pub fn add(&mut self, contribution: &Contribution) {
        let totals = match contribution.kind {
            StatKind::Flat => &mut self.flat,
            StatKind::Percent => &mut self.percent,
        };
        *totals.entry(contribution.stat.clone()).or_insert(0.0) += contribution.value;
    }

    /// Classify by name and add
    pub fn add_stat(&mut self, stat: &str, value: f64) {
        self.add(&Contribution::new(stat, value));
    }

    /// Consume into (flat, percent) maps with zero totals dropped
    pub fn finish(mut self) -> (BTreeMap<String, f64>, BTreeMap<String, f64>) {
        self.flat.retain(|_, v| *v != 0.0);
        self.percent.retain(|_, v| *v != 0.0);
        (self.flat, self.percent)
    }
}
