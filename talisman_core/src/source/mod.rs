//! StatSource - Trait and implementations for stat providers

mod stone;
mod talisman;

pub use stone::StoneSource;
pub use talisman::{TalismanSetSource, TalismanUsage};

use crate::master::MasterDataIndex;
use crate::totals::{Contribution, TalismanActivation};
use crate::types::Level;

/// Anything that contributes stats to the totals
pub trait StatSource {
    /// Identifier for this source (stone or talisman name)
    fn id(&self) -> &str;

    /// Application order (lower first).
    /// Stones: 0, talisman sets: 100.
    fn priority(&self) -> i32 {
        0
    }

    /// Classified contributions at `level`. Missing data yields nothing.
    fn contributions(&self, index: &MasterDataIndex, level: Level) -> Vec<Contribution>;

    /// Set bonus detail for contributions this source produced, if it is one
    fn activation(
        &self,
        _index: &MasterDataIndex,
        _contributions: &[Contribution],
    ) -> Option<TalismanActivation> {
        None
    }
}
