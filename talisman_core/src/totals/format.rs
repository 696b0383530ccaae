//! Value text formatting shared by every rendering of totals

use crate::classify::StatKind;

/// `+N` for a flat amount
pub fn flat_text(value: f64) -> String {
    format!("+{}", value)
}

/// `+N.N%` for a fraction, scaled ×100 and rounded to one decimal
pub fn percent_text(fraction: f64) -> String {
    format!("+{:.1}%", (fraction * 1000.0).round() / 10.0)
}

pub fn kind_text(kind: StatKind, value: f64) -> String {
    match kind {
        StatKind::Flat => flat_text(value),
        StatKind::Percent => percent_text(value),
    }
}

/// Combined text for a stat row, flat and percent parts joined by ` / `
pub fn value_text(flat: Option<f64>, percent: Option<f64>) -> String {
    let parts: Vec<String> = flat
        .filter(|v| *v != 0.0)
        .map(flat_text)
        .into_iter()
        .chain(percent.filter(|v| *v != 0.0).map(percent_text))
        .collect();
    parts.join(" / ")
}
