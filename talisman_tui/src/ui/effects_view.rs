//! Effects tab view - set bonus reference per talisman and rarity

use super::{muted_line, rarity_badge};
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use talisman_core::Rarity;

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let table = app.session.effect_table();
    let mut lines: Vec<Line> = vec![];

    if table.is_empty() {
        lines.push(muted_line("No talismans defined"));
    }

    for row in &table.rows {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", row.talisman),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(row.talisman_en.clone(), Style::default().fg(Color::DarkGray)),
        ]));

        for rarity in Rarity::all() {
            let tiers = row.tiers(*rarity);
            let mut spans = vec![Span::raw("  "), rarity_badge(*rarity)];
            if tiers.is_empty() {
                spans.push(Span::styled(" -", Style::default().fg(Color::DarkGray)));
            }
            for tier in tiers {
                let labels: Vec<&str> = tier.stats.iter().map(|s| s.label.as_str()).collect();
                spans.push(Span::styled(
                    format!(" {}: ", tier.tier.label()),
                    Style::default().fg(Color::Cyan),
                ));
                spans.push(Span::styled(
                    labels.join(", "),
                    Style::default().fg(Color::White),
                ));
            }
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" 効果一覧 "))
        .scroll((app.effects_scroll as u16, 0));

    f.render_widget(paragraph, area);
}
