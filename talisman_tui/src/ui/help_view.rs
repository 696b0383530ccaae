//! Help tab view

use super::section_title;
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, _app: &App, area: Rect) {
    let lines = vec![
        section_title("Navigation"),
        key_line("1-4", "Jump to tab (Loadout/Totals/Effects/Help)"),
        key_line("Tab / Shift+Tab", "Next/previous tab"),
        key_line("↑/k  ↓/j", "Select slot / scroll"),
        key_line("q / Ctrl+C", "Quit"),
        Line::from(""),
        section_title("Loadout"),
        key_line("←/h  →/l", "Select field (talisman, rarity, stones 1-3)"),
        key_line("Enter / Space", "Next talisman or rarity, open the stone picker"),
        key_line("↑/↓ then Enter", "Move in the stone picker, socket the stone"),
        key_line("Esc", "Close the stone picker"),
        key_line("Backspace / Del", "Clear the field"),
        key_line("L", "Cycle level (60/75/100/110)"),
        key_line("s", "Toggle shield slot (clears the loadout)"),
        key_line("r", "Reset the loadout"),
        Line::from(""),
        section_title("Rules"),
        Line::from(""),
        Line::from(Span::styled(
            "Set bonuses:",
            Style::default().fg(Color::Yellow),
        )),
        Line::from("  LEG: 2 → SET2, 3 → SET3, 4+ → SET4"),
        Line::from("  RARE: 3 → SET3, 4+ → SET4"),
        Line::from("  UNC: 4+ → SET4"),
        Line::from("  Only the highest reached tier applies"),
        Line::from("  Mixed rarities: the last slot's rarity decides"),
        Line::from(""),
        Line::from(Span::styled(
            "Power stones:",
            Style::default().fg(Color::Yellow),
        )),
        Line::from("  A stone fits at most one position of a slot"),
        Line::from("  The first weapon stones are copied to every empty"),
        Line::from("  position of the other slots, once per loadout"),
        Line::from(""),
        Line::from(Span::styled(
            "Values:",
            Style::default().fg(Color::Yellow),
        )),
        Line::from("  Stats named with 率 or 倍率 are percentages"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Help "));

    f.render_widget(paragraph, area);
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:20}", key),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
