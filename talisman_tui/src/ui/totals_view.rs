//! Totals tab view - stat totals, active set bonuses and stone usage

use super::{muted_line, rarity_badge, section_title};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use talisman_core::totals::{NO_SET_BONUS_MESSAGE, NO_STATS_MESSAGE, NO_STONES_MESSAGE};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    draw_stat_rows(f, app, chunks[0]);
    draw_details(f, app, chunks[1]);
}

fn draw_stat_rows(f: &mut Frame, app: &App, area: Rect) {
    let rows = app.session.rows();
    let mut lines: Vec<Line> = vec![];

    if rows.is_empty() {
        lines.push(muted_line(NO_STATS_MESSAGE));
    }
    for row in &rows {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:14}", row.label), Style::default().fg(Color::Gray)),
            Span::styled(row.value_text(), Style::default().fg(Color::Green)),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" 合計 {} ", app.session.level())),
        )
        .scroll((app.totals_scroll as u16, 0));

    f.render_widget(paragraph, area);
}

fn draw_details(f: &mut Frame, app: &App, area: Rect) {
    let totals = app.session.totals();
    let mut lines: Vec<Line> = vec![section_title("Set Bonuses")];

    if totals.talismans.is_empty() {
        lines.push(muted_line(NO_SET_BONUS_MESSAGE));
    }
    for activation in &totals.talismans {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {} ", activation.name),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            rarity_badge(activation.rarity),
            Span::styled(
                format!(" {}", activation.summary()),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        for line in &activation.lines {
            lines.push(Line::from(Span::styled(
                format!("    {}", line.text()),
                Style::default().fg(Color::Green),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(section_title("Power Stones"));
    if totals.stones.is_empty() {
        lines.push(muted_line(NO_STONES_MESSAGE));
    }
    for usage in &totals.stones {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {}", usage.heading()),
                Style::default().fg(Color::Magenta),
            ),
            Span::styled(
                format!("  {}：{}", usage.label, usage.value_text()),
                Style::default().fg(Color::White),
            ),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Breakdown "))
        .scroll((app.totals_scroll as u16, 0));

    f.render_widget(paragraph, area);
}
