//! Loadout tab view - slot editing

use super::{muted_line, rarity_badge, rarity_color};
use crate::app::{App, Field};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use talisman_core::{Rarity, Slot, StonePosition};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    draw_slots(f, app, chunks[0]);
    draw_options(f, app, chunks[1]);
}

fn draw_slots(f: &mut Frame, app: &App, area: Rect) {
    let loadout = app.session.loadout();
    let index = app.session.index();
    let field = app.current_field();

    let mut lines: Vec<Line> = vec![];
    for (i, slot) in loadout.slots().iter().enumerate() {
        let is_selected = i == app.selected_slot;
        let (prefix, style) = if is_selected {
            ("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        } else {
            ("  ", Style::default().fg(Color::White))
        };
        let highlight = |target: Field, style: Style| {
            if is_selected && target == field {
                style.add_modifier(Modifier::REVERSED)
            } else {
                style
            }
        };

        let talisman = slot.talisman.as_deref().unwrap_or("(なし)");
        let talisman_style = if slot.talisman.is_some() {
            Style::default().fg(rarity_color(slot.rarity))
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut spans = vec![
            Span::styled(prefix, style),
            Span::styled(format!("{:8}", slot.kind.label()), style),
            Span::styled(format!("{:10}", talisman), highlight(Field::Talisman, talisman_style)),
            Span::raw(" "),
        ];
        let badge = rarity_badge(slot.rarity);
        let badge_style = highlight(Field::Rarity, badge.style);
        spans.push(Span::styled(badge.content, badge_style));

        for position in StonePosition::all() {
            let text = match slot.stone(*position) {
                Some(stone) => index.stone(stone).map_or(stone, |d| d.label.as_str()).to_string(),
                None => "-".to_string(),
            };
            let stone_style = if slot.stone(*position).is_some() {
                Style::default().fg(Color::Magenta)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!("[{}]", text),
                highlight(Field::Stone(*position), stone_style),
            ));
        }

        lines.push(Line::from(spans));
    }

    if let Some(status) = &app.status {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", status),
            Style::default().fg(Color::Green),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Slots "),
    );

    f.render_widget(paragraph, area);
}

fn draw_options(f: &mut Frame, app: &App, area: Rect) {
    let slot_kind = app.current_slot();
    let field = app.current_field();
    let mut lines: Vec<Line> = vec![];

    if let Some(slot) = app.session.loadout().slot(slot_kind) {
        match field {
            Field::Talisman => talisman_options(app, slot, &mut lines),
            Field::Rarity => rarity_options(slot, &mut lines),
            Field::Stone(position) => stone_options(app, slot, position, &mut lines),
        }
    }

    lines.push(Line::from(""));
    lines.push(muted_line(match (field, app.stone_cursor) {
        (Field::Stone(_), Some(_)) => "[↑/↓] Move  [Enter] Socket  [Esc] Cancel",
        (Field::Stone(_), None) => "[Enter] Pick  [Del] Clear",
        _ => "[Enter] Next  [Del] Clear",
    }));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} / {} ", slot_kind.label(), field.name())),
    );

    f.render_widget(paragraph, area);
}

fn marker(selected: bool) -> &'static str {
    if selected {
        "● "
    } else {
        "  "
    }
}

fn talisman_options(app: &App, slot: &Slot, lines: &mut Vec<Line>) {
    lines.push(Line::from(format!(
        "{}タリスマン選択",
        marker(slot.talisman.is_none())
    )));
    for talisman in app.session.index().talismans() {
        let selected = slot.talisman.as_deref() == Some(talisman.name.as_str());
        let style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}{}", marker(selected), talisman.name), style),
            Span::styled(
                format!("  {}", talisman.name_en),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
}

fn rarity_options(slot: &Slot, lines: &mut Vec<Line>) {
    for rarity in Rarity::all().iter().rev() {
        let selected = slot.rarity == *rarity;
        lines.push(Line::from(vec![
            Span::raw(marker(selected)),
            rarity_badge(*rarity),
            Span::styled(
                format!(" {}", rarity.label_jp()),
                Style::default().fg(rarity_color(*rarity)),
            ),
        ]));
    }
}

fn stone_options(app: &App, slot: &Slot, position: StonePosition, lines: &mut Vec<Line>) {
    let cursor = app.stone_cursor;
    let at_cursor = |row: usize, style: Style| {
        if cursor == Some(row) {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    };

    lines.push(Line::from(Span::styled(
        format!("{}ストーン選択", marker(slot.stone(position).is_none())),
        at_cursor(0, Style::default().fg(Color::White)),
    )));
    for (i, option) in app.session.stone_options(slot.kind, position).iter().enumerate() {
        let style = if option.disabled {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
        } else if option.selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker(option.selected), option.text),
            at_cursor(i + 1, style),
        )));
    }
    if app.session.index().stones().is_empty() {
        lines.push(muted_line("No power stones defined"));
    }
}
