use std::time::Instant;

use ratatui::prelude::*;
use ratatui::widgets::block::Title;
use ratatui::widgets::*;

use crate::events::RatedEvent;
use crate::ui::rating::{Badge, CardBucket, PageBucket, color, emoji};
use crate::ui::state::MeterState;

const ACCENT: Color = Color::Rgb(0xff, 0x01, 0x00);
const CARD_HEIGHT: u16 = 6;

pub fn draw(f: &mut Frame, s: &MeterState, now: Instant) {
    let area = f.size();
    let level = s.insanity_level();

    let page = Block::default().style(
        Style::default()
            .bg(color(PageBucket::for_rating(level).rgb()))
            .fg(Color::Black),
    );
    f.render_widget(page, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .margin(1)
        .split(area);

    let header = Paragraph::new(Line::from(Span::styled(
        format!("How insane is this? {}", emoji(level)),
        Style::default().add_modifier(Modifier::BOLD | Modifier::ITALIC),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, chunks[0]);

    let input = Paragraph::new(s.query.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT))
            .title("What happened?"),
    );
    f.render_widget(input, chunks[1]);

    let button = if s.is_loading() {
        Paragraph::new("🤔 Analyzing...")
            .style(Style::default().bg(Color::Gray).fg(Color::White))
    } else {
        Paragraph::new("Rate Insanity! [Enter]").style(
            Style::default()
                .bg(ACCENT)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    };
    f.render_widget(button.alignment(Alignment::Center), chunks[2]);

    draw_cards(f, s.events(), chunks[3]);

    let status = match s.last_error() {
        Some(err) => Line::from(Span::styled(
            format!("Error: {}", err),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        None => Line::raw("Enter: rate  Backspace: edit  Esc: quit"),
    };
    f.render_widget(Paragraph::new(status), chunks[4]);

    if s.overlay_visible(now) {
        let popup = centered_rect(area, 32, 3);
        f.render_widget(Clear, popup);
        f.render_widget(
            Paragraph::new("🤯 That's INSANE! 🤯")
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .bg(Color::White)
                        .fg(ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
                .block(Block::default().borders(Borders::ALL)),
            popup,
        );
    }
}

fn draw_cards(f: &mut Frame, events: &[RatedEvent], area: Rect) {
    if events.is_empty() {
        return;
    }

    let mut constraints: Vec<Constraint> = events
        .iter()
        .map(|_| Constraint::Length(CARD_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (idx, (event, row)) in events.iter().zip(rows.iter()).enumerate() {
        let bucket = CardBucket::for_rating(event.insanity_rating);
        let badge = Span::styled(
            format!(" {}/10 ", event.insanity_rating),
            Style::default()
                .bg(color(Badge::for_rating(event.insanity_rating).rgb()))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

        let block = Block::default()
            .borders(Borders::ALL)
            // The user's own event stands out.
            .border_type(if idx == 0 {
                BorderType::Thick
            } else {
                BorderType::Plain
            })
            .border_style(Style::default().fg(color(bucket.border_rgb())))
            .title(Span::styled(
                format!("{} {}", event.event, emoji(event.insanity_rating)),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .title(Title::from(badge).alignment(Alignment::Right));

        let card = Paragraph::new(event.description.as_str())
            .wrap(Wrap { trim: true })
            .style(
                Style::default()
                    .bg(color(bucket.fill_rgb()))
                    .fg(Color::Black),
            )
            .block(block);
        f.render_widget(card, *row);
    }
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
