//! Item screen view.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tales_core::items::{ItemCard, ItemsView};

use super::ItemsState;
use crate::common::text::truncate_with_ellipsis;

/// Rows taken by one card: border, title, body, border.
pub const CARD_HEIGHT: u16 = 4;

pub fn render_items(state: &ItemsState, frame: &mut Frame, area: Rect, spinner: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Items from Backend ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match state.viewer.view() {
        ItemsView::Placeholder(text) => {
            let line = Line::from(vec![
                Span::styled(format!("{spinner} "), Style::default().fg(Color::Cyan)),
                Span::raw(text),
            ]);
            frame.render_widget(
                Paragraph::new(line).alignment(Alignment::Center),
                centered_row(inner),
            );
        }
        ItemsView::Error(message) => {
            let para = Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)))
                .alignment(Alignment::Center);
            frame.render_widget(para, centered_row(inner));
        }
        ItemsView::Cards(cards) if cards.is_empty() => {
            let para = Paragraph::new(Span::styled(
                "No items.",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center);
            frame.render_widget(para, centered_row(inner));
        }
        ItemsView::Cards(cards) => render_cards(&cards, state.scroll, frame, inner),
    }
}

fn render_cards(cards: &[ItemCard<'_>], scroll: usize, frame: &mut Frame, area: Rect) {
    let mut y = area.y;
    for card in cards.iter().skip(scroll) {
        if y + CARD_HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect::new(area.x, y, area.width, CARD_HEIGHT);
        render_card(card, frame, rect);
        y += CARD_HEIGHT;
    }
}

fn render_card(card: &ItemCard<'_>, frame: &mut Frame, area: Rect) {
    let title_width = area.width.saturating_sub(4) as usize;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(Span::styled(
            truncate_with_ellipsis(card.title, title_width),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::raw(card.body)),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn centered_row(area: Rect) -> Rect {
    Rect::new(area.x, area.y + area.height / 2, area.width, area.height.min(1))
}
