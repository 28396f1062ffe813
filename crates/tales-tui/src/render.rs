//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};
use tales_core::story;

use crate::state::{AppState, Screen};
use crate::{items, session};

/// Rows used by the title header.
pub const HEADER_HEIGHT: u16 = 3;

/// Rows used by the bottom key hint.
pub const HELP_HEIGHT: u16 = 1;

const ITEMS_HEADER: &str = "Tales: Items";

/// Spinner frames for loading indicators.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

pub fn render(app: &AppState, frame: &mut Frame) {
    let [header_area, body_area, help_area] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(HELP_HEIGHT),
    ])
    .areas(frame.area());

    let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];

    match &app.screen {
        Screen::Items(state) => {
            render_header(frame, header_area, ITEMS_HEADER);
            items::render_items(state, frame, body_area, spinner);
            render_help(frame, help_area, "\u{2191}/\u{2193}: scroll  q: quit");
        }
        Screen::Session(state) => {
            render_header(frame, header_area, story::HEADER);
            session::render_session(state, frame, body_area, spinner);
        }
    }
}

fn render_header(frame: &mut Frame, area: Rect, title: &str) {
    let para = Paragraph::new(Span::styled(
        title,
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(para, area);
}

fn render_help(frame: &mut Frame, area: Rect, text: &str) {
    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray))),
        area,
    );
}
