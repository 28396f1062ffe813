//! Session screen view: sign-in form or story.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tales_core::api::AuthAction;
use tales_core::session::FontMode;
use tales_core::story::{self, Segment};
use unicode_width::UnicodeWidthStr;

use super::state::{Focus, SessionState};
use crate::common::text::mask_secret;

const PHONE_PLACEHOLDER: &str = "1234567890";
const PASSWORD_PLACEHOLDER: &str = "••••••••";
const FORM_WIDTH: u16 = 44;

pub fn render_session(state: &SessionState, frame: &mut Frame, area: Rect, spinner: &str) {
    if state.controller.is_authenticated() {
        render_story(state, frame, area);
    } else {
        render_form(state, frame, area, spinner);
    }
}

fn render_form(state: &SessionState, frame: &mut Frame, area: Rect, spinner: &str) {
    let width = FORM_WIDTH.min(area.width);
    let form_area = Rect::new(area.x + (area.width - width) / 2, area.y, width, area.height);

    let block = Block::default().borders(Borders::ALL).title(" Sign In ");
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let [phone_area, password_area, error_area, actions_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let controller = &state.controller;
    render_field(
        frame,
        phone_area,
        "Phone (10 digits)",
        controller.phone(),
        PHONE_PLACEHOLDER,
        state.focus == Focus::Phone,
    );
    let masked = mask_secret(controller.password());
    render_field(
        frame,
        password_area,
        "Password",
        &masked,
        PASSWORD_PLACEHOLDER,
        state.focus == Focus::Password,
    );

    if let Some(error) = controller.error() {
        frame.render_widget(
            Paragraph::new(Span::styled(error, Style::default().fg(Color::Red))),
            error_area,
        );
    }

    let actions = Line::from(vec![
        button(AuthAction::Login.label(), state.focus == Focus::Login),
        Span::raw("  "),
        button(AuthAction::Register.label(), state.focus == Focus::Register),
    ]);
    frame.render_widget(Paragraph::new(actions), actions_area);

    let status = match controller.pending() {
        Some(action) => Line::from(vec![
            Span::styled(format!("{spinner} "), Style::default().fg(Color::Cyan)),
            Span::styled(pending_label(action), Style::default().fg(Color::Yellow)),
        ]),
        None => Line::from(Span::styled(
            "Tab: next  Enter: submit  Esc: quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(status), status_area);
}

fn pending_label(action: AuthAction) -> &'static str {
    match action {
        AuthAction::Login => "Signing in...",
        AuthAction::Register => "Registering...",
    }
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
) {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {label} "));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let content = if value.is_empty() {
        Span::styled(placeholder, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(value)
    };
    frame.render_widget(Paragraph::new(content), inner);

    if focused && inner.height > 0 {
        let offset = u16::try_from(value.width()).unwrap_or(u16::MAX);
        let x = inner.x.saturating_add(offset).min(inner.right().saturating_sub(1));
        frame.set_cursor_position((x, inner.y));
    }
}

fn button(label: &str, focused: bool) -> Span<'static> {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    Span::styled(format!("[ {label} ]"), style)
}

fn render_story(state: &SessionState, frame: &mut Frame, area: Rect) {
    let [toolbar_area, story_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(Paragraph::new(toolbar_line(state.controller.mode())), toolbar_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", story::TITLE));
    let lines = story_lines(state.controller.mode());
    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.story_scroll, 0));
    frame.render_widget(para, story_area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "1/2/3 or \u{2190}/\u{2192}: font  \u{2191}/\u{2193}: scroll  l: logout  q: quit",
            Style::default().fg(Color::DarkGray),
        )),
        help_area,
    );
}

/// Font toggle with the active mode marked, followed by the logout hint.
pub fn toolbar_line(active: FontMode) -> Line<'static> {
    let mut spans = vec![Span::raw("Font: ")];
    for (i, mode) in FontMode::all().iter().enumerate() {
        let is_active = *mode == active;
        let text = if is_active {
            format!("[{}. {}*]", i + 1, mode.label())
        } else {
            format!("[{}. {}]", i + 1, mode.label())
        };
        let style = if is_active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Magenta)
        };
        spans.push(Span::styled(text, style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("  [l] Logout", Style::default().fg(Color::Cyan)));
    Line::from(spans)
}

fn story_lines(mode: FontMode) -> Vec<Line<'static>> {
    story::layout(story::BODY, mode)
        .into_iter()
        .map(|segments| Line::from(segments.into_iter().map(segment_span).collect::<Vec<_>>()))
        .collect()
}

fn segment_span(segment: Segment<'static>) -> Span<'static> {
    if segment.emphasis {
        Span::styled(segment.text, Style::default().add_modifier(Modifier::BOLD))
    } else {
        Span::raw(segment.text)
    }
}
