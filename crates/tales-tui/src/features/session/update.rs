//! Session screen reducer.
//!
//! Key handling branches on the session status: the sign-in form while
//! unauthenticated, the story toolbar once a token is held.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tales_core::api::{ApiResult, AuthAction, AuthResponse, AuthTicket};
use tales_core::session::FontMode;

use super::state::{Focus, SessionState};
use crate::common::text::sanitize_paste;
use crate::effects::UiEffect;

pub fn handle_key(state: &mut SessionState, key: KeyEvent, page: u16) -> Vec<UiEffect> {
    if state.controller.is_authenticated() {
        handle_story_key(state, key, page)
    } else {
        handle_form_key(state, key)
    }
}

fn handle_form_key(state: &mut SessionState, key: KeyEvent) -> Vec<UiEffect> {
    let plain = !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

    match key.code {
        KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Tab | KeyCode::Down => {
            state.focus = state.focus.next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focus = state.focus.prev();
            vec![]
        }
        KeyCode::Left if state.focus == Focus::Register => {
            state.focus = Focus::Login;
            vec![]
        }
        KeyCode::Right if state.focus == Focus::Login => {
            state.focus = Focus::Register;
            vec![]
        }
        KeyCode::Enter => match state.focus {
            Focus::Phone => {
                state.focus = Focus::Password;
                vec![]
            }
            Focus::Password | Focus::Login => submit(state, AuthAction::Login),
            Focus::Register => submit(state, AuthAction::Register),
        },
        KeyCode::Backspace => {
            if let Some(buffer) = state.focused_buffer() {
                buffer.pop();
            }
            vec![]
        }
        KeyCode::Char(c) if plain => {
            if let Some(buffer) = state.focused_buffer() {
                buffer.push(c);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_story_key(state: &mut SessionState, key: KeyEvent, page: u16) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('1') => set_mode(state, FontMode::Normal),
        KeyCode::Char('2') => set_mode(state, FontMode::Dyslexia),
        KeyCode::Char('3') => set_mode(state, FontMode::Adhd),
        KeyCode::Left => set_mode(state, state.controller.mode().prev()),
        KeyCode::Right => set_mode(state, state.controller.mode().next()),
        KeyCode::Char('l') => {
            if let Err(e) = state.controller.logout() {
                tracing::warn!("Failed to remove session token: {e:#}");
            }
            state.focus = Focus::Phone;
            state.story_scroll = 0;
            vec![]
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.scroll_story_up(1);
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.scroll_story_down(1);
            vec![]
        }
        KeyCode::PageUp => {
            state.scroll_story_up(page.max(1));
            vec![]
        }
        KeyCode::PageDown => {
            state.scroll_story_down(page.max(1));
            vec![]
        }
        KeyCode::Home => {
            state.story_scroll = 0;
            vec![]
        }
        _ => vec![],
    }
}

fn set_mode(state: &mut SessionState, mode: FontMode) -> Vec<UiEffect> {
    state.controller.set_mode(mode);
    state.story_scroll = 0;
    vec![]
}

fn submit(state: &mut SessionState, action: AuthAction) -> Vec<UiEffect> {
    match state.controller.submit(action) {
        Some(request) => vec![UiEffect::Authenticate { request }],
        None => vec![],
    }
}

/// Appends pasted text to the focused field.
pub fn handle_paste(state: &mut SessionState, text: &str) {
    if state.controller.is_authenticated() {
        return;
    }
    let text = sanitize_paste(text);
    if let Some(buffer) = state.focused_buffer() {
        buffer.push_str(&text);
    }
}

/// Applies an auth result. A token that cannot be saved keeps the session
/// for this run only.
pub fn handle_auth_completed(
    state: &mut SessionState,
    ticket: AuthTicket,
    result: ApiResult<AuthResponse>,
) {
    let applied = state.controller.complete(ticket, result).unwrap_or_else(|e| {
        tracing::warn!("Failed to persist session token: {e:#}");
        true
    });
    if applied && state.controller.is_authenticated() {
        state.story_scroll = 0;
    }
}
