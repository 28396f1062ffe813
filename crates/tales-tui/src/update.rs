//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::render::{HEADER_HEIGHT, HELP_HEIGHT};
use crate::state::{AppState, Screen};
use crate::{items, session};

/// Effects to run before the first frame.
pub fn init(app: &mut AppState) -> Vec<UiEffect> {
    match &mut app.screen {
        Screen::Items(state) => items::mount(state),
        Screen::Session(_) => vec![],
    }
}

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            if app.is_busy() {
                app.spinner_frame = app.spinner_frame.wrapping_add(1);
            }
            vec![]
        }
        UiEvent::Frame { height, .. } => {
            app.viewport_height = height;
            vec![]
        }
        UiEvent::Terminal(event) => handle_terminal_event(app, event),
        UiEvent::ItemsLoaded { result } => {
            if let Screen::Items(state) = &mut app.screen {
                items::handle_loaded(state, result);
            }
            vec![]
        }
        UiEvent::AuthCompleted { ticket, result } => {
            if let Screen::Session(state) = &mut app.screen {
                session::handle_auth_completed(state, ticket, result);
            }
            vec![]
        }
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => {
            if let Screen::Session(state) = &mut app.screen {
                session::handle_paste(state, &text);
            }
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![UiEffect::Quit];
    }

    let page = app
        .viewport_height
        .saturating_sub(HEADER_HEIGHT + HELP_HEIGHT + 2);
    match &mut app.screen {
        Screen::Items(state) => {
            let cards = usize::from(page / items::CARD_HEIGHT);
            items::handle_key(state, key, cards)
        }
        Screen::Session(state) => session::handle_key(state, key, page),
    }
}
